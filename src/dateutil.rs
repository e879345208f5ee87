//! Date formats and the conversion of date keys into canonical datetimes.
//!
//! Text keys are parsed the way strptime does: fields the format does not mention
//! default to month 1, day 1, year 1900 and midnight.
use crate::error::Error;
use chrono::format::{self, Item, Parsed, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// format of the date keys produced by the data collectors, e.g. 2021-01-31
pub const DESIRED_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const YEAR_FORMAT: &str = "%Y";
pub const MONTH_FORMAT: &str = "%Y-%m";

/// A date key of a series, either already canonical or still text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateKey {
    At(NaiveDateTime),
    Text(String),
}

impl DateKey {
    /// canonical keys are returned as they are, text keys are parsed with `format`
    pub fn normalize(&self, format: &str) -> Result<NaiveDateTime, Error> {
        match self {
            DateKey::At(dt) => Ok(*dt),
            DateKey::Text(s) => parse_datetime(s, format),
        }
    }
}

impl From<NaiveDateTime> for DateKey {
    fn from(dt: NaiveDateTime) -> Self {
        DateKey::At(dt)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(d: NaiveDate) -> Self {
        DateKey::At(d.and_time(NaiveTime::MIN))
    }
}

impl From<&str> for DateKey {
    fn from(s: &str) -> Self {
        DateKey::Text(s.to_string())
    }
}

impl From<String> for DateKey {
    fn from(s: String) -> Self {
        DateKey::Text(s)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateKey::At(dt) => write!(f, "{}", dt.format(DT_FORMAT)),
            DateKey::Text(s) => write!(f, "{}", s),
        }
    }
}

/// false if chrono cannot make sense of one of the specifiers
pub fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| item == Item::Error)
}

/// Parses `s` with the strftime `format`, filling the fields the format leaves out.
pub fn parse_datetime(s: &str, format: &str) -> Result<NaiveDateTime, Error> {
    let err = || Error::DateFormat {
        key: s.to_string(),
        format: format.to_string(),
    };
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, s, StrftimeItems::new(format)).map_err(|_| err())?;
    let date = fill_date(&mut parsed).ok_or_else(err)?;
    let time = fill_time(&mut parsed);
    Ok(date.and_time(time))
}

// the setters refuse to overwrite a field that the input already set,
// so the defaults only land in the missing fields
fn fill_date(parsed: &mut Parsed) -> Option<NaiveDate> {
    if let Ok(d) = parsed.to_naive_date() {
        return Some(d);
    }
    let _ = parsed.set_month(1);
    let _ = parsed.set_day(1);
    if let Ok(d) = parsed.to_naive_date() {
        return Some(d);
    }
    let _ = parsed.set_year(1900);
    parsed.to_naive_date().ok()
}

fn fill_time(parsed: &mut Parsed) -> NaiveTime {
    if let Ok(t) = parsed.to_naive_time() {
        return t;
    }
    let _ = parsed.set_minute(0);
    let _ = parsed.set_second(0);
    parsed.to_naive_time().unwrap_or(NaiveTime::MIN)
}
