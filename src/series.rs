use crate::dateutil::DateKey;
use crate::error::Error;
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim};
use indexmap::IndexMap;
use std::fs::File;
use std::iter::FromIterator;
use std::path::Path;
use tracing::{trace, warn};

/// Values of one series keyed by date, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesData {
    points: IndexMap<DateKey, f64>,
}

impl SeriesData {
    pub fn new() -> SeriesData {
        SeriesData {
            points: IndexMap::new(),
        }
    }

    /// sets the value of `key`; an existing key keeps its position
    pub fn insert<K: Into<DateKey>>(&mut self, key: K, value: f64) {
        self.points.insert(key.into(), value);
    }

    pub fn get(&self, key: &DateKey) -> Option<f64> {
        self.points.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, f64)> {
        self.points.iter().map(|(k, v)| (k, *v))
    }

    /// Converts every key into a canonical datetime, keeping the insertion order.
    /// Fails on the first key that does not match `format`.
    pub fn normalize(&self, format: &str) -> Result<Vec<(NaiveDateTime, f64)>, Error> {
        let mut out = Vec::with_capacity(self.points.len());
        for (key, value) in self.points.iter() {
            let dt = key.normalize(format)?;
            trace!(%key, %dt, "normalized date key");
            out.push((dt, *value));
        }
        Ok(out)
    }
}

impl<K: Into<DateKey>> FromIterator<(K, f64)> for SeriesData {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut data = SeriesData::new();
        for (k, v) in iter {
            data.insert(k, v);
        }
        data
    }
}

/// A named series; the name is also the label of its y-axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub data: SeriesData,
}

/// Ordered list of named series.
/// The position decides the axis (first one on the primary axis) and the color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesCollection {
    series: IndexMap<String, Series>,
}

impl SeriesCollection {
    pub fn new() -> SeriesCollection {
        SeriesCollection {
            series: IndexMap::new(),
        }
    }

    /// appends a series; an existing name gets its data replaced in place
    pub fn insert<S: Into<String>>(&mut self, name: S, data: SeriesData) {
        let name = name.into();
        match self.series.get_mut(&name) {
            Some(s) => s.data = data,
            None => {
                self.series.insert(name.clone(), Series { name, data });
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&SeriesData> {
        self.series.get(name).map(|s| &s.data)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SeriesData> {
        self.series.get_mut(name).map(|s| &mut s.data)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Values<'_, String, Series> {
        self.series.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.series.keys().map(|n| n.as_str()).collect()
    }

    /// Reads a wide csv: a header `date,<name>,<name>...`, then one date and one value per series per row.
    /// Values that do not parse are kept as NAN so that they show up as gaps.
    /// Date keys stay text, they are parsed at render time with the configured input format.
    pub fn from_csv<P: AsRef<Path>>(fin: P) -> Result<SeriesCollection, Error> {
        let file = File::open(fin.as_ref())?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(file);
        let names: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .skip(1)
            .map(|n| n.to_string())
            .collect();
        if names.is_empty() {
            return Err(Error::Input {
                line: 1,
                reason: "header has no series column".to_string(),
            });
        }
        let mut columns: Vec<SeriesData> = vec![SeriesData::new(); names.len()];
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
            let date = match record.get(0) {
                Some(d) if !d.is_empty() => d,
                _ => {
                    return Err(Error::Input {
                        line,
                        reason: "missing date".to_string(),
                    })
                }
            };
            for (i, (column, name)) in columns.iter_mut().zip(names.iter()).enumerate() {
                let raw = record.get(i + 1).unwrap_or("");
                let value = match raw.parse::<f64>() {
                    Ok(v) => v,
                    Err(_) => {
                        warn!(line, series = %name, value = raw, "invalid value, using NAN");
                        f64::NAN
                    }
                };
                column.insert(date, value);
            }
        }
        Ok(names.into_iter().zip(columns).collect())
    }
}

fn csv_error(e: csv::Error) -> Error {
    Error::Input {
        line: e.position().map(|p| p.line() as usize).unwrap_or(0),
        reason: e.to_string(),
    }
}

impl<S: Into<String>> FromIterator<(S, SeriesData)> for SeriesCollection {
    fn from_iter<I: IntoIterator<Item = (S, SeriesData)>>(iter: I) -> Self {
        let mut collection = SeriesCollection::new();
        for (name, data) in iter {
            collection.insert(name, data);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a SeriesCollection {
    type Item = &'a Series;
    type IntoIter = indexmap::map::Values<'a, String, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.values()
    }
}
