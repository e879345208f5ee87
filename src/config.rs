use crate::color::parse_palette;
use crate::dateutil::{is_valid_format, DESIRED_DATE_FORMAT, YEAR_FORMAT};
use crate::error::Error;
use plotters::style::RGBColor;

/// one color per series, in series order
pub const DEFAULT_COLORS: [&str; 3] = ["tab:red", "tab:blue", "tab:green"];
/// x tick labels show the year only unless told otherwise
pub const DEFAULT_GRAPHED_FORMAT: &str = YEAR_FORMAT;

/// How a chart looks. Built once, then only read by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub title: String,
    pub colors: Vec<String>,
    /// strftime format of the text date keys
    pub input_date_format: String,
    /// strftime format of the x tick labels
    pub output_date_format: String,
    /// applied to every y-axis
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

impl RenderConfig {
    pub fn new<S: Into<String>>(title: S) -> RenderConfig {
        RenderConfig {
            title: title.into(),
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            input_date_format: DESIRED_DATE_FORMAT.to_string(),
            output_date_format: DEFAULT_GRAPHED_FORMAT.to_string(),
            y_min: None,
            y_max: None,
        }
    }

    pub fn colors<S: AsRef<str>>(mut self, colors: &[S]) -> RenderConfig {
        self.colors = colors.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    pub fn input_date_format<S: Into<String>>(mut self, format: S) -> RenderConfig {
        self.input_date_format = format.into();
        self
    }

    pub fn output_date_format<S: Into<String>>(mut self, format: S) -> RenderConfig {
        self.output_date_format = format.into();
        self
    }

    pub fn y_min(mut self, y_min: f64) -> RenderConfig {
        self.y_min = Some(y_min);
        self
    }

    pub fn y_max(mut self, y_max: f64) -> RenderConfig {
        self.y_max = Some(y_max);
        self
    }

    /// Checks the configuration against the number of series to draw
    /// and resolves the palette.
    pub fn validate(&self, n_series: usize) -> Result<Vec<RGBColor>, Error> {
        if n_series == 0 {
            return Err(Error::configuration("no series to plot"));
        }
        if self.colors.len() < n_series {
            return Err(Error::configuration(format!(
                "{} series but only {} colors",
                n_series,
                self.colors.len()
            )));
        }
        for format in [&self.input_date_format, &self.output_date_format].iter() {
            if !is_valid_format(format) {
                return Err(Error::configuration(format!(
                    "invalid date format '{}'",
                    format
                )));
            }
        }
        for bound in [self.y_min, self.y_max].iter().flatten() {
            if !bound.is_finite() {
                return Err(Error::configuration(format!("y bound {} is not finite", bound)));
            }
        }
        if let (Some(lo), Some(hi)) = (self.y_min, self.y_max) {
            if lo >= hi {
                return Err(Error::configuration(format!(
                    "y_min {} is not below y_max {}",
                    lo, hi
                )));
            }
            if !(hi - lo).is_finite() {
                return Err(Error::configuration(format!(
                    "y range {} to {} is too wide to draw",
                    lo, hi
                )));
            }
        }
        parse_palette(&self.colors)
    }
}
