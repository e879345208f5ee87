//! Multi-series time series charts with one y-axis per series.
//!
//! ```no_run
//! use timeseries_plot::{Figure, RenderConfig, SeriesCollection, SeriesData, TimeSeries};
//!
//! let mut data = SeriesCollection::new();
//! data.insert("price", vec![("2021-01-01", 100.), ("2021-02-01", 110.)].into_iter().collect());
//! data.insert("sentiment", vec![("2021-01-01", 0.5), ("2021-02-01", 0.7)].into_iter().collect::<SeriesData>());
//! let config = RenderConfig::new("BTC").colors(&["red", "blue"]);
//! let chart = TimeSeries::new(data, config, Figure::to_file("btc.svg")).unwrap();
//! assert_eq!(chart.axes().len(), 2);
//! ```
pub mod axis;
pub mod color;
pub mod config;
pub mod dateutil;
pub mod error;
pub mod plot;
pub mod series;
pub mod surface;
pub mod timeseries;

pub use axis::{Axis, AxisId, AxisKind};
pub use config::RenderConfig;
pub use dateutil::DateKey;
pub use error::Error;
pub use series::{Series, SeriesCollection, SeriesData};
pub use surface::{Figure, Target};
pub use timeseries::TimeSeries;

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// min and max of a slice in one pass, None when empty
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut s_iter = s.iter();
    let (mut min, mut max) = match s_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in s_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_and_max_of_slices() {
        assert_eq!(min_and_max(&[3., -1., 7., 2.]), Some((-1., 7.)));
        assert_eq!(min_and_max(&[5]), Some((5, 5)));
        assert_eq!(min_and_max::<f64>(&[]), None);
    }
}
