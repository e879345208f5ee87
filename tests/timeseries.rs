use chrono::{NaiveDate, NaiveDateTime};
use plotters::style::RGBColor;
use timeseries_plot::{
    DateKey, Error, Figure, RenderConfig, SeriesCollection, SeriesData, Target, TimeSeries,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn price_and_sentiment() -> SeriesCollection {
    let mut data = SeriesCollection::new();
    data.insert(
        "price",
        vec![("2021-01-01", 100.), ("2021-02-01", 110.)]
            .into_iter()
            .collect(),
    );
    data.insert(
        "sentiment",
        vec![("2021-01-01", 0.5), ("2021-02-01", 0.7)]
            .into_iter()
            .collect(),
    );
    data
}

fn series_of(n: usize) -> SeriesCollection {
    (0..n)
        .map(|i| {
            let data: SeriesData = (1..=4)
                .map(|m| (ymd(2020, m, 1), (i * 10 + m as usize) as f64))
                .collect();
            (format!("series {}", i), data)
        })
        .collect()
}

#[test]
fn price_and_sentiment_on_two_axes() {
    let config = RenderConfig::new("BTC")
        .colors(&["red", "blue"])
        .input_date_format("%Y-%m-%d");
    let chart = TimeSeries::new(price_and_sentiment(), config, Figure::in_memory()).unwrap();

    let axes = chart.axes();
    assert_eq!(axes.len(), 2);
    assert!(axes[0].is_primary());
    assert_eq!(axes[0].label(), "price");
    assert_eq!(axes[0].color(), RGBColor(255, 0, 0));
    assert_eq!(axes[1].label(), "sentiment");
    assert_eq!(axes[1].color(), RGBColor(0, 0, 255));
    assert_eq!(axes[1].shares_x_with(), Some(axes[0].id()));

    let svg = chart.figure().svg().unwrap();
    assert!(svg.contains("BTC"));
    assert!(svg.contains("price"));
    assert!(svg.contains("sentiment"));
    // default output format shows years only
    assert!(svg.contains("\n2021\n"));
    assert!(!svg.contains("2021-01"));
}

#[test]
fn every_secondary_axis_shares_the_primary_x_domain() {
    let n = 5;
    let config = RenderConfig::new("five").colors(&["r", "g", "b", "c", "m"]);
    let chart = TimeSeries::new(series_of(n), config, Figure::in_memory()).unwrap();
    let axes = chart.axes();
    assert_eq!(axes.len(), n);
    assert!(axes[0].is_primary());
    for axis in &axes[1..] {
        assert!(!axis.is_primary());
        assert_eq!(axis.shares_x_with(), Some(axes[0].id()));
    }
    let labels: Vec<&str> = axes.iter().map(|a| a.label()).collect();
    assert_eq!(labels, chart.data().names());
}

#[test]
fn rerender_reuses_the_same_axes() {
    let mut chart = TimeSeries::new(
        price_and_sentiment(),
        RenderConfig::new("BTC"),
        Figure::in_memory(),
    )
    .unwrap();
    assert!(chart.is_rendered());
    let ids: Vec<_> = chart.axes().iter().map(|a| a.id()).collect();
    let first_bounds = chart.axes()[0].y_bounds();

    chart
        .data_mut()
        .get_mut("price")
        .unwrap()
        .insert("2021-03-01", 500.);
    chart.render().unwrap();

    let rerendered: Vec<_> = chart.axes().iter().map(|a| a.id()).collect();
    assert_eq!(ids, rerendered);
    assert!(chart.axes()[0].y_bounds().1 > first_bounds.1);
    assert_eq!(chart.figure().presentations(), 2);
}

#[test]
fn rerender_with_a_different_series_set_fails() {
    let mut chart = TimeSeries::new(
        price_and_sentiment(),
        RenderConfig::new("BTC"),
        Figure::in_memory(),
    )
    .unwrap();
    chart
        .data_mut()
        .insert("volume", vec![("2021-01-01", 1e6)].into_iter().collect());
    assert!(matches!(chart.render(), Err(Error::Configuration(_))));
    assert_eq!(chart.axes().len(), 2);
}

#[test]
fn canonical_and_text_keys_land_on_the_same_dates() {
    let canonical: SeriesData = vec![(DateKey::from(ymd(2021, 1, 1)), 1.), (DateKey::from(ymd(2021, 2, 1)), 2.)]
        .into_iter()
        .collect();
    let text: SeriesData = vec![("01/01/2021", 1.), ("01/02/2021", 2.)].into_iter().collect();
    let format = "%d/%m/%Y";
    assert_eq!(
        canonical.normalize(format).unwrap(),
        text.normalize(format).unwrap()
    );

    let data: SeriesCollection = vec![("canonical", canonical), ("text", text)]
        .into_iter()
        .collect();
    let config = RenderConfig::new("mixed").input_date_format(format);
    let chart = TimeSeries::new(data, config, Figure::in_memory()).unwrap();
    assert_eq!(chart.axes()[0].y_bounds(), chart.axes()[1].y_bounds());
}

#[test]
fn y_bounds_apply_to_every_axis() {
    let config = RenderConfig::new("bounded").y_min(0.).y_max(200.);
    let chart = TimeSeries::new(price_and_sentiment(), config, Figure::in_memory()).unwrap();
    for axis in chart.axes() {
        assert_eq!(axis.y_bounds(), (0., 200.));
    }

    let config = RenderConfig::new("lower only").y_min(0.);
    let chart = TimeSeries::new(price_and_sentiment(), config, Figure::in_memory()).unwrap();
    let (price_lo, price_hi) = chart.axes()[0].y_bounds();
    let (sentiment_lo, sentiment_hi) = chart.axes()[1].y_bounds();
    assert_eq!((price_lo, sentiment_lo), (0., 0.));
    assert!((price_hi - 110.5).abs() < 1e-9);
    assert!((sentiment_hi - 0.71).abs() < 1e-9);
}

#[test]
fn unbounded_axes_autoscale_to_their_own_series() {
    let chart = TimeSeries::new(
        price_and_sentiment(),
        RenderConfig::new("auto"),
        Figure::in_memory(),
    )
    .unwrap();
    let (lo, hi) = chart.axes()[0].y_bounds();
    assert!(lo < 100. && hi > 110.);
    let (lo, hi) = chart.axes()[1].y_bounds();
    assert!(lo < 0.5 && hi > 0.7 && hi < 1.);
}

#[test]
fn fewer_colors_than_series_is_a_configuration_error() {
    let config = RenderConfig::new("BTC").colors(&["red"]);
    let res = TimeSeries::new(price_and_sentiment(), config, Figure::in_memory());
    match res {
        Err(Error::Configuration(msg)) => assert!(msg.contains("colors")),
        other => panic!("expected a configuration error, got {:?}", other),
    }
    // the default palette has three entries
    let res = TimeSeries::new(series_of(4), RenderConfig::new("four"), Figure::in_memory());
    assert!(matches!(res, Err(Error::Configuration(_))));
}

#[test]
fn empty_data_is_a_configuration_error() {
    let res = TimeSeries::new(
        SeriesCollection::new(),
        RenderConfig::new("empty"),
        Figure::in_memory(),
    );
    assert!(matches!(res, Err(Error::Configuration(_))));
}

#[test]
fn bad_date_key_is_named() {
    let mut data = price_and_sentiment();
    data.get_mut("sentiment")
        .unwrap()
        .insert("February 3rd", 0.9);
    let res = TimeSeries::new(data, RenderConfig::new("BTC"), Figure::in_memory());
    match res {
        Err(Error::DateFormat { key, format }) => {
            assert_eq!(key, "February 3rd");
            assert_eq!(format, "%Y-%m-%d");
        }
        other => panic!("expected a date format error, got {:?}", other),
    }
}

#[test]
fn bad_date_on_rerender_leaves_the_chart_as_it_was() {
    let mut chart = TimeSeries::new(
        price_and_sentiment(),
        RenderConfig::new("BTC"),
        Figure::in_memory(),
    )
    .unwrap();
    let before = chart.figure().svg().unwrap().to_string();
    chart
        .data_mut()
        .get_mut("price")
        .unwrap()
        .insert("2021/03/01", 120.);
    assert!(matches!(chart.render(), Err(Error::DateFormat { .. })));
    assert_eq!(chart.figure().presentations(), 1);
    assert_eq!(chart.figure().svg().unwrap(), before);
}

#[test]
fn gaps_do_not_break_rendering() {
    let mut data = price_and_sentiment();
    data.get_mut("price").unwrap().insert("2021-03-01", f64::NAN);
    data.get_mut("price").unwrap().insert("2021-04-01", 130.);
    let chart = TimeSeries::new(data, RenderConfig::new("gaps"), Figure::in_memory()).unwrap();
    let (lo, hi) = chart.axes()[0].y_bounds();
    assert!(lo.is_finite() && hi.is_finite());
    assert!(hi > 130.);
}

#[test]
fn output_format_drives_the_tick_labels() {
    let config = RenderConfig::new("monthly").output_date_format("%b %Y");
    let chart = TimeSeries::new(price_and_sentiment(), config, Figure::in_memory()).unwrap();
    assert!(chart.figure().svg().unwrap().contains("Jan 2021"));
}

#[test]
fn small_figure_with_three_axes() {
    let chart = TimeSeries::new(
        series_of(3),
        RenderConfig::new("small"),
        Figure::in_memory().with_size(400, 200),
    )
    .unwrap();
    assert_eq!(chart.axes().len(), 3);
    let svg = chart.figure().svg().unwrap();
    assert!(svg.contains("width=\"400\""));
    for name in chart.data().names() {
        assert!(svg.contains(name));
    }
}

#[test]
fn secondary_axes_render_at_every_size() {
    for &(width, height) in &[(320, 160), (800, 400), (1600, 800), (2400, 600)] {
        let config = RenderConfig::new("sizes").colors(&["r", "g", "b", "c"]);
        let res = TimeSeries::new(
            series_of(4),
            config,
            Figure::in_memory().with_size(width, height),
        );
        assert!(res.is_ok(), "{}x{}: {:?}", width, height, res.err());
    }
}

#[test]
fn values_too_far_apart_to_draw_are_a_render_error() {
    let mut data = SeriesCollection::new();
    data.insert(
        "wide",
        vec![("2021-01-01", -1e308), ("2021-02-01", 1e308)]
            .into_iter()
            .collect(),
    );
    let res = TimeSeries::new(data, RenderConfig::new("wide"), Figure::in_memory());
    match res {
        Err(Error::Render(msg)) => assert!(msg.contains("wide")),
        other => panic!("expected a render error, got {:?}", other),
    }

    let config = RenderConfig::new("wide").y_min(-1e308).y_max(1e308);
    let res = TimeSeries::new(price_and_sentiment(), config, Figure::in_memory());
    assert!(matches!(res, Err(Error::Configuration(_))));
}

#[test]
fn huge_values_on_one_side_still_render() {
    let mut data = SeriesCollection::new();
    data.insert(
        "huge",
        vec![("2021-01-01", 1e300), ("2021-02-01", 1e300)]
            .into_iter()
            .collect(),
    );
    let chart = TimeSeries::new(data, RenderConfig::new("huge"), Figure::in_memory()).unwrap();
    let (lo, hi) = chart.axes()[0].y_bounds();
    assert!(lo < 1e300 && hi > 1e300);
}

#[test]
fn dates_at_the_edge_of_time_are_a_render_error() {
    let mut data = SeriesCollection::new();
    data.insert(
        "late",
        vec![(DateKey::from(NaiveDateTime::MAX), 1.)].into_iter().collect(),
    );
    let res = TimeSeries::new(data, RenderConfig::new("late"), Figure::in_memory());
    assert!(matches!(res, Err(Error::Render(_))));
}

#[test]
fn failed_rerender_keeps_the_axes() {
    let mut chart = TimeSeries::new(
        price_and_sentiment(),
        RenderConfig::new("BTC"),
        Figure::in_memory(),
    )
    .unwrap();
    let bounds: Vec<_> = chart.axes().iter().map(|a| a.y_bounds()).collect();
    let price = chart.data_mut().get_mut("price").unwrap();
    price.insert("2021-03-01", -1e308);
    price.insert("2021-04-01", 1e308);
    assert!(matches!(chart.render(), Err(Error::Render(_))));
    let after: Vec<_> = chart.axes().iter().map(|a| a.y_bounds()).collect();
    assert_eq!(bounds, after);
    assert_eq!(chart.figure().presentations(), 1);
}

#[test]
fn svg_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let svg = dir.path().join("btc.svg");

    let chart = TimeSeries::new(
        price_and_sentiment(),
        RenderConfig::new("BTC"),
        Figure::to_file(&svg).with_size(800, 400),
    )
    .unwrap();
    assert_eq!(chart.figure().target(), &Target::Svg(svg.clone()));
    let written = std::fs::read_to_string(&svg).unwrap();
    assert!(written.starts_with("<svg"));
    assert!(written.contains("sentiment"));
}

#[cfg(feature = "png")]
#[test]
fn png_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("btc.png");
    TimeSeries::new(
        price_and_sentiment(),
        RenderConfig::new("BTC"),
        Figure::to_file(&png).with_size(800, 400),
    )
    .unwrap();
    let bytes = std::fs::read(&png).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[cfg(not(feature = "png"))]
#[test]
fn png_without_the_feature_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let res = TimeSeries::new(
        price_and_sentiment(),
        RenderConfig::new("BTC"),
        Figure::to_file(dir.path().join("btc.png")),
    );
    assert!(matches!(res, Err(Error::Configuration(_))));
}
