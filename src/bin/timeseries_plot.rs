use timeseries_plot::plot::parse_cli;
use timeseries_plot::{SeriesCollection, TimeSeries};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = parse_cli()?;
    info!(
        "read data from {} and plot to {}",
        args.csvin.display(),
        args.figout.display()
    );
    let data = SeriesCollection::from_csv(&args.csvin)?;
    info!(series = ?data.names(), "loaded series");
    let chart = TimeSeries::new(data, args.config.clone(), args.figure())?;
    info!(axes = chart.axes().len(), "done");
    Ok(())
}
