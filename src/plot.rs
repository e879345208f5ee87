use super::VERSION;
use crate::config::RenderConfig;
use crate::dateutil::DESIRED_DATE_FORMAT;
use crate::error::Error;
use crate::surface::{Figure, DEFAULT_SIZE};
use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;

/// Everything the plotting cli needs, taken from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotArgs {
    pub csvin: PathBuf,
    pub figout: PathBuf,
    pub config: RenderConfig,
    pub size: (u32, u32),
    pub show: bool,
}

impl PlotArgs {
    pub fn figure(&self) -> Figure {
        Figure::to_file(&self.figout)
            .with_size(self.size.0, self.size.1)
            .open_when_presented(self.show)
    }
}

fn app<'a, 'b>() -> App<'a, 'b> {
    let arg_csvin = Arg::with_name("input_csvfile")
        .help("csv file with a date column followed by one column per series")
        .short("f")
        .long("csvfile")
        .takes_value(true)
        .required(true);
    let arg_figout = Arg::with_name("output_file")
        .help("output svg or png file, defaults to the csv name with svg extension")
        .short("o")
        .long("output")
        .takes_value(true);
    let arg_title = Arg::with_name("title")
        .help("chart title")
        .short("t")
        .long("title")
        .takes_value(true);
    let arg_colors = Arg::with_name("colors")
        .help("comma separated colors, one per series (tab:red, red, r, #d62728)")
        .short("c")
        .long("colors")
        .takes_value(true)
        .default_value("tab:red,tab:blue,tab:green");
    let arg_input_format = Arg::with_name("input_format")
        .help("strftime format of the dates in the csv")
        .long("input-format")
        .takes_value(true)
        .default_value(DESIRED_DATE_FORMAT);
    let arg_output_format = Arg::with_name("output_format")
        .help("strftime format of the x axis labels")
        .long("output-format")
        .takes_value(true)
        .default_value("%Y");
    let arg_ymin = Arg::with_name("ymin")
        .help("lower bound of every y axis")
        .long("ymin")
        .takes_value(true)
        .allow_hyphen_values(true);
    let arg_ymax = Arg::with_name("ymax")
        .help("upper bound of every y axis")
        .long("ymax")
        .takes_value(true)
        .allow_hyphen_values(true);
    let arg_width = Arg::with_name("width")
        .help("figure width in pixels")
        .long("width")
        .takes_value(true);
    let arg_height = Arg::with_name("height")
        .help("figure height in pixels")
        .long("height")
        .takes_value(true);
    let arg_show = Arg::with_name("show")
        .help("open the figure with the system viewer")
        .long("show")
        .takes_value(false);
    App::new("timeseries_plot")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to plot several time series, one y axis per series")
        .arg(arg_csvin)
        .arg(arg_figout)
        .arg(arg_title)
        .arg(arg_colors)
        .arg(arg_input_format)
        .arg(arg_output_format)
        .arg(arg_ymin)
        .arg(arg_ymax)
        .arg(arg_width)
        .arg(arg_height)
        .arg(arg_show)
}

/// Takes the CLI arguments that control the plotting of the time series.
pub fn parse_cli() -> Result<PlotArgs, Error> {
    plot_args(&app().get_matches())
}

/// Same as `parse_cli`, on an explicit argument list (first item is the program name).
pub fn parse_cli_from<I, T>(args: I) -> Result<PlotArgs, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli_args = app()
        .get_matches_from_safe(args)
        .map_err(|e| Error::configuration(e.message))?;
    plot_args(&cli_args)
}

fn plot_args(cli_args: &ArgMatches) -> Result<PlotArgs, Error> {
    let csvin = PathBuf::from(cli_args.value_of("input_csvfile").unwrap_or_default());
    let figout = match cli_args.value_of("output_file") {
        Some(p) => PathBuf::from(p),
        None => {
            let mut figout = csvin.clone();
            figout.set_extension("svg");
            figout
        }
    };
    let title = match cli_args.value_of("title") {
        Some(t) => t.to_string(),
        None => csvin
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    let colors: Vec<&str> = cli_args
        .value_of("colors")
        .unwrap_or_default()
        .split(',')
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    let mut config = RenderConfig::new(title)
        .colors(&colors)
        .input_date_format(cli_args.value_of("input_format").unwrap_or(DESIRED_DATE_FORMAT))
        .output_date_format(cli_args.value_of("output_format").unwrap_or("%Y"));
    if let Some(ymin) = parse_value::<f64>(cli_args, "ymin")? {
        config = config.y_min(ymin);
    }
    if let Some(ymax) = parse_value::<f64>(cli_args, "ymax")? {
        config = config.y_max(ymax);
    }
    let width = parse_value::<u32>(cli_args, "width")?.unwrap_or(DEFAULT_SIZE.0);
    let height = parse_value::<u32>(cli_args, "height")?.unwrap_or(DEFAULT_SIZE.1);
    Ok(PlotArgs {
        csvin,
        figout,
        config,
        size: (width, height),
        show: cli_args.is_present("show"),
    })
}

fn parse_value<T: std::str::FromStr>(cli_args: &ArgMatches, name: &str) -> Result<Option<T>, Error> {
    match cli_args.value_of(name) {
        None => Ok(None),
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::configuration(format!("invalid value '{}' for --{}", v, name))),
    }
}
