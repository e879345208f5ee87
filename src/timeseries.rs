use crate::axis::{fit_y_bounds, Axis};
use crate::config::RenderConfig;
use crate::error::{render_error, Error};
use crate::min_and_max;
use crate::series::SeriesCollection;
use crate::surface::{Drawable, Figure, Layout};
use chrono::prelude::*;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use tracing::debug;

pub const FONT: &str = "sans-serif";

/// A chart of several series over time, one y-axis per series on a shared date axis.
///
/// The first series goes on the primary axis (labels on the left), every further series
/// on its own secondary axis stacked on the right. Series and colors pair up by position.
/// The axes are created by the first render and reused afterwards, so the data may be
/// changed through `data_mut` and drawn again with `render` as long as the series stay the same.
#[derive(Debug)]
pub struct TimeSeries {
    config: RenderConfig,
    data: SeriesCollection,
    palette: Vec<RGBColor>,
    figure: Figure,
    axes: Vec<Axis>,
}

impl TimeSeries {
    /// Validates the configuration against the data and renders right away.
    pub fn new(
        data: SeriesCollection,
        config: RenderConfig,
        figure: Figure,
    ) -> Result<TimeSeries, Error> {
        let palette = config.validate(data.len())?;
        let mut timeseries = TimeSeries {
            config,
            data,
            palette,
            figure,
            axes: Vec::new(),
        };
        timeseries.render()?;
        Ok(timeseries)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn data(&self) -> &SeriesCollection {
        &self.data
    }

    /// for updating the values before the next `render`
    pub fn data_mut(&mut self) -> &mut SeriesCollection {
        &mut self.data
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// one per series, in series order; empty until the first successful render
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn is_rendered(&self) -> bool {
        !self.axes.is_empty()
    }

    /// Redraws the whole chart from the current data and presents it.
    ///
    /// All date keys are normalized before anything is drawn:
    /// a bad key fails the render without touching the axes.
    pub fn render(&mut self) -> Result<(), Error> {
        let n = self.data.len();
        if n == 0 {
            return Err(Error::configuration("no series to plot"));
        }
        if self.palette.len() < n {
            return Err(Error::configuration(format!(
                "{} series but only {} colors",
                n,
                self.palette.len()
            )));
        }
        if self.is_rendered() && self.axes.len() != n {
            return Err(Error::configuration(format!(
                "the chart has {} axes but the data now has {} series",
                self.axes.len(),
                n
            )));
        }

        let mut points = Vec::with_capacity(n);
        for series in self.data.iter() {
            points.push(series.data.normalize(&self.config.input_date_format)?);
        }
        let mut bounds = Vec::with_capacity(n);
        for (series, series_points) in self.data.iter().zip(points.iter()) {
            let values: Vec<f64> = series_points.iter().map(|(_, v)| *v).collect();
            let fitted = fit_y_bounds(&values, self.config.y_min, self.config.y_max).ok_or_else(|| {
                Error::Render(format!("the y range of '{}' is too wide to draw", series.name))
            })?;
            bounds.push(fitted);
        }
        let dates = x_range(&points)?;

        if self.is_rendered() {
            debug!(axes = n, "reusing axes");
        } else {
            let primary = self.figure.add_axis();
            debug!(axis = %primary.id(), "created primary axis");
            let mut axes = vec![primary];
            for _ in 1..n {
                let twin = self.figure.twin_x(&axes[0]);
                debug!(axis = %twin.id(), shares_x_with = %axes[0].id(), "created secondary axis");
                axes.push(twin);
            }
            self.axes = axes;
        }

        for (i, (axis, series)) in self.axes.iter_mut().zip(self.data.iter()).enumerate() {
            axis.set_label(&series.name, self.palette[i]);
            axis.set_y_bounds(bounds[i]);
        }

        let frame = Frame {
            title: &self.config.title,
            date_format: &self.config.output_date_format,
            layout: Layout::fit(self.figure.size(), n),
            x_range: dates,
            axes: &self.axes,
            points: &points,
        };
        self.figure.present(&frame)
    }
}

/// The shared date range of all the series, padded by 5% of the span on each side.
/// Fails when the padding would go past the dates chrono can represent.
pub fn x_range(points: &[Vec<(NaiveDateTime, f64)>]) -> Result<Range<DateTime<Utc>>, Error> {
    let dates: Vec<NaiveDateTime> = points.iter().flatten().map(|(t, _)| *t).collect();
    let (xmindt, xmaxdt) = min_and_max(&dates[..]).unwrap_or_default();
    let xspan: chrono::Duration = xmaxdt - xmindt;
    let xmargin = if xspan.is_zero() {
        chrono::Duration::days(1)
    } else {
        xspan / 20
    };
    let out_of_range = || {
        Error::Render(format!(
            "dates {} to {} leave no room for the x margin",
            xmindt, xmaxdt
        ))
    };
    let xmin = xmindt.checked_sub_signed(xmargin).ok_or_else(out_of_range)?;
    let xmax = xmaxdt.checked_add_signed(xmargin).ok_or_else(out_of_range)?;
    let xminlocal = TimeZone::from_utc_datetime(&Utc, &xmin);
    let xmaxlocal = TimeZone::from_utc_datetime(&Utc, &xmax);
    Ok(xminlocal..xmaxlocal)
}

/// One render: the axes with their points, ready to be drawn.
struct Frame<'a> {
    title: &'a str,
    date_format: &'a str,
    layout: Layout,
    x_range: Range<DateTime<Utc>>,
    axes: &'a [Axis],
    points: &'a [Vec<(NaiveDateTime, f64)>],
}

impl<'a> Drawable for Frame<'a> {
    fn draw_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), Error> {
        let layout = &self.layout;
        // one date label per six label heights of plot width
        let (width, _) = root.dim_in_pixel();
        let x_labels = (layout.plot_width(width) / (layout.label_size * 6)).max(2).min(14);
        root.fill(&WHITE).map_err(render_error)?;
        let root = root
            .titled(self.title, (FONT, layout.title_size))
            .map_err(render_error)?;
        // all the series share the plotting area of the primary axis,
        // the secondary spines live in the columns cut off on the right
        let plot_area = root.margin(0, 0, 0, layout.right_spines());

        for (slot, (axis, points)) in self.axes.iter().zip(self.points.iter()).enumerate() {
            let (ymin, ymax) = axis.y_bounds();
            let color = axis.color();
            let mut chart = ChartBuilder::on(&plot_area)
                .margin(layout.margin)
                .x_label_area_size(layout.x_label_area)
                .y_label_area_size(layout.y_label_area)
                .build_cartesian_2d(self.x_range.clone(), ymin..ymax)
                .map_err(render_error)?;

            if axis.is_primary() {
                chart
                    .configure_mesh()
                    .light_line_style(&TRANSPARENT)
                    .bold_line_style(RGBColor(150, 150, 150).stroke_width(1))
                    .set_all_tick_mark_size(2)
                    .label_style((FONT, layout.label_size))
                    .axis_desc_style((FONT, layout.label_size, &color))
                    .y_desc(axis.label())
                    .x_labels(x_labels as usize)
                    .x_label_formatter(&|x: &DateTime<Utc>| x.format(self.date_format).to_string())
                    .draw()
                    .map_err(render_error)?;
            } else {
                self.draw_spine(&root, slot as u32, axis)?;
            }

            // non finite values leave a gap in the line
            for segment in points.split(|(_, v)| !v.is_finite()) {
                if segment.is_empty() {
                    continue;
                }
                chart
                    .draw_series(LineSeries::new(
                        segment
                            .iter()
                            .map(|(t, v)| (TimeZone::from_utc_datetime(&Utc, t), *v)),
                        color.stroke_width(2),
                    ))
                    .map_err(render_error)?;
            }
        }
        Ok(())
    }
}

impl<'a> Frame<'a> {
    /// Draws the y-axis of a secondary series in its own column right of the plot.
    /// Only the vertical layout has to match the plotting area for the ticks to line up.
    fn draw_spine<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        slot: u32,
        axis: &Axis,
    ) -> Result<(), Error> {
        let layout = &self.layout;
        let (ymin, ymax) = axis.y_bounds();
        let color = axis.color();
        let column = root.margin(0, 0, 0, layout.spine_offset(slot));
        let mut spine = ChartBuilder::on(&column)
            .margin(layout.margin)
            .x_label_area_size(layout.x_label_area)
            .right_y_label_area_size(layout.axis_width)
            .build_cartesian_2d(self.x_range.clone(), ymin..ymax)
            .map_err(render_error)?;
        spine
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .set_all_tick_mark_size(2)
            .label_style((FONT, layout.label_size))
            .axis_desc_style((FONT, layout.label_size, &color))
            .y_desc(axis.label())
            .draw()
            .map_err(render_error)?;
        Ok(())
    }
}
