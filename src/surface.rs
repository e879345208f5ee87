//! The drawing surface a chart is rendered onto.
//!
//! A `Figure` is owned by the renderer that draws on it; nothing is kept in process-wide state.
//! Every presentation redraws the whole chart from scratch onto a fresh backend.
use crate::axis::{Axis, AxisId, AxisKind};
use crate::error::{render_error, Error};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_SIZE: (u32, u32) = (1600, 800);

/// Where a figure goes when it is presented.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Svg(PathBuf),
    Png(PathBuf),
    /// svg kept in memory, see `Figure::svg`
    Memory,
}

/// Anything that can draw itself on a plotters drawing area.
pub trait Drawable {
    fn draw_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), Error>;
}

#[derive(Debug)]
pub struct Figure {
    target: Target,
    size: (u32, u32),
    open_when_presented: bool,
    next_axis_id: u64,
    svg: Option<String>,
    presentations: usize,
}

impl Figure {
    pub fn new(target: Target) -> Figure {
        Figure {
            target,
            size: DEFAULT_SIZE,
            open_when_presented: false,
            next_axis_id: 0,
            svg: None,
            presentations: 0,
        }
    }

    pub fn in_memory() -> Figure {
        Figure::new(Target::Memory)
    }

    /// svg or png, chosen by the extension of `fout` (svg unless it says png)
    pub fn to_file<P: AsRef<Path>>(fout: P) -> Figure {
        let fout = fout.as_ref().to_path_buf();
        let is_png = fout
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("png"))
            .unwrap_or(false);
        if is_png {
            Figure::new(Target::Png(fout))
        } else {
            Figure::new(Target::Svg(fout))
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Figure {
        self.size = (width, height);
        self
    }

    /// open the written file with the system viewer after each presentation
    pub fn open_when_presented(mut self, open: bool) -> Figure {
        self.open_when_presented = open;
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// the last presented chart, for `Target::Memory`
    pub fn svg(&self) -> Option<&str> {
        self.svg.as_deref()
    }

    pub fn presentations(&self) -> usize {
        self.presentations
    }

    /// A new primary axis.
    pub fn add_axis(&mut self) -> Axis {
        Axis::new(self.next_id(), AxisKind::Primary)
    }

    /// A new axis with its own y scale on the x domain of `primary`.
    pub fn twin_x(&mut self, primary: &Axis) -> Axis {
        Axis::new(
            self.next_id(),
            AxisKind::Secondary {
                shares_x_with: primary.id(),
            },
        )
    }

    fn next_id(&mut self) -> AxisId {
        let id = AxisId(self.next_axis_id);
        self.next_axis_id += 1;
        id
    }

    /// Draws `content` on a fresh backend for the target and presents it.
    pub fn present<D: Drawable>(&mut self, content: &D) -> Result<(), Error> {
        match &self.target {
            Target::Svg(fout) => {
                let root = SVGBackend::new(fout, self.size).into_drawing_area();
                content.draw_on(&root)?;
                root.present().map_err(render_error)?;
            }
            #[cfg(feature = "png")]
            Target::Png(fout) => {
                let root = BitMapBackend::new(fout, self.size).into_drawing_area();
                content.draw_on(&root)?;
                root.present().map_err(render_error)?;
            }
            #[cfg(not(feature = "png"))]
            Target::Png(_) => {
                return Err(Error::configuration(
                    "png output needs the `png` feature, use an svg file instead",
                ))
            }
            Target::Memory => {
                let mut buffer = String::new();
                {
                    let root = SVGBackend::with_string(&mut buffer, self.size).into_drawing_area();
                    content.draw_on(&root)?;
                    root.present().map_err(render_error)?;
                }
                self.svg = Some(buffer);
            }
        }
        self.presentations += 1;
        info!(output = ?self.target, presentations = self.presentations, "presented figure");
        if self.open_when_presented {
            match &self.target {
                Target::Svg(fout) | Target::Png(fout) => open::that(fout)?,
                Target::Memory => {}
            }
        }
        Ok(())
    }
}

/// Pixel sizes of the chart furniture, fitted to the figure size and the number of y-axes.
///
/// The primary axis has its labels on the left. Every secondary axis gets its own spine on
/// the right, `axis_width` further out than the previous one, so no two label columns overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub margin: u32,
    pub title_size: u32,
    pub label_size: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
    pub axis_width: u32,
    pub n_secondary: u32,
}

impl Layout {
    pub fn fit(size: (u32, u32), n_axes: usize) -> Layout {
        let (width, height) = size;
        let label_size = (height / 40).max(10).min(24);
        let margin = (height / 40).max(5);
        let y_label_area = label_size * 5;
        let n_secondary = n_axes.saturating_sub(1) as u32;
        // the label columns never take more than half the width
        let budget = (width / 2).saturating_sub(y_label_area + 2 * margin);
        let axis_width = match n_secondary {
            0 => 0,
            n => y_label_area.min(budget / n).max(label_size * 2),
        };
        Layout {
            margin,
            title_size: label_size * 2,
            label_size,
            x_label_area: label_size * 3,
            y_label_area,
            axis_width,
            n_secondary,
        }
    }

    /// width taken on the right by all the secondary spines
    pub fn right_spines(&self) -> u32 {
        self.axis_width * self.n_secondary
    }

    /// Pixels cut from the right of the plotting area to place the spine of the
    /// `slot`-th secondary axis (1 based) right at its column.
    pub fn spine_offset(&self, slot: u32) -> u32 {
        self.axis_width * (self.n_secondary - slot.min(self.n_secondary))
    }

    /// width left for the plot itself
    pub fn plot_width(&self, width: u32) -> u32 {
        width.saturating_sub(2 * self.margin + self.y_label_area + self.right_spines())
    }
}
