use crate::min_and_max;
use plotters::style::RGBColor;
use std::fmt;

/// Identifies an axis within the figure that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisId(pub(crate) u64);

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "axis#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// owns the x-axis, y labels on the left
    Primary,
    /// own y scale on the right, same x domain as `shares_x_with`
    Secondary { shares_x_with: AxisId },
}

/// A y-axis handle: one per series, kept across renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    id: AxisId,
    kind: AxisKind,
    label: String,
    color: RGBColor,
    y_bounds: (f64, f64),
}

impl Axis {
    pub(crate) fn new(id: AxisId, kind: AxisKind) -> Axis {
        Axis {
            id,
            kind,
            label: String::new(),
            color: RGBColor(0, 0, 0),
            y_bounds: (0., 1.),
        }
    }

    pub fn id(&self) -> AxisId {
        self.id
    }

    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    pub fn is_primary(&self) -> bool {
        self.kind == AxisKind::Primary
    }

    /// the primary axis whose x domain this one reuses, None for the primary itself
    pub fn shares_x_with(&self) -> Option<AxisId> {
        match self.kind {
            AxisKind::Primary => None,
            AxisKind::Secondary { shares_x_with } => Some(shares_x_with),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> RGBColor {
        self.color
    }

    /// (lower, upper) of the y range drawn at the last render
    pub fn y_bounds(&self) -> (f64, f64) {
        self.y_bounds
    }

    pub(crate) fn set_label(&mut self, label: &str, color: RGBColor) {
        self.label = label.to_string();
        self.color = color;
    }

    pub(crate) fn set_y_bounds(&mut self, bounds: (f64, f64)) {
        self.y_bounds = bounds;
    }
}

/// Autoscales to `values`, then clamps each side that has a fixed bound.
/// None when the resulting range is not a finite, non empty interval.
pub fn fit_y_bounds(values: &[f64], y_min: Option<f64>, y_max: Option<f64>) -> Option<(f64, f64)> {
    let (auto_lo, auto_hi) = autoscale(values);
    let (lo, hi) = match (y_min, y_max) {
        (Some(lo), Some(hi)) => (lo, hi),
        (Some(lo), None) if lo >= auto_hi => (lo, lo + (auto_hi - auto_lo)),
        (Some(lo), None) => (lo, auto_hi),
        (None, Some(hi)) if hi <= auto_lo => (hi - (auto_hi - auto_lo), hi),
        (None, Some(hi)) => (auto_lo, hi),
        (None, None) => (auto_lo, auto_hi),
    };
    let span = hi - lo;
    if span.is_finite() && span > 0. {
        Some((lo, hi))
    } else {
        None
    }
}

/// min and max of the finite values padded by 5% of the span;
/// a flat series gets a unit padding, no values at all give 0..1.
/// The padding is dropped when it would overflow.
pub fn autoscale(values: &[f64]) -> (f64, f64) {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let (min, max) = match min_and_max(&finite[..]) {
        None => return (0., 1.),
        Some(bounds) => bounds,
    };
    let margin = if max - min == 0. {
        1f64.max(min.abs() / 20.)
    } else {
        (max - min) / 20.
    };
    let (lo, hi) = (min - margin, max + margin);
    if (hi - lo).is_finite() {
        (lo, hi)
    } else {
        (min, max)
    }
}
