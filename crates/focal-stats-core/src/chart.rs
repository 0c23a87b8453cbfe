//! Renderer-independent bar chart description.
//!
//! The renderer in the adapters crate only turns a [`ChartSpec`] into
//! pixels; which labels are shown and how the count axis is divided is
//! decided here.

use crate::domain::FocalCounts;

/// Chart title.
pub const CHART_TITLE: &str = "Focal Length Distribution";

/// Horizontal axis label.
pub const X_AXIS_LABEL: &str = "Focal Length (mm)";

/// Vertical axis label.
pub const Y_AXIS_LABEL: &str = "Image Count";

/// Counter-clockwise rotation applied to every category label.
pub const LABEL_ROTATION_DEGREES: f64 = 45.0;

/// Above this many bars, labels are thinned.
const MAX_UNTHINNED_LABELS: usize = 30;

/// Roughly how many labels remain after thinning.
const TARGET_LABEL_COUNT: usize = 20;

/// Roughly how many intervals the count axis is split into.
const TARGET_Y_INTERVALS: usize = 6;

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBar {
    /// Category label (the focal length as displayed).
    pub label: String,
    /// Whether the label is drawn under the bar.
    pub show_label: bool,
    /// Bar height.
    pub count: usize,
}

/// Everything needed to draw the focal length bar chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Bars in ascending focal length order.
    pub bars: Vec<ChartBar>,
    /// Count axis tick values, starting at zero.
    pub y_ticks: Vec<usize>,
    /// Top of the count axis.
    pub y_max: usize,
}

impl ChartSpec {
    /// Builds the chart for a tally. Returns `None` when there is nothing to
    /// draw.
    #[must_use]
    pub fn from_counts(counts: &FocalCounts) -> Option<Self> {
        if counts.is_empty() {
            return None;
        }

        let sorted = counts.sorted();
        let stride = tick_stride(sorted.len());
        let bars: Vec<ChartBar> = sorted
            .iter()
            .enumerate()
            .map(|(i, (focal, count))| ChartBar {
                label: focal.to_string(),
                show_label: i % stride == 0,
                count: *count,
            })
            .collect();

        let max_count = bars.iter().map(|b| b.count).max().unwrap_or(1);
        let step = y_step(max_count);
        let y_max = max_count.div_ceil(step) * step;
        let y_ticks = (0..=y_max).step_by(step).collect();

        Some(Self {
            title: CHART_TITLE,
            x_label: X_AXIS_LABEL,
            y_label: Y_AXIS_LABEL,
            bars,
            y_ticks,
            y_max,
        })
    }

    /// Labels that are actually drawn.
    pub fn visible_labels(&self) -> impl Iterator<Item = &str> {
        self.bars
            .iter()
            .filter(|b| b.show_label)
            .map(|b| b.label.as_str())
    }
}

/// Every how many bars a label is drawn.
///
/// Up to 30 bars every label is shown; beyond that only every
/// `max(1, n / 20)`-th label is kept.
#[must_use]
pub fn tick_stride(bar_count: usize) -> usize {
    if bar_count > MAX_UNTHINNED_LABELS {
        (bar_count / TARGET_LABEL_COUNT).max(1)
    } else {
        1
    }
}

/// Smallest 1-2-5 step that splits `max_count` into at most about six
/// intervals.
fn y_step(max_count: usize) -> usize {
    let raw = max_count.div_ceil(TARGET_Y_INTERVALS).max(1);
    let mut magnitude = 1usize;
    while magnitude * 10 <= raw {
        magnitude *= 10;
    }
    [1, 2, 5, 10]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(magnitude * 10)
}
