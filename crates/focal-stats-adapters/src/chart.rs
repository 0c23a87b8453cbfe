//! Bar chart rendering.
//!
//! A [`ChartSpec`] is laid out as an SVG document sized for 150 DPI and
//! rasterized with `resvg` onto an opaque white canvas. Margins are derived
//! from the text that has to fit (title, axis labels, rotated tick labels),
//! so nothing is clipped at the figure edge.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use focal_stats_core::{ChartSpec, LABEL_ROTATION_DEGREES};
use resvg::usvg;
use tracing::debug;

/// Output resolution in pixels per inch.
pub const CHART_DPI: f64 = 150.0;

/// Default bar fill (sky blue).
pub const DEFAULT_BAR_COLOR: &str = "#87ceeb";

const FONT_FAMILY: &str = "DejaVu Sans, Liberation Sans, Arial, Helvetica, sans-serif";
const TITLE_PT: f64 = 14.0;
const AXIS_LABEL_PT: f64 = 12.0;
const TICK_LABEL_PT: f64 = 10.0;
const PAD_IN: f64 = 0.1;
const TICK_LEN_IN: f64 = 0.05;
/// Average glyph advance as a fraction of the font size.
const CHAR_WIDTH_EM: f64 = 0.6;
const BAR_WIDTH_FRACTION: f64 = 0.8;
/// No margin may take more than this share of the figure.
const MAX_MARGIN_FRACTION: f64 = 0.45;

/// Figure size and styling.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Figure width in inches.
    pub width_in: f64,
    /// Figure height in inches.
    pub height_in: f64,
    /// Bar fill colour as `#rrggbb`.
    pub bar_color: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width_in: 14.0,
            height_in: 7.0,
            bar_color: DEFAULT_BAR_COLOR.to_owned(),
        }
    }
}

impl ChartOptions {
    /// Canvas size in pixels at [`CHART_DPI`].
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f64| (inches * CHART_DPI).round().max(1.0) as u32;
        (px(self.width_in), px(self.height_in))
    }
}

/// Plot box and text metrics, in pixels.
struct Layout {
    width: f64,
    height: f64,
    pad: f64,
    tick_len: f64,
    title_px: f64,
    axis_px: f64,
    tick_px: f64,
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
}

impl Layout {
    #[allow(clippy::cast_precision_loss)]
    fn new(spec: &ChartSpec, options: &ChartOptions) -> Self {
        let (w, h) = options.pixel_size();
        let (width, height) = (f64::from(w), f64::from(h));
        let px_per_pt = CHART_DPI / 72.0;
        let title_px = TITLE_PT * px_per_pt;
        let axis_px = AXIS_LABEL_PT * px_per_pt;
        let tick_px = TICK_LABEL_PT * px_per_pt;
        let pad = PAD_IN * CHART_DPI;
        let tick_len = TICK_LEN_IN * CHART_DPI;
        let (sin, cos) = LABEL_ROTATION_DEGREES.to_radians().sin_cos();
        let text_width = |text: &str| text.chars().count() as f64 * CHAR_WIDTH_EM * tick_px;

        let longest_label = spec.visible_labels().map(text_width).fold(0.0, f64::max);
        let label_drop = longest_label * sin + tick_px * cos;
        let bottom =
            (pad + axis_px * 1.5 + label_drop + tick_len * 2.0).min(height * MAX_MARGIN_FRACTION);

        let widest_count = spec
            .y_ticks
            .iter()
            .map(|t| text_width(&t.to_string()))
            .fold(0.0, f64::max);
        let mut left = pad + axis_px * 1.5 + widest_count + tick_len * 2.0;

        // The first rotated label leans left past its bar.
        if let Some(first) = spec.bars.first().filter(|b| b.show_label) {
            let slot = (width - left - pad) / spec.bars.len().max(1) as f64;
            let reach = text_width(&first.label) * cos + tick_px * sin - slot / 2.0;
            left = left.max(pad + reach);
        }
        let left = left.min(width * MAX_MARGIN_FRACTION);
        let top = (pad + title_px * 1.8).min(height * MAX_MARGIN_FRACTION);

        Self {
            width,
            height,
            pad,
            tick_len,
            title_px,
            axis_px,
            tick_px,
            x0: left,
            x1: width - pad,
            y0: top,
            y1: height - bottom,
        }
    }

    fn plot_width(&self) -> f64 {
        (self.x1 - self.x0).max(1.0)
    }

    fn plot_height(&self) -> f64 {
        (self.y1 - self.y0).max(1.0)
    }
}

/// Renders [`ChartSpec`]s to SVG and PNG.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    options: ChartOptions,
}

impl ChartRenderer {
    #[must_use]
    pub const fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    /// Lays the chart out as an SVG document.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn render_svg(&self, spec: &ChartSpec) -> String {
        let l = Layout::new(spec, &self.options);
        let mut svg = String::new();
        let mut out = |line: String| {
            svg.push_str(&line);
            svg.push('\n');
        };

        out(format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" font-family="{FONT_FAMILY}">"#,
            w = l.width,
            h = l.height,
        ));
        out(r##"<rect width="100%" height="100%" fill="#ffffff"/>"##.to_owned());
        out(format!(
            r#"<text class="title" x="{:.2}" y="{:.2}" font-size="{:.2}" text-anchor="middle">{}</text>"#,
            l.width / 2.0,
            l.pad + l.title_px,
            l.title_px,
            escape(spec.title),
        ));

        let slot = l.plot_width() / spec.bars.len().max(1) as f64;
        let y_max = spec.y_max.max(1) as f64;
        let y_of = |count: usize| l.y1 - count as f64 / y_max * l.plot_height();

        for (i, bar) in spec.bars.iter().enumerate() {
            let cx = l.x0 + slot * (i as f64 + 0.5);
            let bar_width = slot * BAR_WIDTH_FRACTION;
            let top = y_of(bar.count);
            out(format!(
                r#"<rect class="bar" x="{:.2}" y="{top:.2}" width="{bar_width:.2}" height="{:.2}" fill="{}"/>"#,
                cx - bar_width / 2.0,
                l.y1 - top,
                escape(&self.options.bar_color),
            ));
            if bar.show_label {
                let ay = l.y1 + l.tick_len * 2.0 + l.tick_px * 0.5;
                out(tick_line(cx, l.y1, cx, l.y1 + l.tick_len));
                out(format!(
                    r#"<text class="x-tick-label" x="{cx:.2}" y="{ay:.2}" font-size="{:.2}" text-anchor="end" transform="rotate({:.1} {cx:.2} {ay:.2})">{}</text>"#,
                    l.tick_px,
                    -LABEL_ROTATION_DEGREES,
                    escape(&bar.label),
                ));
            }
        }

        for tick in &spec.y_ticks {
            let y = y_of(*tick);
            out(tick_line(l.x0 - l.tick_len, y, l.x0, y));
            out(format!(
                r#"<text class="y-tick-label" x="{:.2}" y="{:.2}" font-size="{:.2}" text-anchor="end">{tick}</text>"#,
                l.x0 - l.tick_len * 2.0,
                y + l.tick_px * 0.35,
                l.tick_px,
            ));
        }

        out(format!(
            r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="#000000" stroke-width="1.5"/>"##,
            l.x0,
            l.y0,
            l.plot_width(),
            l.plot_height(),
        ));
        out(format!(
            r#"<text class="x-label" x="{:.2}" y="{:.2}" font-size="{:.2}" text-anchor="middle">{}</text>"#,
            (l.x0 + l.x1) / 2.0,
            l.height - l.pad,
            l.axis_px,
            escape(spec.x_label),
        ));
        let (lx, ly) = (l.pad + l.axis_px, (l.y0 + l.y1) / 2.0);
        out(format!(
            r#"<text class="y-label" x="{lx:.2}" y="{ly:.2}" font-size="{:.2}" text-anchor="middle" transform="rotate(-90 {lx:.2} {ly:.2})">{}</text>"#,
            l.axis_px,
            escape(spec.y_label),
        ));
        out("</svg>".to_owned());

        svg
    }

    /// Rasterizes the chart to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the SVG cannot be parsed, the canvas cannot be
    /// allocated, or PNG encoding fails.
    pub fn render_png(&self, spec: &ChartSpec) -> Result<Vec<u8>> {
        let svg = self.render_svg(spec);

        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        debug!("Loaded {} font faces for chart text", options.fontdb.len());

        let tree = usvg::Tree::from_str(&svg, &options).context("Failed to build chart")?;
        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
            .context("Failed to allocate chart canvas")?;
        pixmap.fill(tiny_skia::Color::WHITE);
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        pixmap.encode_png().context("Failed to encode chart PNG")
    }

    /// Renders the chart and writes it to `path`, replacing any existing
    /// file. The canvas is dropped before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn write_png(&self, spec: &ChartSpec, path: &Path) -> Result<()> {
        let png = self.render_png(spec)?;
        fs::write(path, png).with_context(|| format!("Failed to write chart {}", path.display()))
    }
}

fn tick_line(x1: f64, y1: f64, x2: f64, y2: f64) -> String {
    format!(
        r##"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="#000000" stroke-width="1.5"/>"##
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use focal_stats_core::{FocalCounts, FocalLength};

    use super::*;

    fn spec_of(values: &[(f64, usize)]) -> ChartSpec {
        let counts: FocalCounts = values
            .iter()
            .map(|(mm, n)| (FocalLength::new(*mm).unwrap(), *n))
            .collect();
        ChartSpec::from_counts(&counts).unwrap()
    }

    fn png_dimensions(png: &[u8]) -> (u32, u32) {
        let be = |i: usize| u32::from_be_bytes([png[i], png[i + 1], png[i + 2], png[i + 3]]);
        (be(16), be(20))
    }

    #[test]
    fn test_default_canvas_is_150_dpi() {
        assert_eq!(ChartOptions::default().pixel_size(), (2100, 1050));
    }

    #[test]
    fn test_svg_contents() {
        let spec = spec_of(&[(24.0, 3), (50.0, 7), (35.0, 2)]);
        let svg = ChartRenderer::default().render_svg(&spec);

        assert!(svg.contains("Focal Length Distribution"));
        assert!(svg.contains("Focal Length (mm)"));
        assert!(svg.contains("Image Count"));
        assert_eq!(svg.matches(r#"class="bar""#).count(), 3);
        assert_eq!(svg.matches(r#"class="x-tick-label""#).count(), 3);
        assert!(svg.contains("rotate(-45.0"));
        assert!(svg.contains(DEFAULT_BAR_COLOR));

        let first = svg.find(">24.0<").unwrap();
        let second = svg.find(">35.0<").unwrap();
        let third = svg.find(">50.0<").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_svg_thins_labels() {
        let values: Vec<(f64, usize)> = (1..=60).map(|mm| (f64::from(mm), 1)).collect();
        let svg = ChartRenderer::default().render_svg(&spec_of(&values));

        assert_eq!(svg.matches(r#"class="bar""#).count(), 60);
        // stride 3
        assert_eq!(svg.matches(r#"class="x-tick-label""#).count(), 20);
    }

    #[test]
    fn test_custom_bar_color() {
        let renderer = ChartRenderer::new(ChartOptions {
            bar_color: "#ff8800".into(),
            ..ChartOptions::default()
        });
        let svg = renderer.render_svg(&spec_of(&[(50.0, 1)]));
        assert!(svg.contains(r##"fill="#ff8800""##));
    }

    #[test]
    fn test_plot_box_inside_canvas() {
        let long_labels: Vec<(f64, usize)> =
            (0..40).map(|i| (1000.0 + f64::from(i) / 7.0, 2)).collect();
        let spec = spec_of(&long_labels);
        let layout = Layout::new(&spec, &ChartOptions::default());

        assert!(layout.x0 > 0.0 && layout.x0 < layout.x1 && layout.x1 < layout.width);
        assert!(layout.y0 > 0.0 && layout.y0 < layout.y1 && layout.y1 < layout.height);
    }

    #[test]
    fn test_render_png() {
        let renderer = ChartRenderer::new(ChartOptions {
            width_in: 4.0,
            height_in: 2.0,
            ..ChartOptions::default()
        });
        let png = renderer.render_png(&spec_of(&[(24.0, 3), (50.0, 7)])).unwrap();

        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(png_dimensions(&png), (600, 300));
    }

    #[test]
    fn test_write_png_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chart.png");
        let renderer = ChartRenderer::default();
        assert!(renderer.write_png(&spec_of(&[(24.0, 1)]), &path).is_err());
    }
}
