//! Node box geometry and zoom-dependent drawing sizes.
//!
//! Boxes live in world space: their size comes from the label text and is
//! fixed for the lifetime of the simulation, so hit testing and layout never
//! need a canvas context. Strokes and fonts are mostly screen-space and are
//! resolved per frame by [`ScaledValues`].

use crate::json_graph::LABEL_SEPARATOR;

/// Tunable sizes for graph visuals.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Label font size in world units.
	pub font_px: f64,
	/// Approximate advance of one character, as a fraction of `font_px`.
	pub char_width: f64,
	/// Distance between label baselines, as a fraction of `font_px`.
	pub line_height: f64,
	pub padding_x: f64,
	pub padding_y: f64,
	pub corner_radius: f64,
	/// Labels longer than this (per line, in chars) are cut with an ellipsis.
	pub max_label_chars: usize,
	/// Edge line width in screen pixels.
	pub edge_width: f64,
	/// Arrow head length in world units.
	pub arrow_size: f64,
	/// Below this zoom, label text is skipped and only boxes are drawn.
	pub label_min_k: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			font_px: 12.0,
			char_width: 0.6,
			line_height: 1.3,
			padding_x: 8.0,
			padding_y: 6.0,
			corner_radius: 4.0,
			max_label_chars: 32,
			edge_width: 1.5,
			arrow_size: 7.0,
			label_min_k: 0.35,
			min_zoom: 0.1,
			max_zoom: 10.0,
		}
	}
}

/// Display lines and box size for one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelBox {
	pub lines: Vec<String>,
	pub width: f64,
	pub height: f64,
}

impl ScaleConfig {
	/// Split a node's key and summary into display lines and measure the box
	/// around them.
	///
	/// `key` is `None` for the root, whose box only shows its summary. Any other
	/// node keeps its key line even when the key is empty.
	pub fn label_box(&self, key: Option<&str>, summary: &str) -> LabelBox {
		let lines: Vec<String> = key
			.into_iter()
			.flat_map(|k| k.split(LABEL_SEPARATOR))
			.chain(summary.split(LABEL_SEPARATOR))
			.map(|line| truncate(line, self.max_label_chars))
			.collect();

		let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
		let rows = lines.len().max(1) as f64;
		LabelBox {
			width: widest as f64 * self.font_px * self.char_width + 2.0 * self.padding_x,
			height: rows * self.font_px * self.line_height + 2.0 * self.padding_y,
			lines,
		}
	}

	pub fn clamp_zoom(&self, k: f64) -> f64 {
		k.clamp(self.min_zoom, self.max_zoom)
	}
}

fn truncate(line: &str, max_chars: usize) -> String {
	if line.chars().count() <= max_chars {
		return line.to_string();
	}
	let mut cut: String = line.chars().take(max_chars.saturating_sub(1)).collect();
	cut.push('…');
	cut
}

/// Per-frame sizes for the current zoom level `k`, in world units.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub edge_width: f64,
	pub border_width: f64,
	pub ring_width: f64,
	pub arrow_size: f64,
	pub corner_radius: f64,
	pub font: String,
	pub line_step: f64,
	pub show_labels: bool,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, border_width: f64, k: f64) -> Self {
		Self {
			k,
			edge_width: config.edge_width / k,
			border_width: border_width / k,
			ring_width: 2.0 / k,
			arrow_size: config.arrow_size,
			corner_radius: config.corner_radius,
			font: format!("{}px sans-serif", config.font_px),
			line_step: config.font_px * config.line_height,
			show_labels: k >= config.label_min_k,
		}
	}
}
