//! Canvas rendering for the force graph.
//!
//! Draws in three passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges with arrow heads (world space)
//! 3. Node boxes and labels, hover neighbourhood last so it sits on top

use force_graph::Node;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, NodeInfo};
use super::theme::Theme;

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, theme.node.border_width, state.transform.k);

	ctx.set_fill_style_str(&theme.background.color.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	state.graph.visit_edges(|parent, child, _| {
		let alpha = state
			.highlight
			.edge_alpha(parent.index(), child.index(), theme.edge.dimmed_alpha);
		draw_edge(ctx, &scale, theme, parent, child, alpha);
	});

	state.graph.visit_nodes(|node| {
		if !state.highlight.contains(node.index()) {
			let alpha = state
				.highlight
				.node_alpha(node.index(), theme.node.dimmed_alpha);
			draw_node(ctx, &scale, theme, node, alpha);
		}
	});
	state.graph.visit_nodes(|node| {
		if state.highlight.contains(node.index()) {
			draw_node(ctx, &scale, theme, node, 1.0);
			if state.highlight.hovered == Some(node.index()) {
				draw_hover_ring(ctx, &scale, theme, node, state.highlight.intensity());
			}
		}
	});

	ctx.restore();
}

/// Where the ray from a box centre along `(ux, uy)` leaves the box.
fn box_exit(half_w: f64, half_h: f64, ux: f64, uy: f64) -> f64 {
	let tx = if ux.abs() > 1e-9 { half_w / ux.abs() } else { f64::INFINITY };
	let ty = if uy.abs() > 1e-9 { half_h / uy.abs() } else { f64::INFINITY };
	tx.min(ty)
}

fn draw_edge(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	parent: &Node<NodeInfo>,
	child: &Node<NodeInfo>,
	alpha: f64,
) {
	let (x1, y1) = (parent.x() as f64, parent.y() as f64);
	let (x2, y2) = (child.x() as f64, child.y() as f64);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);

	let from_box = &parent.data.user_data.label;
	let to_box = &child.data.user_data.label;
	let start = box_exit(from_box.width / 2.0, from_box.height / 2.0, ux, uy);
	let end = box_exit(to_box.width / 2.0, to_box.height / 2.0, ux, uy);
	if start + end + scale.arrow_size >= dist {
		// Boxes overlap; nothing sensible to draw between them.
		return;
	}

	let color = theme.edge.color.with_alpha(theme.edge.color.a * alpha).to_css();
	ctx.set_stroke_style_str(&color);
	ctx.set_fill_style_str(&color);
	ctx.set_line_width(scale.edge_width);

	let (tip_x, tip_y) = (x2 - ux * end, y2 - uy * end);
	let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);

	ctx.begin_path();
	ctx.move_to(x1 + ux * start, y1 + uy * start);
	ctx.line_to(back_x, back_y);
	ctx.stroke();

	let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	node: &Node<NodeInfo>,
	alpha: f64,
) {
	let info = &node.data.user_data;
	let (cx, cy) = (node.x() as f64, node.y() as f64);
	let (w, h) = (info.label.width, info.label.height);
	let (x, y) = (cx - w / 2.0, cy - h / 2.0);

	ctx.set_global_alpha(alpha);

	if theme.node.shadow_blur > 0.0 {
		ctx.set_shadow_color(&theme.node.shadow_color.to_css());
		// Shadow parameters ignore the canvas transform.
		ctx.set_shadow_blur(theme.node.shadow_blur);
		ctx.set_shadow_offset_x(theme.node.shadow_offset);
		ctx.set_shadow_offset_y(theme.node.shadow_offset);
	}
	rounded_rect(ctx, x, y, w, h, scale.corner_radius);
	ctx.set_fill_style_str(&info.fill.to_css());
	ctx.fill();
	clear_shadow(ctx);

	if scale.border_width > 0.0 {
		ctx.set_stroke_style_str(&info.fill.darken(theme.node.border_darken).to_css());
		ctx.set_line_width(scale.border_width);
		ctx.stroke();
	}

	if scale.show_labels {
		draw_label(ctx, scale, theme, info, cx, cy);
	}

	ctx.set_global_alpha(1.0);
}

fn draw_label(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	info: &NodeInfo,
	cx: f64,
	cy: f64,
) {
	let lines = &info.label.lines;
	ctx.set_fill_style_str(&theme.node.label_color.to_css());
	ctx.set_font(&scale.font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	let first = cy - scale.line_step * (lines.len().saturating_sub(1)) as f64 / 2.0;
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, cx, first + scale.line_step * i as f64);
	}
}

fn draw_hover_ring(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	node: &Node<NodeInfo>,
	intensity: f64,
) {
	let info = &node.data.user_data;
	let (cx, cy) = (node.x() as f64, node.y() as f64);
	let gap = 3.0 / scale.k;
	let (w, h) = (info.label.width + 2.0 * gap, info.label.height + 2.0 * gap);
	let ring = theme.node.hover_ring;

	rounded_rect(ctx, cx - w / 2.0, cy - h / 2.0, w, h, scale.corner_radius + gap);
	ctx.set_stroke_style_str(&ring.with_alpha(ring.a * intensity).to_css());
	ctx.set_line_width(scale.ring_width);
	ctx.stroke();
}

fn clear_shadow(ctx: &CanvasRenderingContext2d) {
	ctx.set_shadow_blur(0.0);
	ctx.set_shadow_offset_x(0.0);
	ctx.set_shadow_offset_y(0.0);
	ctx.set_shadow_color("rgba(0, 0, 0, 0)");
}
