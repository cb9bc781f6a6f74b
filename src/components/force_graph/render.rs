//! Canvas rendering for the note graph.
//!
//! Drawing happens in passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges (world space)
//! 3. Nodes outside the hover neighborhood, then highlighted nodes on top,
//!    then hover and selection outlines

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::ScaledValues;
use super::state::ForceGraphState;
use super::theme::{Theme, type_color};

/// Ease highlight transitions so they don't start or stop abruptly.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let scaled = ScaledValues::new(&state.scale, state.transform.k);

	ctx.set_fill_style_str(&theme.background.color.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, theme);
	draw_nodes(state, ctx, &scaled, theme);

	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let nodes = state.simulation.nodes();
	let max_t = smooth_step(state.highlight.max_intensity());

	for link in state.simulation.links() {
		let (Some(s), Some(t)) = (nodes.get(link.source), nodes.get(link.target)) else {
			continue;
		};
		let edge_t = smooth_step(state.highlight.edge_intensity(link.source, link.target));
		let color = if edge_t > 0.01 {
			theme.edge.color.lerp(theme.edge.highlight_color, edge_t)
		} else {
			let color = theme.edge.color;
			color.with_alpha(color.a * (1.0 - (1.0 - theme.node.dim_alpha) * max_t))
		};

		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(state.scale.edge.width(link.weight));
		ctx.begin_path();
		ctx.move_to(s.x, s.y);
		ctx.line_to(t.x, t.y);
		ctx.stroke();
	}
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scaled: &ScaledValues,
	theme: &Theme,
) {
	let notes = &state.simulation.document().nodes;
	let max_t = smooth_step(state.highlight.max_intensity());
	let dim = 1.0 - (1.0 - theme.node.dim_alpha) * max_t;

	// Pass 1: everything outside the highlight, dimmed while one is active
	for (idx, (node, note)) in state.simulation.nodes().iter().zip(notes).enumerate() {
		if state.highlight.node_intensity(idx) > 0.001 {
			continue;
		}
		let fill = type_color(note.note_type).with_alpha(theme.node.fill_alpha * dim);
		fill_circle(ctx, node.x, node.y, node.radius, &fill.to_css());
	}

	// Pass 2: highlighted/transitioning nodes on top
	for (idx, (node, note)) in state.simulation.nodes().iter().zip(notes).enumerate() {
		let node_t = state.highlight.node_intensity(idx);
		if node_t <= 0.001 {
			continue;
		}
		let eased = smooth_step(node_t);
		let alpha = dim + (1.0 - dim) * eased;
		let fill = type_color(note.note_type).with_alpha(theme.node.fill_alpha * alpha);
		fill_circle(ctx, node.x, node.y, node.radius, &fill.to_css());
	}

	// Pass 3: outlines
	if let Some(node) = state.selected().and_then(|idx| state.simulation.node(idx)) {
		stroke_circle(
			ctx,
			node.x,
			node.y,
			node.radius + scaled.outline_width,
			&theme.node.selected_outline.to_css(),
			scaled.outline_width,
		);
	}
	for (idx, node) in state.simulation.nodes().iter().enumerate() {
		let ring_t = smooth_step(state.highlight.ring_intensity(idx));
		if ring_t <= 0.01 {
			continue;
		}
		let color = theme.node.hover_outline;
		stroke_circle(
			ctx,
			node.x,
			node.y,
			node.radius,
			&color.with_alpha(color.a * ring_t).to_css(),
			scaled.outline_width,
		);
	}
}

fn fill_circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, color: &str) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(color);
	ctx.fill();
}

fn stroke_circle(
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	radius: f64,
	color: &str,
	width: f64,
) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(width);
	ctx.stroke();
}
