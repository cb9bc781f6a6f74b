//! Interaction state for the note graph.
//!
//! Translates pointer and wheel input, given in canvas pixels, into graph
//! operations: pan/zoom of the view transform, drag pins on the layout
//! engine, hover highlighting with a floating label, and single-note
//! selection. Everything here runs on the one UI thread, in event order.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use log::debug;

use super::scale::{ScaleConfig, ScaledValues, ZoomConfig};
use super::simulation::{Phase, Simulation, SimulationParameters};
use crate::document::{GraphDocument, NoteRecord};

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal translation in screen pixels.
	pub x: f64,
	/// Vertical translation in screen pixels.
	pub y: f64,
	/// Zoom factor, clamped to the configured extent.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	/// Startup framing: slightly zoomed out and nudged toward the center.
	pub fn initial(width: f64, height: f64, zoom: &ZoomConfig) -> Self {
		Self {
			x: width * zoom.initial_offset.0,
			y: height * zoom.initial_offset.1,
			k: zoom.initial_scale,
		}
	}

	/// Canvas pixels to world units.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// World units to canvas pixels.
	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}

	/// Scale by `factor` around a fixed screen point, staying inside the
	/// zoom extent.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64, zoom: &ZoomConfig) {
		let k = (self.k * factor).clamp(zoom.min_scale, zoom.max_scale);
		let ratio = k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = k;
	}
}

/// An in-progress node drag.
#[derive(Clone, Debug)]
pub struct DragState {
	/// Index of the dragged node.
	pub node: usize,
	/// Node position minus pointer position at grab time, in world units.
	pub grab_offset: (f64, f64),
	/// Pointer position at grab time, in canvas pixels.
	pub start_x: f64,
	/// Pointer position at grab time, in canvas pixels.
	pub start_y: f64,
	/// Pointer travelled past the click tolerance.
	pub moved: bool,
}

/// An in-progress background pan.
#[derive(Clone, Debug)]
pub struct PanState {
	/// Pointer position at press time, in canvas pixels.
	pub start_x: f64,
	/// Pointer position at press time, in canvas pixels.
	pub start_y: f64,
	/// Transform translation when the pan began.
	pub transform_start_x: f64,
	/// Transform translation when the pan began.
	pub transform_start_y: f64,
	/// Pointer travelled past the click tolerance.
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
enum Gesture {
	#[default]
	Idle,
	Dragging(DragState),
	Panning(PanState),
}

/// Transient title shown next to the pointer while a node is hovered.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverLabel {
	/// Title of the hovered note.
	pub text: String,
	/// Pointer position in canvas pixels.
	pub x: f64,
	/// Pointer position in canvas pixels.
	pub y: f64,
}

/// The outward "note selected" event.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionEvent {
	/// A note was clicked.
	Select(NoteRecord),
	/// The background was clicked while a note was selected.
	Clear,
}

impl SelectionEvent {
	/// The selected note, or `None` for a cleared selection.
	pub fn into_note(self) -> Option<NoteRecord> {
		match self {
			SelectionEvent::Select(note) => Some(note),
			SelectionEvent::Clear => None,
		}
	}
}

/// Minimum time (seconds) a highlight is held before it starts fading, so
/// skimming past a node does not flash the whole neighborhood.
const MIN_HOLD_TIME: f64 = 0.12;
const FADE_IN_SPEED: f64 = 6.0;
const FADE_OUT_SPEED: f64 = 4.0;
const VISIBLE: f64 = 0.005;

#[derive(Clone, Copy, Debug, Default)]
struct Fade {
	/// Neighborhood highlight, 0..1.
	level: f64,
	/// Hover outline, 0..1. Only the hovered node rises.
	ring: f64,
	hold: f64,
}

/// Smoothed hover highlighting of a node and its neighbors.
///
/// Each touched node carries its own intensity that eases toward 1 while the
/// node is in the hovered neighborhood and decays toward 0 afterwards, using
/// exponential smoothing: `v += (target - v) * (1 - e^(-speed * dt))`.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	hovered: Option<usize>,
	targets: HashSet<usize>,
	fades: HashMap<usize, Fade>,
	max_level: f64,
}

impl HighlightState {
	/// Node under the pointer, if any.
	pub fn hovered(&self) -> Option<usize> {
		self.hovered
	}

	/// Hover `node` (or nothing) and recompute its neighborhood.
	pub fn set_hover(&mut self, node: Option<usize>, edges: &[(usize, usize)]) {
		if self.hovered == node {
			return;
		}
		self.hovered = node;
		self.targets.clear();

		let Some(idx) = node else {
			return;
		};
		self.targets.insert(idx);
		self.targets.extend(edges.iter().filter_map(|&(s, t)| {
			if s == idx {
				Some(t)
			} else if t == idx {
				Some(s)
			} else {
				None
			}
		}));
		for &i in &self.targets {
			self.fades.entry(i).or_default().hold = MIN_HOLD_TIME;
		}
	}

	/// Advance every fade by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		let rise = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let decay = (-FADE_OUT_SPEED * dt).exp();

		let mut max_level: f64 = 0.0;
		self.fades.retain(|idx, fade| {
			let target = self.targets.contains(idx);
			if target {
				fade.level += (1.0 - fade.level) * rise;
			} else {
				fade.hold -= dt;
				if fade.hold <= 0.0 {
					fade.level *= decay;
				}
			}

			if self.hovered == Some(*idx) {
				fade.ring += (1.0 - fade.ring) * rise;
			} else if target || fade.hold <= 0.0 {
				fade.ring *= decay;
			}

			max_level = max_level.max(fade.level);
			target || fade.level > VISIBLE || fade.ring > VISIBLE
		});
		self.max_level = max_level;
	}

	/// Neighborhood highlight of a node, 0..1.
	pub fn node_intensity(&self, idx: usize) -> f64 {
		self.fades.get(&idx).map_or(0.0, |f| f.level)
	}

	/// Hover outline of a node, 0..1.
	pub fn ring_intensity(&self, idx: usize) -> f64 {
		self.fades.get(&idx).map_or(0.0, |f| f.ring)
	}

	/// Geometric mean of the endpoint intensities.
	pub fn edge_intensity(&self, a: usize, b: usize) -> f64 {
		(self.node_intensity(a) * self.node_intensity(b)).sqrt()
	}

	/// Highest node intensity, used to dim everything outside the neighborhood.
	pub fn max_intensity(&self) -> f64 {
		self.max_level
	}

	/// Every fade has reached its resting value, so further ticks leave the
	/// picture unchanged.
	pub fn is_idle(&self) -> bool {
		self.fades.iter().all(|(idx, fade)| {
			let level_done = if self.targets.contains(idx) {
				fade.level >= 1.0 - VISIBLE
			} else {
				fade.level <= VISIBLE
			};
			let ring_done = if self.hovered == Some(*idx) {
				fade.ring >= 1.0 - VISIBLE
			} else {
				fade.ring <= VISIBLE
			};
			level_done && ring_done
		})
	}
}

/// View state of one mounted graph: the layout engine plus everything the
/// pointer does to it.
///
/// Created when the canvas mounts and rebuilt (simulation included) when the
/// viewport size changes. The animation loop calls [`ForceGraphState::tick`]
/// once per frame.
pub struct ForceGraphState {
	/// Layout engine for the current viewport.
	pub simulation: Simulation,
	/// Current pan and zoom.
	pub transform: ViewTransform,
	/// Hover fades.
	pub highlight: HighlightState,
	/// Sizing and zoom policy.
	pub scale: ScaleConfig,
	/// Viewport width in pixels.
	pub width: f64,
	/// Viewport height in pixels.
	pub height: f64,
	params: SimulationParameters,
	gesture: Gesture,
	hover_label: Option<HoverLabel>,
	selected: Option<usize>,
	edges: Vec<(usize, usize)>,
	/// Something visible changed since the last frame was drawn.
	redraw: bool,
}

impl ForceGraphState {
	/// Lay out `document` in a `width` by `height` viewport.
	pub fn new(
		document: Rc<GraphDocument>,
		width: f64,
		height: f64,
		scale: ScaleConfig,
		params: SimulationParameters,
	) -> Self {
		let simulation = Simulation::new(document, width, height, params.clone(), &scale.node);
		let edges = Self::edge_pairs(&simulation);
		Self {
			simulation,
			transform: ViewTransform::initial(width, height, &scale.zoom),
			highlight: HighlightState::default(),
			scale,
			width,
			height,
			params,
			gesture: Gesture::Idle,
			hover_label: None,
			selected: None,
			edges,
			redraw: true,
		}
	}

	fn edge_pairs(simulation: &Simulation) -> Vec<(usize, usize)> {
		simulation
			.links()
			.iter()
			.map(|l| (l.source, l.target))
			.collect()
	}

	/// Canvas pixels to world units under the current transform.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		self.transform.screen_to_graph(sx, sy)
	}

	/// Topmost node under a screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scaled = ScaledValues::new(&self.scale, self.transform.k);
		self.simulation.node_at(gx, gy, scaled.hit_slack)
	}

	/// Label to show for the hovered note.
	pub fn hover_label(&self) -> Option<&HoverLabel> {
		self.hover_label.as_ref()
	}

	/// Index of the selected note.
	pub fn selected(&self) -> Option<usize> {
		self.selected
	}

	/// A node is held by the pointer.
	pub fn is_dragging(&self) -> bool {
		matches!(self.gesture, Gesture::Dragging(_))
	}

	/// Press at a screen position: grab the node under it, or start panning.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		self.end_gesture();
		self.redraw = true;

		if let Some(idx) = self.node_at_position(sx, sy) {
			let Some((nx, ny)) = self.simulation.node(idx).map(|n| (n.x, n.y)) else {
				return;
			};
			let (gx, gy) = self.screen_to_graph(sx, sy);
			self.simulation.perturb();
			self.simulation.pin(idx, nx, ny);
			self.gesture = Gesture::Dragging(DragState {
				node: idx,
				grab_offset: (nx - gx, ny - gy),
				start_x: sx,
				start_y: sy,
				moved: false,
			});
		} else {
			self.gesture = Gesture::Panning(PanState {
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
				moved: false,
			});
		}
	}

	/// Pointer moved: continue a drag or pan, or update the hover.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		let tolerance = self.scale.click_tolerance;
		if matches!(self.gesture, Gesture::Idle) {
			let hovered = self.node_at_position(sx, sy);
			self.set_hover(hovered);
		} else {
			self.redraw = true;
		}

		match &mut self.gesture {
			Gesture::Dragging(drag) => {
				drag.moved |= exceeds(sx - drag.start_x, sy - drag.start_y, tolerance);
				let (node, (ox, oy)) = (drag.node, drag.grab_offset);
				let (gx, gy) = self.transform.screen_to_graph(sx, sy);
				self.simulation.pin(node, gx + ox, gy + oy);
			}
			Gesture::Panning(pan) => {
				pan.moved |= exceeds(sx - pan.start_x, sy - pan.start_y, tolerance);
				self.transform.x = pan.transform_start_x + (sx - pan.start_x);
				self.transform.y = pan.transform_start_y + (sy - pan.start_y);
			}
			Gesture::Idle => {}
		}

		if let Some(label) = &mut self.hover_label {
			label.x = sx;
			label.y = sy;
		}
	}

	/// Finish the current gesture. A press that stayed within the click
	/// tolerance selects the node under it, or clears the selection when it
	/// landed on the background.
	pub fn pointer_up(&mut self, sx: f64, sy: f64) -> Option<SelectionEvent> {
		let tolerance = self.scale.click_tolerance;
		self.redraw = true;
		match self.end_gesture() {
			Gesture::Dragging(drag) => {
				let moved = drag.moved || exceeds(sx - drag.start_x, sy - drag.start_y, tolerance);
				if moved {
					return None;
				}
				let note = self.simulation.note(drag.node)?.clone();
				self.selected = Some(drag.node);
				Some(SelectionEvent::Select(note))
			}
			Gesture::Panning(pan) => {
				let moved = pan.moved || exceeds(sx - pan.start_x, sy - pan.start_y, tolerance);
				if moved || self.selected.is_none() {
					return None;
				}
				self.selected = None;
				Some(SelectionEvent::Clear)
			}
			Gesture::Idle => None,
		}
	}

	/// Pointer left the canvas: drop any gesture and the hover.
	pub fn pointer_leave(&mut self) {
		self.end_gesture();
		self.set_hover(None);
	}

	/// Zoom around the pointer. Positive `delta_y` (scrolling down) zooms out.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = (-delta_y * self.scale.zoom.wheel_sensitivity).exp2();
		self.transform.zoom_at(sx, sy, factor, &self.scale.zoom);
		self.redraw = true;
	}

	/// Release the drag pin (if any) and return the previous gesture.
	fn end_gesture(&mut self) -> Gesture {
		let gesture = std::mem::take(&mut self.gesture);
		if let Gesture::Dragging(drag) = &gesture {
			self.simulation.release();
			self.simulation.unpin(drag.node);
		}
		gesture
	}

	/// Hover `node` (or nothing), updating the highlight and the label.
	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.highlight.hovered() == node {
			return;
		}
		self.redraw = true;
		self.highlight.set_hover(node, &self.edges);
		self.hover_label = node.and_then(|idx| {
			let (x, y) = self
				.hover_label
				.as_ref()
				.map_or((0.0, 0.0), |label| (label.x, label.y));
			self.simulation.note(idx).map(|note| HoverLabel {
				text: note.title.clone(),
				x,
				y,
			})
		});
	}

	/// Mirror a selection made outside the canvas (e.g. the close button).
	pub fn sync_selection(&mut self, id: Option<&str>) {
		self.selected = id.and_then(|id| self.simulation.index_of(id));
		self.redraw = true;
	}

	/// Advance physics and highlight fades. Returns whether node positions moved.
	pub fn tick(&mut self, dt: f64) -> bool {
		let moved = self.simulation.tick();
		let fading = !self.highlight.is_idle();
		self.highlight.tick(dt);
		self.redraw |= moved || fading;
		moved
	}

	/// Whether the canvas needs drawing, clearing the flag. Stays false while
	/// the layout is settled, fades are at rest and no input arrives.
	pub fn take_redraw(&mut self) -> bool {
		std::mem::take(&mut self.redraw)
	}

	/// Rebuild the layout for a new viewport. The previous simulation is
	/// disposed and a fresh one starts from its initial seed.
	pub fn resize(&mut self, width: f64, height: f64) {
		debug!("reinitializing layout for {width}x{height}");
		let document = Rc::clone(self.simulation.document());
		self.simulation.dispose();
		self.simulation = Simulation::new(document, width, height, self.params.clone(), &self.scale.node);
		self.edges = Self::edge_pairs(&self.simulation);
		self.transform = ViewTransform::initial(width, height, &self.scale.zoom);
		self.width = width;
		self.height = height;
		self.gesture = Gesture::Idle;
		self.highlight = HighlightState::default();
		self.hover_label = None;
		self.redraw = true;
	}

	/// Stop the layout for good and drop transient UI state.
	pub fn dispose(&mut self) {
		self.gesture = Gesture::Idle;
		self.simulation.dispose();
		self.highlight = HighlightState::default();
		self.hover_label = None;
		self.selected = None;
	}

	/// The layout was torn down.
	pub fn is_disposed(&self) -> bool {
		self.simulation.phase() == Phase::Disposed
	}
}

fn exceeds(dx: f64, dy: f64, tolerance: f64) -> bool {
	dx * dx + dy * dy > tolerance * tolerance
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::simulation::tests::chain_document;

	fn state() -> ForceGraphState {
		ForceGraphState::new(
			chain_document(),
			800.0,
			600.0,
			ScaleConfig::default(),
			SimulationParameters::default(),
		)
	}

	fn settle(state: &mut ForceGraphState) {
		for _ in 0..1_000 {
			if state.simulation.phase() != Phase::Simulating {
				break;
			}
			state.tick(0.016);
		}
	}

	fn screen_pos(state: &ForceGraphState, idx: usize) -> (f64, f64) {
		let node = state.simulation.node(idx).unwrap();
		state.transform.graph_to_screen(node.x, node.y)
	}

	#[test]
	fn initial_transform_frames_the_view() {
		let s = state();
		assert_eq!(
			s.transform,
			ViewTransform {
				x: 80.0,
				y: 60.0,
				k: 0.8
			}
		);
		let (gx, gy) = s.screen_to_graph(400.0, 300.0);
		assert_eq!(s.transform.graph_to_screen(gx, gy), (400.0, 300.0));
	}

	#[test]
	fn drag_then_release_frees_node() {
		let mut s = state();
		settle(&mut s);
		assert_eq!(s.simulation.phase(), Phase::Settled);

		let (sx, sy) = screen_pos(&s, 1);
		s.pointer_down(sx, sy);
		assert!(s.is_dragging());
		assert_eq!(s.simulation.phase(), Phase::Simulating);

		s.pointer_move(sx + 80.0, sy + 40.0);
		s.tick(0.016);
		let (gx, gy) = s.screen_to_graph(sx + 80.0, sy + 40.0);
		let node = s.simulation.node(1).unwrap();
		assert!((node.x - gx).abs() < 1e-6 && (node.y - gy).abs() < 1e-6);

		assert_eq!(s.pointer_up(sx + 80.0, sy + 40.0), None);
		assert!(s.simulation.node(1).unwrap().pinned.is_none());

		let before = s.simulation.node(1).unwrap().clone();
		assert!(s.tick(0.016));
		let after = s.simulation.node(1).unwrap();
		assert!((after.x, after.y) != (before.x, before.y));
	}

	#[test]
	fn click_on_node_selects_it() {
		let mut s = state();
		settle(&mut s);
		let (sx, sy) = screen_pos(&s, 2);

		s.pointer_down(sx, sy);
		s.pointer_move(sx + 1.0, sy + 1.0);
		let event = s.pointer_up(sx + 2.0, sy + 1.0);

		match event {
			Some(SelectionEvent::Select(note)) => assert_eq!(note.id, "c"),
			other => panic!("expected selection, got {other:?}"),
		}
		assert_eq!(s.selected(), Some(2));
		assert!(s.simulation.node(2).unwrap().pinned.is_none());
	}

	#[test]
	fn selecting_another_node_replaces_selection() {
		let mut s = state();
		settle(&mut s);
		for idx in [0, 1] {
			let (sx, sy) = screen_pos(&s, idx);
			s.pointer_down(sx, sy);
			s.pointer_up(sx, sy);
		}
		assert_eq!(s.selected(), Some(1));
	}

	#[test]
	fn background_click_clears_selection() {
		let mut s = state();
		settle(&mut s);
		let (sx, sy) = screen_pos(&s, 0);
		s.pointer_down(sx, sy);
		s.pointer_up(sx, sy);
		assert!(s.selected().is_some());

		s.pointer_down(5.0, 5.0);
		assert_eq!(s.pointer_up(5.0, 5.0), Some(SelectionEvent::Clear));
		assert_eq!(s.selected(), None);

		s.pointer_down(5.0, 5.0);
		assert_eq!(s.pointer_up(5.0, 5.0), None, "nothing left to clear");
	}

	#[test]
	fn panning_moves_view_without_clearing() {
		let mut s = state();
		s.sync_selection(Some("b"));
		s.pointer_down(5.0, 5.0);
		s.pointer_move(25.0, 45.0);
		assert_eq!(s.pointer_up(25.0, 45.0), None);
		assert_eq!((s.transform.x, s.transform.y), (100.0, 100.0));
		assert_eq!(s.selected(), Some(1));
	}

	#[test]
	fn wheel_zoom_is_anchored_and_clamped() {
		let mut s = state();
		let anchor = s.screen_to_graph(300.0, 200.0);
		s.wheel(300.0, 200.0, -100.0);
		assert!(s.transform.k > 0.8);
		let (ax, ay) = s.screen_to_graph(300.0, 200.0);
		assert!((ax - anchor.0).abs() < 1e-9 && (ay - anchor.1).abs() < 1e-9);

		for _ in 0..50 {
			s.wheel(300.0, 200.0, -500.0);
		}
		assert_eq!(s.transform.k, 4.0);
		for _ in 0..50 {
			s.wheel(300.0, 200.0, 500.0);
		}
		assert_eq!(s.transform.k, 0.1);
	}

	#[test]
	fn hover_shows_and_clears_label() {
		let mut s = state();
		settle(&mut s);
		let (sx, sy) = screen_pos(&s, 1);

		s.pointer_move(sx, sy);
		assert_eq!(s.highlight.hovered(), Some(1));
		let label = s.hover_label().unwrap();
		assert_eq!(label.text, "b");
		assert_eq!((label.x, label.y), (sx, sy));

		s.pointer_move(sx + 0.5, sy);
		assert_eq!(s.hover_label().unwrap().x, sx + 0.5);

		s.pointer_move(1.0, 1.0);
		assert_eq!(s.highlight.hovered(), None);
		assert!(s.hover_label().is_none());

		s.pointer_move(sx, sy);
		s.pointer_leave();
		assert!(s.hover_label().is_none());
	}

	#[test]
	fn hover_highlights_neighbors_only() {
		let mut s = state();
		settle(&mut s);
		let (sx, sy) = screen_pos(&s, 0);
		s.pointer_move(sx, sy);
		for _ in 0..10 {
			s.tick(0.016);
		}

		assert!(s.highlight.node_intensity(0) > 0.5);
		assert!(s.highlight.node_intensity(1) > 0.5);
		assert_eq!(s.highlight.node_intensity(2), 0.0);
		assert!(s.highlight.ring_intensity(0) > 0.5);
		assert_eq!(s.highlight.ring_intensity(1), 0.0);
		assert!(s.highlight.edge_intensity(0, 1) > 0.5);

		s.pointer_leave();
		for _ in 0..200 {
			s.tick(0.016);
		}
		assert_eq!(s.highlight.node_intensity(0), 0.0);
		assert_eq!(s.highlight.max_intensity(), 0.0);
	}

	#[test]
	fn settled_idle_view_skips_redraw() {
		let mut s = state();
		settle(&mut s);
		assert!(s.take_redraw());
		assert!(!s.tick(0.016));
		assert!(!s.take_redraw());
		assert!(!s.take_redraw());

		s.wheel(400.0, 300.0, -100.0);
		assert!(s.take_redraw());
		s.tick(0.016);
		assert!(!s.take_redraw());

		s.set_hover(Some(0));
		assert!(!s.highlight.is_idle());
		for _ in 0..200 {
			s.tick(0.016);
		}
		assert!(s.highlight.is_idle());
		assert!(s.take_redraw());
		s.tick(0.016);
		assert!(!s.take_redraw(), "a held hover that finished fading is static");
	}

	#[test]
	fn leaving_mid_drag_releases_pin() {
		let mut s = state();
		let (sx, sy) = screen_pos(&s, 0);
		s.pointer_down(sx, sy);
		assert!(s.simulation.node(0).unwrap().pinned.is_some());
		s.pointer_leave();
		assert!(!s.is_dragging());
		assert!(s.simulation.node(0).unwrap().pinned.is_none());
	}

	#[test]
	fn resize_restarts_layout() {
		let mut s = state();
		s.sync_selection(Some("a"));
		settle(&mut s);
		s.resize(400.0, 200.0);

		assert_eq!(s.simulation.phase(), Phase::Simulating);
		assert_eq!(s.simulation.alpha(), 1.0);
		assert_eq!((s.transform.x, s.transform.y), (40.0, 20.0));
		assert_eq!(s.selected(), Some(0));

		settle(&mut s);
		let n = s.simulation.nodes().len() as f64;
		let cx = s.simulation.nodes().iter().map(|n| n.x).sum::<f64>() / n;
		assert!((cx - 200.0).abs() < 1.0);
	}

	#[test]
	fn dispose_stops_everything() {
		let mut s = state();
		let (sx, sy) = screen_pos(&s, 0);
		s.pointer_move(sx, sy);
		assert!(s.hover_label().is_some());

		s.dispose();
		assert!(s.is_disposed());
		assert!(s.hover_label().is_none());
		assert!(!s.tick(0.016));

		s.pointer_down(sx, sy);
		assert_eq!(s.pointer_up(sx, sy), None);
	}

	#[test]
	fn empty_graph_accepts_input() {
		let mut s = ForceGraphState::new(
			Rc::new(GraphDocument::default()),
			800.0,
			600.0,
			ScaleConfig::default(),
			SimulationParameters::default(),
		);
		s.pointer_move(10.0, 10.0);
		s.pointer_down(10.0, 10.0);
		s.pointer_move(30.0, 10.0);
		assert_eq!(s.pointer_up(30.0, 10.0), None);
		s.wheel(10.0, 10.0, 120.0);
		assert!(s.tick(0.016) || s.simulation.phase() == Phase::Settled);
	}
}
