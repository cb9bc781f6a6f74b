//! Leptos component wrapping the note graph canvas.
//!
//! The component creates an HTML canvas and wires mouse/wheel handlers into
//! [`ForceGraphState`]. An animation loop runs via `requestAnimationFrame`,
//! ticking the layout every frame and redrawing only when something visible
//! changed. Window resizes rebuild the layout from scratch; unmounting cancels
//! the pending frame, removes the resize listener, disposes the simulation and
//! hides the hover label.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::scale::ScaleConfig;
use super::simulation::SimulationParameters;
use super::state::{ForceGraphState, HoverLabel};
use super::theme::Theme;
use crate::document::{GraphDocument, NoteRecord};

/// Graph state bundled with what is needed to draw it.
struct GraphContext {
	state: ForceGraphState,
	theme: Theme,
	ctx: CanvasRenderingContext2d,
}

/// Browser resources held by a mounted canvas.
#[derive(Default)]
struct Handles {
	animate: Option<Closure<dyn FnMut()>>,
	frame: Option<i32>,
	resize: Option<Closure<dyn FnMut()>>,
	last_frame_ms: f64,
}

type Shared<T> = Rc<RefCell<T>>;

/// Cancel the animation loop and resize listener, then dispose the layout.
fn teardown(
	context: &RefCell<Option<GraphContext>>,
	handles: &RefCell<Handles>,
	hover: RwSignal<Option<HoverLabel>>,
) {
	let mut h = handles.borrow_mut();
	let (frame, resize) = (h.frame.take(), h.resize.take());
	if (frame.is_some() || resize.is_some())
		&& let Some(window) = web_sys::window()
	{
		if let Some(frame) = frame {
			let _ = window.cancel_animation_frame(frame);
		}
		if let Some(cb) = resize {
			let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}
	h.animate = None;
	drop(h);

	if let Some(mut c) = context.borrow_mut().take() {
		c.state.dispose();
		debug!("graph canvas disposed");
	}
	let _ = hover.try_set(None);
}

fn viewport_size(
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		if let Some(window) = web_sys::window() {
			let w = window.inner_width().ok().and_then(|v| v.as_f64());
			let h = window.inner_height().ok().and_then(|v| v.as_f64());
			if let (Some(w), Some(h)) = (w, h) {
				return (w, h);
			}
		}
	}
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| parent.as_ref().map_or(800.0, |p| p.client_width() as f64)),
		height.unwrap_or_else(|| parent.as_ref().map_or(600.0, |p| p.client_height() as f64)),
	)
}

fn pointer_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Schedule the next animation frame, remembering its handle for cancellation.
fn request_frame(handles: &RefCell<Handles>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let mut guard = handles.borrow_mut();
	let h = &mut *guard;
	if let Some(cb) = &h.animate {
		h.frame = window.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
	}
}

/// Renders the note graph on a canvas element.
///
/// Pass the document via the reactive `data` signal. Clicking a note reports
/// it through `on_select`; clicking the background reports `None`. `selected`
/// mirrors the selection owned by the surrounding shell (e.g. after its close
/// button) back into the canvas outline. The canvas sizes itself to its parent
/// container by default; `fullscreen = true` fills the window instead.
/// Explicit `width`/`height` override automatic sizing.
#[component]
pub fn ForceGraphCanvas(
	/// Document to lay out; a new value restarts the layout.
	#[prop(into)]
	data: Signal<GraphDocument>,
	/// Called with the clicked note, or `None` when the selection is cleared.
	#[prop(into)]
	on_select: Callback<Option<NoteRecord>>,
	/// Id of the note selected by the surrounding shell.
	#[prop(into, default = Signal::stored(None))]
	selected: Signal<Option<String>>,
	/// Fill the window instead of the parent element.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed canvas width in pixels.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed canvas height in pixels.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let hover = RwSignal::new(None::<HoverLabel>);
	let label_style = Theme::default().label;

	let context: Shared<Option<GraphContext>> = Rc::new(RefCell::new(None));
	let handles: Shared<Handles> = Rc::new(RefCell::new(Handles::default()));

	let (context_init, handles_init) = (context.clone(), handles.clone());
	Effect::new(move |_| {
		let document = Rc::new(data.get());
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		teardown(&context_init, &handles_init, hover);

		let (w, h) = viewport_size(&canvas, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("canvas 2d context unavailable, graph not drawn");
			return;
		};

		debug!(
			"mounting graph canvas {w}x{h}: {} notes, {} links",
			document.nodes.len(),
			document.links.len()
		);
		let mut state = ForceGraphState::new(
			document,
			w,
			h,
			ScaleConfig::default(),
			SimulationParameters::default(),
		);
		state.sync_selection(selected.get_untracked().as_deref());
		*context_init.borrow_mut() = Some(GraphContext {
			state,
			theme: Theme::default(),
			ctx,
		});

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		let resize_cb = Closure::<dyn FnMut()>::new(move || {
			let (nw, nh) = viewport_size(&canvas_resize, fullscreen, width, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(c) = context_resize.borrow_mut().as_mut() {
				c.state.resize(nw, nh);
			}
			hover.set(None);
		});
		if let Some(window) = web_sys::window() {
			let _ = window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
		}

		let (context_anim, handles_anim) = (context_init.clone(), handles_init.clone());
		let animate = Closure::<dyn FnMut()>::new(move || {
			let now = js_sys::Date::now();
			let last = std::mem::replace(&mut handles_anim.borrow_mut().last_frame_ms, now);
			let dt = ((now - last) / 1000.0).clamp(0.0, 0.1);

			match context_anim.borrow_mut().as_mut() {
				Some(c) => {
					c.state.tick(dt);
					if c.state.take_redraw() {
						render::render(&c.state, &c.ctx, &c.theme);
					}
				}
				None => return,
			}
			request_frame(&handles_anim);
		});

		{
			let mut h = handles_init.borrow_mut();
			h.resize = Some(resize_cb);
			h.animate = Some(animate);
			h.last_frame_ms = js_sys::Date::now();
		}
		request_frame(&handles_init);
	});

	let context_sel = context.clone();
	Effect::new(move |_| {
		let id = selected.get();
		if let Some(c) = context_sel.borrow_mut().as_mut() {
			c.state.sync_selection(id.as_deref());
		}
	});

	let cleanup = SendWrapper::new((context.clone(), handles.clone()));
	on_cleanup(move || {
		let (context, handles) = cleanup.take();
		teardown(&context, &handles, hover);
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(c) = context_md.borrow_mut().as_mut() {
			c.state.pointer_down(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(c) = context_mm.borrow_mut().as_mut() {
			c.state.pointer_move(x, y);
			let label = c.state.hover_label().cloned();
			if hover.with_untracked(|current| *current != label) {
				hover.set(label);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let event = context_mu
			.borrow_mut()
			.as_mut()
			.and_then(|c| c.state.pointer_up(x, y));
		if let Some(event) = event {
			on_select.run(event.into_note());
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(c) = context_ml.borrow_mut().as_mut() {
			c.state.pointer_leave();
		}
		hover.set(None);
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(c) = context_wh.borrow_mut().as_mut() {
			c.state.wheel(x, y, ev.delta_y());
		}
	};

	view! {
		<div class="force-graph" style="position: relative; width: 100%; height: 100%; overflow: hidden;">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{move || {
				hover
					.get()
					.map(|label| {
						view! {
							<div class="graph-tooltip" style=label_style.css(label.x, label.y)>
								{label.text}
							</div>
						}
					})
			}}
		</div>
	}
}
