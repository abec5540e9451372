//! Leptos component binding the canvas engine to an HTML canvas element.
//!
//! The component wires mouse, wheel and keyboard handlers to the
//! [`InteractionController`], observes its container for size changes, and
//! re-renders from a reactive effect whenever the store signal changes.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

use super::config::CanvasConfig;
use super::controller::{InteractionController, KeyInput, PointerInput};
use super::geometry::Point;
use super::render;
use super::resize::{
	BackingStore, ContainerObserver, PixelRatioListener, apply_canvas_size, context_2d, device_pixel_ratio,
};
use super::store::{CanvasState, EditTarget, GraphStore};
use super::theme::Theme;

/// Canvas-local coordinates of a mouse event.
fn local_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn pointer_input(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> PointerInput {
	PointerInput {
		position: local_point(canvas, ev),
		modifier: ev.ctrl_key() || ev.meta_key(),
	}
}

/// Renders an interactive node-link graph on a canvas element.
///
/// The graph, selection, view and size all live in the `store` signal; the
/// component only mutates them through [`GraphStore`]. Editor requests are
/// written to `editor`. The canvas fills its parent container and tracks its
/// size.
#[component]
pub fn GraphCanvas(
	store: RwSignal<CanvasState>,
	editor: RwSignal<Option<EditTarget>>,
	#[prop(optional)] config: Option<CanvasConfig>,
	#[prop(optional)] theme: Option<Theme>,
) -> impl IntoView {
	let config = config.unwrap_or_default().sanitized();
	let theme = theme.unwrap_or_default();
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let controller = Rc::new(RefCell::new(InteractionController::new(config.clone())));
	let observer: Rc<RefCell<Option<ContainerObserver>>> = Rc::new(RefCell::new(None));
	let dpr_listener: Rc<RefCell<Option<PixelRatioListener>>> = Rc::new(RefCell::new(None));
	let pixel_ratio = RwSignal::new(device_pixel_ratio());

	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		if observer.borrow().is_some() {
			return;
		}
		let mut store = store;
		*observer.borrow_mut() = ContainerObserver::observe(&container, move |size| {
			if store.with_state(|s| s.size) != size {
				store.set_canvas_size(size);
			}
		});
		*dpr_listener.borrow_mut() = PixelRatioListener::listen(move |dpr| pixel_ratio.set(dpr));
	});

	// Resize the backing store when the logical size or pixel ratio changes,
	// then draw.
	let render_config = config.clone();
	Effect::new(move |prev: Option<BackingStore>| {
		let backing = BackingStore::new(store.with(|s| s.size), pixel_ratio.get());
		let Some(canvas) = canvas_ref.get() else {
			return backing;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(ctx) = context_2d(&canvas) else {
			return backing;
		};
		if prev != Some(backing) {
			apply_canvas_size(&canvas, &ctx, backing);
		}
		store.with(|state| render::render(&ctx, state, &theme, &render_config));
		backing
	});

	let controller_md = controller.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let _ = canvas.focus();
		let mut store = store;
		controller_md
			.borrow_mut()
			.pointer_down(&mut store, pointer_input(&canvas, &ev));
	};

	let controller_mm = controller.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let mut store = store;
		controller_mm
			.borrow_mut()
			.pointer_move(&mut store, pointer_input(&canvas, &ev));
	};

	let controller_mu = controller.clone();
	let on_mouseup = move |_: MouseEvent| {
		controller_mu.borrow_mut().pointer_up();
	};

	let controller_ml = controller.clone();
	let on_mouseleave = move |_: MouseEvent| {
		controller_ml.borrow_mut().pointer_up();
	};

	let controller_dc = controller.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (mut store, mut editor) = (store, editor);
		controller_dc
			.borrow_mut()
			.double_click(&mut store, &mut editor, pointer_input(&canvas, &ev));
	};

	let controller_wh = controller.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let anchor = local_point(&canvas, &ev);
		let mut store = store;
		controller_wh
			.borrow_mut()
			.wheel(&mut store, anchor, ev.delta_y());
	};

	let controller_kd = controller;
	let on_keydown = move |ev: KeyboardEvent| {
		let input = KeyInput {
			key: ev.key(),
			modifier: ev.ctrl_key() || ev.meta_key(),
		};
		let (mut store, mut editor) = (store, editor);
		if controller_kd
			.borrow_mut()
			.key_down(&mut store, &mut editor, &input)
		{
			ev.prevent_default();
		}
	};

	view! {
		<div node_ref=container_ref class="graph-canvas-container" style="width: 100%; height: 100%; overflow: hidden;">
			<canvas
				node_ref=canvas_ref
				class="graph-canvas"
				tabindex="0"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:dblclick=on_dblclick
				on:wheel=on_wheel
				on:keydown=on_keydown
				style="display: block; outline: none; cursor: default;"
			/>
		</div>
	}
}
