//! Keeping the canvas sized to its container at the display's pixel density.
//!
//! The logical size (CSS pixels) is what the store, renderer and hit-tester
//! all work in. Only the canvas backing store is multiplied by the device
//! pixel ratio, and the context is scaled once to compensate.

use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Element, HtmlCanvasElement, ResizeObserver, ResizeObserverEntry, Window,
};

use super::viewport::CanvasSize;

/// A usable device pixel ratio: non-finite or non-positive values become 1.
pub fn sanitize_pixel_ratio(dpr: f64) -> f64 {
	if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

/// Backing-store dimensions for a logical size at `dpr`.
pub fn backing_store_size(size: CanvasSize, dpr: f64) -> (u32, u32) {
	let dpr = sanitize_pixel_ratio(dpr);
	let scaled = |v: f64| (v.max(0.0) * dpr).round() as u32;
	(scaled(size.width), scaled(size.height))
}

/// Current device pixel ratio of the window.
pub fn device_pixel_ratio() -> f64 {
	web_sys::window()
		.map(|w| sanitize_pixel_ratio(w.device_pixel_ratio()))
		.unwrap_or(1.0)
}

/// The 2D context of `canvas`, if the browser provides one.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Logical size plus the pixel ratio the backing store was sized for.
///
/// A change in either one means the backing store must be resized, so moving
/// the window to a display with a different density also resharpens it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackingStore {
	/// Logical size in CSS pixels.
	pub size: CanvasSize,
	/// Sanitized device pixel ratio.
	pub pixel_ratio: f64,
}

impl BackingStore {
	/// Backing store for `size` at `dpr`.
	pub fn new(size: CanvasSize, dpr: f64) -> Self {
		Self {
			size,
			pixel_ratio: sanitize_pixel_ratio(dpr),
		}
	}

	/// Device-pixel dimensions.
	pub fn dimensions(&self) -> (u32, u32) {
		backing_store_size(self.size, self.pixel_ratio)
	}
}

/// Resizes the backing store and display size of `canvas`.
///
/// Setting the backing size resets the context, so the density scale is
/// applied here exactly once per resize.
pub fn apply_canvas_size(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d, backing: BackingStore) {
	let (size, dpr) = (backing.size, backing.pixel_ratio);
	let (w, h) = backing.dimensions();
	canvas.set_width(w);
	canvas.set_height(h);

	let style = canvas.style();
	let _ = style.set_property("width", &format!("{}px", size.width));
	let _ = style.set_property("height", &format!("{}px", size.height));

	let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
	debug!(
		"graph-canvas: resized to {}x{} (backing {w}x{h}, dpr {dpr})",
		size.width, size.height
	);
}

/// Watches an element's content box. Disconnects when dropped.
pub struct ContainerObserver {
	observer: ResizeObserver,
	_callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl ContainerObserver {
	/// Calls `on_resize` with the content-box size whenever it changes,
	/// including once right after observation starts.
	pub fn observe(target: &Element, mut on_resize: impl FnMut(CanvasSize) + 'static) -> Option<Self> {
		let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
			let Some(entry) = entries.get(0).dyn_into::<ResizeObserverEntry>().ok() else {
				return;
			};
			let rect = entry.content_rect();
			on_resize(CanvasSize::new(rect.width(), rect.height()));
		});
		let observer = ResizeObserver::new(callback.as_ref().unchecked_ref()).ok()?;
		observer.observe(target);
		Some(Self {
			observer,
			_callback: callback,
		})
	}
}

impl Drop for ContainerObserver {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

/// Reports the device pixel ratio after every window resize, which browsers
/// also fire when the ratio changes. Removes its listener when dropped.
pub struct PixelRatioListener {
	window: Window,
	callback: Closure<dyn FnMut()>,
}

impl PixelRatioListener {
	/// Calls `on_change` with the new ratio whenever it differs from the last
	/// one seen.
	pub fn listen(mut on_change: impl FnMut(f64) + 'static) -> Option<Self> {
		let window = web_sys::window()?;
		let mut last = device_pixel_ratio();
		let callback = Closure::<dyn FnMut()>::new(move || {
			let dpr = device_pixel_ratio();
			if dpr != last {
				last = dpr;
				on_change(dpr);
			}
		});
		window
			.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
			.ok()?;
		Some(Self { window, callback })
	}
}

impl Drop for PixelRatioListener {
	fn drop(&mut self) {
		let _ = self
			.window
			.remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref());
	}
}
