//! The drawing operations the renderer needs, expressed as a trait.
//!
//! The browser implementation forwards to [`CanvasRenderingContext2d`]; tests
//! substitute a recorder. Canvas calls that can throw are fire-and-forget:
//! a failed draw call only costs part of one frame.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

/// A 2D immediate-mode drawing target with canvas semantics.
pub trait Surface {
	/// Pushes the drawing state.
	fn save(&self);
	/// Pops the drawing state.
	fn restore(&self);
	/// Moves the origin.
	fn translate(&self, x: f64, y: f64);
	/// Scales both axes by `k`.
	fn scale(&self, k: f64);

	/// Clears a rectangle to transparent.
	fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64);
	/// Fills a rectangle.
	fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64);
	/// Outlines a rectangle.
	fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64);

	/// CSS fill color.
	fn set_fill_style(&self, css: &str);
	/// CSS stroke color.
	fn set_stroke_style(&self, css: &str);
	/// Stroke width in current units.
	fn set_line_width(&self, width: f64);
	/// Sets the shadow applied to subsequent fills; a blur of 0 with a
	/// transparent color disables it.
	fn set_shadow(&self, css: &str, blur: f64, offset_x: f64, offset_y: f64);

	/// Starts a new path.
	fn begin_path(&self);
	/// Starts a subpath at `(x, y)`.
	fn move_to(&self, x: f64, y: f64);
	/// Adds a line to `(x, y)`.
	fn line_to(&self, x: f64, y: f64);
	/// Closes the current subpath.
	fn close_path(&self);
	/// Adds a full circle to the current path.
	fn circle(&self, x: f64, y: f64, r: f64);
	/// Fills the current path.
	fn fill(&self);
	/// Strokes the current path.
	fn stroke(&self);

	/// CSS font shorthand.
	fn set_font(&self, font: &str);
	/// Centers text horizontally and vertically on the point passed to
	/// [`Surface::fill_text`].
	fn center_text(&self);
	/// Draws `text` anchored at `(x, y)`.
	fn fill_text(&self, text: &str, x: f64, y: f64);
	/// Advance width of `text` in the current font.
	fn measure_text(&self, text: &str) -> f64;

	/// Turns shadows off.
	fn clear_shadow(&self) {
		self.set_shadow("transparent", 0.0, 0.0, 0.0);
	}
}

impl Surface for CanvasRenderingContext2d {
	fn save(&self) {
		CanvasRenderingContext2d::save(self);
	}

	fn restore(&self) {
		CanvasRenderingContext2d::restore(self);
	}

	fn translate(&self, x: f64, y: f64) {
		let _ = CanvasRenderingContext2d::translate(self, x, y);
	}

	fn scale(&self, k: f64) {
		let _ = CanvasRenderingContext2d::scale(self, k, k);
	}

	fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64) {
		CanvasRenderingContext2d::clear_rect(self, x, y, w, h);
	}

	fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
		CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
	}

	fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64) {
		CanvasRenderingContext2d::stroke_rect(self, x, y, w, h);
	}

	fn set_fill_style(&self, css: &str) {
		self.set_fill_style_str(css);
	}

	fn set_stroke_style(&self, css: &str) {
		self.set_stroke_style_str(css);
	}

	fn set_line_width(&self, width: f64) {
		CanvasRenderingContext2d::set_line_width(self, width);
	}

	fn set_shadow(&self, css: &str, blur: f64, offset_x: f64, offset_y: f64) {
		self.set_shadow_color(css);
		self.set_shadow_blur(blur);
		self.set_shadow_offset_x(offset_x);
		self.set_shadow_offset_y(offset_y);
	}

	fn begin_path(&self) {
		CanvasRenderingContext2d::begin_path(self);
	}

	fn move_to(&self, x: f64, y: f64) {
		CanvasRenderingContext2d::move_to(self, x, y);
	}

	fn line_to(&self, x: f64, y: f64) {
		CanvasRenderingContext2d::line_to(self, x, y);
	}

	fn close_path(&self) {
		CanvasRenderingContext2d::close_path(self);
	}

	fn circle(&self, x: f64, y: f64, r: f64) {
		let _ = self.arc(x, y, r, 0.0, 2.0 * PI);
	}

	fn fill(&self) {
		CanvasRenderingContext2d::fill(self);
	}

	fn stroke(&self) {
		CanvasRenderingContext2d::stroke(self);
	}

	fn set_font(&self, font: &str) {
		CanvasRenderingContext2d::set_font(self, font);
	}

	fn center_text(&self) {
		self.set_text_align("center");
		self.set_text_baseline("middle");
	}

	fn fill_text(&self, text: &str, x: f64, y: f64) {
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}

	fn measure_text(&self, text: &str) -> f64 {
		CanvasRenderingContext2d::measure_text(self, text)
			.map(|m| m.width())
			.unwrap_or(0.0)
	}
}
