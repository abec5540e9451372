//! Viewport transform: the scale and translation mapping world space onto the
//! canvas.
//!
//! `screen = world * scale + translate`. Zoom keeps the world point under the
//! cursor fixed; pan is a cumulative screen-space offset from the gesture
//! start.

use serde::{Deserialize, Serialize};

use super::config::CanvasConfig;
use super::geometry::{Point, Vector};

/// Pan and zoom applied to the whole graph.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransformation {
	/// Zoom factor, always > 0.
	pub scale: f64,
	/// Screen-space offset of the world origin.
	pub translate: Vector,
}

impl Default for ViewTransformation {
	fn default() -> Self {
		Self {
			scale: 1.0,
			translate: Vector::ZERO,
		}
	}
}

/// Partial update of a [`ViewTransformation`]; `None` fields are left alone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewPatch {
	/// New zoom factor.
	pub scale: Option<f64>,
	/// New offset.
	pub translate: Option<Vector>,
}

impl ViewTransformation {
	/// Maps a world point onto the canvas.
	pub fn world_to_screen(&self, p: Point) -> Point {
		Point::new(
			p.x * self.scale + self.translate.dx,
			p.y * self.scale + self.translate.dy,
		)
	}

	/// Inverse of [`Self::world_to_screen`].
	pub fn screen_to_world(&self, p: Point) -> Point {
		Point::new(
			(p.x - self.translate.dx) / self.scale,
			(p.y - self.translate.dy) / self.scale,
		)
	}

	/// Overwrites the fields `patch` sets.
	pub fn apply(&mut self, patch: ViewPatch) {
		if let Some(scale) = patch.scale {
			self.scale = scale;
		}
		if let Some(translate) = patch.translate {
			self.translate = translate;
		}
	}

	/// One wheel step of zoom anchored at `anchor` (screen space).
	///
	/// Negative `delta_y` zooms in. The resulting transform maps `anchor` back
	/// to the same world point it mapped to before the step. Returns `None`
	/// when the scale clamp leaves the scale unchanged.
	pub fn zoom_at(&self, anchor: Point, delta_y: f64, config: &CanvasConfig) -> Option<ViewPatch> {
		let factor = if delta_y < 0.0 {
			config.zoom_in_factor
		} else {
			config.zoom_out_factor
		};
		// Inverted bounds must not panic, so the clamp is spelled out.
		let (lo, hi) = (
			config.min_scale.min(config.max_scale),
			config.min_scale.max(config.max_scale),
		);
		let new_scale = (self.scale * factor).max(lo).min(hi);
		if new_scale == self.scale || !new_scale.is_finite() || new_scale <= 0.0 {
			return None;
		}

		let before = self.screen_to_world(anchor);
		let after = Point::new(
			(anchor.x - self.translate.dx) / new_scale,
			(anchor.y - self.translate.dy) / new_scale,
		);
		// Shift back by however far the anchor's world point drifted.
		let translate = self.translate + (after - before) * new_scale;

		Some(ViewPatch {
			scale: Some(new_scale),
			translate: Some(translate),
		})
	}

	/// Translation for a pan gesture that started at `drag_start` while the
	/// view was translated by `initial`.
	pub fn panned(initial: Vector, drag_start: Point, current: Point) -> Vector {
		initial + (current - drag_start)
	}
}

/// Logical (CSS pixel) size of the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl CanvasSize {
	/// Width in CSS pixels.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// The four corners in screen space, clockwise from the origin.
	pub fn corners(&self) -> [Point; 4] {
		[
			Point::new(0.0, 0.0),
			Point::new(self.width, 0.0),
			Point::new(self.width, self.height),
			Point::new(0.0, self.height),
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPS: f64 = 1e-9;

	fn assert_close(a: Point, b: Point) {
		assert!(
			(a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS,
			"{a:?} != {b:?}"
		);
	}

	fn view(scale: f64, dx: f64, dy: f64) -> ViewTransformation {
		ViewTransformation {
			scale,
			translate: Vector::new(dx, dy),
		}
	}

	// ========================================================================
	// Coordinate conversion
	// ========================================================================

	#[test]
	fn test_world_screen_round_trip() {
		let transforms = [view(1.0, 0.0, 0.0), view(2.5, -40.0, 13.0), view(0.3, 500.0, -7.5)];
		let points = [Point::new(0.0, 0.0), Point::new(123.4, -56.7), Point::new(-1e4, 3e3)];

		for t in &transforms {
			for &p in &points {
				assert_close(t.world_to_screen(t.screen_to_world(p)), p);
				assert_close(t.screen_to_world(t.world_to_screen(p)), p);
			}
		}
	}

	#[test]
	fn test_world_to_screen_formula() {
		let t = view(2.0, 10.0, -5.0);
		assert_close(t.world_to_screen(Point::new(3.0, 4.0)), Point::new(16.0, 3.0));
	}

	// ========================================================================
	// Anchored zoom
	// ========================================================================

	#[test]
	fn test_zoom_in_at_identity() {
		let mut t = ViewTransformation::default();
		let anchor = Point::new(50.0, 50.0);
		let before = t.screen_to_world(anchor);

		let patch = t.zoom_at(anchor, -100.0, &CanvasConfig::default()).expect("zoom");
		t.apply(patch);

		assert!((t.scale - 1.1).abs() < EPS);
		assert_close(t.screen_to_world(anchor), before);
	}

	#[test]
	fn test_zoom_keeps_anchor_fixed_across_steps() {
		let config = CanvasConfig::default();
		let mut t = view(1.7, -120.0, 33.0);
		let anchor = Point::new(411.0, 87.0);
		let before = t.screen_to_world(anchor);

		for delta in [-1.0, -1.0, 1.0, -3.0, 2.0, 2.0, 2.0] {
			if let Some(patch) = t.zoom_at(anchor, delta, &config) {
				t.apply(patch);
			}
			assert_close(t.screen_to_world(anchor), before);
		}
	}

	#[test]
	fn test_zoom_out_factor() {
		let t = ViewTransformation::default();
		let patch = t
			.zoom_at(Point::ORIGIN, 1.0, &CanvasConfig::default())
			.expect("zoom");
		assert!((patch.scale.expect("scale") - 0.9).abs() < EPS);
	}

	#[test]
	fn test_zoom_stops_at_clamp() {
		let config = CanvasConfig::default();
		let t = view(config.max_scale, 0.0, 0.0);
		assert!(t.zoom_at(Point::new(10.0, 10.0), -1.0, &config).is_none());
	}

	#[test]
	fn test_zoom_with_inverted_clamp_does_not_panic() {
		let config: CanvasConfig =
			serde_json::from_str(r#"{"minScale": 5, "maxScale": 2}"#).expect("valid config");
		let t = ViewTransformation::default();
		let patch = t.zoom_at(Point::new(50.0, 50.0), -1.0, &config).expect("zoom");
		assert_eq!(patch.scale, Some(2.0));

		let sanitized = config.sanitized();
		let patch = t.zoom_at(Point::new(50.0, 50.0), -1.0, &sanitized).expect("zoom");
		assert!((patch.scale.expect("scale") - 1.1).abs() < EPS);
	}

	// ========================================================================
	// Pan
	// ========================================================================

	#[test]
	fn test_pan_is_cumulative_from_gesture_start() {
		let initial = Vector::new(10.0, 20.0);
		let start = Point::new(100.0, 100.0);
		assert_eq!(
			ViewTransformation::panned(initial, start, Point::new(130.0, 90.0)),
			Vector::new(40.0, 10.0)
		);
		assert_eq!(ViewTransformation::panned(initial, start, start), initial);
	}

	#[test]
	fn test_apply_partial_patch() {
		let mut t = view(2.0, 1.0, 1.0);
		t.apply(ViewPatch {
			scale: None,
			translate: Some(Vector::new(5.0, 6.0)),
		});
		assert_eq!(t, view(2.0, 5.0, 6.0));
	}
}
