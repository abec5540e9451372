//! Behavioural configuration for the canvas.
//!
//! Everything tunable about interaction and layout-independent drawing lives
//! here, separate from colors (see [`super::theme`]). All distances are in
//! world units unless noted otherwise.

use log::warn;
use serde::{Deserialize, Serialize};

use super::geometry::Vector;

/// Smallest grid spacing accepted from a host page.
pub const MIN_GRID_SPACING: f64 = 1.0;

/// Canvas behaviour knobs.
///
/// Deserialises with `#[serde(default)]`, so a host page may override any
/// subset of fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
	/// Distance between background grid lines.
	pub grid_spacing: f64,
	/// Maximum perpendicular distance from a relationship shaft that still
	/// counts as a hit.
	pub relationship_hit_tolerance: f64,
	/// Scale multiplier for one wheel step towards the user.
	pub zoom_in_factor: f64,
	/// Scale multiplier for one wheel step away from the user.
	pub zoom_out_factor: f64,
	/// Lower bound of the zoom clamp.
	pub min_scale: f64,
	/// Upper bound of the zoom clamp.
	pub max_scale: f64,
	/// Widest a caption may render, as a multiple of the node radius.
	pub caption_width_ratio: f64,
	/// How many `key: value` lines to preview beneath a node.
	pub max_preview_properties: usize,
	/// Caption given to nodes created by double-clicking empty canvas.
	pub default_caption: String,
	/// Where duplicated nodes land relative to their originals.
	pub duplicate_offset: Vector,
}

impl Default for CanvasConfig {
	fn default() -> Self {
		Self {
			grid_spacing: 20.0,
			relationship_hit_tolerance: 5.0,
			zoom_in_factor: 1.1,
			zoom_out_factor: 0.9,
			min_scale: 0.1,
			max_scale: 10.0,
			caption_width_ratio: 1.8,
			max_preview_properties: 2,
			default_caption: "New Node".to_string(),
			duplicate_offset: Vector::new(20.0, 20.0),
		}
	}
}

impl CanvasConfig {
	/// Replaces every unusable field with its default, logging each one.
	///
	/// Unusable means non-finite, a non-positive scale or zoom factor, a
	/// negative tolerance or caption ratio, a grid spacing below
	/// [`MIN_GRID_SPACING`], or a scale clamp whose bounds are inverted.
	pub fn sanitized(mut self) -> Self {
		let defaults = Self::default();
		let positive = |v: f64| v.is_finite() && v > 0.0;
		let non_negative = |v: f64| v.is_finite() && v >= 0.0;

		let check = |name: &str, value: &mut f64, default: f64, ok: bool| {
			if !ok {
				warn!("graph-canvas: invalid {name} {value}, using {default}");
				*value = default;
			}
		};

		let ok = self.grid_spacing.is_finite() && self.grid_spacing >= MIN_GRID_SPACING;
		check("gridSpacing", &mut self.grid_spacing, defaults.grid_spacing, ok);
		let ok = non_negative(self.relationship_hit_tolerance);
		check(
			"relationshipHitTolerance",
			&mut self.relationship_hit_tolerance,
			defaults.relationship_hit_tolerance,
			ok,
		);
		let ok = positive(self.zoom_in_factor);
		check("zoomInFactor", &mut self.zoom_in_factor, defaults.zoom_in_factor, ok);
		let ok = positive(self.zoom_out_factor);
		check("zoomOutFactor", &mut self.zoom_out_factor, defaults.zoom_out_factor, ok);
		let ok = non_negative(self.caption_width_ratio);
		check(
			"captionWidthRatio",
			&mut self.caption_width_ratio,
			defaults.caption_width_ratio,
			ok,
		);

		let clamp_ok = positive(self.min_scale) && positive(self.max_scale) && self.min_scale <= self.max_scale;
		if !clamp_ok {
			warn!(
				"graph-canvas: invalid scale clamp {}..{}, using {}..{}",
				self.min_scale, self.max_scale, defaults.min_scale, defaults.max_scale
			);
			self.min_scale = defaults.min_scale;
			self.max_scale = defaults.max_scale;
		}

		if !(self.duplicate_offset.dx.is_finite() && self.duplicate_offset.dy.is_finite()) {
			warn!("graph-canvas: invalid duplicateOffset, using default");
			self.duplicate_offset = defaults.duplicate_offset;
		}
		self
	}
}
