//! Canvas rendering for the graph.
//!
//! Each frame is a pure function of the store snapshot, drawn in passes:
//! 1. Background (screen space)
//! 2. Grid, relationships, then nodes (world space, under the view transform)
//!
//! Relationships whose endpoints are missing are left out of the frame.

use std::f64::consts::PI;

use super::caption::fit_caption;
use super::config::CanvasConfig;
use super::geometry::{Point, Vector};
use super::hit_test::relationship_segment;
use super::store::CanvasState;
use super::surface::Surface;
use super::theme::Theme;
use super::types::{GraphStyle, Node, Relationship};
use super::viewport::{CanvasSize, ViewTransformation};

/// Half-angle between the arrowhead's sides and the shaft.
const ARROW_HALF_ANGLE: f64 = PI / 6.0;

/// Extra line width for selected elements.
const SELECTED_EXTRA_WIDTH: f64 = 1.0;

/// Grid lines closer than this on screen are not drawn at all.
const MIN_GRID_PIXELS: f64 = 2.0;

/// Everything a single frame draws with.
struct Frame<'a, S: Surface> {
	surface: &'a S,
	style: &'a GraphStyle,
	theme: &'a Theme,
	config: &'a CanvasConfig,
	scale: f64,
}

/// Renders the complete graph to the surface.
pub fn render(surface: &impl Surface, state: &CanvasState, theme: &Theme, config: &CanvasConfig) {
	let graph = &state.graph;
	let frame = Frame {
		surface,
		style: &graph.style,
		theme,
		config,
		scale: state.view.scale,
	};

	frame.draw_background(state.size);

	surface.save();
	surface.translate(state.view.translate.dx, state.view.translate.dy);
	surface.scale(state.view.scale);

	frame.draw_grid(&state.view, state.size);

	surface.center_text();
	for rel in graph.relationships.values() {
		frame.draw_relationship(state, rel);
	}
	for node in graph.nodes.values() {
		let selected = state.selection.contains_node(&node.id);
		frame.draw_node(node, selected);
	}

	surface.restore();
}

impl<S: Surface> Frame<'_, S> {
	fn draw_background(&self, size: CanvasSize) {
		self.surface.clear_rect(0.0, 0.0, size.width, size.height);
		self.surface.set_fill_style(&self.style.background_color);
		self.surface.fill_rect(0.0, 0.0, size.width, size.height);
	}

	/// Grid lines covering exactly the visible world rectangle.
	fn draw_grid(&self, view: &ViewTransformation, size: CanvasSize) {
		let spacing = self.config.grid_spacing;
		let on_screen = spacing * self.scale;
		if on_screen.is_nan() || on_screen < MIN_GRID_PIXELS || size.width <= 0.0 || size.height <= 0.0 {
			return;
		}

		let corners = size.corners().map(|c| view.screen_to_world(c));
		let (mut min, mut max) = (corners[0], corners[0]);
		for c in &corners[1..] {
			min = Point::new(min.x.min(c.x), min.y.min(c.y));
			max = Point::new(max.x.max(c.x), max.y.max(c.y));
		}

		let surface = self.surface;
		surface.set_stroke_style(&self.theme.grid.to_css());
		surface.set_line_width(1.0 / self.scale);
		surface.begin_path();
		for i in (min.x / spacing).floor() as i64..=(max.x / spacing).ceil() as i64 {
			let x = i as f64 * spacing;
			surface.move_to(x, min.y);
			surface.line_to(x, max.y);
		}
		for j in (min.y / spacing).floor() as i64..=(max.y / spacing).ceil() as i64 {
			let y = j as f64 * spacing;
			surface.move_to(min.x, y);
			surface.line_to(max.x, y);
		}
		surface.stroke();
	}

	fn draw_relationship(&self, state: &CanvasState, rel: &Relationship) {
		let Some(seg) = relationship_segment(&state.graph, rel) else {
			return;
		};
		let selected = state.selection.contains_relationship(&rel.id);
		let surface = self.surface;

		let color = if selected {
			self.theme.highlight.to_css()
		} else {
			rel.style
				.color
				.clone()
				.unwrap_or_else(|| self.style.relationship_color.clone())
		};
		let mut width = rel.style.shaft_width.unwrap_or(self.style.shaft_width);
		if selected {
			width += SELECTED_EXTRA_WIDTH;
		}

		surface.set_stroke_style(&color);
		surface.set_line_width(width);
		surface.begin_path();
		surface.move_to(seg.start.x, seg.start.y);
		surface.line_to(seg.end.x, seg.end.y);
		surface.stroke();

		// Arrowhead: tip on the target's rim, sides swept back ±30°.
		let arrow_size = rel.style.arrow_size.unwrap_or(self.style.arrow_size);
		let back = (-seg.direction()).angle();
		let left = seg.end + Vector::from_angle(back - ARROW_HALF_ANGLE) * arrow_size;
		let right = seg.end + Vector::from_angle(back + ARROW_HALF_ANGLE) * arrow_size;
		surface.set_fill_style(&color);
		surface.begin_path();
		surface.move_to(seg.end.x, seg.end.y);
		surface.line_to(left.x, left.y);
		surface.line_to(right.x, right.y);
		surface.close_path();
		surface.fill();

		if !rel.rel_type.is_empty() {
			self.draw_label(&rel.rel_type, seg.midpoint(), true);
		}
	}

	/// Text on an opaque plate centered at `center`, optionally outlined.
	fn draw_label(&self, text: &str, center: Point, outlined: bool) {
		let surface = self.surface;
		let label = &self.theme.label;
		surface.set_font(&self.style.font(label.font_scale));

		let w = surface.measure_text(text) + 2.0 * label.padding;
		let h = self.label_line_height();
		let (x, y) = (center.x - w / 2.0, center.y - h / 2.0);

		surface.set_fill_style(&label.background.to_css());
		surface.fill_rect(x, y, w, h);
		if outlined {
			surface.set_stroke_style(&label.border.to_css());
			surface.set_line_width(1.0 / self.scale);
			surface.stroke_rect(x, y, w, h);
		}
		surface.set_fill_style(&label.text.to_css());
		surface.fill_text(text, center.x, center.y);
	}

	fn label_line_height(&self) -> f64 {
		self.style.font_size * self.theme.label.font_scale + 2.0 * self.theme.label.padding
	}

	fn draw_node(&self, node: &Node, selected: bool) {
		let surface = self.surface;
		let (x, y) = (node.position.x, node.position.y);
		let radius = self.style.node_radius;
		let shadow = &self.theme.shadow;

		surface.set_shadow(&shadow.color.to_css(), shadow.blur, shadow.offset_x, shadow.offset_y);
		surface.begin_path();
		surface.circle(x, y, radius);
		surface.set_fill_style(node.style.color.as_deref().unwrap_or(&self.style.node_color));
		surface.fill();
		surface.clear_shadow();

		let mut border_width = node.style.border_width.unwrap_or(self.style.node_border_width);
		let border_color = if selected {
			border_width += SELECTED_EXTRA_WIDTH;
			self.theme.highlight.to_css()
		} else {
			node.style
				.border_color
				.clone()
				.unwrap_or_else(|| self.style.node_border_color.clone())
		};
		if border_width > 0.0 {
			surface.set_stroke_style(&border_color);
			surface.set_line_width(border_width);
			surface.begin_path();
			surface.circle(x, y, radius);
			surface.stroke();
		}

		surface.set_font(&self.style.font(1.0));
		let max_width = self.config.caption_width_ratio * radius;
		let caption = fit_caption(&node.caption, max_width, |t| surface.measure_text(t));
		if !caption.is_empty() {
			surface.set_fill_style(&self.theme.caption.to_css());
			surface.fill_text(&caption, x, y);
		}

		self.draw_property_preview(node);
	}

	/// First few `key: value` lines beneath the node, then a `+N more` line.
	fn draw_property_preview(&self, node: &Node) {
		let limit = self.config.max_preview_properties;
		if node.properties.is_empty() || limit == 0 {
			return;
		}

		let line_height = self.label_line_height();
		let mut center = Point::new(
			node.position.x,
			node.position.y + self.style.node_radius + self.theme.label.padding + line_height / 2.0,
		);
		for (key, value) in node.properties.iter().take(limit) {
			self.draw_label(&format!("{key}: {value}"), center, false);
			center.y += line_height;
		}

		let hidden = node.properties.len().saturating_sub(limit);
		if hidden > 0 {
			self.draw_label(&format!("+{hidden} more"), center, false);
		}
	}
}
