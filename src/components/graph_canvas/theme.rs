//! Visual theming for the graph canvas.
//!
//! Colors that are not part of the graph's own [`GraphStyle`](super::types::GraphStyle):
//! selection highlight, grid, labels, and shadows.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Alpha in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// CSS `rgba(...)` string.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Text drawn over an opaque plate: relationship types and property previews.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	/// Text color.
	pub text: Color,
	/// Plate fill.
	pub background: Color,
	/// 1px outline around relationship labels.
	pub border: Color,
	/// Space between the measured text and the plate edge, in world units.
	pub padding: f64,
	/// Label font size as a fraction of the graph font size.
	pub font_scale: f64,
}

/// Node drop shadow.
#[derive(Clone, Debug)]
pub struct ShadowStyle {
	/// Shadow color.
	pub color: Color,
	/// Blur radius in pixels.
	pub blur: f64,
	/// Horizontal shadow offset.
	pub offset_x: f64,
	/// Vertical shadow offset.
	pub offset_y: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Outline and shaft color of selected elements.
	pub highlight: Color,
	/// Background grid lines.
	pub grid: Color,
	/// Caption color inside node circles.
	pub caption: Color,
	/// Relationship labels and property previews.
	pub label: LabelStyle,
	/// Node drop shadow.
	pub shadow: ShadowStyle,
}

impl Theme {
	/// Light theme matching the default graph style.
	pub fn light() -> Self {
		Self {
			highlight: Color::rgb(255, 107, 53),
			grid: Color::rgba(0, 0, 0, 0.06),
			caption: Color::rgb(255, 255, 255),
			label: LabelStyle {
				text: Color::rgb(51, 51, 51),
				background: Color::rgb(255, 255, 255),
				border: Color::rgb(204, 204, 204),
				padding: 4.0,
				font_scale: 0.8,
			},
			shadow: ShadowStyle {
				color: Color::rgba(0, 0, 0, 0.2),
				blur: 6.0,
				offset_x: 2.0,
				offset_y: 2.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}
