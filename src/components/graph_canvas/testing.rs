//! Test doubles shared by the unit tests of this component.

use std::cell::RefCell;

use super::geometry::Point;
use super::store::{EditTarget, EditorHost};
use super::surface::Surface;
use super::types::{Graph, Node, Relationship};

/// Advance width of every character under [`RecordingSurface`].
pub const CHAR_WIDTH: f64 = 7.0;

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
	Save,
	Restore,
	Translate(f64, f64),
	Scale(f64),
	ClearRect(f64, f64, f64, f64),
	FillRect(f64, f64, f64, f64),
	StrokeRect(f64, f64, f64, f64),
	FillStyle(String),
	StrokeStyle(String),
	LineWidth(f64),
	Shadow(String, f64),
	BeginPath,
	MoveTo(f64, f64),
	LineTo(f64, f64),
	ClosePath,
	Circle(f64, f64, f64),
	Fill,
	Stroke,
	Font(String),
	CenterText,
	FillText(String, f64, f64),
}

/// Records every call; text is measured as `chars * CHAR_WIDTH`.
#[derive(Default)]
pub struct RecordingSurface {
	pub ops: RefCell<Vec<Op>>,
}

impl RecordingSurface {
	pub fn ops(&self) -> Vec<Op> {
		self.ops.borrow().clone()
	}

	pub fn texts(&self) -> Vec<String> {
		self.ops()
			.into_iter()
			.filter_map(|op| match op {
				Op::FillText(t, _, _) => Some(t),
				_ => None,
			})
			.collect()
	}

	fn push(&self, op: Op) {
		self.ops.borrow_mut().push(op);
	}
}

impl Surface for RecordingSurface {
	fn save(&self) {
		self.push(Op::Save);
	}
	fn restore(&self) {
		self.push(Op::Restore);
	}
	fn translate(&self, x: f64, y: f64) {
		self.push(Op::Translate(x, y));
	}
	fn scale(&self, k: f64) {
		self.push(Op::Scale(k));
	}
	fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64) {
		self.push(Op::ClearRect(x, y, w, h));
	}
	fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
		self.push(Op::FillRect(x, y, w, h));
	}
	fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64) {
		self.push(Op::StrokeRect(x, y, w, h));
	}
	fn set_fill_style(&self, css: &str) {
		self.push(Op::FillStyle(css.to_string()));
	}
	fn set_stroke_style(&self, css: &str) {
		self.push(Op::StrokeStyle(css.to_string()));
	}
	fn set_line_width(&self, width: f64) {
		self.push(Op::LineWidth(width));
	}
	fn set_shadow(&self, css: &str, blur: f64, _offset_x: f64, _offset_y: f64) {
		self.push(Op::Shadow(css.to_string(), blur));
	}
	fn begin_path(&self) {
		self.push(Op::BeginPath);
	}
	fn move_to(&self, x: f64, y: f64) {
		self.push(Op::MoveTo(x, y));
	}
	fn line_to(&self, x: f64, y: f64) {
		self.push(Op::LineTo(x, y));
	}
	fn close_path(&self) {
		self.push(Op::ClosePath);
	}
	fn circle(&self, x: f64, y: f64, r: f64) {
		self.push(Op::Circle(x, y, r));
	}
	fn fill(&self) {
		self.push(Op::Fill);
	}
	fn stroke(&self) {
		self.push(Op::Stroke);
	}
	fn set_font(&self, font: &str) {
		self.push(Op::Font(font.to_string()));
	}
	fn center_text(&self) {
		self.push(Op::CenterText);
	}
	fn fill_text(&self, text: &str, x: f64, y: f64) {
		self.push(Op::FillText(text.to_string(), x, y));
	}
	fn measure_text(&self, text: &str) -> f64 {
		text.chars().count() as f64 * CHAR_WIDTH
	}
}

/// Remembers every editor request.
#[derive(Default)]
pub struct RecordingEditor {
	pub opened: Vec<EditTarget>,
}

impl EditorHost for RecordingEditor {
	fn open(&mut self, target: EditTarget) {
		self.opened.push(target);
	}
}

/// A(0,0) → B(100,0), both radius 30, plus a far-away C(0,200).
pub fn sample_graph() -> Graph {
	let mut graph = Graph::default();
	graph.insert_node(Node::new("a", Point::new(0.0, 0.0), "A"));
	graph.insert_node(Node::new("b", Point::new(100.0, 0.0), "B"));
	graph.insert_node(Node::new("c", Point::new(0.0, 200.0), "C"));
	graph.insert_relationship(Relationship::new("r1", "a", "b", "KNOWS"));
	graph
}
