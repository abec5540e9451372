//! Pointer, wheel and keyboard handling.
//!
//! The controller turns raw input into store mutations. Its only state is the
//! gesture in progress between a pointer press and release; everything else is
//! read from the store on each event.

use super::config::CanvasConfig;
use super::geometry::{Point, Vector};
use super::hit_test::{Hit, hit_test};
use super::store::{EditTarget, EditorHost, GraphStore, NodePatch};
use super::types::NodeId;
use super::viewport::{ViewPatch, ViewTransformation};

/// The gesture in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
	/// No button held.
	#[default]
	Idle,
	/// Dragging empty canvas. Pan is cumulative from where the press began.
	Panning {
		/// Screen point of the press.
		drag_start: Point,
		/// View translation at the press.
		initial_translate: Vector,
	},
	/// Dragging the node selection. `drag_start` is re-based on every move,
	/// so each move applies only the delta since the previous one.
	DraggingNodes {
		/// Screen point of the previous move.
		drag_start: Point,
	},
}

/// A pointer event in canvas-local screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
	/// Position in canvas-local screen coordinates.
	pub position: Point,
	/// Ctrl (or Cmd on macOS) held: toggle instead of replace.
	pub modifier: bool,
}

impl PointerInput {
	/// Unmodified input at `(x, y)`.
	pub fn new(x: f64, y: f64) -> Self {
		Self {
			position: Point::new(x, y),
			modifier: false,
		}
	}

	/// The same input with the modifier held.
	pub fn with_modifier(mut self) -> Self {
		self.modifier = true;
		self
	}
}

/// A key press, reduced to what the canvas cares about.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyInput {
	/// `KeyboardEvent.key`, e.g. `"Delete"` or `"d"`.
	pub key: String,
	/// Ctrl (or Cmd on macOS) held.
	pub modifier: bool,
}

/// Canvas input state machine.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
	gesture: Gesture,
	config: CanvasConfig,
}

impl InteractionController {
	/// An idle controller using `config`.
	pub fn new(config: CanvasConfig) -> Self {
		Self {
			gesture: Gesture::Idle,
			config,
		}
	}

	/// The gesture in progress.
	pub fn gesture(&self) -> Gesture {
		self.gesture
	}

	/// Behaviour settings in use.
	pub fn config(&self) -> &CanvasConfig {
		&self.config
	}

	fn hit(&self, store: &impl GraphStore, screen: Point) -> (Option<Hit>, ViewTransformation) {
		store.with_state(|s| {
			let world = s.view.screen_to_world(screen);
			(
				hit_test(&s.graph, world, self.config.relationship_hit_tolerance),
				s.view,
			)
		})
	}

	/// Selects what is under the pointer and starts a drag or pan.
	pub fn pointer_down(&mut self, store: &mut impl GraphStore, input: PointerInput) {
		let (hit, view) = self.hit(&*store, input.position);
		match hit {
			Some(Hit::Node(id)) => {
				let already_selected = store.with_state(|s| s.selection.contains_node(&id));
				// A plain press on a selected node keeps the selection so the
				// whole group can be dragged.
				if input.modifier || !already_selected {
					store.select_node(&id, input.modifier);
				}
				self.gesture = Gesture::DraggingNodes {
					drag_start: input.position,
				};
			}
			Some(Hit::Relationship(id)) => {
				store.select_relationship(&id, input.modifier);
				self.gesture = Gesture::Idle;
			}
			None if !input.modifier => {
				store.clear_selection();
				self.gesture = Gesture::Panning {
					drag_start: input.position,
					initial_translate: view.translate,
				};
			}
			None => self.gesture = Gesture::Idle,
		}
	}

	/// Continues the current gesture. Does nothing while idle.
	pub fn pointer_move(&mut self, store: &mut impl GraphStore, input: PointerInput) {
		match self.gesture {
			Gesture::Idle => {}
			Gesture::Panning {
				drag_start,
				initial_translate,
			} => {
				let translate = ViewTransformation::panned(initial_translate, drag_start, input.position);
				store.set_view_transformation(ViewPatch {
					scale: None,
					translate: Some(translate),
				});
			}
			Gesture::DraggingNodes { drag_start } => {
				let moves: Vec<(NodeId, Point)> = store.with_state(|s| {
					let delta = s.view.screen_to_world(input.position) - s.view.screen_to_world(drag_start);
					s.selection
						.nodes
						.iter()
						.filter_map(|id| s.graph.nodes.get(id))
						.map(|node| (node.id.clone(), node.position + delta))
						.collect()
				});
				for (id, position) in moves {
					store.update_node(&id, NodePatch::position(position));
				}
				self.gesture = Gesture::DraggingNodes {
					drag_start: input.position,
				};
			}
		}
	}

	/// Ends the gesture. Also used when the pointer leaves the canvas.
	pub fn pointer_up(&mut self) {
		self.gesture = Gesture::Idle;
	}

	/// Opens the editor for the element under the pointer, or adds a node
	/// there when nothing is hit.
	pub fn double_click(
		&mut self,
		store: &mut impl GraphStore,
		editor: &mut impl EditorHost,
		input: PointerInput,
	) {
		let (hit, view) = self.hit(&*store, input.position);
		match hit {
			Some(Hit::Node(id)) => editor.open(EditTarget::Node(id)),
			Some(Hit::Relationship(id)) => editor.open(EditTarget::Relationship(id)),
			None => {
				let at = view.screen_to_world(input.position);
				store.add_node(at, &self.config.default_caption);
			}
		}
	}

	/// One wheel step anchored at `anchor`. The host must suppress the page
	/// scroll regardless.
	pub fn wheel(&mut self, store: &mut impl GraphStore, anchor: Point, delta_y: f64) {
		let patch = store.with_state(|s| s.view.zoom_at(anchor, delta_y, &self.config));
		if let Some(patch) = patch {
			store.set_view_transformation(patch);
		}
	}

	/// Returns `true` when the key was consumed and the browser default should
	/// be suppressed.
	pub fn key_down(
		&mut self,
		store: &mut impl GraphStore,
		editor: &mut impl EditorHost,
		input: &KeyInput,
	) -> bool {
		match input.key.as_str() {
			"Delete" | "Backspace" => {
				store.delete_selection();
				true
			}
			"d" | "D" if input.modifier => {
				store.duplicate_selection();
				true
			}
			"Enter" => {
				let target = store.with_state(|s| {
					let sel = &s.selection;
					if sel.nodes.len() == 1 {
						sel.nodes.iter().next().cloned().map(EditTarget::Node)
					} else if sel.relationships.len() == 1 {
						sel.relationships
							.iter()
							.next()
							.cloned()
							.map(EditTarget::Relationship)
					} else {
						None
					}
				});
				match target {
					Some(target) => {
						editor.open(target);
						true
					}
					None => false,
				}
			}
			_ => false,
		}
	}
}
