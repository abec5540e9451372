//! The store port through which the canvas reads and mutates graph state.
//!
//! The canvas never edits state in place. It reads a snapshot via
//! [`GraphStore::with_state`] and issues one mutation call per user intent.
//! [`CanvasState`] is a complete in-memory store; `RwSignal<CanvasState>`
//! wraps it reactively for the Leptos component.

use std::collections::HashSet;

use leptos::prelude::*;
use log::{info, warn};

use super::config::CanvasConfig;
use super::geometry::{Point, Vector};
use super::types::{Graph, Node, NodeId, NodeStyle, Properties, RelationshipId, Selection};
use super::viewport::{CanvasSize, ViewPatch, ViewTransformation};

/// Everything the canvas renders from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanvasState {
	/// Nodes, relationships and style.
	pub graph: Graph,
	/// Selected elements.
	pub selection: Selection,
	/// Current pan and zoom.
	pub view: ViewTransformation,
	/// Logical canvas size in CSS pixels.
	pub size: CanvasSize,
	/// Offset applied by [`GraphStore::duplicate_selection`].
	pub duplicate_offset: Vector,
}

/// Partial update of a [`Node`]; `None` fields are left alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodePatch {
	/// New world position.
	pub position: Option<Point>,
	/// New caption.
	pub caption: Option<String>,
	/// Replacement property bag.
	pub properties: Option<Properties>,
	/// Replacement style overrides.
	pub style: Option<NodeStyle>,
}

impl NodePatch {
	/// Patch that only moves the node.
	pub fn position(position: Point) -> Self {
		Self {
			position: Some(position),
			..Self::default()
		}
	}
}

/// Read access plus the mutations the canvas may request.
pub trait GraphStore {
	/// Runs `f` against the current state.
	fn with_state<R>(&self, f: impl FnOnce(&CanvasState) -> R) -> R;

	/// Records the logical canvas size.
	fn set_canvas_size(&mut self, size: CanvasSize);
	/// Replaces the selection with `id`, or toggles `id` when `additive`.
	fn select_node(&mut self, id: &NodeId, additive: bool);
	/// Replaces the selection with `id`, or toggles `id` when `additive`.
	fn select_relationship(&mut self, id: &RelationshipId, additive: bool);
	/// Deselects everything.
	fn clear_selection(&mut self);
	/// Applies the `Some` fields of `patch` to the view.
	fn set_view_transformation(&mut self, patch: ViewPatch);
	/// Creates a node at world point `at` and returns its id.
	fn add_node(&mut self, at: Point, caption: &str) -> NodeId;
	/// Applies `patch` to node `id`, if it exists.
	fn update_node(&mut self, id: &NodeId, patch: NodePatch);
	/// Removes the selection and every relationship attached to a removed node.
	fn delete_selection(&mut self);
	/// Copies the selected nodes and the relationships between them.
	fn duplicate_selection(&mut self);
}

/// What an editor dialog should open for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditTarget {
	/// Edit a node.
	Node(NodeId),
	/// Edit a relationship.
	Relationship(RelationshipId),
}

/// Opens element editors. The editor writes to the store itself; the canvas
/// only asks for it to be shown.
pub trait EditorHost {
	/// Shows the editor for `target`.
	fn open(&mut self, target: EditTarget);
}

impl EditorHost for RwSignal<Option<EditTarget>> {
	fn open(&mut self, target: EditTarget) {
		self.set(Some(target));
	}
}

impl CanvasState {
	/// Store holding `graph` with an empty selection and identity view.
	pub fn new(graph: Graph, config: &CanvasConfig) -> Self {
		Self {
			graph,
			duplicate_offset: config.duplicate_offset,
			..Self::default()
		}
	}

	/// First `<prefix><k>` id not already taken by `taken`.
	fn fresh_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
		(1..)
			.map(|k: u64| format!("{prefix}{k}"))
			.find(|id| !taken(id))
			.unwrap_or_default()
	}

	fn fresh_node_id(&self) -> NodeId {
		NodeId(Self::fresh_id("n", |id| {
			self.graph.nodes.contains_key(&NodeId(id.to_string()))
		}))
	}

	fn fresh_relationship_id(&self) -> RelationshipId {
		RelationshipId(Self::fresh_id("r", |id| {
			self.graph
				.relationships
				.contains_key(&RelationshipId(id.to_string()))
		}))
	}
}

fn toggle<T: std::hash::Hash + Eq + Clone>(set: &mut HashSet<T>, id: &T) {
	if !set.remove(id) {
		set.insert(id.clone());
	}
}

impl GraphStore for CanvasState {
	fn with_state<R>(&self, f: impl FnOnce(&CanvasState) -> R) -> R {
		f(self)
	}

	fn set_canvas_size(&mut self, size: CanvasSize) {
		self.size = size;
	}

	fn select_node(&mut self, id: &NodeId, additive: bool) {
		if additive {
			toggle(&mut self.selection.nodes, id);
		} else {
			self.selection.clear();
			self.selection.nodes.insert(id.clone());
		}
	}

	fn select_relationship(&mut self, id: &RelationshipId, additive: bool) {
		if additive {
			toggle(&mut self.selection.relationships, id);
		} else {
			self.selection.clear();
			self.selection.relationships.insert(id.clone());
		}
	}

	fn clear_selection(&mut self) {
		self.selection.clear();
	}

	fn set_view_transformation(&mut self, patch: ViewPatch) {
		self.view.apply(patch);
	}

	fn add_node(&mut self, at: Point, caption: &str) -> NodeId {
		let id = self.fresh_node_id();
		self.graph.insert_node(Node::new(id.clone(), at, caption));
		info!("graph-canvas: added node {id} at ({:.1}, {:.1})", at.x, at.y);
		id
	}

	fn update_node(&mut self, id: &NodeId, patch: NodePatch) {
		let Some(node) = self.graph.nodes.get_mut(id) else {
			warn!("graph-canvas: update for unknown node {id}");
			return;
		};
		if let Some(position) = patch.position {
			node.position = position;
		}
		if let Some(caption) = patch.caption {
			node.caption = caption;
		}
		if let Some(properties) = patch.properties {
			node.properties = properties;
		}
		if let Some(style) = patch.style {
			node.style = style;
		}
	}

	fn delete_selection(&mut self) {
		if self.selection.is_empty() {
			return;
		}
		let removed_nodes = &self.selection.nodes;
		let removed_rels = &self.selection.relationships;
		self.graph.nodes.retain(|id, _| !removed_nodes.contains(id));
		self.graph.relationships.retain(|id, rel| {
			!removed_rels.contains(id)
				&& !removed_nodes.contains(&rel.from)
				&& !removed_nodes.contains(&rel.to)
		});
		info!(
			"graph-canvas: deleted {} node(s), {} relationship(s) selected",
			removed_nodes.len(),
			removed_rels.len()
		);
		self.selection.clear();
	}

	fn duplicate_selection(&mut self) {
		if self.selection.nodes.is_empty() {
			return;
		}
		let mut originals: Vec<NodeId> = self.selection.nodes.iter().cloned().collect();
		originals.sort();

		let mut copies = Selection::default();
		let mut id_map = std::collections::HashMap::new();
		for old_id in originals {
			let Some(original) = self.graph.nodes.get(&old_id) else {
				continue;
			};
			let mut copy = original.clone();
			copy.id = self.fresh_node_id();
			copy.position += self.duplicate_offset;
			copies.nodes.insert(copy.id.clone());
			id_map.insert(old_id, copy.id.clone());
			self.graph.insert_node(copy);
		}

		let internal: Vec<_> = self
			.graph
			.relationships
			.values()
			.filter(|rel| id_map.contains_key(&rel.from) && id_map.contains_key(&rel.to))
			.cloned()
			.collect();
		for mut rel in internal {
			rel.id = self.fresh_relationship_id();
			rel.from = id_map[&rel.from].clone();
			rel.to = id_map[&rel.to].clone();
			copies.relationships.insert(rel.id.clone());
			self.graph.insert_relationship(rel);
		}

		info!(
			"graph-canvas: duplicated {} node(s), {} relationship(s)",
			copies.nodes.len(),
			copies.relationships.len()
		);
		self.selection = copies;
	}
}

/// Reactive store: reads are untracked (handlers must not subscribe), writes
/// notify every effect that read the signal.
impl GraphStore for RwSignal<CanvasState> {
	fn with_state<R>(&self, f: impl FnOnce(&CanvasState) -> R) -> R {
		self.with_untracked(f)
	}

	fn set_canvas_size(&mut self, size: CanvasSize) {
		self.update(|s| s.set_canvas_size(size));
	}

	fn select_node(&mut self, id: &NodeId, additive: bool) {
		self.update(|s| s.select_node(id, additive));
	}

	fn select_relationship(&mut self, id: &RelationshipId, additive: bool) {
		self.update(|s| s.select_relationship(id, additive));
	}

	fn clear_selection(&mut self) {
		self.update(|s| s.clear_selection());
	}

	fn set_view_transformation(&mut self, patch: ViewPatch) {
		self.update(|s| s.set_view_transformation(patch));
	}

	fn add_node(&mut self, at: Point, caption: &str) -> NodeId {
		self.try_update(|s| s.add_node(at, caption))
			.unwrap_or_else(|| NodeId(String::new()))
	}

	fn update_node(&mut self, id: &NodeId, patch: NodePatch) {
		self.update(|s| s.update_node(id, patch));
	}

	fn delete_selection(&mut self) {
		self.update(|s| s.delete_selection());
	}

	fn duplicate_selection(&mut self) {
		self.update(|s| s.duplicate_selection());
	}
}
