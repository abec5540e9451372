//! Graph data structures rendered by the canvas.
//!
//! Everything here is plain data owned by the store. The canvas reads it each
//! frame and never keeps a copy between frames.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Identifier of a [`Node`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

/// Identifier of a [`Relationship`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipId(pub String);

impl From<&str> for NodeId {
	fn from(s: &str) -> Self {
		Self(s.to_string())
	}
}

impl From<&str> for RelationshipId {
	fn from(s: &str) -> Self {
		Self(s.to_string())
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl fmt::Display for RelationshipId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A property value attached to a node or relationship.
///
/// Deserialised untagged, so plain JSON scalars map onto the scalar variants
/// and arrays/objects fall through to [`PropertyValue::Json`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
	/// JSON `null`.
	Null,
	/// JSON boolean.
	Boolean(bool),
	/// JSON number.
	Number(f64),
	/// JSON string.
	String(String),
	/// Any array or object, kept as raw JSON.
	Json(serde_json::Value),
}

impl fmt::Display for PropertyValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PropertyValue::Null => f.write_str("null"),
			PropertyValue::Boolean(b) => write!(f, "{b}"),
			// Integral values print without a trailing ".0".
			PropertyValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
				write!(f, "{}", *n as i64)
			}
			PropertyValue::Number(n) => write!(f, "{n}"),
			PropertyValue::String(s) => f.write_str(s),
			PropertyValue::Json(v) => write!(f, "{v}"),
		}
	}
}

/// Property bag, ordered by key so previews are stable between frames.
pub type Properties = BTreeMap<String, PropertyValue>;

/// Optional visual overrides for a single node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeStyle {
	/// CSS fill color.
	pub color: Option<String>,
	/// CSS border color.
	pub border_color: Option<String>,
	/// Border width in world units.
	pub border_width: Option<f64>,
}

/// Optional visual overrides for a single relationship.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelationshipStyle {
	/// CSS shaft and arrowhead color.
	pub color: Option<String>,
	/// Shaft width in world units.
	pub shaft_width: Option<f64>,
	/// Arrowhead side length in world units.
	pub arrow_size: Option<f64>,
}

/// A node placed at a world-space position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	/// Unique node id.
	pub id: NodeId,
	/// Center in world coordinates.
	pub position: Point,
	/// Text drawn inside the circle.
	#[serde(default)]
	pub caption: String,
	/// Arbitrary key/value data.
	#[serde(default)]
	pub properties: Properties,
	/// Per-node overrides of [`GraphStyle`].
	#[serde(default)]
	pub style: NodeStyle,
}

impl Node {
	/// Node with no properties and default style.
	pub fn new(id: impl Into<NodeId>, position: Point, caption: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			position,
			caption: caption.into(),
			properties: Properties::new(),
			style: NodeStyle::default(),
		}
	}
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
	/// Unique relationship id.
	pub id: RelationshipId,
	/// Source node. May dangle while the store is mid-update.
	pub from: NodeId,
	/// Target node. May dangle while the store is mid-update.
	pub to: NodeId,
	/// Relationship type, drawn as the label.
	#[serde(rename = "type", default)]
	pub rel_type: String,
	/// Arbitrary key/value data.
	#[serde(default)]
	pub properties: Properties,
	/// Per-relationship overrides of [`GraphStyle`].
	#[serde(default)]
	pub style: RelationshipStyle,
}

impl Relationship {
	/// Relationship with no properties and default style.
	pub fn new(
		id: impl Into<RelationshipId>,
		from: impl Into<NodeId>,
		to: impl Into<NodeId>,
		rel_type: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			from: from.into(),
			to: to.into(),
			rel_type: rel_type.into(),
			properties: Properties::new(),
			style: RelationshipStyle::default(),
		}
	}
}

/// Graph-wide style defaults, overridable per element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphStyle {
	/// CSS canvas background.
	pub background_color: String,
	/// Radius of every node circle, in world units.
	pub node_radius: f64,
	/// Caption font size in world units.
	pub font_size: f64,
	/// CSS font family for captions and labels.
	pub font_family: String,
	/// CSS node fill.
	pub node_color: String,
	/// CSS node border color.
	pub node_border_color: String,
	/// Node border width.
	pub node_border_width: f64,
	/// CSS shaft and arrowhead color.
	pub relationship_color: String,
	/// Shaft width.
	pub shaft_width: f64,
	/// Arrowhead side length.
	pub arrow_size: f64,
}

impl Default for GraphStyle {
	fn default() -> Self {
		Self {
			background_color: "#f8f9fa".to_string(),
			node_radius: 30.0,
			font_size: 14.0,
			font_family: "sans-serif".to_string(),
			node_color: "#4c8eda".to_string(),
			node_border_color: "#2870c2".to_string(),
			node_border_width: 2.0,
			relationship_color: "#848484".to_string(),
			shaft_width: 2.0,
			arrow_size: 10.0,
		}
	}
}

impl GraphStyle {
	/// CSS font shorthand at `scale` times the base font size.
	pub fn font(&self, scale: f64) -> String {
		format!("{}px {}", self.font_size * scale, self.font_family)
	}
}

/// Complete graph: nodes, relationships, and style defaults.
///
/// Maps are keyed and iterated by id, which fixes both draw order and
/// hit-test precedence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Graph {
	/// Nodes keyed by id.
	#[serde(with = "as_list::nodes")]
	pub nodes: BTreeMap<NodeId, Node>,
	/// Relationships keyed by id.
	#[serde(with = "as_list::relationships")]
	pub relationships: BTreeMap<RelationshipId, Relationship>,
	/// Graph-wide style defaults.
	pub style: GraphStyle,
}

impl Graph {
	/// Adds or replaces a node by id.
	pub fn insert_node(&mut self, node: Node) {
		self.nodes.insert(node.id.clone(), node);
	}

	/// Adds or replaces a relationship by id.
	pub fn insert_relationship(&mut self, rel: Relationship) {
		self.relationships.insert(rel.id.clone(), rel);
	}

	/// Both endpoints of `rel`, or `None` if either is missing.
	pub fn endpoints(&self, rel: &Relationship) -> Option<(&Node, &Node)> {
		Some((self.nodes.get(&rel.from)?, self.nodes.get(&rel.to)?))
	}
}

/// Currently selected elements. Membership only, no ordering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
	/// Selected node ids.
	pub nodes: HashSet<NodeId>,
	/// Selected relationship ids.
	pub relationships: HashSet<RelationshipId>,
}

impl Selection {
	/// Whether nothing is selected.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.relationships.is_empty()
	}

	/// Deselects everything.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.relationships.clear();
	}

	/// Whether node `id` is selected.
	pub fn contains_node(&self, id: &NodeId) -> bool {
		self.nodes.contains(id)
	}

	/// Whether relationship `id` is selected.
	pub fn contains_relationship(&self, id: &RelationshipId) -> bool {
		self.relationships.contains(id)
	}
}

/// Graph JSON lists nodes and relationships as arrays; these adapters turn
/// them into id-keyed maps and back.
mod as_list {
	macro_rules! keyed_list {
		($name:ident, $key:ty, $value:ty) => {
			pub mod $name {
				use std::collections::BTreeMap;

				use serde::{Deserialize, Deserializer, Serialize, Serializer};

				use super::super::*;

				pub fn serialize<S: Serializer>(
					map: &BTreeMap<$key, $value>,
					serializer: S,
				) -> Result<S::Ok, S::Error> {
					let list: Vec<&$value> = map.values().collect();
					list.serialize(serializer)
				}

				pub fn deserialize<'de, D: Deserializer<'de>>(
					deserializer: D,
				) -> Result<BTreeMap<$key, $value>, D::Error> {
					let list = Vec::<$value>::deserialize(deserializer)?;
					Ok(list.into_iter().map(|v| (v.id.clone(), v)).collect())
				}
			}
		};
	}

	keyed_list!(nodes, NodeId, Node);
	keyed_list!(relationships, RelationshipId, Relationship);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_property_value_display() {
		assert_eq!(PropertyValue::Null.to_string(), "null");
		assert_eq!(PropertyValue::Boolean(true).to_string(), "true");
		assert_eq!(PropertyValue::Number(42.0).to_string(), "42");
		assert_eq!(PropertyValue::Number(2.5).to_string(), "2.5");
		assert_eq!(PropertyValue::String("Alice".into()).to_string(), "Alice");
		let json = PropertyValue::Json(serde_json::json!({"a": [1, 2]}));
		assert_eq!(json.to_string(), r#"{"a":[1,2]}"#);
	}

	#[test]
	fn test_property_value_deserialises_untagged() {
		let props: Properties = serde_json::from_str(
			r#"{"age": 33, "name": "Bob", "active": false, "nick": null, "tags": ["x"]}"#,
		)
		.expect("valid json");
		assert_eq!(props["age"], PropertyValue::Number(33.0));
		assert_eq!(props["name"], PropertyValue::String("Bob".into()));
		assert_eq!(props["active"], PropertyValue::Boolean(false));
		assert_eq!(props["nick"], PropertyValue::Null);
		assert_eq!(props["tags"], PropertyValue::Json(serde_json::json!(["x"])));
	}

	#[test]
	fn test_graph_deserialises_from_lists() {
		let graph: Graph = serde_json::from_str(
			r#"{
				"nodes": [
					{"id": "a", "position": {"x": 0, "y": 0}, "caption": "A"},
					{"id": "b", "position": {"x": 100, "y": 0}}
				],
				"relationships": [
					{"id": "r1", "from": "a", "to": "b", "type": "KNOWS"}
				],
				"style": {"nodeRadius": 25}
			}"#,
		)
		.expect("valid graph json");

		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.nodes[&NodeId::from("a")].caption, "A");
		assert_eq!(graph.nodes[&NodeId::from("b")].caption, "");
		assert_eq!(graph.relationships[&RelationshipId::from("r1")].rel_type, "KNOWS");
		assert_eq!(graph.style.node_radius, 25.0);
		assert_eq!(graph.style.font_family, "sans-serif");
	}

	#[test]
	fn test_endpoints_requires_both_nodes() {
		let mut graph = Graph::default();
		graph.insert_node(Node::new("a", Point::ORIGIN, "A"));
		let dangling = Relationship::new("r", "a", "missing", "T");
		assert!(graph.endpoints(&dangling).is_none());

		graph.insert_node(Node::new("missing", Point::new(1.0, 1.0), "M"));
		assert!(graph.endpoints(&dangling).is_some());
	}
}
