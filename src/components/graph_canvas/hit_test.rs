//! Resolving a world-space point to the graph element under it.
//!
//! Nodes are circles of the graph's node radius; relationships are the
//! inward-offset segments the renderer draws. Both scans are linear and the
//! first match in id order wins.

use log::warn;

use super::geometry::{Point, Segment};
use super::types::{Graph, NodeId, Relationship, RelationshipId};

/// The element under a point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hit {
	/// A node circle.
	Node(NodeId),
	/// A relationship shaft.
	Relationship(RelationshipId),
}

/// Shaft segment of `rel`, or `None` if an endpoint is missing or the two
/// nodes share a center.
pub fn relationship_segment(graph: &Graph, rel: &Relationship) -> Option<Segment> {
	let Some((from, to)) = graph.endpoints(rel) else {
		warn!(
			"graph-canvas: relationship {} references a missing node ({} -> {})",
			rel.id, rel.from, rel.to
		);
		return None;
	};
	let radius = graph.style.node_radius;
	Segment::between_circles(from.position, radius, to.position, radius)
}

/// First node whose circle contains `p` (boundary inclusive).
pub fn node_at(graph: &Graph, p: Point) -> Option<&NodeId> {
	let radius = graph.style.node_radius;
	graph
		.nodes
		.values()
		.find(|node| node.position.distance_to(p) <= radius)
		.map(|node| &node.id)
}

/// First relationship whose shaft passes within `tolerance` of `p`.
///
/// Points that project beyond either end of the shaft never hit, however
/// close they are to the line through it.
pub fn relationship_at(graph: &Graph, p: Point, tolerance: f64) -> Option<&RelationshipId> {
	graph
		.relationships
		.values()
		.find(|rel| {
			relationship_segment(graph, rel)
				.and_then(|seg| seg.perpendicular_distance(p))
				.is_some_and(|d| d <= tolerance)
		})
		.map(|rel| &rel.id)
}

/// Nodes take precedence over relationships.
pub fn hit_test(graph: &Graph, p: Point, tolerance: f64) -> Option<Hit> {
	if let Some(id) = node_at(graph, p) {
		return Some(Hit::Node(id.clone()));
	}
	relationship_at(graph, p, tolerance).map(|id| Hit::Relationship(id.clone()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_canvas::testing::sample_graph;
	use crate::components::graph_canvas::types::{Node, Relationship};

	const EPS: f64 = 1e-6;

	// ========================================================================
	// node_at()
	// ========================================================================

	#[test]
	fn test_node_at_center() {
		let graph = sample_graph();
		assert_eq!(node_at(&graph, Point::new(0.0, 0.0)), Some(&NodeId::from("a")));
	}

	#[test]
	fn test_node_at_boundary_radius() {
		let graph = sample_graph();
		// radius 30 around B(100, 0)
		assert!(node_at(&graph, Point::new(100.0, 30.0)).is_some());
		assert!(node_at(&graph, Point::new(100.0, 30.0 - EPS)).is_some());
		assert!(node_at(&graph, Point::new(100.0, 30.0 + EPS)).is_none());
	}

	#[test]
	fn test_node_at_first_match_wins() {
		let mut graph = Graph::default();
		graph.insert_node(Node::new("b", Point::new(10.0, 0.0), "B"));
		graph.insert_node(Node::new("a", Point::new(0.0, 0.0), "A"));
		// Both circles contain (5, 0); "a" sorts first.
		assert_eq!(node_at(&graph, Point::new(5.0, 0.0)), Some(&NodeId::from("a")));
	}

	#[test]
	fn test_node_at_empty_graph() {
		assert!(node_at(&Graph::default(), Point::ORIGIN).is_none());
	}

	// ========================================================================
	// relationship_at()
	// ========================================================================

	#[test]
	fn test_relationship_at_midpoint() {
		let graph = sample_graph();
		let mid = Point::new(50.0, 0.0);
		assert_eq!(relationship_at(&graph, mid, 0.0), Some(&RelationshipId::from("r1")));
		assert_eq!(relationship_at(&graph, mid, 5.0), Some(&RelationshipId::from("r1")));
	}

	#[test]
	fn test_relationship_at_tolerance_threshold() {
		let graph = sample_graph();
		assert!(relationship_at(&graph, Point::new(50.0, 5.0), 5.0).is_some());
		assert!(relationship_at(&graph, Point::new(50.0, -5.0), 5.0).is_some());
		assert!(relationship_at(&graph, Point::new(50.0, 5.0 + EPS), 5.0).is_none());
	}

	#[test]
	fn test_relationship_never_hit_beyond_offset_ends() {
		let graph = sample_graph();
		// Shaft runs (30,0) -> (70,0).
		for p in [Point::new(29.9, 0.0), Point::new(70.1, 0.0), Point::new(20.0, 1.0)] {
			assert!(relationship_at(&graph, p, 1000.0).is_none(), "{p:?}");
		}
		assert!(relationship_at(&graph, Point::new(30.0, 0.0), 0.0).is_some());
		assert!(relationship_at(&graph, Point::new(70.0, 0.0), 0.0).is_some());
	}

	#[test]
	fn test_relationship_diagonal() {
		let mut graph = Graph::default();
		graph.insert_node(Node::new("a", Point::new(0.0, 0.0), "A"));
		graph.insert_node(Node::new("b", Point::new(300.0, 400.0), "B"));
		graph.insert_relationship(Relationship::new("r", "a", "b", "T"));
		// Midpoint (150, 200) shifted 4 units along the normal (-0.8, 0.6).
		let p = Point::new(150.0 - 3.2, 200.0 + 2.4);
		assert!(relationship_at(&graph, p, 5.0).is_some());
		assert!(relationship_at(&graph, p, 3.9).is_none());
	}

	#[test]
	fn test_dangling_relationship_never_hit() {
		let mut graph = sample_graph();
		graph.relationships.clear();
		graph.insert_relationship(Relationship::new("ghost", "a", "nowhere", "T"));
		for x in [0.0, 30.0, 50.0, 100.0] {
			assert!(relationship_at(&graph, Point::new(x, 0.0), 1000.0).is_none());
		}
	}

	#[test]
	fn test_relationship_between_coincident_nodes_never_hit() {
		let mut graph = sample_graph();
		graph.nodes.get_mut(&NodeId::from("b")).expect("b").position = Point::ORIGIN;
		for x in [0.0, 15.0, 30.0, 50.0] {
			assert!(relationship_at(&graph, Point::new(x, 0.0), 1000.0).is_none());
		}
	}

	// ========================================================================
	// hit_test()
	// ========================================================================

	#[test]
	fn test_nodes_before_relationships() {
		let graph = sample_graph();
		// (30, 0) is on both the rim of A and the start of the shaft.
		assert_eq!(
			hit_test(&graph, Point::new(30.0, 0.0), 5.0),
			Some(Hit::Node(NodeId::from("a")))
		);
		assert_eq!(
			hit_test(&graph, Point::new(50.0, 2.0), 5.0),
			Some(Hit::Relationship(RelationshipId::from("r1")))
		);
		assert_eq!(hit_test(&graph, Point::new(50.0, 100.0), 5.0), None);
	}
}
