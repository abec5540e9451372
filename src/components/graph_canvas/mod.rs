//! Interactive node-link graph canvas.
//!
//! Draws a property graph on an HTML canvas and turns pointer, wheel and
//! keyboard input into store mutations:
//! - Anchored zoom and pan through a [`ViewTransformation`]
//! - Layered rendering of grid, relationships and nodes
//! - Hit-testing of node circles and relationship shafts
//! - Selection, multi-node dragging, deletion and duplication
//! - Editor requests on double-click or Enter
//!
//! The engine itself never owns the graph. Everything goes through the
//! [`GraphStore`] port, which is implemented for a plain [`CanvasState`] and
//! for an `RwSignal<CanvasState>`.
//!
//! # Example
//!
//! ```ignore
//! use graph_canvas::{CanvasConfig, CanvasState, GraphCanvas, Graph};
//!
//! let store = RwSignal::new(CanvasState::new(Graph::default(), &CanvasConfig::default()));
//! let editor = RwSignal::new(None);
//!
//! view! { <GraphCanvas store=store editor=editor /> }
//! ```

mod caption;
mod component;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod hit_test;
pub mod render;
mod resize;
pub mod store;
pub mod surface;
#[cfg(test)]
mod testing;
pub mod theme;
pub mod types;
pub mod viewport;

pub use component::GraphCanvas;
pub use config::CanvasConfig;
pub use controller::{Gesture, InteractionController, KeyInput, PointerInput};
pub use geometry::{Point, Segment, Vector};
pub use hit_test::Hit;
pub use store::{CanvasState, EditTarget, EditorHost, GraphStore, NodePatch};
pub use surface::Surface;
pub use theme::Theme;
pub use types::{
	Graph, GraphStyle, Node, NodeId, NodeStyle, Properties, PropertyValue, Relationship, RelationshipId,
	RelationshipStyle, Selection,
};
pub use viewport::{CanvasSize, ViewPatch, ViewTransformation};
