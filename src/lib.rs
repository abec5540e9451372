//! graph-canvas: Interactive node-link graph editor canvas.
//!
//! This crate provides a WASM-based canvas component that renders a property
//! graph with pan/zoom, selection, multi-node dragging and editor requests,
//! all routed through an injectable store.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::graph_canvas::{
	CanvasConfig, CanvasState, EditTarget, Graph, GraphCanvas, GraphStore, Node, NodeId, Relationship,
	RelationshipId, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("graph-canvas: logging initialized");
}

/// Parse the JSON text of a `<script>` element with the given id.
/// Returns `None` when the element is absent or its content is malformed.
fn load_json_script<T: DeserializeOwned>(id: &str) -> Option<T> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<T>(&json_text) {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("graph-canvas: failed to parse #{id}: {}", e);
			None
		}
	}
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], relationships: [...], style: {...} }
fn load_graph() -> Graph {
	let graph = load_json_script::<Graph>("graph-data").unwrap_or_default();
	info!(
		"graph-canvas: loaded {} nodes, {} relationships",
		graph.nodes.len(),
		graph.relationships.len()
	);
	graph
}

/// Overlay shown while an editor is open for a node or relationship.
#[component]
fn EditorOverlay(store: RwSignal<CanvasState>, editor: RwSignal<Option<EditTarget>>) -> impl IntoView {
	let summary = move || {
		let target = editor.get()?;
		store.with(|state| match &target {
			EditTarget::Node(id) => {
				let node = state.graph.nodes.get(id)?;
				let props = node
					.properties
					.iter()
					.map(|(k, v)| format!("{k}: {v}"))
					.collect::<Vec<_>>()
					.join(", ");
				Some((format!("Node {id}"), node.caption.clone(), props))
			}
			EditTarget::Relationship(id) => {
				let rel = state.graph.relationships.get(id)?;
				let props = rel
					.properties
					.iter()
					.map(|(k, v)| format!("{k}: {v}"))
					.collect::<Vec<_>>()
					.join(", ");
				Some((format!("Relationship {id}"), rel.rel_type.clone(), props))
			}
		})
	};

	view! {
		{move || {
			summary()
				.map(|(heading, title, props)| {
					view! {
						<div class="editor-overlay">
							<h2>{heading}</h2>
							<p class="editor-title">{title}</p>
							<p class="editor-properties">{props}</p>
							<button on:click=move |_| editor.set(None)>"Close"</button>
						</div>
					}
				})
		}}
	}
}

/// Main application component.
/// Loads graph data and configuration from the DOM and renders the canvas.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_json_script::<CanvasConfig>("canvas-config")
		.unwrap_or_default()
		.sanitized();
	let store = RwSignal::new(CanvasState::new(load_graph(), &config));
	let editor = RwSignal::new(None::<EditTarget>);

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Graph Canvas" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<GraphCanvas store=store editor=editor config=config />
			<div class="graph-overlay">
				<h1>"Graph Canvas"</h1>
				<p class="subtitle">
					"Click to select, Ctrl-click to add. Drag to move or pan. Scroll to zoom. Double-click to edit."
				</p>
			</div>
			<EditorOverlay store=store editor=editor />
		</div>
	}
}
