//! graph-explorer: Interactive force-directed graph viewer with expandable nodes.
//!
//! This crate provides a WASM-based graph visualization component where
//! clicking a node expands or retracts its catalogued neighborhood, with
//! physics-based layout, drag-to-pin, pan/zoom, and hover effects.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::force_graph::{
	ExpansionCatalog, ExpansionEntry, ForceGraphCanvas, GraphData, GraphDataset, GraphLink,
	GraphNode, GraphStore, Margins, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("graph-explorer: logging initialized");
}

/// Load a dataset from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] } plus an optional
/// expansions map keyed by node id.
fn load_dataset() -> Option<GraphDataset> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<GraphDataset>(&json_text) {
		Ok(data) => {
			info!(
				"graph-explorer: loaded {} nodes, {} links, {} expansions",
				data.graph.nodes.len(),
				data.graph.links.len(),
				data.expansions.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("graph-explorer: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Built-in demo dataset: a small tree of ten nodes where A, B and C each
/// reveal two further children when clicked.
pub fn sample_dataset() -> GraphDataset {
	fn node(id: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: Some(format!("Node {id}")),
			color: None,
			group: None,
		}
	}
	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
		}
	}
	fn entry(parent: &str, children: [&str; 2]) -> (String, ExpansionEntry) {
		(
			parent.to_string(),
			ExpansionEntry {
				nodes: children.iter().map(|id| node(id)).collect(),
				links: children.iter().map(|id| link(parent, id)).collect(),
			},
		)
	}

	GraphDataset {
		graph: GraphData {
			nodes: ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"]
				.iter()
				.map(|id| node(id))
				.collect(),
			links: vec![
				link("A", "B"),
				link("A", "C"),
				link("B", "D"),
				link("B", "E"),
				link("C", "F"),
				link("C", "G"),
				link("D", "H"),
				link("E", "I"),
				link("F", "J"),
			],
		},
		expansions: [
			entry("A", ["K", "L"]),
			entry("B", ["M", "N"]),
			entry("C", ["O", "P"]),
		]
		.into_iter()
		.collect(),
	}
}

/// Main application component.
/// Loads the dataset from the DOM (falling back to the built-in demo) and
/// renders the force-directed visualization.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let dataset = load_dataset().unwrap_or_else(sample_dataset);
	let data = Signal::derive(move || dataset.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Graph Explorer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ForceGraphCanvas data=data fullscreen=true />
			<div class="graph-overlay">
				<h1>"Graph Explorer"</h1>
				<p class="subtitle">
					"Click a node to expand or retract its neighbors. Drag nodes to reposition. Scroll to zoom. Drag background to pan."
				</p>
			</div>
		</div>
	}
}
