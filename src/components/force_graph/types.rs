//! Graph data structures for input to the force graph component.

use std::collections::HashMap;

use serde::Deserialize;

/// A node in the graph.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links and
	/// to key expansion catalog entries.
	pub id: String,
	/// Optional display label, drawn above the node. Labeled nodes are
	/// rendered larger.
	pub label: Option<String>,
	/// Optional CSS color override (e.g., "#ff0000" or "rgb(255, 0, 0)").
	/// If not set, color is derived from the theme palette based on `group`.
	pub color: Option<String>,
	/// Optional group name for palette-based cluster coloring.
	pub group: Option<String>,
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
}

/// Graph topology: nodes and links.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// Nodes and links revealed when a catalogued node is expanded.
///
/// Entries are static: expanding appends whichever of these are not already
/// present, retracting removes the nodes listed here (and any link touching
/// them). Links referencing ids that are neither present nor listed in
/// `nodes` are kept as-is and simply never drawn.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExpansionEntry {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

/// Static lookup table mapping a node id to the nodes and links that appear
/// when that node is expanded. Nodes without an entry never expand.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ExpansionCatalog(HashMap<String, ExpansionEntry>);

impl ExpansionCatalog {
	/// Look up the expansion for a node id.
	pub fn entry(&self, id: &str) -> Option<&ExpansionEntry> {
		self.0.get(id)
	}

	/// Whether the catalog defines an expansion for `id`.
	pub fn contains(&self, id: &str) -> bool {
		self.0.contains_key(id)
	}

	/// Number of catalogued node ids.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// True when no node has an expansion.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl FromIterator<(String, ExpansionEntry)> for ExpansionCatalog {
	fn from_iter<I: IntoIterator<Item = (String, ExpansionEntry)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

/// Complete component input: the initial graph plus the expansion catalog.
///
/// The JSON form keeps `nodes` and `links` at the top level and carries the
/// catalog under an optional `expansions` key:
///
/// ```json
/// {
///   "nodes": [{"id": "A", "label": "Node A"}],
///   "links": [{"source": "A", "target": "B"}],
///   "expansions": {"A": {"nodes": [], "links": []}}
/// }
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphDataset {
	/// Initial nodes and links, present at startup.
	#[serde(flatten)]
	pub graph: GraphData,
	/// Expansion catalog applied on click.
	#[serde(default)]
	pub expansions: ExpansionCatalog,
}
