//! In-memory graph store with expand/retract semantics.
//!
//! The store owns the current node/link collections together with the
//! expansion catalog, and is the single source of truth for graph topology.
//! Interaction code mutates it through [`GraphStore::toggle`] (or
//! [`GraphStore::expand`]/[`GraphStore::retract`] directly) and re-binds the
//! simulation whenever a mutation reports `true`. Existence checks are
//! indexed: node ids map to their slot and link endpoint pairs live in a hash
//! set, so duplicate guards never scan the collections.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::types::{ExpansionCatalog, GraphData, GraphLink, GraphNode};

/// A node currently present in the store, with its runtime expansion flag.
#[derive(Clone, Debug)]
pub struct StoredNode {
	pub node: GraphNode,
	/// True iff this node's catalog-defined children are currently present.
	pub expanded: bool,
}

/// Owned graph state: current nodes and links plus the expansion catalog.
///
/// Nodes and links keep insertion order, which makes re-binding and tests
/// deterministic. All operations are silent on failure: unknown ids and
/// nodes without a catalog entry simply do nothing.
pub struct GraphStore {
	nodes: Vec<StoredNode>,
	links: Vec<GraphLink>,
	node_index: HashMap<String, usize>,
	link_index: HashSet<(String, String)>,
	catalog: ExpansionCatalog,
}

impl GraphStore {
	/// Build a store from initial graph data and a catalog. Duplicate node
	/// ids or link pairs in the input are dropped by the same guards that
	/// protect expansion.
	pub fn new(data: GraphData, catalog: ExpansionCatalog) -> Self {
		let mut store = Self {
			nodes: Vec::new(),
			links: Vec::new(),
			node_index: HashMap::new(),
			link_index: HashSet::new(),
			catalog,
		};
		for node in data.nodes {
			store.insert_node(node);
		}
		for link in data.links {
			store.insert_link(link);
		}
		store
	}

	/// Nodes currently present, in insertion order.
	pub fn nodes(&self) -> &[StoredNode] {
		&self.nodes
	}

	/// Links currently present, in insertion order.
	pub fn links(&self) -> &[GraphLink] {
		&self.links
	}

	/// The expansion catalog this store was built with.
	pub fn catalog(&self) -> &ExpansionCatalog {
		&self.catalog
	}

	/// Whether a node with this id is currently present.
	pub fn contains_node(&self, id: &str) -> bool {
		self.node_index.contains_key(id)
	}

	/// Whether the catalog can expand this node at all.
	pub fn is_expandable(&self, id: &str) -> bool {
		self.catalog.contains(id)
	}

	/// Whether this node is present and currently expanded.
	pub fn is_expanded(&self, id: &str) -> bool {
		self.node_index
			.get(id)
			.is_some_and(|&i| self.nodes[i].expanded)
	}

	/// Expand `id`: append its catalog children and links, skipping any
	/// already present (nodes by id, links by source/target pair), and mark
	/// the node expanded. Returns `true` when the operation ran and the
	/// caller should re-bind and restart layout; an unknown id or a node
	/// without a catalog entry is a silent no-op.
	pub fn expand(&mut self, id: &str) -> bool {
		if !self.contains_node(id) {
			return false;
		}
		let Some(entry) = self.catalog.entry(id).cloned() else {
			return false;
		};

		let mut added_nodes = 0usize;
		let mut added_links = 0usize;
		for node in entry.nodes {
			if self.insert_node(node) {
				added_nodes += 1;
			}
		}
		for link in entry.links {
			if self.insert_link(link) {
				added_links += 1;
			}
		}
		self.set_expanded(id, true);
		debug!("expand {id}: +{added_nodes} nodes, +{added_links} links");
		true
	}

	/// Retract `id`: remove its catalog children and every link whose source
	/// or target is one of them, and clear the expanded flag. Only the
	/// direct children are removed; nodes those children themselves expanded
	/// stay behind. A no-op unless the node is present, catalogued, and
	/// currently expanded.
	pub fn retract(&mut self, id: &str) -> bool {
		if !self.is_expanded(id) {
			return false;
		}
		let Some(entry) = self.catalog.entry(id) else {
			return false;
		};
		let removed: HashSet<String> = entry.nodes.iter().map(|n| n.id.clone()).collect();

		self.nodes.retain(|n| !removed.contains(&n.node.id));
		self.links
			.retain(|l| !removed.contains(&l.source) && !removed.contains(&l.target));
		self.reindex();
		self.set_expanded(id, false);
		debug!("retract {id}: -{} nodes", removed.len());
		true
	}

	/// Binary toggle: retract when expanded, expand otherwise.
	pub fn toggle(&mut self, id: &str) -> bool {
		if self.is_expanded(id) {
			self.retract(id)
		} else {
			self.expand(id)
		}
	}

	fn insert_node(&mut self, node: GraphNode) -> bool {
		if self.node_index.contains_key(&node.id) {
			return false;
		}
		self.node_index.insert(node.id.clone(), self.nodes.len());
		self.nodes.push(StoredNode {
			node,
			expanded: false,
		});
		true
	}

	fn insert_link(&mut self, link: GraphLink) -> bool {
		if !self
			.link_index
			.insert((link.source.clone(), link.target.clone()))
		{
			return false;
		}
		self.links.push(link);
		true
	}

	fn set_expanded(&mut self, id: &str, expanded: bool) {
		if let Some(&i) = self.node_index.get(id) {
			self.nodes[i].expanded = expanded;
		}
	}

	// Removal shifts slots, so both indexes are rebuilt from scratch.
	fn reindex(&mut self) {
		self.node_index = self
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.node.id.clone(), i))
			.collect();
		self.link_index = self
			.links
			.iter()
			.map(|l| (l.source.clone(), l.target.clone()))
			.collect();
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use super::*;
	use crate::components::force_graph::types::ExpansionEntry;

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

	fn entry(children: &[&str], links: &[(&str, &str)]) -> ExpansionEntry {
		ExpansionEntry {
			nodes: children.iter().map(|id| node(id)).collect(),
			links: links.iter().map(|&(s, t)| link(s, t)).collect(),
		}
	}

	/// A (expandable), B (expandable), C, D plain; A-B, A-C, B-D links.
	fn sample_store() -> GraphStore {
		let data = GraphData {
			nodes: ["A", "B", "C", "D"].iter().map(|id| node(id)).collect(),
			links: vec![link("A", "B"), link("A", "C"), link("B", "D")],
		};
		let catalog: ExpansionCatalog = [
			(
				"A".to_string(),
				entry(&["K", "L"], &[("A", "K"), ("A", "L")]),
			),
			(
				"B".to_string(),
				entry(&["M", "N"], &[("B", "M"), ("B", "N")]),
			),
		]
		.into_iter()
		.collect();
		GraphStore::new(data, catalog)
	}

	fn node_ids(store: &GraphStore) -> BTreeSet<String> {
		store.nodes().iter().map(|n| n.node.id.clone()).collect()
	}

	fn link_pairs(store: &GraphStore) -> BTreeSet<(String, String)> {
		store
			.links()
			.iter()
			.map(|l| (l.source.clone(), l.target.clone()))
			.collect()
	}

	#[test]
	fn expand_adds_catalog_children() {
		let mut store = sample_store();
		assert!(store.expand("A"));

		assert!(store.contains_node("K"));
		assert!(store.contains_node("L"));
		assert!(store.is_expanded("A"));
		assert!(link_pairs(&store).contains(&("A".into(), "K".into())));
		assert!(link_pairs(&store).contains(&("A".into(), "L".into())));
	}

	#[test]
	fn expand_then_retract_restores_previous_sets() {
		let mut store = sample_store();
		let nodes_before = node_ids(&store);
		let links_before = link_pairs(&store);

		assert!(store.expand("A"));
		assert!(store.retract("A"));

		assert_eq!(node_ids(&store), nodes_before);
		assert_eq!(link_pairs(&store), links_before);
		assert!(!store.is_expanded("A"));
	}

	#[test]
	fn expand_is_idempotent() {
		let mut store = sample_store();
		store.expand("A");
		let nodes_once = node_ids(&store);
		let links_once = link_pairs(&store);

		// Second expand finds everything already present.
		assert!(store.expand("A"));
		assert_eq!(node_ids(&store), nodes_once);
		assert_eq!(link_pairs(&store), links_once);
	}

	#[test]
	fn retract_on_non_expanded_node_is_noop() {
		let mut store = sample_store();
		let nodes_before = node_ids(&store);
		let links_before = link_pairs(&store);

		assert!(!store.retract("A"));
		assert_eq!(node_ids(&store), nodes_before);
		assert_eq!(link_pairs(&store), links_before);
	}

	#[test]
	fn toggle_alternates_between_expand_and_retract() {
		let mut store = sample_store();

		assert!(store.toggle("B"));
		assert!(store.is_expanded("B"));
		assert!(store.contains_node("M"));

		assert!(store.toggle("B"));
		assert!(!store.is_expanded("B"));
		assert!(!store.contains_node("M"));
		assert!(!store.contains_node("N"));
	}

	#[test]
	fn uncatalogued_node_is_inert() {
		let mut store = sample_store();
		let nodes_before = node_ids(&store);
		let links_before = link_pairs(&store);

		assert!(!store.toggle("D"));
		assert!(!store.expand("D"));
		assert_eq!(node_ids(&store), nodes_before);
		assert_eq!(link_pairs(&store), links_before);
		assert!(!store.is_expanded("D"));
	}

	#[test]
	fn unknown_id_is_inert() {
		let mut store = sample_store();
		assert!(!store.expand("ZZ"));
		assert!(!store.retract("ZZ"));
		assert!(!store.toggle("ZZ"));
		assert!(!store.contains_node("ZZ"));
	}

	#[test]
	fn catalog_is_unchanged_by_mutations() {
		let mut store = sample_store();
		assert_eq!(store.catalog().len(), 2);

		store.expand("A");
		store.expand("B");
		store.retract("A");

		// Entries are configuration, not inventory: nothing is consumed.
		assert_eq!(store.catalog().len(), 2);
		assert!(store.catalog().contains("A"));
		assert_eq!(store.catalog().entry("A").unwrap().nodes.len(), 2);

		// A retracted node expands again from the same entry.
		assert!(store.expand("A"));
		assert!(store.contains_node("K"));
	}

	#[test]
	fn expand_skips_entries_already_present() {
		// K pre-seeded in the initial data; expanding A must not duplicate it.
		let data = GraphData {
			nodes: vec![node("A"), node("K")],
			links: vec![link("A", "K")],
		};
		let catalog: ExpansionCatalog = [(
			"A".to_string(),
			entry(&["K", "L"], &[("A", "K"), ("A", "L")]),
		)]
		.into_iter()
		.collect();
		let mut store = GraphStore::new(data, catalog);

		assert!(store.expand("A"));
		assert_eq!(store.nodes().len(), 3);
		assert_eq!(store.links().len(), 2);
		assert!(store.is_expanded("A"));
	}

	#[test]
	fn retract_leaves_nested_expansions_in_place() {
		// Retracting A removes its direct child K, but not the node K itself
		// introduced via its own expansion: Q survives as an orphan.
		let data = GraphData {
			nodes: vec![node("A")],
			links: vec![],
		};
		let catalog: ExpansionCatalog = [
			("A".to_string(), entry(&["K"], &[("A", "K")])),
			("K".to_string(), entry(&["Q"], &[("K", "Q")])),
		]
		.into_iter()
		.collect();
		let mut store = GraphStore::new(data, catalog);

		assert!(store.expand("A"));
		assert!(store.expand("K"));
		assert!(store.retract("A"));

		let ids = node_ids(&store);
		assert!(!ids.contains("K"));
		assert!(ids.contains("Q"));
		// Both links touched K, so none remain.
		assert!(store.links().is_empty());
	}

	#[test]
	fn duplicate_input_entries_are_dropped() {
		let data = GraphData {
			nodes: vec![node("A"), node("A"), node("B")],
			links: vec![link("A", "B"), link("A", "B")],
		};
		let store = GraphStore::new(data, ExpansionCatalog::default());
		assert_eq!(store.nodes().len(), 2);
		assert_eq!(store.links().len(), 1);
	}

	#[test]
	fn links_resolve_to_present_nodes_through_mutation_cycles() {
		let mut store = sample_store();
		for id in ["A", "B", "A", "B"] {
			store.toggle(id);
			let ids = node_ids(&store);
			for l in store.links() {
				assert!(ids.contains(&l.source), "dangling source {}", l.source);
				assert!(ids.contains(&l.target), "dangling target {}", l.target);
			}
		}
	}
}
