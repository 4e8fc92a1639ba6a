//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with an energy envelope, per-node
//! metadata, view transforms for pan/zoom, and highlight state for hover
//! effects with smooth intensity transitions. The simulation is rebuilt from
//! the [`GraphStore`] whenever the store mutates ([`ForceGraphState::rebind`]),
//! carrying surviving node positions over.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::{ScaleConfig, ScaledValues};
use super::store::GraphStore;
use super::theme::Theme;

/// Pointer travel (screen pixels) below which a press-release counts as a
/// click instead of a drag.
const CLICK_DRAG_THRESHOLD: f64 = 4.0;

/// Energy target while a node is being dragged, so layout keeps responding.
const DRAG_ALPHA_TARGET: f64 = 0.3;

/// Distance from the layout center at which newly added nodes spawn.
const SPAWN_RADIUS: f64 = 100.0;

fn simulation_parameters() -> SimulationParameters {
	SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	}
}

/// Simulation energy envelope.
///
/// `value` relaxes toward `target` by a fixed fraction each tick and the
/// physics timestep is scaled by it, so layout motion dies down smoothly.
/// With the default target of zero the envelope settles below `min` after
/// roughly 300 ticks; a graph mutation calls [`Alpha::restart`] to reheat it,
/// and drags raise `target` instead so energy hovers without fully reheating.
#[derive(Clone, Debug)]
pub struct Alpha {
	pub value: f64,
	pub target: f64,
	pub min: f64,
	pub decay: f64,
}

impl Default for Alpha {
	fn default() -> Self {
		let min = 0.001f64;
		Self {
			value: 1.0,
			target: 0.0,
			min,
			decay: 1.0 - min.powf(1.0 / 300.0),
		}
	}
}

impl Alpha {
	/// Relax `value` toward `target` by one tick.
	pub fn step(&mut self) {
		self.value += (self.target - self.value) * self.decay;
	}

	/// True when energy has decayed below `min` and nothing is propping it up.
	pub fn settled(&self) -> bool {
		self.value < self.min && self.target < self.min
	}

	/// Reset energy to maximum so layout re-stabilizes.
	pub fn restart(&mut self) {
		self.value = 1.0;
	}
}

/// Pixel insets between the canvas edge and the layout area.
#[derive(Clone, Copy, Debug)]
pub struct Margins {
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
	pub left: f64,
}

impl Default for Margins {
	fn default() -> Self {
		Self {
			top: 20.0,
			right: 30.0,
			bottom: 40.0,
			left: 40.0,
		}
	}
}

impl Margins {
	/// Center of the margin-inset layout area.
	pub fn center(&self, width: f64, height: f64) -> (f64, f64) {
		(
			self.left + (width - self.left - self.right) / 2.0,
			self.top + (height - self.top - self.bottom) / 2.0,
		)
	}
}

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Store id this simulation node was bound from.
	pub id: String,
	pub label: Option<String>,
	pub color: String,
	/// Size multiplier (1.0 = normal, >1.0 = larger/more important)
	pub size: f64,
	/// Whether the node's catalog children are currently present.
	pub expanded: bool,
	/// Whether the expansion catalog has an entry for this node.
	pub expandable: bool,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// Tracks an in-progress press on a node, which resolves to either a click
/// (released within [`CLICK_DRAG_THRESHOLD`]) or a drag that pins the node.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	/// Set once pointer travel exceeds the click threshold.
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Manages smooth highlight transitions with per-node intensity tracking.
///
/// Each node carries its own intensity value (0.0 to 1.0) animated toward
/// membership in the active highlight set with exponential smoothing, which
/// eases out naturally as it approaches the target. A minimum hold time
/// prevents flashing when the mouse briefly skirts the edge of a node's
/// hover zone.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	/// Currently hovered node (if any)
	pub hovered_node: Option<DefaultNodeIdx>,
	/// Set of nodes that should be highlighted (hovered + neighbors)
	target_set: HashSet<DefaultNodeIdx>,
	/// Per-node highlight intensity; nodes not in this map have intensity 0.
	node_intensity: HashMap<DefaultNodeIdx, f64>,
	/// Smoothed hover intensity for the ring effect (tracks hovered_node with hold time)
	hover_ring_intensity: HashMap<DefaultNodeIdx, f64>,
	/// Per-node hold timer - time remaining before fade-out can begin
	hold_timer: HashMap<DefaultNodeIdx, f64>,
	/// Cached max intensity (updated each tick)
	cached_max: f64,
}

/// Minimum time (seconds) a highlight must be held before it can fade out.
const MIN_HOLD_TIME: f64 = 0.12;

impl HighlightState {
	/// Update the hovered node and recompute the target highlight set.
	pub fn set_hover(
		&mut self,
		node: Option<DefaultNodeIdx>,
		edges: &[(DefaultNodeIdx, DefaultNodeIdx)],
	) {
		if self.hovered_node == node {
			return;
		}

		self.hovered_node = node;
		self.target_set.clear();

		if let Some(idx) = node {
			self.target_set.insert(idx);
			for &(src, tgt) in edges {
				if src == idx {
					self.target_set.insert(tgt);
				} else if tgt == idx {
					self.target_set.insert(src);
				}
			}

			for &idx in &self.target_set {
				self.hold_timer.insert(idx, MIN_HOLD_TIME);
			}
		}
	}

	/// Animate all node intensities towards their targets using exponential
	/// smoothing: `value += (target - value) * (1 - e^(-speed * dt))`.
	pub fn tick(&mut self, dt: f64) {
		// At 60fps: fade-in reaches ~95% in ~150ms, fade-out in ~250ms.
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;

		let fade_in_factor = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out_decay = (-FADE_OUT_SPEED * dt).exp();

		for &idx in &self.target_set {
			let intensity = self.node_intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in_factor;
		}

		if let Some(idx) = self.hovered_node {
			let intensity = self.hover_ring_intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in_factor;
		}

		let mut new_max: f64 = 0.0;

		// Hold timers only count down for nodes that left the target set.
		self.hold_timer.retain(|idx, timer| {
			if self.target_set.contains(idx) {
				true
			} else {
				*timer -= dt;
				*timer > 0.0
			}
		});

		self.node_intensity.retain(|idx, intensity| {
			if self.target_set.contains(idx) {
				new_max = new_max.max(*intensity);
				true
			} else {
				let hold_remaining = self.hold_timer.get(idx).copied().unwrap_or(0.0);
				if hold_remaining <= 0.0 {
					*intensity *= fade_out_decay;
				}
				new_max = new_max.max(*intensity);
				*intensity > 0.005
			}
		});

		self.hover_ring_intensity.retain(|idx, intensity| {
			if self.hovered_node == Some(*idx) {
				true
			} else {
				let hold_remaining = self.hold_timer.get(idx).copied().unwrap_or(0.0);
				if hold_remaining <= 0.0 {
					*intensity *= fade_out_decay;
				}
				*intensity > 0.005
			}
		});

		self.cached_max = new_max;
	}

	/// Get the highlight intensity for a specific node (already smoothed).
	pub fn node_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.node_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Get the hover ring intensity for a specific node (smoothed, with hold time).
	pub fn hover_ring_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.hover_ring_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Get the highlight intensity for an edge.
	/// Uses geometric mean for smoother edge transitions that don't lag behind nodes.
	pub fn edge_intensity(&self, idx1: DefaultNodeIdx, idx2: DefaultNodeIdx) -> f64 {
		let i1 = self.node_intensity(idx1);
		let i2 = self.node_intensity(idx2);
		(i1 * i2).sqrt()
	}

	/// Get the maximum intensity of any node (useful for dimming non-highlighted elements).
	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}
}

/// Core graph state combining physics simulation with interaction and
/// highlight tracking.
///
/// Created once when the component mounts, then mutated each frame by the
/// animation loop. [`ForceGraphState::tick`] advances physics while the energy
/// envelope is live and animates highlight intensities; after the store
/// mutates, [`ForceGraphState::rebind`] rebuilds the simulation and restarts
/// the envelope.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub alpha: Alpha,
	pub margins: Margins,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub width: f64,
	pub height: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(store: &GraphStore, width: f64, height: f64, margins: Margins, theme: &Theme) -> Self {
		let mut state = Self {
			graph: ForceGraph::new(simulation_parameters()),
			alpha: Alpha::default(),
			margins,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
			edges: Vec::new(),
		};
		state.rebind(store, theme);
		state
	}

	/// Rebuild the simulation from the store after a mutation.
	///
	/// Surviving nodes keep their current positions; new nodes spawn on a ring
	/// around the layout center. Links whose endpoints cannot both be resolved
	/// are skipped. Interaction state pointing at old simulation indices is
	/// reset, all pins are released, and the energy envelope restarts.
	pub fn rebind(&mut self, store: &GraphStore, theme: &Theme) {
		let mut positions: HashMap<String, (f32, f32)> = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});

		let mut graph = ForceGraph::new(simulation_parameters());
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		// Count edges per node for importance calculation
		let mut edge_counts: HashMap<&String, usize> = HashMap::new();
		for link in store.links() {
			*edge_counts.entry(&link.source).or_insert(0) += 1;
			*edge_counts.entry(&link.target).or_insert(0) += 1;
		}
		let max_edges = edge_counts.values().copied().max().unwrap_or(1).max(1);

		let (cx, cy) = self.margins.center(self.width, self.height);
		let mut group_slots: HashMap<String, usize> = HashMap::new();
		let count = store.nodes().len().max(1);

		for (i, stored) in store.nodes().iter().enumerate() {
			let node = &stored.node;
			// Color from: explicit color > group palette slot (first-seen
			// order) > palette by index
			let color = node.color.clone().unwrap_or_else(|| {
				let slot = match &node.group {
					Some(group) => {
						let next = group_slots.len();
						*group_slots.entry(group.clone()).or_insert(next)
					}
					None => i,
				};
				theme.palette.get(slot).to_css_rgb()
			});

			let (x, y) = positions.get(&node.id).copied().unwrap_or_else(|| {
				let angle = (i as f64) * 2.0 * PI / count as f64;
				(
					(cx + SPAWN_RADIUS * angle.cos()) as f32,
					(cy + SPAWN_RADIUS * angle.sin()) as f32,
				)
			});

			// Node importance/size: labeled and well-connected nodes render larger
			let has_label = node.label.is_some();
			let node_edges = edge_counts.get(&node.id).copied().unwrap_or(0);
			let edge_factor = (node_edges as f64 / max_edges as f64).sqrt();

			let size = if has_label {
				1.4 + 0.6 * edge_factor // labeled: 1.4x to 2.0x
			} else {
				0.7 + 0.5 * edge_factor // unlabeled: 0.7x to 1.2x
			};

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color,
					size,
					expanded: stored.expanded,
					expandable: store.is_expandable(&node.id),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in store.links() {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
			}
		}

		self.graph = graph;
		self.edges = edges;
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.highlight = HighlightState::default();
		self.alpha.restart();
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let node_hit_radius = scale.hit_radius * node.data.user_data.size;
			if (dx * dx + dy * dy).sqrt() < node_hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Store id of the simulation node at `idx`.
	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	/// Start a press at screen coordinates: on a node it arms the
	/// click-or-drag tracker, on empty canvas it starts a pan.
	pub fn begin_press(&mut self, x: f64, y: f64, config: &ScaleConfig) {
		if let Some(idx) = self.node_at_position(x, y, config) {
			let (mut nx, mut ny) = (0.0f32, 0.0f32);
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					nx = node.x();
					ny = node.y();
				}
			});
			self.drag = DragState {
				active: true,
				moved: false,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				node_start_x: nx,
				node_start_y: ny,
			};
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	/// Continue a press at new screen coordinates.
	///
	/// A press on a node becomes a drag once pointer travel exceeds the click
	/// threshold; from then on the node is pinned at the pointer and the
	/// energy target is raised so layout follows smoothly. A press on empty
	/// canvas pans the view transform.
	pub fn drag_to(&mut self, x: f64, y: f64) {
		if self.drag.active {
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			if !self.drag.moved {
				let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
				if (dx * dx + dy * dy).sqrt() < CLICK_DRAG_THRESHOLD {
					return;
				}
				self.drag.moved = true;
				self.alpha.target = DRAG_ALPHA_TARGET;
			}
			let (dx, dy) = (
				(x - self.drag.start_x) / self.transform.k,
				(y - self.drag.start_y) / self.transform.k,
			);
			let (nx, ny) = (
				self.drag.node_start_x + dx as f32,
				self.drag.node_start_y + dy as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// End the current press. A press that never crossed the click threshold
	/// resolves to a click and returns the node's store id for the caller to
	/// toggle; a completed drag releases the pin and lets energy decay.
	pub fn end_press(&mut self) -> Option<String> {
		let mut clicked = None;
		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				if self.drag.moved {
					self.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.is_anchor = false;
						}
					});
					self.alpha.target = 0.0;
				} else {
					clicked = self.node_id(idx);
				}
			}
		}
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	/// Abort any in-flight press/pan (pointer left the canvas): release pins,
	/// let energy decay, clear hover. No click is resolved.
	pub fn cancel_interactions(&mut self) {
		if self.drag.active && self.drag.moved {
			if let Some(idx) = self.drag.node_idx {
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.is_anchor = false;
					}
				});
			}
			self.alpha.target = 0.0;
		}
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.highlight.set_hover(node, &self.edges);
	}

	/// Advance one animation frame: one physics step (scaled by the energy
	/// envelope, skipped entirely once settled) plus highlight animation.
	pub fn tick(&mut self, dt: f32) {
		if !self.alpha.settled() {
			self.alpha.step();
			self.graph.update(dt * self.alpha.value as f32);
			self.recenter();
		}
		self.highlight.tick(dt as f64);
	}

	// Uniformly shift unpinned nodes so their mean position sits at the
	// center of the margin-inset layout area. Pinned nodes stay put.
	fn recenter(&mut self) {
		let (cx, cy) = self.margins.center(self.width, self.height);
		let (mut sum_x, mut sum_y, mut count) = (0.0f64, 0.0f64, 0usize);
		self.graph.visit_nodes(|node| {
			if !node.data.is_anchor {
				sum_x += node.x() as f64;
				sum_y += node.y() as f64;
				count += 1;
			}
		});
		if count == 0 {
			return;
		}
		let dx = (cx - sum_x / count as f64) as f32;
		let dy = (cy - sum_y / count as f64) as f32;
		self.graph.visit_nodes_mut(|node| {
			if !node.data.is_anchor {
				node.data.x += dx;
				node.data.y += dy;
			}
		});
	}

	/// Adopt a new canvas size, shifting the layout onto the new center so a
	/// settled graph tracks resizes without reheating.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.recenter();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{
		ExpansionCatalog, ExpansionEntry, GraphData, GraphLink, GraphNode,
	};

	const WIDTH: f64 = 800.0;
	const HEIGHT: f64 = 600.0;

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

	/// A-B-C chain with catalog entry A -> {K, L}.
	fn sample_store() -> GraphStore {
		let data = GraphData {
			nodes: vec![node("A"), node("B"), node("C")],
			links: vec![link("A", "B"), link("B", "C")],
		};
		let catalog: ExpansionCatalog = [(
			"A".to_string(),
			ExpansionEntry {
				nodes: vec![node("K"), node("L")],
				links: vec![link("A", "K"), link("A", "L")],
			},
		)]
		.into_iter()
		.collect();
		GraphStore::new(data, catalog)
	}

	fn sample_state(store: &GraphStore) -> ForceGraphState {
		ForceGraphState::new(store, WIDTH, HEIGHT, Margins::default(), &Theme::default())
	}

	fn position_of(state: &ForceGraphState, id: &str) -> Option<(f32, f32)> {
		let mut found = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				found = Some((node.x(), node.y()));
			}
		});
		found
	}

	fn index_of(state: &ForceGraphState, id: &str) -> DefaultNodeIdx {
		let mut found = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				found = Some(node.index());
			}
		});
		found.unwrap()
	}

	fn anchored_count(state: &ForceGraphState) -> usize {
		let mut n = 0;
		state.graph.visit_nodes(|node| {
			if node.data.is_anchor {
				n += 1;
			}
		});
		n
	}

	fn edge_count(state: &ForceGraphState) -> usize {
		let mut n = 0;
		state.graph.visit_edges(|_, _, _| {
			n += 1;
		});
		n
	}

	#[test]
	fn new_nodes_spawn_on_ring_around_layout_center() {
		let store = sample_store();
		let state = sample_state(&store);
		let (cx, cy) = Margins::default().center(WIDTH, HEIGHT);
		state.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - cx, node.y() as f64 - cy);
			let dist = (dx * dx + dy * dy).sqrt();
			assert!((dist - SPAWN_RADIUS).abs() < 1.0);
		});
	}

	#[test]
	fn rebind_preserves_surviving_positions_and_restarts_alpha() {
		let mut store = sample_store();
		let mut state = sample_state(&store);
		for _ in 0..30 {
			state.tick(0.016);
		}
		let before = position_of(&state, "B").unwrap();
		let alpha_before = state.alpha.value;
		assert!(alpha_before < 1.0);

		assert!(store.expand("A"));
		state.rebind(&store, &Theme::default());

		assert_eq!(position_of(&state, "B").unwrap(), before);
		assert_eq!(state.alpha.value, 1.0);
		assert!(position_of(&state, "K").is_some());
		assert!(position_of(&state, "L").is_some());
	}

	#[test]
	fn rebind_releases_pins_and_interaction_state() {
		let mut store = sample_store();
		let mut state = sample_state(&store);
		let (x, y) = position_of(&state, "A").unwrap();
		state.begin_press(x as f64, y as f64, &ScaleConfig::default());
		state.drag_to(x as f64 + 40.0, y as f64 + 40.0);
		assert_eq!(anchored_count(&state), 1);

		store.expand("A");
		state.rebind(&store, &Theme::default());
		assert_eq!(anchored_count(&state), 0);
		assert!(!state.drag.active);
	}

	#[test]
	fn drag_pins_while_held_and_releases_on_end() {
		let store = sample_store();
		let mut state = sample_state(&store);
		let (x, y) = position_of(&state, "A").unwrap();
		let (x, y) = (x as f64, y as f64);

		state.begin_press(x, y, &ScaleConfig::default());
		state.drag_to(x + 50.0, y + 30.0);
		assert!(state.drag.moved);
		assert_eq!(anchored_count(&state), 1);
		assert_eq!(state.alpha.target, DRAG_ALPHA_TARGET);
		let dragged = position_of(&state, "A").unwrap();
		assert!((dragged.0 as f64 - (x + 50.0)).abs() < 0.5);
		assert!((dragged.1 as f64 - (y + 30.0)).abs() < 0.5);

		let clicked = state.end_press();
		assert_eq!(clicked, None);
		assert_eq!(anchored_count(&state), 0);
		assert_eq!(state.alpha.target, 0.0);
	}

	#[test]
	fn cancelling_mid_drag_releases_pin_and_clears_hover() {
		let store = sample_store();
		let mut state = sample_state(&store);
		let config = ScaleConfig::default();
		let (x, y) = position_of(&state, "A").unwrap();
		let (x, y) = (x as f64, y as f64);

		let idx = state.node_at_position(x, y, &config).unwrap();
		state.set_hover(Some(idx));
		state.begin_press(x, y, &config);
		state.drag_to(x + 30.0, y + 30.0);
		assert_eq!(anchored_count(&state), 1);
		assert_eq!(state.alpha.target, DRAG_ALPHA_TARGET);

		state.cancel_interactions();
		assert_eq!(anchored_count(&state), 0);
		assert_eq!(state.alpha.target, 0.0);
		assert!(state.highlight.hovered_node.is_none());
		assert!(!state.drag.active);
		// A stray release after the cancel must not resolve to a click.
		assert_eq!(state.end_press(), None);
	}

	#[test]
	fn press_without_movement_resolves_to_click() {
		let store = sample_store();
		let mut state = sample_state(&store);
		let (x, y) = position_of(&state, "A").unwrap();

		state.begin_press(x as f64, y as f64, &ScaleConfig::default());
		state.drag_to(x as f64 + 1.0, y as f64 + 1.0);
		assert!(!state.drag.moved);
		assert_eq!(anchored_count(&state), 0);

		assert_eq!(state.end_press().as_deref(), Some("A"));
	}

	#[test]
	fn press_on_empty_canvas_pans_the_view() {
		let store = sample_store();
		let mut state = sample_state(&store);
		// Far corner, well away from the spawn ring.
		state.begin_press(2.0, 2.0, &ScaleConfig::default());
		assert!(state.pan.active);
		state.drag_to(32.0, 22.0);
		assert_eq!(state.transform.x, 30.0);
		assert_eq!(state.transform.y, 20.0);
		assert_eq!(state.end_press(), None);
	}

	#[test]
	fn alpha_settles_and_physics_stops() {
		let store = sample_store();
		let mut state = sample_state(&store);
		for _ in 0..320 {
			state.tick(0.016);
		}
		assert!(state.alpha.settled());

		let before = position_of(&state, "B").unwrap();
		state.tick(0.016);
		assert_eq!(position_of(&state, "B").unwrap(), before);
	}

	#[test]
	fn raising_alpha_target_resumes_physics() {
		let mut alpha = Alpha::default();
		for _ in 0..320 {
			alpha.step();
		}
		assert!(alpha.settled());

		alpha.target = DRAG_ALPHA_TARGET;
		assert!(!alpha.settled());
		for _ in 0..100 {
			alpha.step();
		}
		// Converges up toward the raised target.
		assert!(alpha.value > 0.2);

		alpha.target = 0.0;
		alpha.restart();
		assert_eq!(alpha.value, 1.0);
	}

	#[test]
	fn tick_keeps_unpinned_mean_at_layout_center() {
		let store = sample_store();
		let mut state = sample_state(&store);
		for _ in 0..10 {
			state.tick(0.016);
		}
		let (cx, cy) = Margins::default().center(WIDTH, HEIGHT);
		let (mut sum_x, mut sum_y, mut n) = (0.0f64, 0.0f64, 0usize);
		state.graph.visit_nodes(|node| {
			sum_x += node.x() as f64;
			sum_y += node.y() as f64;
			n += 1;
		});
		assert!((sum_x / n as f64 - cx).abs() < 0.1);
		assert!((sum_y / n as f64 - cy).abs() < 0.1);
	}

	#[test]
	fn resize_recenters_a_settled_layout() {
		let store = sample_store();
		let mut state = sample_state(&store);
		for _ in 0..320 {
			state.tick(0.016);
		}
		assert!(state.alpha.settled());

		state.resize(1000.0, 400.0);
		let (cx, cy) = Margins::default().center(1000.0, 400.0);
		let (mut sum_x, mut sum_y, mut n) = (0.0f64, 0.0f64, 0usize);
		state.graph.visit_nodes(|node| {
			sum_x += node.x() as f64;
			sum_y += node.y() as f64;
			n += 1;
		});
		assert!((sum_x / n as f64 - cx).abs() < 0.1);
		assert!((sum_y / n as f64 - cy).abs() < 0.1);
		// No reheat: the envelope stays settled.
		assert!(state.alpha.settled());
	}

	#[test]
	fn hover_intensity_rises_holds_then_fades() {
		let store = sample_store();
		let mut state = sample_state(&store);
		let a = index_of(&state, "A");
		let b = index_of(&state, "B");
		let c = index_of(&state, "C");

		state.set_hover(Some(a));
		for _ in 0..30 {
			state.highlight.tick(0.016);
		}
		// The hovered node and its neighbor brighten; C only touches B.
		assert!(state.highlight.node_intensity(a) > 0.9);
		assert!(state.highlight.node_intensity(b) > 0.9);
		assert_eq!(state.highlight.node_intensity(c), 0.0);
		assert!(state.highlight.hover_ring_intensity(a) > 0.9);
		assert!(state.highlight.edge_intensity(a, b) > 0.9);
		assert_eq!(state.highlight.edge_intensity(b, c), 0.0);
		assert!(state.highlight.max_intensity() > 0.9);

		// The hold window keeps intensity up briefly after un-hover.
		state.set_hover(None);
		state.highlight.tick(0.1);
		assert!(state.highlight.node_intensity(a) > 0.9);

		// Past the hold window everything fades back out.
		for _ in 0..60 {
			state.highlight.tick(0.016);
		}
		assert!(state.highlight.node_intensity(a) < 0.05);
		assert!(state.highlight.hover_ring_intensity(a) < 0.05);
	}

	#[test]
	fn links_without_resolvable_endpoints_are_skipped() {
		// The store tolerates a dangling link; the simulation must not.
		let data = GraphData {
			nodes: vec![node("A"), node("B")],
			links: vec![link("A", "B"), link("A", "GHOST")],
		};
		let store = GraphStore::new(data, ExpansionCatalog::default());
		assert_eq!(store.links().len(), 2);

		let state = sample_state(&store);
		assert_eq!(edge_count(&state), 1);
	}

	#[test]
	fn hit_test_respects_node_size_and_position() {
		let store = sample_store();
		let state = sample_state(&store);
		let config = ScaleConfig::default();
		let (x, y) = position_of(&state, "A").unwrap();

		assert!(state.node_at_position(x as f64, y as f64, &config).is_some());
		assert!(state.node_at_position(2.0, 2.0, &config).is_none());
	}

	#[test]
	fn margins_center_offsets_toward_the_smaller_inset() {
		let m = Margins::default();
		let (cx, cy) = m.center(WIDTH, HEIGHT);
		// left 40 / right 30: center sits right of the canvas midline;
		// top 20 / bottom 40: center sits above it.
		assert_eq!(cx, 40.0 + (WIDTH - 70.0) / 2.0);
		assert_eq!(cy, 20.0 + (HEIGHT - 60.0) / 2.0);
	}
}
