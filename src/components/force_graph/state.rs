//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node box metadata, the
//! pan/zoom transform, and hover highlighting of a node's tree neighbourhood.

use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::{LabelBox, ScaleConfig};
use super::theme::Color;
use crate::json_graph::{DEFAULT_COLOR, Graph};

/// Distance between depth rings in the seeded layout.
const RING_SPACING: f64 = 140.0;

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: LabelBox,
	pub fill: Color,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
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

/// Hover highlighting: the hovered node, its parent and its children.
///
/// `intensity` eases towards 1.0 while something is hovered and back to 0.0
/// afterwards; the last neighbourhood is kept during fade-out so it does not
/// snap away.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub hovered: Option<DefaultNodeIdx>,
	neighbourhood: HashSet<DefaultNodeIdx>,
	intensity: f64,
}

impl HighlightState {
	/// Approach speed of `intensity`, per second.
	const SPEED: f64 = 8.0;

	pub fn set_hover(
		&mut self,
		node: Option<DefaultNodeIdx>,
		edges: &[(DefaultNodeIdx, DefaultNodeIdx)],
	) {
		if self.hovered == node {
			return;
		}
		self.hovered = node;
		let Some(idx) = node else {
			return;
		};
		self.neighbourhood.clear();
		self.neighbourhood.insert(idx);
		for &(parent, child) in edges {
			if parent == idx {
				self.neighbourhood.insert(child);
			} else if child == idx {
				self.neighbourhood.insert(parent);
			}
		}
	}

	pub fn tick(&mut self, dt: f64) {
		let target = if self.hovered.is_some() { 1.0 } else { 0.0 };
		let step = 1.0 - (-Self::SPEED * dt).exp();
		self.intensity += (target - self.intensity) * step;
		if self.hovered.is_none() && self.intensity < 0.01 {
			self.intensity = 0.0;
			self.neighbourhood.clear();
		}
	}

	pub fn intensity(&self) -> f64 {
		self.intensity
	}

	pub fn contains(&self, idx: DefaultNodeIdx) -> bool {
		self.neighbourhood.contains(&idx)
	}

	/// Alpha multiplier for a node, given the alpha used for dimmed nodes.
	pub fn node_alpha(&self, idx: DefaultNodeIdx, dimmed: f64) -> f64 {
		if self.contains(idx) {
			1.0
		} else {
			1.0 - (1.0 - dimmed) * self.intensity
		}
	}

	/// Alpha multiplier for the edge between `a` and `b`.
	pub fn edge_alpha(&self, a: DefaultNodeIdx, b: DefaultNodeIdx, dimmed: f64) -> f64 {
		if self.contains(a) && self.contains(b) {
			1.0
		} else {
			1.0 - (1.0 - dimmed) * self.intensity
		}
	}
}

/// Depth of every node, keyed by graph position.
///
/// Relies on the builder's pre-order: a parent always precedes its children,
/// so one pass over the edges settles every depth.
pub fn node_depths(graph: &Graph) -> Vec<usize> {
	let position: HashMap<&str, usize> = graph
		.nodes
		.iter()
		.enumerate()
		.map(|(i, n)| (n.id.as_str(), i))
		.collect();
	let mut depths = vec![0; graph.nodes.len()];
	for edge in &graph.edges {
		if let (Some(&from), Some(&to)) = (
			position.get(edge.from.as_str()),
			position.get(edge.to.as_str()),
		) {
			depths[to] = depths[from] + 1;
		}
	}
	depths
}

/// Starting positions: the root at the origin, each depth on its own ring,
/// nodes spread around the ring in document order.
pub fn seed_positions(depths: &[usize]) -> Vec<(f64, f64)> {
	let mut per_ring: HashMap<usize, usize> = HashMap::new();
	for &d in depths {
		*per_ring.entry(d).or_insert(0) += 1;
	}
	let mut placed: HashMap<usize, usize> = HashMap::new();
	depths
		.iter()
		.map(|&d| {
			let slot = placed.entry(d).or_insert(0);
			let count = per_ring.get(&d).copied().unwrap_or(1);
			let angle = (*slot as f64) * TAU / count as f64;
			*slot += 1;
			let radius = d as f64 * RING_SPACING;
			(radius * angle.cos(), radius * angle.sin())
		})
		.collect()
}

/// Core graph state combining physics simulation with interaction and highlight tracking.
///
/// Rebuilt whenever the input graph changes, then mutated each frame by the
/// animation loop.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	root: Option<DefaultNodeIdx>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(data: &Graph, width: f64, height: f64, config: &ScaleConfig) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 400.0,
			force_spring: 0.04,
			force_max: 120.0,
			node_speed: 3000.0,
			damping_factor: 0.85,
		});
		let depths = node_depths(data);
		let positions = seed_positions(&depths);
		let mut id_to_idx = HashMap::new();
		let mut root = None;

		for ((node, &depth), &(x, y)) in data.nodes.iter().zip(&depths).zip(&positions) {
			let fill = Color::from_hex(&node.color)
				.or_else(|| Color::from_hex(DEFAULT_COLOR))
				.unwrap_or_default();
			let idx = graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				// The root stays put so the tree unfolds around the view centre.
				is_anchor: depth == 0,
				user_data: NodeInfo {
					label: config.label_box(
						(depth != 0).then_some(node.key.as_str()),
						node.summary(),
					),
					fill,
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
			root.get_or_insert(idx);
		}

		let mut edges = Vec::with_capacity(data.edges.len());
		for edge in &data.edges {
			if let (Some(&from), Some(&to)) = (
				id_to_idx.get(edge.from.as_str()),
				id_to_idx.get(edge.to.as_str()),
			) {
				graph.add_edge(from, to, EdgeData::default());
				edges.push((from, to));
			}
		}

		Self {
			graph,
			root,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
			animation_running: true,
		}
	}

	/// Swap in a new graph, keeping the viewport size and the user's pan and zoom.
	pub fn rebuild(&mut self, data: &Graph, config: &ScaleConfig) {
		let transform = self.transform.clone();
		*self = Self::new(data, self.width, self.height, config);
		self.transform = transform;
	}

	/// Simulation index of the graph's root node.
	pub fn root_idx(&self) -> Option<DefaultNodeIdx> {
		self.root
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node whose box contains the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let label = &node.data.user_data.label;
			let (dx, dy) = ((node.x() as f64 - gx).abs(), (node.y() as f64 - gy).abs());
			if dx <= label.width / 2.0 && dy <= label.height / 2.0 {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.highlight.set_hover(node, &self.edges);
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.highlight.tick(dt as f64);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}

	/// Apply a zoom step around a fixed screen point.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64, config: &ScaleConfig) {
		let new_k = config.clamp_zoom(self.transform.k * factor);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::json_graph::{GraphBuilder, JsonValue, SequentialIds};

	fn graph(text: &str) -> Graph {
		let doc: JsonValue = serde_json::from_str(text).unwrap();
		GraphBuilder::default()
			.build(&doc, &mut SequentialIds::new())
			.unwrap()
	}

	#[test]
	fn depths_follow_nesting() {
		let g = graph(r#"{"a": 1, "b": [2, {"c": null}]}"#);
		assert_eq!(node_depths(&g), [0, 1, 1, 2, 2, 3]);
	}

	#[test]
	fn seeded_rings_grow_with_depth() {
		let positions = seed_positions(&[0, 1, 1, 2]);
		assert_eq!(positions[0], (0.0, 0.0));
		let dist = |(x, y): (f64, f64)| (x * x + y * y).sqrt();
		assert!((dist(positions[1]) - RING_SPACING).abs() < 1e-9);
		assert!((dist(positions[2]) - RING_SPACING).abs() < 1e-9);
		assert!((dist(positions[3]) - 2.0 * RING_SPACING).abs() < 1e-9);
		assert!((positions[1].0 + positions[2].0).abs() < 1e-9);
	}

	#[test]
	fn simulation_mirrors_graph() {
		let g = graph(r#"{"a": 1, "b": [2, 3]}"#);
		let state = ForceGraphState::new(&g, 800.0, 600.0, &ScaleConfig::default());
		let mut nodes = 0;
		let mut anchors = 0;
		state.graph.visit_nodes(|n| {
			nodes += 1;
			if n.data.is_anchor {
				anchors += 1;
			}
		});
		let mut edges = 0;
		state.graph.visit_edges(|_, _, _| edges += 1);
		assert_eq!((nodes, edges, anchors), (5, 4, 1));
	}

	#[test]
	fn hit_test_uses_box_bounds() {
		let g = graph("{}");
		let state = ForceGraphState::new(&g, 800.0, 600.0, &ScaleConfig::default());
		// Root sits at the view centre.
		assert!(state.node_at_position(400.0, 600.0 / 2.0).is_some());
		assert!(state.node_at_position(10.0, 10.0).is_none());
	}

	#[test]
	fn hover_covers_parent_and_children() {
		let g = graph(r#"{"a": {"b": 1, "c": 2}, "d": 3}"#);
		let mut state = ForceGraphState::new(&g, 800.0, 600.0, &ScaleConfig::default());
		let hovered = state.edges[0].1;
		state.set_hover(Some(hovered));
		for _ in 0..120 {
			state.highlight.tick(1.0 / 60.0);
		}
		let mut lit = 0;
		state.graph.visit_nodes(|n| {
			if state.highlight.contains(n.index()) {
				lit += 1;
			}
		});
		assert_eq!(lit, 4);
		assert!(state.highlight.intensity() > 0.99);

		state.set_hover(None);
		for _ in 0..240 {
			state.highlight.tick(1.0 / 60.0);
		}
		assert_eq!(state.highlight.intensity(), 0.0);
		assert!(!state.highlight.contains(hovered));
	}

	#[test]
	fn rebuild_keeps_pan_and_zoom() {
		let config = ScaleConfig::default();
		let mut state = ForceGraphState::new(&graph("[1]"), 800.0, 600.0, &config);
		state.zoom_at(100.0, 50.0, 1.1, &config);
		state.transform.x += 40.0;
		let before = state.transform.clone();

		state.rebuild(&graph(r#"{"a": 1, "b": 2}"#), &config);
		assert_eq!(state.transform.x, before.x);
		assert_eq!(state.transform.y, before.y);
		assert_eq!(state.transform.k, before.k);
		assert_eq!((state.width, state.height), (800.0, 600.0));
		let mut nodes = 0;
		state.graph.visit_nodes(|_| nodes += 1);
		assert_eq!(nodes, 3);
	}

	#[test]
	fn only_the_root_box_drops_its_key_line() {
		let g = graph(r#"{"": 1}"#);
		let state = ForceGraphState::new(&g, 800.0, 600.0, &ScaleConfig::default());
		let mut lines = Vec::new();
		state.graph.visit_nodes(|n| lines.push(n.data.user_data.label.lines.clone()));
		assert_eq!(lines, [vec!["{}".to_string()], vec![String::new(), "1".to_string()]]);
	}

	#[test]
	fn zoom_keeps_point_fixed() {
		let g = graph("[1]");
		let config = ScaleConfig::default();
		let mut state = ForceGraphState::new(&g, 800.0, 600.0, &config);
		let before = state.screen_to_graph(100.0, 50.0);
		state.zoom_at(100.0, 50.0, 1.1, &config);
		let after = state.screen_to_graph(100.0, 50.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
		assert!((state.transform.k - 1.1).abs() < 1e-9);
	}
}
