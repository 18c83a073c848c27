//! Turns a JSON document into a tree of labelled, colored nodes.
//!
//! The walk is depth-first and pre-order: a value's node is emitted before any
//! of its children, object entries are visited in document order and array
//! elements in index order. Traversal uses an explicit stack, so arbitrarily
//! deep documents never grow the call stack.

use log::debug;
use serde::{Deserialize, Serialize};

use super::classify::{NodeCategory, classify};
use super::ids::{IdGenerator, UuidIds};
use super::value::JsonValue;
use crate::error::{GraphError, SizeLimit};

/// Separator between the key line and the value line of a label.
pub const LABEL_SEPARATOR: char = '\n';

/// One JSON value in the graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Unique within the graph. Never derived from content.
	pub id: String,
	/// Object key or `[index]`; empty for the root. May itself contain newlines.
	pub key: String,
	/// `key`, then a newline, then the value summary.
	pub label: String,
	pub category: NodeCategory,
	/// CSS hex color derived from `category`.
	pub color: String,
}

impl GraphNode {
	/// The value-summary half of the label.
	pub fn summary(&self) -> &str {
		self.label
			.strip_prefix(self.key.as_str())
			.and_then(|rest| rest.strip_prefix(LABEL_SEPARATOR))
			.unwrap_or_default()
	}
}

/// Containment of `to` directly inside `from`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
	pub from: String,
	pub to: String,
}

/// Nodes in pre-order plus parent-to-child edges. The first node is the root.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

impl Graph {
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// The node for the top-level value.
	pub fn root(&self) -> Option<&GraphNode> {
		self.nodes.first()
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Direct children of `id`, in document order.
	pub fn children<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphNode> + 'a {
		self.edges
			.iter()
			.filter(move |e| e.from == id)
			.filter_map(|e| self.node(&e.to))
	}

	pub fn parent(&self, id: &str) -> Option<&GraphNode> {
		self.edges
			.iter()
			.find(|e| e.to == id)
			.and_then(|e| self.node(&e.from))
	}
}

/// Size guard applied while building.
///
/// Depth counts from the root at 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildLimits {
	pub max_nodes: Option<usize>,
	pub max_depth: Option<usize>,
}

impl BuildLimits {
	/// No guard at all; building can only fail by running out of memory.
	pub const fn unbounded() -> Self {
		Self {
			max_nodes: None,
			max_depth: None,
		}
	}

	/// Limits that keep the interactive canvas responsive.
	pub const fn interactive() -> Self {
		Self {
			max_nodes: Some(5_000),
			max_depth: Some(256),
		}
	}
}

/// A value still waiting to be turned into a node.
struct Pending<'a> {
	value: &'a JsonValue,
	parent: Option<String>,
	key: String,
	depth: usize,
}

/// Builds [`Graph`]s under a fixed set of [`BuildLimits`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GraphBuilder {
	limits: BuildLimits,
}

impl GraphBuilder {
	pub fn new(limits: BuildLimits) -> Self {
		Self { limits }
	}

	/// Walk `root` and emit one node per value and one edge per containment.
	///
	/// Fails only when a limit is exceeded, in which case no partial graph is
	/// returned.
	pub fn build(
		&self,
		root: &JsonValue,
		ids: &mut impl IdGenerator,
	) -> Result<Graph, GraphError> {
		let mut graph = Graph::default();
		let mut stack = vec![Pending {
			value: root,
			parent: None,
			key: String::new(),
			depth: 0,
		}];

		while let Some(Pending {
			value,
			parent,
			key,
			depth,
		}) = stack.pop()
		{
			if let Some(max) = self.limits.max_nodes {
				if graph.nodes.len() >= max {
					return Err(GraphError::InputTooLarge(SizeLimit::Nodes(max)));
				}
			}
			if let Some(max) = self.limits.max_depth {
				if depth > max {
					return Err(GraphError::InputTooLarge(SizeLimit::Depth(max)));
				}
			}

			let id = ids.next_id();
			let category = classify(value);
			graph.nodes.push(GraphNode {
				id: id.clone(),
				label: label(&key, value),
				key,
				category,
				color: category.color().to_string(),
			});
			if let Some(from) = parent {
				graph.edges.push(GraphEdge {
					from,
					to: id.clone(),
				});
			}

			// Pushed in reverse so the first child is popped first.
			match value {
				JsonValue::Object(entries) => {
					for (child_key, child) in entries.iter().rev() {
						stack.push(Pending {
							value: child,
							parent: Some(id.clone()),
							key: child_key.clone(),
							depth: depth + 1,
						});
					}
				}
				JsonValue::Array(items) => {
					for (index, child) in items.iter().enumerate().rev() {
						stack.push(Pending {
							value: child,
							parent: Some(id.clone()),
							key: format!("[{index}]"),
							depth: depth + 1,
						});
					}
				}
				_ => {}
			}
		}

		debug!(
			"json-graph: built {} nodes, {} edges",
			graph.nodes.len(),
			graph.edges.len()
		);
		Ok(graph)
	}
}

/// Build a graph with random ids and no size guard.
pub fn build_graph(root: &JsonValue) -> Graph {
	GraphBuilder::new(BuildLimits::unbounded())
		.build(root, &mut UuidIds)
		.unwrap_or_default()
}

fn label(key: &str, value: &JsonValue) -> String {
	let summary = match value {
		JsonValue::Object(_) => "{}".to_string(),
		JsonValue::Array(_) => "[]".to_string(),
		scalar => scalar.scalar_text().unwrap_or_default(),
	};
	format!("{key}{LABEL_SEPARATOR}{summary}")
}
