//! Structural laws every built graph obeys, checked over generated documents.

// Integration test crate only links a subset of the lib deps.
#![allow(unused_crate_dependencies)]

use std::collections::{HashMap, HashSet};

use json_graph::json_graph::{
	BuildLimits, Graph, GraphBuilder, JsonValue, NodeCategory, SequentialIds, UuidIds, classify,
};
use proptest::prelude::*;
use serde_json::Number;

fn arb_scalar() -> impl Strategy<Value = JsonValue> {
	prop_oneof![
		Just(JsonValue::Null),
		any::<bool>().prop_map(JsonValue::Boolean),
		any::<i64>().prop_map(|n| JsonValue::Number(Number::from(n))),
		(-1.0e9f64..1.0e9)
			.prop_filter_map("finite", Number::from_f64)
			.prop_map(JsonValue::Number),
		".{0,40}".prop_map(JsonValue::String),
	]
}

fn arb_json() -> impl Strategy<Value = JsonValue> {
	arb_scalar().prop_recursive(6, 128, 8, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..8).prop_map(JsonValue::Array),
			// Keys drawn from a small alphabet so duplicates and embedded
			// newlines show up.
			prop::collection::vec(("[a-d\n]{0,3}", inner), 0..8).prop_map(JsonValue::Object),
		]
	})
}

fn build(value: &JsonValue) -> Graph {
	GraphBuilder::new(BuildLimits::unbounded())
		.build(value, &mut SequentialIds::new())
		.expect("unbounded build never fails")
}

/// Relabel ids by position so graphs built with different generators compare.
fn canonical(graph: &Graph) -> Vec<(Option<usize>, String, NodeCategory)> {
	let index: HashMap<&str, usize> = graph
		.nodes
		.iter()
		.enumerate()
		.map(|(i, n)| (n.id.as_str(), i))
		.collect();
	let parents: HashMap<&str, usize> = graph
		.edges
		.iter()
		.map(|e| (e.to.as_str(), index[e.from.as_str()]))
		.collect();
	graph
		.nodes
		.iter()
		.map(|n| (parents.get(n.id.as_str()).copied(), n.label.clone(), n.category))
		.collect()
}

proptest! {
	#[test]
	fn one_node_per_value(doc in arb_json()) {
		let graph = build(&doc);
		prop_assert_eq!(graph.node_count(), doc.count_values());
	}

	#[test]
	fn edges_are_nodes_minus_one(doc in arb_json()) {
		let graph = build(&doc);
		prop_assert_eq!(graph.edge_count(), graph.node_count() - 1);
	}

	#[test]
	fn graph_is_a_tree_rooted_at_first_node(doc in arb_json()) {
		let graph = build(&doc);
		let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		prop_assert_eq!(ids.len(), graph.node_count(), "ids must be unique");

		let mut incoming: HashMap<&str, usize> = HashMap::new();
		for edge in &graph.edges {
			prop_assert!(ids.contains(edge.from.as_str()));
			prop_assert!(ids.contains(edge.to.as_str()));
			*incoming.entry(edge.to.as_str()).or_default() += 1;
		}

		let root = &graph.nodes[0];
		prop_assert!(!incoming.contains_key(root.id.as_str()));
		for node in &graph.nodes[1..] {
			prop_assert_eq!(incoming.get(node.id.as_str()).copied(), Some(1));
		}
	}

	#[test]
	fn root_matches_document(doc in arb_json()) {
		let graph = build(&doc);
		let root = graph.root().expect("graph has a root");
		prop_assert_eq!(root.key.as_str(), "");
		prop_assert_eq!(root.category, classify(&doc));
		prop_assert_eq!(&root.color, root.category.color());
	}

	#[test]
	fn children_follow_document_order(doc in arb_json()) {
		let graph = build(&doc);
		let root = graph.root().expect("graph has a root");
		let keys: Vec<String> = graph.children(&root.id).map(|n| n.key.clone()).collect();
		let expected: Vec<String> = match &doc {
			JsonValue::Object(entries) => entries.iter().map(|(k, _)| k.clone()).collect(),
			JsonValue::Array(items) => (0..items.len()).map(|i| format!("[{i}]")).collect(),
			_ => Vec::new(),
		};
		prop_assert_eq!(keys, expected);
	}

	#[test]
	fn label_is_key_then_summary(doc in arb_json()) {
		let graph = build(&doc);
		for node in &graph.nodes {
			prop_assert_eq!(&node.label, &format!("{}\n{}", node.key, node.summary()));
		}
	}

	#[test]
	fn sequential_ids_are_deterministic(doc in arb_json()) {
		prop_assert_eq!(build(&doc), build(&doc));
	}

	#[test]
	fn random_ids_give_isomorphic_graphs(doc in arb_json()) {
		let seeded = build(&doc);
		let random = GraphBuilder::new(BuildLimits::unbounded())
			.build(&doc, &mut UuidIds)
			.expect("unbounded build never fails");
		prop_assert_eq!(canonical(&seeded), canonical(&random));
	}

	#[test]
	fn node_limit_is_exact(doc in arb_json()) {
		let count = doc.count_values();
		let at_limit = BuildLimits { max_nodes: Some(count), max_depth: None };
		prop_assert!(GraphBuilder::new(at_limit).build(&doc, &mut SequentialIds::new()).is_ok());
		if count > 1 {
			let below = BuildLimits { max_nodes: Some(count - 1), max_depth: None };
			prop_assert!(GraphBuilder::new(below).build(&doc, &mut SequentialIds::new()).is_err());
		}
	}
}
