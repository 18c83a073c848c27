//! JSON document to node/edge graph conversion.
//!
//! This is the platform-independent core: no DOM, no canvas, no I/O. A
//! [`JsonValue`] goes in, a [`Graph`] comes out, and the force graph component
//! takes it from there.
//!
//! # Example
//!
//! ```
//! use json_graph::json_graph::{GraphBuilder, JsonValue, NodeCategory, SequentialIds};
//!
//! let doc: JsonValue = serde_json::from_str(r#"{"a": 1, "b": [2, 3]}"#).unwrap();
//! let graph = GraphBuilder::default()
//!     .build(&doc, &mut SequentialIds::new())
//!     .unwrap();
//!
//! assert_eq!(graph.node_count(), 5);
//! assert_eq!(graph.edge_count(), 4);
//! assert_eq!(graph.nodes[2].label, "b\n[]");
//! assert_eq!(graph.nodes[2].category, NodeCategory::Array);
//! ```

mod builder;
mod classify;
mod ids;
mod value;

pub use builder::{
	BuildLimits, Graph, GraphBuilder, GraphEdge, GraphNode, LABEL_SEPARATOR, build_graph,
};
pub use classify::{DEFAULT_COLOR, NodeCategory, UnknownCategory, category_color, classify};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use value::JsonValue;
