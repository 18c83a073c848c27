//! Force-directed graph visualization component.
//!
//! Renders a JSON [`Graph`](crate::json_graph::Graph) on an HTML canvas with:
//! - Physics-based node positioning via force simulation, seeded ring-by-depth
//! - Category-colored box nodes with key/value labels
//! - Pan, zoom, and node dragging interactions
//! - Hover highlighting of a node's parent and children
//!
//! # Example
//!
//! ```ignore
//! use json_graph::components::force_graph::ForceGraphCanvas;
//! use json_graph::json_graph::build_graph;
//!
//! let doc = serde_json::from_str(r#"{"a": [1, 2]}"#).unwrap();
//! let graph = build_graph(&doc);
//!
//! view! { <ForceGraphCanvas data=Signal::stored(graph) fullscreen=true /> }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use component::ForceGraphCanvas;
pub use scale::ScaleConfig;
pub use theme::Theme;
