//! UI components.

pub mod force_graph;
pub mod json_input;
