//! json-graph: Interactive force-directed graph explorer for JSON documents.
//!
//! Every value of a JSON document becomes a node (colored by its category,
//! labelled with its key and a short summary) and every containment becomes an
//! edge. The conversion lives in [`json_graph`] and has no browser
//! dependencies; the rest of the crate is a WASM UI that feeds it and renders
//! the result with physics-based layout, pan/zoom, and hover effects.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod error;
pub mod ingest;
pub mod json_graph;

pub use components::force_graph::ForceGraphCanvas;
pub use components::json_input::JsonInput;
pub use error::{Error, GraphError, IngestError};
pub use json_graph::{BuildLimits, Graph, GraphBuilder, GraphEdge, GraphNode, JsonValue};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("json-graph: logging initialized");
}

/// Parse JSON text and build its graph under `limits`.
pub fn explore(text: &str, limits: BuildLimits) -> Result<(JsonValue, Graph), Error> {
	let document = ingest::parse_json_text(text)?;
	let graph = GraphBuilder::new(limits)
		.build(&document, &mut json_graph::UuidIds)
		.inspect_err(|e| warn!("json-graph: {}", e))?;
	info!(
		"json-graph: {} nodes, {} edges",
		graph.node_count(),
		graph.edge_count()
	);
	Ok((document, graph))
}

/// Load an initial document from a script element with id="json-data".
/// Any JSON text is accepted; it is parsed later like typed input.
fn load_embedded_document() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("json-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let text = script.text().ok()?;
	if text.trim().is_empty() {
		return None;
	}
	info!("json-graph: using embedded document ({} bytes)", text.len());
	Some(text)
}

/// Main application component.
/// Wires the input panel to the graph canvas. Invalid input keeps the last
/// good graph on screen and shows the error instead.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let initial = load_embedded_document().unwrap_or_else(|| ingest::EXAMPLE_JSON.to_string());
	let source = RwSignal::new(initial);

	let outcome = Memo::new(move |_| {
		source.with(|text| {
			if text.trim().is_empty() {
				return Ok(None);
			}
			explore(text, BuildLimits::interactive())
				.map(Some)
				.map_err(|e| e.to_string())
		})
	});

	let graph = Memo::new(move |previous: Option<&Graph>| {
		outcome.with(|o| match o {
			Ok(Some((_, graph))) => graph.clone(),
			Ok(None) => Graph::default(),
			Err(_) => previous.cloned().unwrap_or_default(),
		})
	});
	let document = Signal::derive(move || {
		outcome.with(|o| o.as_ref().ok().and_then(Option::as_ref).map(|(doc, _)| doc.clone()))
	});
	let error = Signal::derive(move || outcome.with(|o| o.as_ref().err().cloned()));
	let stats = Signal::derive(move || graph.with(|g| (g.node_count(), g.edge_count())));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="JSON Graph Explorer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ForceGraphCanvas data=graph fullscreen=true />
			<div class="graph-overlay">
				<h1>"JSON Graph Explorer"</h1>
				<p class="subtitle">"Drag nodes to pin them, double-click to release. Scroll to zoom. Drag background to pan."</p>
				<JsonInput source=source document=document error=error stats=stats />
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn explore_builds_graph_from_text() {
		let (document, graph) = explore(r#"{"a": 1, "b": [2, 3]}"#, BuildLimits::default()).unwrap();
		assert_eq!(document.count_values(), 5);
		assert_eq!(graph.node_count(), 5);
		assert_eq!(graph.edge_count(), 4);
	}

	#[test]
	fn explore_reports_bad_json() {
		let err = explore("{oops}", BuildLimits::default()).unwrap_err();
		assert!(matches!(err, Error::Ingest(IngestError::InputFormat(_))));
	}

	#[test]
	fn explore_reports_oversized_input() {
		let limits = BuildLimits {
			max_nodes: Some(2),
			max_depth: None,
		};
		let err = explore("[1, 2, 3]", limits).unwrap_err();
		assert!(matches!(err, Error::Graph(GraphError::InputTooLarge(_))));
		assert_eq!(err.to_string(), "input too large: more than 2 values");
	}
}
