//! Side panel for getting a document into the explorer.
//!
//! Paste JSON, upload a `.json`/`.csv`/`.xlsx` file, load the example, or download
//! what is currently shown. Uploaded files are converted and pretty-printed
//! back into the text area, so the text area is always the single source.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAnchorElement, HtmlInputElement};

use crate::ingest;
use crate::json_graph::JsonValue;

/// Trigger a browser download of `value` as `data.json`.
fn download_json(value: &JsonValue) {
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		return;
	};
	let Ok(element) = document.create_element("a") else {
		warn!("json-graph: could not create download link");
		return;
	};
	let anchor: HtmlAnchorElement = element.unchecked_into();
	let encoded = String::from(js_sys::encode_uri_component(&ingest::to_pretty_json(value)));
	anchor.set_href(&format!("data:application/json;charset=utf-8,{encoded}"));
	anchor.set_download("data.json");
	anchor.click();
}

/// Text input, file upload, example loader and download button.
#[component]
pub fn JsonInput(
	/// JSON source text; written by every input method.
	source: RwSignal<String>,
	/// Currently parsed document, if the source is valid.
	#[prop(into)]
	document: Signal<Option<JsonValue>>,
	/// Parse or build error for the current source.
	#[prop(into)]
	error: Signal<Option<String>>,
	/// `(nodes, edges)` of the graph on screen.
	#[prop(into)]
	stats: Signal<(usize, usize)>,
) -> impl IntoView {
	let file_error = RwSignal::new(None::<String>);

	let on_file = move |ev: leptos::ev::Event| {
		let input: HtmlInputElement = event_target(&ev);
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};
		let name = file.name();
		spawn_local(async move {
			let bytes = match JsFuture::from(file.array_buffer()).await {
				Ok(buffer) => js_sys::Uint8Array::new(&buffer).to_vec(),
				Err(_) => {
					file_error.set(Some(format!("could not read `{name}`")));
					return;
				}
			};
			match ingest::load_file(&name, &bytes) {
				Ok(value) => {
					file_error.set(None);
					source.set(ingest::to_pretty_json(&value));
				}
				Err(e) => file_error.set(Some(format!("Error reading file: {e}"))),
			}
		});
	};

	let on_example = move |_| {
		file_error.set(None);
		source.set(ingest::EXAMPLE_JSON.to_string());
	};

	let on_download = move |_| {
		document.with_untracked(|doc| {
			if let Some(doc) = doc {
				download_json(doc);
			}
		});
	};

	view! {
		<div class="json-input">
			<label for="json-source">"JSON input"</label>
			<textarea
				id="json-source"
				rows="12"
				spellcheck="false"
				prop:value=move || source.get()
				on:input=move |ev| source.set(event_target_value(&ev))
			/>
			<div class="json-input-actions">
				<input type="file" accept=".json,.csv,.xlsx,.xls" on:change=on_file />
				<button on:click=on_example>"Load example"</button>
				<button
					on:click=on_download
					prop:disabled=move || document.with(|d| d.is_none())
				>
					"Download JSON"
				</button>
			</div>
			<Show when=move || error.with(|e| e.is_some())>
				<p class="error">{move || error.get().unwrap_or_default()}</p>
			</Show>
			<Show when=move || file_error.with(|e| e.is_some())>
				<p class="error">{move || file_error.get().unwrap_or_default()}</p>
			</Show>
			<p class="stats">
				{move || {
					let (nodes, edges) = stats.get();
					format!("{nodes} nodes, {edges} edges")
				}}
			</p>
		</div>
	}
}
