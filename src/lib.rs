//! note-graph: keyword-similarity map of a personal note corpus.
//!
//! The native `generate` binary turns a directory of notes into a graph
//! document (see [`pipeline`]). This crate's CSR client loads that document
//! from the page and renders it as an interactive force-directed graph with a
//! legend and a detail panel for the selected note.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

pub mod components;
pub mod document;
pub mod error;
#[cfg(not(target_arch = "wasm32"))]
pub mod pipeline;

pub use components::force_graph::{ForceGraphCanvas, type_color, type_label};
pub use document::{Edge, GraphDocument, NoteRecord, NoteType};
pub use error::LoadError;

/// Id of the `<script type="application/json">` element carrying the document.
pub const GRAPH_DATA_ID: &str = "graph-data";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("note-graph: logging initialized");
}

/// Parse and validate a serialized graph document.
pub fn parse_graph_data(json: &str) -> Result<GraphDocument, LoadError> {
	let document: GraphDocument = serde_json::from_str(json)?;
	document.validate()?;
	Ok(document)
}

/// Load the graph document embedded in the page.
fn load_graph_data() -> Result<GraphDocument, LoadError> {
	let text = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(GRAPH_DATA_ID))
		.and_then(|e| e.dyn_into::<HtmlScriptElement>().ok())
		.and_then(|s| s.text().ok())
		.ok_or(LoadError::MissingDocument(GRAPH_DATA_ID))?;

	let document = parse_graph_data(&text)?;
	info!(
		"note-graph: loaded {} nodes, {} links",
		document.nodes.len(),
		document.links.len()
	);
	Ok(document)
}

/// Header line with the corpus size.
pub fn summary_line(document: &GraphDocument) -> String {
	format!(
		"{}のノート · {}のつながり",
		document.nodes.len(),
		document.links.len()
	)
}

/// Main application component.
/// Loads the graph document from the DOM and renders the viewer, or a visible
/// error when the document is missing or malformed.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let content = match load_graph_data() {
		Ok(document) => view! { <GraphView document /> }.into_any(),
		Err(e) => {
			warn!("note-graph: {e}");
			view! { <div class="load-error">"Error: " {e.to_string()}</div> }.into_any()
		}
	};

	view! {
		<Html attr:lang="ja" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Note Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		{content}
	}
}

#[component]
fn GraphView(document: GraphDocument) -> impl IntoView {
	let (selected, set_selected) = signal(None::<NoteRecord>);
	let summary = summary_line(&document);
	let data = Signal::stored(document);
	let selected_id = Signal::derive(move || selected.with(|n| n.as_ref().map(|n| n.id.clone())));

	view! {
		<main class="note-graph">
			<header class="note-graph-header">
				<div>
					<h1>"Note Graph"</h1>
					<p class="subtitle">{summary}</p>
				</div>
				<Legend />
			</header>
			<div class="graph-area">
				<ForceGraphCanvas
					data=data
					on_select={move |note: Option<NoteRecord>| set_selected.set(note)}
					selected=selected_id
				/>
				{move || {
					selected
						.get()
						.map(|note| {
							view! { <NotePanel note=note on_close={move |_: ()| set_selected.set(None)} /> }
						})
				}}
			</div>
		</main>
	}
}

/// Color key for the four note types.
#[component]
fn Legend() -> impl IntoView {
	view! {
		<div class="legend">
			{NoteType::ALL
				.iter()
				.map(|&t| {
					let dot = format!("background: {};", type_color(t).to_css());
					view! {
						<div class="legend-item">
							<span class="legend-dot" style=dot></span>
							{type_label(t)}
						</div>
					}
				})
				.collect_view()}
		</div>
	}
}

/// Detail view of the selected note.
#[component]
fn NotePanel(note: NoteRecord, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
	let NoteRecord {
		title,
		date,
		category,
		note_type,
		source,
		excerpt,
		keywords,
		..
	} = note;
	let color = type_color(note_type);
	let badge = format!(
		"background: {}; color: {};",
		color.with_alpha(0.13).to_css(),
		color.to_css()
	);

	view! {
		<aside class="note-panel">
			<div class="note-panel-header">
				<span class="type-badge" style=badge>{type_label(note_type)}</span>
				<button class="close" on:click=move |_| on_close.run(())>"×"</button>
				<h2>{title}</h2>
				{(!date.is_empty()).then(move || view! { <p class="note-date">{date}</p> })}
				{(!category.is_empty()).then(move || view! { <p class="note-category">{category}</p> })}
			</div>
			<div class="note-panel-body">
				<p class="note-excerpt">{excerpt}</p>
				{source
					.map(|source| {
						view! {
							<div class="note-source">
								<p class="section-label">"出典"</p>
								<p>{source}</p>
							</div>
						}
					})}
				<div class="note-keywords">
					<p class="section-label">"キーワード"</p>
					<div class="keyword-list">
						{keywords
							.into_iter()
							.map(|k| view! { <span class="keyword">{k}</span> })
							.collect_view()}
					</div>
				</div>
			</div>
		</aside>
	}
}
