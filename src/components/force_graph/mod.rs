//! Force-directed note graph component.
//!
//! Renders a graph document on an HTML canvas with:
//! - A force simulation that settles and wakes again when a node is dragged
//! - Pan, zoom, node dragging, hover labels and click-to-select
//! - Node size by link count, edge stroke by shared-keyword weight
//! - Colors keyed by note type
//!
//! # Example
//!
//! ```ignore
//! use note_graph::components::force_graph::ForceGraphCanvas;
//!
//! let (selected, set_selected) = signal(None::<NoteRecord>);
//! view! {
//!     <ForceGraphCanvas
//!         data=Signal::stored(document)
//!         on_select=move |note| set_selected.set(note)
//!     />
//! }
//! ```

mod component;
mod render;
pub mod scale;
pub mod simulation;
pub mod state;
pub mod theme;

pub use component::ForceGraphCanvas;
pub use simulation::{Phase, Simulation, SimulationParameters};
pub use state::{ForceGraphState, SelectionEvent};
pub use theme::{Theme, type_color, type_label};
