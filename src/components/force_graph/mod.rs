//! Force-directed graph visualization component with expandable nodes.
//!
//! Renders an interactive node-link graph on an HTML canvas with:
//! - Click-to-expand/retract node neighborhoods, driven by a static
//!   expansion catalog
//! - Physics-based node positioning with an energy envelope that decays to
//!   rest and restarts whenever the graph mutates
//! - Pan, zoom, and drag-to-pin interactions
//! - Smooth highlight transitions on hover
//! - Configurable theming, margins, and visual scaling
//!
//! # Example
//!
//! ```ignore
//! use graph_explorer::{ForceGraphCanvas, GraphDataset};
//!
//! let dataset: GraphDataset = serde_json::from_str(r#"{
//!     "nodes": [
//!         { "id": "a", "label": "Node A" },
//!         { "id": "b", "label": "Node B" }
//!     ],
//!     "links": [{ "source": "a", "target": "b" }],
//!     "expansions": {
//!         "a": {
//!             "nodes": [{ "id": "c", "label": "Node C" }],
//!             "links": [{ "source": "a", "target": "c" }]
//!         }
//!     }
//! }"#)?;
//!
//! view! { <ForceGraphCanvas data=dataset.into() fullscreen=true /> }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
mod store;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use state::Margins;
pub use store::{GraphStore, StoredNode};
pub use theme::Theme;
pub use types::{ExpansionCatalog, ExpansionEntry, GraphData, GraphDataset, GraphLink, GraphNode};
