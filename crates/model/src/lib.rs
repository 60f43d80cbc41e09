//! # Propanel Model
//!
//! In-memory document model backing the properties panel: an arena of typed
//! nodes, a registry of top-level diagram elements, and YAML/JSON diagram file
//! import/export.
//!
//! ## Usage
//!
//! ```rust
//! use propanel_model::Document;
//!
//! let document = Document::from_yaml_str(r#"
//! elements:
//!   - $type: bpmn:StartEvent
//!     id: StartEvent_1
//! "#)?;
//! let start = document.element("StartEvent_1").expect("registered");
//! assert!(document.is_type(start, "bpmn:StartEvent"));
//! # Ok::<(), propanel_model::ModelError>(())
//! ```
//!
//! Property writes made directly through [`Document::set_property`] are not
//! recorded anywhere; editors go through the engine's command stack so that
//! every change can be undone.

mod document;
mod error;
mod io;

pub use document::{Document, Node};
pub use error::ModelError;
pub use io::{DiagramSpec, NodeSpec, PropertySpec, load_diagram_file, save_diagram_file};
pub use propanel_types::{ElementKind, NodeId, PropertyValue};
