//! # Propanel Engine
//!
//! Headless properties panel for process diagrams. Given a selected element,
//! the registered providers decide which entries (selects, text fields and
//! repeatable lists) apply, read their values from the document and write
//! edits back through an undoable command stack.
//!
//! ## Key Features
//!
//! - **Variant editing**: [`VariantFieldEditor`] keeps mutually exclusive
//!   slots consistent, switching between them in a single command
//! - **Undo/redo**: every edit is a [`Command`] recorded on a bounded
//!   [`CommandStack`] that notifies subscribers
//! - **Providers**: timer definitions, connector output parameters and
//!   execution listeners
//!
//! ## Usage
//!
//! ```rust
//! use propanel_engine::{Modeler, PropertiesPanel, CommandExecutor};
//! use propanel_model::Document;
//!
//! let document = Document::from_yaml_str(r#"
//! elements:
//!   - $type: bpmn:StartEvent
//!     id: StartEvent_1
//!     eventDefinitions:
//!       - $type: bpmn:TimerEventDefinition
//! "#)?;
//! let mut modeler = Modeler::new(document);
//! let panel = PropertiesPanel::default();
//!
//! panel.set_value(&mut modeler, "StartEvent_1", "timerEventDefinitionType", "timeDuration")?;
//! panel.set_value(&mut modeler, "StartEvent_1", "timerEventDefinitionValue", "PT15S")?;
//! assert_eq!(
//!     panel.value(modeler.document(), "StartEvent_1", "timerEventDefinitionValue")?.as_deref(),
//!     Some("PT15S"),
//! );
//!
//! modeler.undo();
//! modeler.undo();
//! assert_eq!(panel.value(modeler.document(), "StartEvent_1", "timerEventDefinitionType")?.as_deref(), Some(""));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **`command`**: commands, the undo/redo stack and the [`CommandExecutor`] seam
//! - **`entry`**: entry descriptors and their document bindings
//! - **`variant`**: the exclusive-slot editor
//! - **`provider`**: capability predicates and the providers
//! - **`panel`**: the facade addressing entries by id

mod command;
mod entry;
mod error;
mod panel;
pub mod provider;
pub mod variant;

pub use command::{
    Command, CommandEvent, CommandEventKind, CommandExecutor, CommandStack, MULTI_COMMAND_EXECUTOR, Modeler, PropertyChange, PropertyUpdates,
    SubscriptionId, UPDATE_BUSINESS_OBJECT, UPDATE_BUSINESS_OBJECT_LIST,
};
pub use entry::{Action, Entry, EntryKind, EntryView, FieldBinding, Group, GroupBody, GroupView, ItemView, ListEntry, ListItem, SelectEntry, SelectOption, TextFieldEntry};
pub use error::PanelError;
pub use panel::{PropertiesPanel, find_entry, is_list_entry};
pub use variant::{SlotKind, Variant, VariantFieldEditor};
