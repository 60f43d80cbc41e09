//! Entry providers and shared lookups.
//!
//! Modules:
//! - `lookup`: resolution of definitions, extension elements and connectors
//! - `timer`: timer event definition type and value
//! - `connector_output`: output parameters of a connector
//! - `listener`: execution listeners and their injected fields
//!
//! Each provider gates itself on an explicit capability predicate before
//! building anything; unsupported elements yield no groups.

pub mod lookup;
mod connector_output;
mod listener;
mod timer;

use std::fmt::Debug;

use propanel_model::Document;
use propanel_types::NodeId;
use propanel_util::{PanelConfig, Translator};

pub use connector_output::{CONNECTOR_OUTPUT_GROUP, ConnectorOutputProvider};
pub use listener::{EXECUTION_LISTENER_GROUP, ListenerEvent, ListenerProvider, ListenerType};
pub use timer::{TIMER_GROUP, TimerDefinitionType, TimerProvider};

use crate::entry::Group;

/// Settings and services shared by all providers while building entries.
#[derive(Debug, Clone)]
pub struct ProviderContext {
    pub translator: Translator,
    /// Forwarded to text entries as their debounce hint.
    pub debounce_input: bool,
}

impl ProviderContext {
    pub fn from_config(config: &PanelConfig) -> Self {
        Self {
            translator: Translator::from_config(config),
            debounce_input: config.debounce_input,
        }
    }

    pub fn translate(&self, label: &str) -> String {
        self.translator.translate(label)
    }
}

impl Default for ProviderContext {
    fn default() -> Self {
        Self::from_config(&PanelConfig::default())
    }
}

/// Contributes groups of entries for a selected element.
pub trait PropertiesProvider: Debug {
    /// Stable identifier, used in logs.
    fn id(&self) -> &'static str;

    /// Groups for the element registered as `element_id` with the given
    /// business object. Unsupported elements yield an empty list.
    fn groups(&self, context: &ProviderContext, document: &Document, element_id: &str, business_object: NodeId) -> Vec<Group>;
}
