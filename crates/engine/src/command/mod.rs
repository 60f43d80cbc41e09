//! Undo-aware document commands.
//!
//! Modules:
//! - `stack`: undo/redo stack and change notifications
//! - `modeler`: document + stack bundle and the [`CommandExecutor`] seam
//!
//! A [`Command`] describes the complete target state of the properties it
//! touches. Applying it records one [`PropertyChange`] per written property so
//! the stack can restore either side later. Application is all-or-nothing:
//! when any part fails, the parts already written are rolled back before the
//! error is returned.

mod modeler;
mod stack;

use indexmap::IndexMap;
use propanel_model::{Document, ModelError};
use propanel_types::{NodeId, PropertyValue};
use tracing::{trace, warn};

pub use modeler::{CommandExecutor, Modeler};
pub use stack::{CommandEvent, CommandEventKind, CommandStack, SubscriptionId};

/// Property name to target value; `None` removes the property.
pub type PropertyUpdates = IndexMap<String, Option<PropertyValue>>;

pub const UPDATE_BUSINESS_OBJECT: &str = "properties-panel.update-businessobject";
pub const UPDATE_BUSINESS_OBJECT_LIST: &str = "properties-panel.update-businessobject-list";
pub const MULTI_COMMAND_EXECUTOR: &str = "properties-panel.multi-command-executor";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replace several properties of one node in a single step.
    UpdateBusinessObject {
        element: String,
        business_object: NodeId,
        properties: PropertyUpdates,
    },
    /// Add and remove nodes in a list property, creating the list if absent.
    UpdateBusinessObjectList {
        element: String,
        current_object: NodeId,
        property_name: String,
        objects_to_add: Vec<NodeId>,
        objects_to_remove: Vec<NodeId>,
    },
    /// Several commands executed and undone as one step.
    MultiCommand(Vec<Command>),
}

impl Command {
    /// Shorthand for [`Command::UpdateBusinessObject`].
    pub fn update<I, K>(element: impl Into<String>, business_object: NodeId, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<PropertyValue>)>,
        K: Into<String>,
    {
        Self::UpdateBusinessObject {
            element: element.into(),
            business_object,
            properties: properties.into_iter().map(|(name, value)| (name.into(), value)).collect(),
        }
    }

    /// Shorthand for a list update that only adds.
    pub fn add_to_list(element: impl Into<String>, current_object: NodeId, property_name: impl Into<String>, objects: Vec<NodeId>) -> Self {
        Self::UpdateBusinessObjectList {
            element: element.into(),
            current_object,
            property_name: property_name.into(),
            objects_to_add: objects,
            objects_to_remove: Vec::new(),
        }
    }

    /// Shorthand for a list update that only removes.
    pub fn remove_from_list(element: impl Into<String>, current_object: NodeId, property_name: impl Into<String>, objects: Vec<NodeId>) -> Self {
        Self::UpdateBusinessObjectList {
            element: element.into(),
            current_object,
            property_name: property_name.into(),
            objects_to_add: Vec::new(),
            objects_to_remove: objects,
        }
    }

    /// Registered handler name of the command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpdateBusinessObject { .. } => UPDATE_BUSINESS_OBJECT,
            Self::UpdateBusinessObjectList { .. } => UPDATE_BUSINESS_OBJECT_LIST,
            Self::MultiCommand(_) => MULTI_COMMAND_EXECUTOR,
        }
    }

    /// Ids of the diagram elements affected, deduplicated in first-seen order.
    pub fn elements(&self) -> Vec<String> {
        let mut elements = Vec::new();
        self.collect_elements(&mut elements);
        elements
    }

    fn collect_elements(&self, elements: &mut Vec<String>) {
        match self {
            Self::UpdateBusinessObject { element, .. } | Self::UpdateBusinessObjectList { element, .. } => {
                if !elements.contains(element) {
                    elements.push(element.clone());
                }
            }
            Self::MultiCommand(commands) => commands.iter().for_each(|command| command.collect_elements(elements)),
        }
    }
}

/// Single property write with both sides recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyChange {
    pub node: NodeId,
    pub property: String,
    pub old: Option<PropertyValue>,
    pub new: Option<PropertyValue>,
}

/// Apply `command`, returning the recorded changes in application order.
pub(crate) fn apply(document: &mut Document, command: &Command) -> Result<Vec<PropertyChange>, ModelError> {
    let mut changes = Vec::new();
    if let Err(error) = apply_into(document, command, &mut changes) {
        restore(document, &changes);
        return Err(error);
    }
    Ok(changes)
}

/// Put back the `old` side of `changes`, newest first.
pub(crate) fn restore(document: &mut Document, changes: &[PropertyChange]) {
    for change in changes.iter().rev() {
        if let Err(error) = document.set_property(change.node, &change.property, change.old.clone()) {
            warn!(node = %change.node, property = %change.property, error = %error, "failed to restore property");
        }
    }
}

/// Re-apply the `new` side of `changes`, oldest first.
pub(crate) fn replay(document: &mut Document, changes: &[PropertyChange]) -> Result<(), ModelError> {
    for change in changes {
        document.set_property(change.node, &change.property, change.new.clone())?;
    }
    Ok(())
}

fn apply_into(document: &mut Document, command: &Command, changes: &mut Vec<PropertyChange>) -> Result<(), ModelError> {
    match command {
        Command::UpdateBusinessObject {
            business_object,
            properties,
            ..
        } => {
            document.node_checked(*business_object)?;
            for (property, value) in properties {
                write(document, *business_object, property, value.clone(), changes)?;
            }
        }
        Command::UpdateBusinessObjectList {
            current_object,
            property_name,
            objects_to_add,
            objects_to_remove,
            ..
        } => {
            document.node_checked(*current_object)?;
            let mut objects = match document.get(*current_object, property_name) {
                None => Vec::new(),
                Some(PropertyValue::List(objects)) => objects.clone(),
                Some(other) => {
                    return Err(ModelError::NotAList {
                        node: *current_object,
                        property: property_name.clone(),
                        found: other.kind_name(),
                    });
                }
            };
            objects.retain(|object| !objects_to_remove.contains(object));
            for object in objects_to_add {
                if !objects.contains(object) {
                    objects.push(*object);
                }
            }
            write(document, *current_object, property_name, Some(PropertyValue::List(objects)), changes)?;
        }
        Command::MultiCommand(commands) => {
            for command in commands {
                apply_into(document, command, changes)?;
            }
        }
    }
    Ok(())
}

fn write(document: &mut Document, node: NodeId, property: &str, value: Option<PropertyValue>, changes: &mut Vec<PropertyChange>) -> Result<(), ModelError> {
    let old = document.set_property(node, property, value.clone())?;
    trace!(node = %node, property, "property changed");
    changes.push(PropertyChange {
        node,
        property: property.to_string(),
        old,
        new: value,
    });
    Ok(())
}
