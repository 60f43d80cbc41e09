use propanel_model::Document;
use propanel_types::{NodeId, PropertyValue};
use propanel_util::PanelConfig;

use super::{Command, CommandStack};
use crate::PanelError;

/// Write access the entries need from their host.
///
/// Reads go through [`CommandExecutor::document`]; every change to linked
/// nodes goes through [`CommandExecutor::execute`] so it can be undone. Node
/// creation only allocates detached nodes, which become visible once a
/// command links them in.
pub trait CommandExecutor {
    fn document(&self) -> &Document;

    /// Allocate a detached node (the factory role).
    fn create_node(&mut self, type_name: &str, properties: Vec<(String, PropertyValue)>, parent: Option<NodeId>) -> NodeId;

    /// Generate a fresh identifier with the given prefix.
    fn next_id(&mut self, prefix: &str) -> String;

    /// Commit a command as one atomic, undoable step.
    fn execute(&mut self, command: Command) -> Result<(), PanelError>;
}

/// A document together with its command stack.
#[derive(Debug, Default)]
pub struct Modeler {
    document: Document,
    command_stack: CommandStack,
}

impl Modeler {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            command_stack: CommandStack::default(),
        }
    }

    pub fn from_config(document: Document, config: &PanelConfig) -> Self {
        Self {
            document,
            command_stack: CommandStack::new(config.undo_limit),
        }
    }

    pub fn command_stack(&self) -> &CommandStack {
        &self.command_stack
    }

    pub fn command_stack_mut(&mut self) -> &mut CommandStack {
        &mut self.command_stack
    }

    pub fn undo(&mut self) -> bool {
        self.command_stack.undo(&mut self.document)
    }

    pub fn redo(&mut self) -> Result<bool, PanelError> {
        Ok(self.command_stack.redo(&mut self.document)?)
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

impl CommandExecutor for Modeler {
    fn document(&self) -> &Document {
        &self.document
    }

    fn create_node(&mut self, type_name: &str, properties: Vec<(String, PropertyValue)>, parent: Option<NodeId>) -> NodeId {
        self.document.create_node(type_name, properties, parent)
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.document.next_id(prefix)
    }

    fn execute(&mut self, command: Command) -> Result<(), PanelError> {
        Ok(self.command_stack.execute(&mut self.document, command)?)
    }
}
