//! Undo/redo stack for document commands.
//!
//! ```text
//! execute(cmd) ──► apply ──► undo_stack.push ──► redo_stack.clear ──► notify(Executed)
//! undo()       ──► undo_stack.pop ──► restore ──► redo_stack.push ──► notify(Undone)
//! redo()       ──► redo_stack.pop ──► replay  ──► undo_stack.push ──► notify(Redone)
//! ```

use std::collections::VecDeque;
use std::fmt;

use propanel_model::{Document, ModelError};
use tracing::debug;

use super::{Command, PropertyChange, apply, replay, restore};

/// What happened to the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandEventKind {
    Executed,
    Undone,
    Redone,
}

/// Notification sent to subscribers after every committed change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandEvent {
    pub kind: CommandEventKind,
    /// Handler name of the command, e.g. `properties-panel.update-businessobject`.
    pub command: &'static str,
    /// Diagram elements whose properties changed.
    pub elements: Vec<String>,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CommandEvent)>;

struct StackEntry {
    command: Command,
    changes: Vec<PropertyChange>,
}

/// Bounded undo/redo history with change listeners.
pub struct CommandStack {
    undo_stack: VecDeque<StackEntry>,
    redo_stack: Vec<StackEntry>,
    limit: usize,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for CommandStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandStack")
            .field("undo_len", &self.undo_stack.len())
            .field("redo_len", &self.redo_stack.len())
            .field("limit", &self.limit)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CommandStack {
    /// Create a stack retaining at most `limit` undo steps.
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Apply `command` to `document` as one undoable step.
    pub fn execute(&mut self, document: &mut Document, command: Command) -> Result<(), ModelError> {
        let changes = apply(document, &command)?;
        debug!(command = command.name(), changes = changes.len(), "command executed");

        let event = CommandEvent {
            kind: CommandEventKind::Executed,
            command: command.name(),
            elements: command.elements(),
        };
        self.push_undo(StackEntry { command, changes });
        if !self.redo_stack.is_empty() {
            debug!(cleared = self.redo_stack.len(), "redo stack cleared");
        }
        self.redo_stack.clear();
        self.notify(&event);
        Ok(())
    }

    /// Revert the most recent step. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, document: &mut Document) -> bool {
        let Some(entry) = self.undo_stack.pop_back() else {
            debug!("nothing to undo");
            return false;
        };
        restore(document, &entry.changes);
        debug!(command = entry.command.name(), "command undone");
        let event = CommandEvent {
            kind: CommandEventKind::Undone,
            command: entry.command.name(),
            elements: entry.command.elements(),
        };
        self.redo_stack.push(entry);
        self.notify(&event);
        true
    }

    /// Re-apply the most recently undone step. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self, document: &mut Document) -> Result<bool, ModelError> {
        let Some(entry) = self.redo_stack.pop() else {
            debug!("nothing to redo");
            return Ok(false);
        };
        if let Err(error) = replay(document, &entry.changes) {
            restore(document, &entry.changes);
            self.redo_stack.push(entry);
            return Err(error);
        }
        debug!(command = entry.command.name(), "command redone");
        let event = CommandEvent {
            kind: CommandEventKind::Redone,
            command: entry.command.name(),
            elements: entry.command.elements(),
        };
        self.push_undo(entry);
        self.notify(&event);
        Ok(true)
    }

    /// Register a listener called after every execute, undo and redo.
    pub fn subscribe(&mut self, listener: impl FnMut(&CommandEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn push_undo(&mut self, entry: StackEntry) {
        if self.limit == 0 {
            return;
        }
        self.undo_stack.push_back(entry);
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
    }

    fn notify(&mut self, event: &CommandEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl Default for CommandStack {
    fn default() -> Self {
        Self::new(propanel_util::config::DEFAULT_UNDO_LIMIT)
    }
}
