//! Entry descriptors produced by providers.
//!
//! An entry pairs presentation metadata (id, label, options, description) with
//! a [`FieldBinding`]: a getter over the document and a setter that issues
//! commands. Bindings capture node handles and owned strings only, so entries
//! never borrow the document they were built from.

use std::fmt;

use propanel_model::Document;
use propanel_types::{NodeId, PropertyValue};
use serde::Serialize;

use crate::{Command, CommandExecutor, PanelError};

type Getter = Box<dyn Fn(&Document) -> Option<String>>;
type Setter = Box<dyn Fn(&mut dyn CommandExecutor, &str) -> Result<(), PanelError>>;

/// Read/write binding of a scalar entry.
pub struct FieldBinding {
    get: Getter,
    set: Setter,
}

impl FieldBinding {
    pub fn new(
        get: impl Fn(&Document) -> Option<String> + 'static,
        set: impl Fn(&mut dyn CommandExecutor, &str) -> Result<(), PanelError> + 'static,
    ) -> Self {
        Self {
            get: Box::new(get),
            set: Box::new(set),
        }
    }

    /// Binding for a plain text property; an empty value removes the property.
    pub fn text_property(element: &str, node: NodeId, property: &'static str) -> Self {
        let element = element.to_string();
        Self::new(
            move |document| document.get_text(node, property).map(str::to_string),
            move |executor, value| {
                let value = (!value.is_empty()).then(|| PropertyValue::text(value));
                executor.execute(Command::update(element.clone(), node, [(property, value)]))
            },
        )
    }

    pub fn value(&self, document: &Document) -> Option<String> {
        (self.get)(document)
    }

    pub fn set(&self, executor: &mut dyn CommandExecutor, value: &str) -> Result<(), PanelError> {
        (self.set)(executor, value)
    }
}

impl fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldBinding { .. }")
    }
}

/// Add/remove callback of a list.
pub struct Action(Box<dyn Fn(&mut dyn CommandExecutor) -> Result<(), PanelError>>);

impl Action {
    pub fn new(action: impl Fn(&mut dyn CommandExecutor) -> Result<(), PanelError> + 'static) -> Self {
        Self(Box::new(action))
    }

    pub fn run(&self, executor: &mut dyn CommandExecutor) -> Result<(), PanelError> {
        (self.0)(executor)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Stored value; the empty string stands for "none".
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug)]
pub struct SelectEntry {
    pub options: Vec<SelectOption>,
    pub binding: FieldBinding,
}

#[derive(Debug)]
pub struct TextFieldEntry {
    /// Guidance shown under the field.
    pub description: Option<String>,
    /// Whether the host should debounce keystrokes before calling the setter.
    pub debounce: bool,
    pub binding: FieldBinding,
}

#[derive(Debug, Default)]
pub struct ListEntry {
    pub items: Vec<ListItem>,
    pub add: Option<Action>,
}

/// One collapsible item of a list.
#[derive(Debug)]
pub struct ListItem {
    pub id: String,
    pub label: String,
    pub entries: Vec<Entry>,
    /// Entry to focus when the item is freshly added.
    pub auto_focus_entry: Option<String>,
    pub remove: Option<Action>,
}

#[derive(Debug)]
pub enum EntryKind {
    Select(SelectEntry),
    TextField(TextFieldEntry),
    List(ListEntry),
}

#[derive(Debug)]
pub struct Entry {
    pub id: String,
    pub label: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn select(id: impl Into<String>, label: impl Into<String>, options: Vec<SelectOption>, binding: FieldBinding) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: EntryKind::Select(SelectEntry { options, binding }),
        }
    }

    pub fn text_field(id: impl Into<String>, label: impl Into<String>, description: Option<String>, debounce: bool, binding: FieldBinding) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: EntryKind::TextField(TextFieldEntry {
                description,
                debounce,
                binding,
            }),
        }
    }

    pub fn list(id: impl Into<String>, label: impl Into<String>, list: ListEntry) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: EntryKind::List(list),
        }
    }

    pub fn binding(&self) -> Option<&FieldBinding> {
        match &self.kind {
            EntryKind::Select(select) => Some(&select.binding),
            EntryKind::TextField(text_field) => Some(&text_field.binding),
            EntryKind::List(_) => None,
        }
    }

    pub fn value(&self, document: &Document) -> Option<String> {
        self.binding().and_then(|binding| binding.value(document))
    }

    /// Whether the entry holds a non-empty value (drives the "edited" marker).
    pub fn is_edited(&self, document: &Document) -> bool {
        match &self.kind {
            EntryKind::List(list) => !list.items.is_empty(),
            _ => self.value(document).is_some_and(|value| !value.is_empty()),
        }
    }

    fn find_entry(&self, id: &str) -> Option<&Entry> {
        if self.id == id {
            return Some(self);
        }
        match &self.kind {
            EntryKind::List(list) => list.find_entry(id),
            _ => None,
        }
    }

    fn find_list(&self, id: &str) -> Option<&ListEntry> {
        match &self.kind {
            EntryKind::List(list) if self.id == id => Some(list),
            EntryKind::List(list) => list.find_list(id),
            _ => None,
        }
    }

    fn find_item(&self, id: &str) -> Option<&ListItem> {
        match &self.kind {
            EntryKind::List(list) => list.find_item(id),
            _ => None,
        }
    }
}

impl ListEntry {
    fn find_entry(&self, id: &str) -> Option<&Entry> {
        self.items.iter().flat_map(|item| &item.entries).find_map(|entry| entry.find_entry(id))
    }

    fn find_list(&self, id: &str) -> Option<&ListEntry> {
        self.items.iter().flat_map(|item| &item.entries).find_map(|entry| entry.find_list(id))
    }

    fn find_item(&self, id: &str) -> Option<&ListItem> {
        self.items.iter().find(|item| item.id == id).or_else(|| {
            self.items
                .iter()
                .flat_map(|item| &item.entries)
                .find_map(|entry| entry.find_item(id))
        })
    }
}

#[derive(Debug)]
pub enum GroupBody {
    Entries(Vec<Entry>),
    List(ListEntry),
}

/// Titled section of the panel contributed by a provider.
#[derive(Debug)]
pub struct Group {
    pub id: String,
    pub label: String,
    pub body: GroupBody,
}

impl Group {
    pub fn entries(id: impl Into<String>, label: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            body: GroupBody::Entries(entries),
        }
    }

    pub fn list(id: impl Into<String>, label: impl Into<String>, list: ListEntry) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            body: GroupBody::List(list),
        }
    }

    /// Entry with the given id anywhere in the group, including list items.
    pub fn find_entry(&self, id: &str) -> Option<&Entry> {
        match &self.body {
            GroupBody::Entries(entries) => entries.iter().find_map(|entry| entry.find_entry(id)),
            GroupBody::List(list) => list.find_entry(id),
        }
    }

    /// List addressed either by the group id (list groups) or by a list entry id.
    pub fn find_list(&self, id: &str) -> Option<&ListEntry> {
        match &self.body {
            GroupBody::List(list) if self.id == id => Some(list),
            GroupBody::List(list) => list.find_list(id),
            GroupBody::Entries(entries) => entries.iter().find_map(|entry| entry.find_list(id)),
        }
    }

    pub fn find_item(&self, id: &str) -> Option<&ListItem> {
        match &self.body {
            GroupBody::List(list) => list.find_item(id),
            GroupBody::Entries(entries) => entries.iter().find_map(|entry| entry.find_item(id)),
        }
    }

    /// Evaluate every binding against `document` into a serializable view.
    pub fn view(&self, document: &Document) -> GroupView {
        let (entries, items) = match &self.body {
            GroupBody::Entries(entries) => (entries.iter().map(|entry| entry.view(document)).collect(), Vec::new()),
            GroupBody::List(list) => (Vec::new(), list.view(document)),
        };
        GroupView {
            id: self.id.clone(),
            label: self.label.clone(),
            entries,
            items,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<EntryView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemView>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub id: String,
    pub label: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemView>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: String,
    pub label: String,
    pub entries: Vec<EntryView>,
}

impl Entry {
    pub fn view(&self, document: &Document) -> EntryView {
        let mut view = EntryView {
            id: self.id.clone(),
            label: self.label.clone(),
            kind: "",
            value: self.value(document),
            options: Vec::new(),
            description: None,
            items: Vec::new(),
        };
        match &self.kind {
            EntryKind::Select(select) => {
                view.kind = "select";
                view.options = select.options.clone();
            }
            EntryKind::TextField(text_field) => {
                view.kind = "textField";
                view.description = text_field.description.clone();
            }
            EntryKind::List(list) => {
                view.kind = "list";
                view.items = list.view(document);
            }
        }
        view
    }
}

impl ListEntry {
    fn view(&self, document: &Document) -> Vec<ItemView> {
        self.items
            .iter()
            .map(|item| ItemView {
                id: item.id.clone(),
                label: item.label.clone(),
                entries: item.entries.iter().map(|entry| entry.view(document)).collect(),
            })
            .collect()
    }
}
