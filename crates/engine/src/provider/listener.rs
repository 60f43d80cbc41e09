//! Execution listeners stored in extension elements.
//!
//! Each listener carries an event, exactly one implementation (`class`,
//! `expression`, `delegateExpression` or a nested `script`) and an optional
//! list of injected fields. Participants expose the listeners of the process
//! they reference.

use propanel_model::Document;
use propanel_types::{ElementKind, NodeId, PropertyValue};
use tracing::debug;

use super::lookup::{EXECUTION_LISTENER, EXTENSION_ELEMENTS, FIELD, are_listeners_supported, execution_listeners, extension_elements, listener_container};
use super::{PropertiesProvider, ProviderContext};
use crate::entry::{Action, Entry, FieldBinding, Group, ListEntry, ListItem, SelectOption};
use crate::variant::{SlotKind, Variant, VariantFieldEditor};
use crate::{Command, CommandExecutor, PanelError};

pub const EXECUTION_LISTENER_GROUP: &str = "CamundaPlatform__ExecutionListener";

const SCRIPT: &str = "camunda:Script";

/// Lifecycle event a listener fires on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerEvent {
    Start,
    End,
    Take,
}

impl ListenerEvent {
    pub fn value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Take => "take",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::End => "End",
            Self::Take => "Take",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        [Self::Start, Self::End, Self::Take].into_iter().find(|event| event.value() == value)
    }

    /// Events available on elements of `kind`: sequence flows are only taken.
    pub fn available_for(kind: ElementKind) -> &'static [Self] {
        match kind {
            ElementKind::SequenceFlow => &[Self::Take],
            _ => &[Self::Start, Self::End],
        }
    }

    /// Event given to freshly added listeners.
    pub fn default_for(kind: ElementKind) -> Self {
        Self::available_for(kind)[0]
    }
}

/// How a listener is implemented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerType {
    Class,
    Expression,
    DelegateExpression,
    Script,
}

impl Variant for ListenerType {
    const ALL: &'static [Self] = &[Self::Class, Self::Expression, Self::DelegateExpression, Self::Script];

    fn slot(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Expression => "expression",
            Self::DelegateExpression => "delegateExpression",
            Self::Script => "script",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Class => "Java class",
            Self::Expression => "Expression",
            Self::DelegateExpression => "Delegate expression",
            Self::Script => "Script",
        }
    }

    fn slot_kind(self) -> SlotKind {
        match self {
            Self::Script => SlotKind::Node {
                type_name: SCRIPT,
                payload: "value",
            },
            _ => SlotKind::Attribute,
        }
    }
}

impl ListenerType {
    /// Suffix of the entry editing this type's value.
    fn entry_suffix(self) -> &'static str {
        match self {
            Self::Class => "javaClass",
            Self::Expression => "expression",
            Self::DelegateExpression => "delegateExpression",
            Self::Script => "scriptValue",
        }
    }
}

#[derive(Debug, Default)]
pub struct ListenerProvider;

impl PropertiesProvider for ListenerProvider {
    fn id(&self) -> &'static str {
        EXECUTION_LISTENER_GROUP
    }

    fn groups(&self, context: &ProviderContext, document: &Document, element_id: &str, business_object: NodeId) -> Vec<Group> {
        if !are_listeners_supported(document, business_object) {
            return Vec::new();
        }
        let Some(container) = listener_container(document, business_object) else {
            return Vec::new();
        };
        let kind = document.kind_of(business_object);

        let items = execution_listeners(document, container)
            .into_iter()
            .enumerate()
            .map(|(index, listener)| listener_item(context, document, element_id, kind, container, index, listener))
            .collect();

        let list = ListEntry {
            items,
            add: Some(add_listener(element_id, container, ListenerEvent::default_for(kind))),
        };
        vec![Group::list(EXECUTION_LISTENER_GROUP, context.translate("Execution listeners"), list)]
    }
}

fn listener_item(
    context: &ProviderContext,
    document: &Document,
    element_id: &str,
    kind: ElementKind,
    container: NodeId,
    index: usize,
    listener: NodeId,
) -> ListItem {
    let id = format!("{element_id}-listener-{index}");
    let editor = VariantFieldEditor::<ListenerType>::new(element_id, listener);
    let active = editor.active_variant(document);

    let mut entries = vec![
        event_type_entry(context, element_id, &id, kind, listener),
        editor.select_entry(format!("{id}-listenerType"), "Listener type", false, context),
    ];
    if let Some(listener_type) = active {
        if listener_type == ListenerType::Script
            && let Some(script) = document.get_ref(listener, ListenerType::Script.slot())
        {
            entries.push(Entry::text_field(
                format!("{id}-scriptFormat"),
                context.translate("Format"),
                None,
                context.debounce_input,
                FieldBinding::text_property(element_id, script, "scriptFormat"),
            ));
        }
        entries.push(editor.value_entry(format!("{id}-{}", listener_type.entry_suffix()), listener_type.label(), document, context));
    }
    entries.push(fields_entry(context, document, element_id, &id, listener));

    ListItem {
        label: listener_label(context, document, listener, active),
        entries,
        auto_focus_entry: Some(format!("{id}-eventType")),
        remove: Some(remove_listener(element_id, container, listener)),
        id,
    }
}

/// `"<Event>: <Type>"`, e.g. `Start: Java class`.
fn listener_label(context: &ProviderContext, document: &Document, listener: NodeId, active: Option<ListenerType>) -> String {
    let event = document.get_text(listener, "event").unwrap_or_default();
    let event = ListenerEvent::from_value(event).map_or_else(|| event.to_string(), |event| context.translate(event.label()));
    let listener_type = active.map(|listener_type| context.translate(listener_type.label())).unwrap_or_default();
    format!("{event}: {listener_type}")
}

fn event_type_entry(context: &ProviderContext, element_id: &str, id: &str, kind: ElementKind, listener: NodeId) -> Entry {
    let available = ListenerEvent::available_for(kind);
    let options = available
        .iter()
        .map(|event| SelectOption::new(event.value(), context.translate(event.label())))
        .collect();

    let entry_id = format!("{id}-eventType");
    let element = element_id.to_string();
    let setter_entry = entry_id.clone();
    let binding = FieldBinding::new(
        move |document| document.get_text(listener, "event").map(str::to_string),
        move |executor, value| {
            let event = ListenerEvent::from_value(value)
                .filter(|event| available.contains(event))
                .ok_or_else(|| PanelError::InvalidOption {
                    entry: setter_entry.clone(),
                    value: value.to_string(),
                })?;
            executor.execute(Command::update(element.clone(), listener, [("event", Some(PropertyValue::text(event.value())))]))
        },
    );
    Entry::select(entry_id, context.translate("Event type"), options, binding)
}

fn fields_entry(context: &ProviderContext, document: &Document, element_id: &str, id: &str, listener: NodeId) -> Entry {
    let items = document
        .get_list(listener, "fields")
        .iter()
        .copied()
        .enumerate()
        .map(|(index, field)| {
            let field_id = format!("{id}-field-{index}");
            ListItem {
                label: document.get_text(field, "name").unwrap_or_default().to_string(),
                entries: vec![
                    Entry::text_field(
                        format!("{field_id}-name"),
                        context.translate("Name"),
                        None,
                        context.debounce_input,
                        FieldBinding::text_property(element_id, field, "name"),
                    ),
                    Entry::text_field(
                        format!("{field_id}-value"),
                        context.translate("Value"),
                        None,
                        context.debounce_input,
                        FieldBinding::text_property(element_id, field, "stringValue"),
                    ),
                ],
                auto_focus_entry: Some(format!("{field_id}-name")),
                remove: Some(remove_field(element_id, listener, field)),
                id: field_id,
            }
        })
        .collect();

    let list = ListEntry {
        items,
        add: Some(add_field(element_id, listener)),
    };
    Entry::list(format!("{id}-fields"), context.translate("Field injection"), list)
}

fn add_field(element_id: &str, listener: NodeId) -> Action {
    let element_id = element_id.to_string();
    Action::new(move |executor| {
        let field = executor.create_node(FIELD, Vec::new(), Some(listener));
        executor.execute(Command::add_to_list(element_id.clone(), listener, "fields", vec![field]))
    })
}

fn remove_field(element_id: &str, listener: NodeId, field: NodeId) -> Action {
    let element_id = element_id.to_string();
    Action::new(move |executor| executor.execute(Command::remove_from_list(element_id.clone(), listener, "fields", vec![field])))
}

/// Appends a `start` (or `take`) Java class listener, creating the extension
/// elements of `container` first when it has none.
fn add_listener(element_id: &str, container: NodeId, event: ListenerEvent) -> Action {
    let element_id = element_id.to_string();
    Action::new(move |executor| {
        let mut commands = Vec::new();

        let extension_elements = match extension_elements(executor.document(), container) {
            Some(extension_elements) => extension_elements,
            None => {
                let extension_elements = create_extension_elements(executor, container);
                commands.push(Command::update(
                    element_id.clone(),
                    container,
                    [("extensionElements", Some(PropertyValue::Ref(extension_elements)))],
                ));
                extension_elements
            }
        };

        let listener = executor.create_node(
            EXECUTION_LISTENER,
            vec![
                ("event".to_string(), PropertyValue::text(event.value())),
                ("class".to_string(), PropertyValue::text("")),
            ],
            Some(extension_elements),
        );
        commands.push(Command::add_to_list(element_id.clone(), extension_elements, "values", vec![listener]));
        executor.execute(Command::MultiCommand(commands))
    })
}

fn create_extension_elements(executor: &mut dyn CommandExecutor, container: NodeId) -> NodeId {
    executor.create_node(EXTENSION_ELEMENTS, vec![("values".to_string(), PropertyValue::List(Vec::new()))], Some(container))
}

fn remove_listener(element_id: &str, container: NodeId, listener: NodeId) -> Action {
    let element_id = element_id.to_string();
    Action::new(move |executor| {
        let Some(extension_elements) = extension_elements(executor.document(), container) else {
            debug!(container = %container, "no extension elements; nothing to remove");
            return Ok(());
        };
        executor.execute(Command::remove_from_list(element_id.clone(), extension_elements, "values", vec![listener]))
    })
}
