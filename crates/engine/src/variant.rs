//! Editor for mutually exclusive variant slots.
//!
//! A container node offers a fixed set of named slots of which at most one is
//! populated. [`VariantFieldEditor`] reports which slot is active, switches
//! between slots with a single command that rewrites every slot at once, and
//! reads or writes the scalar payload of the active slot.
//!
//! Nothing is cached: every read is recomputed from the document, so undo and
//! other external edits are reflected immediately.

use std::fmt;
use std::marker::PhantomData;

use propanel_model::Document;
use propanel_types::{NodeId, PropertyValue};
use tracing::{debug, warn};

use crate::entry::{Entry, FieldBinding, SelectOption};
use crate::provider::ProviderContext;
use crate::{Command, CommandExecutor, PanelError, PropertyUpdates};

/// Where the payload of a slot is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    /// The slot references a child node of `type_name` whose `payload`
    /// property holds the value.
    Node { type_name: &'static str, payload: &'static str },
    /// The slot property holds the value directly.
    Attribute,
}

/// Closed set of alternatives stored in exclusive slots of one container.
pub trait Variant: Copy + Eq + fmt::Debug + 'static {
    /// Every alternative, in menu order.
    const ALL: &'static [Self];

    /// Property name of the slot on the container.
    fn slot(self) -> &'static str;

    /// Menu label before translation.
    fn label(self) -> &'static str;

    fn slot_kind(self) -> SlotKind;

    /// Help text shown with the value field.
    fn description(self) -> Option<&'static str> {
        None
    }

    fn from_slot(slot: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|variant| variant.slot() == slot)
    }
}

/// Label of the synthetic "no variant" option.
pub const NONE_LABEL: &str = "<none>";

/// Reads and edits the variant slots of one container node.
pub struct VariantFieldEditor<V> {
    element: String,
    container: NodeId,
    _variant: PhantomData<V>,
}

impl<V> Clone for VariantFieldEditor<V> {
    fn clone(&self) -> Self {
        Self {
            element: self.element.clone(),
            container: self.container,
            _variant: PhantomData,
        }
    }
}

impl<V> fmt::Debug for VariantFieldEditor<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantFieldEditor")
            .field("element", &self.element)
            .field("container", &self.container)
            .finish()
    }
}

impl<V: Variant> VariantFieldEditor<V> {
    /// `element` is the diagram element commands are attributed to.
    pub fn new(element: impl Into<String>, container: NodeId) -> Self {
        Self {
            element: element.into(),
            container,
            _variant: PhantomData,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The populated slot, or `None` when every slot is empty.
    pub fn active_variant(&self, document: &Document) -> Option<V> {
        let mut populated = V::ALL
            .iter()
            .copied()
            .filter(|variant| document.get(self.container, variant.slot()).is_some());
        let active = populated.next();
        if let Some(extra) = populated.next() {
            warn!(
                container = %self.container,
                active = ?active,
                extra = ?extra,
                "several exclusive slots populated; using the first"
            );
        }
        active
    }

    /// Switch to `target`, clearing every other slot in the same command.
    ///
    /// Selecting the already active variant issues nothing. Selecting a new
    /// variant creates an empty value for it; `None` clears all slots.
    pub fn set_active_variant(&self, executor: &mut dyn CommandExecutor, target: Option<V>) -> Result<(), PanelError> {
        let current = self.active_variant(executor.document());
        if current == target {
            debug!(container = %self.container, variant = ?target, "variant unchanged; no update issued");
            return Ok(());
        }

        let mut properties: PropertyUpdates = V::ALL.iter().map(|variant| (variant.slot().to_string(), None)).collect();
        if let Some(variant) = target {
            let value = match variant.slot_kind() {
                SlotKind::Node { type_name, .. } => PropertyValue::Ref(executor.create_node(type_name, Vec::new(), Some(self.container))),
                SlotKind::Attribute => PropertyValue::text(""),
            };
            properties.insert(variant.slot().to_string(), Some(value));
        }

        debug!(container = %self.container, from = ?current, to = ?target, "switching variant");
        executor.execute(Command::UpdateBusinessObject {
            element: self.element.clone(),
            business_object: self.container,
            properties,
        })
    }

    /// Payload of the active slot.
    pub fn value(&self, document: &Document) -> Option<String> {
        let variant = self.active_variant(document)?;
        let text = match variant.slot_kind() {
            SlotKind::Node { payload, .. } => {
                let value_node = document.get_ref(self.container, variant.slot())?;
                document.get_text(value_node, payload)
            }
            SlotKind::Attribute => document.get_text(self.container, variant.slot()),
        };
        text.map(str::to_string)
    }

    /// Write the payload of the active slot. Without an active variant this is
    /// a no-op.
    ///
    /// A node slot holding something other than a node reference is replaced
    /// by a fresh value node carrying `value`.
    pub fn set_value(&self, executor: &mut dyn CommandExecutor, value: &str) -> Result<(), PanelError> {
        let document = executor.document();
        let Some(variant) = self.active_variant(document) else {
            debug!(container = %self.container, "no active variant; value not written");
            return Ok(());
        };
        let command = match variant.slot_kind() {
            SlotKind::Node { type_name, payload } => match document.get_ref(self.container, variant.slot()) {
                Some(value_node) => Command::update(self.element.clone(), value_node, [(payload, Some(PropertyValue::text(value)))]),
                None => {
                    warn!(container = %self.container, slot = variant.slot(), "slot holds no value node; replacing it");
                    let value_node = executor.create_node(
                        type_name,
                        vec![(payload.to_string(), PropertyValue::text(value))],
                        Some(self.container),
                    );
                    Command::update(self.element.clone(), self.container, [(variant.slot(), Some(PropertyValue::Ref(value_node)))])
                }
            },
            SlotKind::Attribute => Command::update(self.element.clone(), self.container, [(variant.slot(), Some(PropertyValue::text(value)))]),
        };
        executor.execute(command)
    }

    /// Help text of the active variant.
    pub fn description(&self, document: &Document) -> Option<&'static str> {
        self.active_variant(document).and_then(V::description)
    }

    /// Select entry listing every variant, optionally preceded by `<none>`.
    pub fn select_entry(&self, id: impl Into<String>, label: &str, include_none: bool, context: &ProviderContext) -> Entry {
        let id = id.into();
        let options = variant_options::<V>(include_none, context);
        let reader = self.clone();
        let writer = self.clone();
        let entry_id = id.clone();
        let binding = FieldBinding::new(
            move |document| Some(reader.active_variant(document).map(V::slot).unwrap_or_default().to_string()),
            move |executor, value| {
                let target = parse_variant::<V>(&entry_id, value, include_none)?;
                writer.set_active_variant(executor, target)
            },
        );
        Entry::select(id, context.translate(label), options, binding)
    }

    /// Text field bound to the payload of the active variant.
    pub fn value_entry(&self, id: impl Into<String>, label: &str, document: &Document, context: &ProviderContext) -> Entry {
        let description = self.description(document).map(|text| context.translate(text));
        let reader = self.clone();
        let writer = self.clone();
        let binding = FieldBinding::new(
            move |document| reader.value(document),
            move |executor, value| writer.set_value(executor, value),
        );
        Entry::text_field(id, context.translate(label), description, context.debounce_input, binding)
    }
}

/// Menu options for `V`, with the empty value standing for "none".
pub fn variant_options<V: Variant>(include_none: bool, context: &ProviderContext) -> Vec<SelectOption> {
    let none = include_none.then(|| SelectOption::new("", context.translate(NONE_LABEL)));
    none.into_iter()
        .chain(V::ALL.iter().map(|variant| SelectOption::new(variant.slot(), context.translate(variant.label()))))
        .collect()
}

/// Parse a select value: `""` is "none" (when allowed), otherwise a slot name.
pub fn parse_variant<V: Variant>(entry: &str, value: &str, include_none: bool) -> Result<Option<V>, PanelError> {
    if value.is_empty() && include_none {
        return Ok(None);
    }
    V::from_slot(value).map(Some).ok_or_else(|| PanelError::InvalidOption {
        entry: entry.to_string(),
        value: value.to_string(),
    })
}
