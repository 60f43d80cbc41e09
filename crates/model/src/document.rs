//! Arena-backed document tree.
//!
//! Every business object, definition and extension record is a [`Node`] with a
//! qualified type name and an ordered set of named properties. Nodes are never
//! removed from the arena; a node replaced through a property write simply
//! becomes unreferenced and can be linked back in by undo.

use indexmap::IndexMap;
use propanel_types::{ElementKind, NodeId, PropertyValue};
use tracing::trace;

use crate::ModelError;

/// Single node of the document tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    type_name: String,
    properties: IndexMap<String, PropertyValue>,
    parent: Option<NodeId>,
}

impl Node {
    /// Qualified type name, e.g. `bpmn:TimerEventDefinition`.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn kind(&self) -> ElementKind {
        ElementKind::from_type_name(&self.type_name)
    }

    /// Node this one was created under, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn get(&self, property: &str) -> Option<&PropertyValue> {
        self.properties.get(property)
    }

    /// Properties in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// In-memory document: node arena plus the registry of top-level elements.
#[derive(Clone, Debug, Default)]
pub struct Document {
    nodes: Vec<Node>,
    elements: IndexMap<String, NodeId>,
    generated_ids: u32,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever created, referenced or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    /// Create a detached node. The caller links it into the tree through a
    /// property write; `parent` records where it is meant to live.
    ///
    /// # Panics
    /// Panics once the arena already holds `u32::MAX + 1` nodes, the limit of
    /// [`NodeId`].
    pub fn create_node<I, K>(&mut self, type_name: impl Into<String>, properties: I, parent: Option<NodeId>) -> NodeId
    where
        I: IntoIterator<Item = (K, PropertyValue)>,
        K: Into<String>,
    {
        let id = node_id_at(self.nodes.len());
        let node = Node {
            type_name: type_name.into(),
            properties: properties.into_iter().map(|(name, value)| (name.into(), value)).collect(),
            parent,
        };
        trace!(node = %id, type_name = %node.type_name, "node created");
        self.nodes.push(node);
        id
    }

    /// Register a node as a top-level element under its `id` property.
    pub fn register_element(&mut self, node: NodeId) -> Result<String, ModelError> {
        let business_object = self.node_checked(node)?;
        let element_id = business_object
            .get("id")
            .and_then(PropertyValue::as_text)
            .map(str::to_string)
            .ok_or_else(|| ModelError::MissingElementId(business_object.type_name.clone()))?;
        if self.elements.contains_key(&element_id) {
            return Err(ModelError::DuplicateElement(element_id));
        }
        self.elements.insert(element_id.clone(), node);
        Ok(element_id)
    }

    /// Business object of the element registered under `element_id`.
    pub fn element(&self, element_id: &str) -> Option<NodeId> {
        self.elements.get(element_id).copied()
    }

    pub fn element_checked(&self, element_id: &str) -> Result<NodeId, ModelError> {
        self.element(element_id).ok_or_else(|| ModelError::UnknownElement(element_id.to_string()))
    }

    /// Registered element identifiers in document order.
    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.index())
    }

    pub fn node_checked(&self, node: NodeId) -> Result<&Node, ModelError> {
        self.node(node).ok_or(ModelError::UnknownNode(node))
    }

    pub fn get(&self, node: NodeId, property: &str) -> Option<&PropertyValue> {
        self.node(node).and_then(|node| node.get(property))
    }

    pub fn get_text(&self, node: NodeId, property: &str) -> Option<&str> {
        self.get(node, property).and_then(PropertyValue::as_text)
    }

    pub fn get_ref(&self, node: NodeId, property: &str) -> Option<NodeId> {
        self.get(node, property).and_then(PropertyValue::as_ref_node)
    }

    /// Nodes of a list property; absent or non-list properties read as empty.
    pub fn get_list(&self, node: NodeId, property: &str) -> &[NodeId] {
        self.get(node, property).and_then(PropertyValue::as_list).unwrap_or(&[])
    }

    pub fn is_type(&self, node: NodeId, type_name: &str) -> bool {
        self.node(node).is_some_and(|node| node.type_name == type_name)
    }

    pub fn kind_of(&self, node: NodeId) -> ElementKind {
        self.node(node).map(Node::kind).unwrap_or(ElementKind::Other)
    }

    /// Write a single property, returning the previous value.
    ///
    /// `None` removes the property. Referenced nodes must exist; on error the
    /// document is left untouched.
    pub fn set_property(&mut self, node: NodeId, property: &str, value: Option<PropertyValue>) -> Result<Option<PropertyValue>, ModelError> {
        if let Some(value) = &value {
            self.check_references(value)?;
        }
        let target = self.nodes.get_mut(node.index()).ok_or(ModelError::UnknownNode(node))?;
        let previous = match value {
            Some(value) => target.properties.insert(property.to_string(), value),
            None => target.properties.shift_remove(property),
        };
        trace!(node = %node, property, "property written");
        Ok(previous)
    }

    /// Generate a fresh identifier such as `Output_3`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.generated_ids += 1;
        format!("{prefix}{}", self.generated_ids)
    }

    fn check_references(&self, value: &PropertyValue) -> Result<(), ModelError> {
        match value {
            PropertyValue::Ref(child) if !self.contains(*child) => Err(ModelError::UnknownNode(*child)),
            PropertyValue::List(children) => match children.iter().find(|child| !self.contains(**child)) {
                Some(missing) => Err(ModelError::UnknownNode(*missing)),
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }
}

/// Handle of the node stored at arena index `index`.
fn node_id_at(index: usize) -> NodeId {
    match u32::try_from(index) {
        Ok(index) => NodeId::new(index),
        Err(_) => panic!("document arena exceeds {} nodes", u64::from(u32::MAX) + 1),
    }
}
