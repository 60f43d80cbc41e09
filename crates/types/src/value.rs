use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable handle to a node stored in a document arena.
///
/// Handles are never reused: a node that is no longer referenced stays
/// addressable so that undo can link it back in.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Value held by a named property of a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Scalar string payload.
    Text(String),
    /// Boolean flag.
    Bool(bool),
    /// Single child node.
    Ref(NodeId),
    /// Ordered collection of child nodes.
    List(Vec<NodeId>),
}

impl PropertyValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_ref_node(&self) -> Option<NodeId> {
        match self {
            Self::Ref(node) => Some(*node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[NodeId]> {
        match self {
            Self::List(nodes) => Some(nodes),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages and logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bool(_) => "bool",
            Self::Ref(_) => "ref",
            Self::List(_) => "list",
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NodeId> for PropertyValue {
    fn from(value: NodeId) -> Self {
        Self::Ref(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_only_match_their_own_variant() {
        let text = PropertyValue::text("P1D");
        assert_eq!(text.as_text(), Some("P1D"));
        assert_eq!(text.as_ref_node(), None);
        assert_eq!(text.kind_name(), "text");

        let list = PropertyValue::List(vec![NodeId::new(1), NodeId::new(2)]);
        assert_eq!(list.as_list().map(<[NodeId]>::len), Some(2));
        assert_eq!(list.as_bool(), None);
    }

    #[test]
    fn node_id_display_is_prefixed() {
        assert_eq!(NodeId::new(7).to_string(), "#7");
    }

    #[test]
    fn property_value_serializes_externally_tagged() {
        let json = serde_json::to_string(&PropertyValue::Bool(true)).expect("serialize");
        assert_eq!(json, r#"{"Bool":true}"#);
    }
}
