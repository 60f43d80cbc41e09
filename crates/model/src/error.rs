use propanel_types::NodeId;
use thiserror::Error;

/// Errors surfaced by document model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A node handle does not belong to this document.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    /// No element is registered under the given identifier.
    #[error("unknown element '{0}'")]
    UnknownElement(String),
    /// Two top-level elements share an identifier.
    #[error("duplicate element id '{0}'")]
    DuplicateElement(String),
    /// A top-level element has no textual `id` property.
    #[error("element of type '{0}' has no id")]
    MissingElementId(String),
    /// A list operation targeted a property holding something else.
    #[error("property '{property}' of node {node} is a {found}, not a list")]
    NotAList { node: NodeId, property: String, found: &'static str },
    /// Export found a node reachable from itself.
    #[error("node {0} is part of a reference cycle")]
    Cycle(NodeId),
    /// I/O failure while reading or writing a diagram file.
    #[error("diagram I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// YAML (de)serialization failure.
    #[error("diagram YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// JSON (de)serialization failure.
    #[error("diagram JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
