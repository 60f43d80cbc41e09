//! Diagram file import and export.
//!
//! Diagrams are stored as a list of top-level elements, each a nested tree of
//! nodes. The node type lives under the `$type` key; every other key is a
//! property whose value is a string, a boolean, a nested node or a list of
//! nodes.
//!
//! ```yaml
//! elements:
//!   - $type: bpmn:IntermediateCatchEvent
//!     id: TimerCatchEvent_1
//!     eventDefinitions:
//!       - $type: bpmn:TimerEventDefinition
//!         timeDate:
//!           $type: bpmn:FormalExpression
//!           body: myDate
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use propanel_types::{NodeId, PropertyValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Document, ModelError};

/// Serialized form of a whole diagram.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramSpec {
    #[serde(default)]
    pub elements: Vec<NodeSpec>,
}

/// Serialized form of a node and its subtree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(rename = "$type")]
    pub type_name: String,
    #[serde(flatten)]
    pub properties: IndexMap<String, PropertySpec>,
}

/// Serialized property value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertySpec {
    Bool(bool),
    Text(String),
    List(Vec<NodeSpec>),
    Node(Box<NodeSpec>),
}

impl Document {
    /// Build a document from its serialized form, registering every top-level
    /// element by id.
    pub fn from_spec(spec: DiagramSpec) -> Result<Self, ModelError> {
        let mut document = Document::new();
        for element in spec.elements {
            let node = document.import_node(element, None)?;
            document.register_element(node)?;
        }
        debug!(elements = document.elements_len(), nodes = document.len(), "diagram imported");
        Ok(document)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ModelError> {
        Self::from_spec(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ModelError> {
        Self::from_spec(serde_json::from_str(content)?)
    }

    /// Serialize every registered element and the nodes reachable from it.
    pub fn to_spec(&self) -> Result<DiagramSpec, ModelError> {
        let mut elements = Vec::new();
        for element_id in self.element_ids() {
            let node = self.element_checked(element_id)?;
            let mut visiting = HashSet::new();
            elements.push(self.export_node(node, &mut visiting)?);
        }
        Ok(DiagramSpec { elements })
    }

    pub fn to_yaml_string(&self) -> Result<String, ModelError> {
        Ok(serde_yaml::to_string(&self.to_spec()?)?)
    }

    pub fn to_json_string(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(&self.to_spec()?)?)
    }

    fn elements_len(&self) -> usize {
        self.element_ids().count()
    }

    fn import_node(&mut self, spec: NodeSpec, parent: Option<NodeId>) -> Result<NodeId, ModelError> {
        let node = self.create_node(spec.type_name, Vec::<(String, PropertyValue)>::new(), parent);
        for (name, property) in spec.properties {
            let value = match property {
                PropertySpec::Bool(flag) => PropertyValue::Bool(flag),
                PropertySpec::Text(text) => PropertyValue::Text(text),
                PropertySpec::Node(child) => PropertyValue::Ref(self.import_node(*child, Some(node))?),
                PropertySpec::List(children) => PropertyValue::List(
                    children
                        .into_iter()
                        .map(|child| self.import_node(child, Some(node)))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
            };
            self.set_property(node, &name, Some(value))?;
        }
        Ok(node)
    }

    fn export_node(&self, node: NodeId, visiting: &mut HashSet<NodeId>) -> Result<NodeSpec, ModelError> {
        if !visiting.insert(node) {
            return Err(ModelError::Cycle(node));
        }
        let source = self.node_checked(node)?;
        let mut properties = IndexMap::new();
        for (name, value) in source.properties() {
            let spec = match value {
                PropertyValue::Bool(flag) => PropertySpec::Bool(*flag),
                PropertyValue::Text(text) => PropertySpec::Text(text.clone()),
                PropertyValue::Ref(child) => PropertySpec::Node(Box::new(self.export_node(*child, visiting)?)),
                PropertyValue::List(children) => PropertySpec::List(
                    children
                        .iter()
                        .map(|child| self.export_node(*child, visiting))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
            };
            properties.insert(name.to_string(), spec);
        }
        visiting.remove(&node);
        Ok(NodeSpec {
            type_name: source.type_name().to_string(),
            properties,
        })
    }
}

/// Load a diagram file; `.json` files are parsed as JSON, anything else as YAML.
pub fn load_diagram_file(file_path: impl AsRef<Path>) -> Result<Document, ModelError> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path)?;
    if is_json_path(file_path) {
        Document::from_json_str(&content)
    } else {
        Document::from_yaml_str(&content)
    }
}

/// Write a diagram file in the format implied by its extension.
pub fn save_diagram_file(document: &Document, file_path: impl AsRef<Path>) -> Result<(), ModelError> {
    let file_path = file_path.as_ref();
    let content = if is_json_path(file_path) {
        document.to_json_string()?
    } else {
        document.to_yaml_string()?
    };
    fs::write(file_path, content)?;
    debug!(path = %file_path.display(), "diagram saved");
    Ok(())
}

fn is_json_path(file_path: &Path) -> bool {
    file_path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"))
}
