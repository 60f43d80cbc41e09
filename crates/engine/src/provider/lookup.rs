//! Document lookups shared by the providers.
//!
//! These functions only read; they never create missing structure. Providers
//! that need structure created do so through commands.

use propanel_model::Document;
use propanel_types::{ElementKind, NodeId};

pub const TIMER_EVENT_DEFINITION: &str = "bpmn:TimerEventDefinition";
pub const MESSAGE_EVENT_DEFINITION: &str = "bpmn:MessageEventDefinition";
pub const EXTENSION_ELEMENTS: &str = "bpmn:ExtensionElements";
pub const CONNECTOR: &str = "camunda:Connector";
pub const INPUT_OUTPUT: &str = "camunda:InputOutput";
pub const OUTPUT_PARAMETER: &str = "camunda:OutputParameter";
pub const EXECUTION_LISTENER: &str = "camunda:ExecutionListener";
pub const FIELD: &str = "camunda:Field";

/// First event definition of `type_name` on an event.
pub fn event_definition(document: &Document, business_object: NodeId, type_name: &str) -> Option<NodeId> {
    document
        .get_list(business_object, "eventDefinitions")
        .iter()
        .copied()
        .find(|definition| document.is_type(*definition, type_name))
}

pub fn timer_event_definition(document: &Document, business_object: NodeId) -> Option<NodeId> {
    event_definition(document, business_object, TIMER_EVENT_DEFINITION)
}

/// Timer entries apply to catching events carrying a timer definition.
pub fn is_timer_supported(document: &Document, business_object: NodeId) -> bool {
    document.kind_of(business_object).is_timer_capable() && timer_event_definition(document, business_object).is_some()
}

pub fn extension_elements(document: &Document, business_object: NodeId) -> Option<NodeId> {
    document.get_ref(business_object, "extensionElements")
}

/// Extension values of `type_name`, in document order.
pub fn extension_elements_list(document: &Document, business_object: NodeId, type_name: &str) -> Vec<NodeId> {
    let Some(extension_elements) = extension_elements(document, business_object) else {
        return Vec::new();
    };
    document
        .get_list(extension_elements, "values")
        .iter()
        .copied()
        .filter(|value| document.is_type(*value, type_name))
        .collect()
}

/// Node holding the implementation details: the message event definition for
/// message-throwing events, the element itself otherwise.
pub fn implementation_business_object(document: &Document, business_object: NodeId) -> Option<NodeId> {
    let kind = document.kind_of(business_object);
    if kind.is_message_throw_capable() {
        return event_definition(document, business_object, MESSAGE_EVENT_DEFINITION);
    }
    kind.is_service_task_like().then_some(business_object)
}

pub fn connector(document: &Document, business_object: NodeId) -> Option<NodeId> {
    let implementation = implementation_business_object(document, business_object)?;
    extension_elements_list(document, implementation, CONNECTOR).first().copied()
}

/// Connector entries apply to service-task-like elements implemented by a connector.
pub fn are_connectors_supported(document: &Document, business_object: NodeId) -> bool {
    connector(document, business_object).is_some()
}

pub fn input_output(document: &Document, connector: NodeId) -> Option<NodeId> {
    document
        .get_ref(connector, "inputOutput")
        .filter(|input_output| document.is_type(*input_output, INPUT_OUTPUT))
}

pub fn output_parameters(document: &Document, connector: NodeId) -> Vec<NodeId> {
    input_output(document, connector)
        .map(|input_output| document.get_list(input_output, "outputParameters").to_vec())
        .unwrap_or_default()
}

/// Node whose extension elements hold the execution listeners: the element
/// itself for flow elements and processes, the referenced process for
/// participants.
pub fn listener_container(document: &Document, business_object: NodeId) -> Option<NodeId> {
    match document.kind_of(business_object) {
        ElementKind::Participant => document.get_ref(business_object, "processRef"),
        ElementKind::Process => Some(business_object),
        kind if kind.is_flow_element() => Some(business_object),
        _ => None,
    }
}

pub fn are_listeners_supported(document: &Document, business_object: NodeId) -> bool {
    listener_container(document, business_object).is_some()
}

pub fn execution_listeners(document: &Document, container: NodeId) -> Vec<NodeId> {
    extension_elements_list(document, container, EXECUTION_LISTENER)
}
