//! Closed classification of diagram element types.
//!
//! Providers gate their entries on these categories instead of inspecting raw
//! type names, so every supported shape of element is listed here once.

use serde::{Deserialize, Serialize};

/// Category of a diagram element, derived from its business object type name.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    StartEvent,
    EndEvent,
    IntermediateCatchEvent,
    IntermediateThrowEvent,
    BoundaryEvent,
    Task,
    ServiceTask,
    SendTask,
    BusinessRuleTask,
    ScriptTask,
    UserTask,
    SubProcess,
    Gateway,
    SequenceFlow,
    Process,
    Participant,
    Collaboration,
    /// Any type the panel has no dedicated handling for.
    Other,
}

impl ElementKind {
    /// Classify a qualified business object type name such as `bpmn:StartEvent`.
    pub fn from_type_name(type_name: &str) -> Self {
        match type_name {
            "bpmn:StartEvent" => Self::StartEvent,
            "bpmn:EndEvent" => Self::EndEvent,
            "bpmn:IntermediateCatchEvent" => Self::IntermediateCatchEvent,
            "bpmn:IntermediateThrowEvent" => Self::IntermediateThrowEvent,
            "bpmn:BoundaryEvent" => Self::BoundaryEvent,
            "bpmn:Task" | "bpmn:ManualTask" | "bpmn:ReceiveTask" | "bpmn:CallActivity" => Self::Task,
            "bpmn:ServiceTask" => Self::ServiceTask,
            "bpmn:SendTask" => Self::SendTask,
            "bpmn:BusinessRuleTask" => Self::BusinessRuleTask,
            "bpmn:ScriptTask" => Self::ScriptTask,
            "bpmn:UserTask" => Self::UserTask,
            "bpmn:SubProcess" | "bpmn:Transaction" | "bpmn:AdHocSubProcess" => Self::SubProcess,
            "bpmn:ExclusiveGateway" | "bpmn:ParallelGateway" | "bpmn:InclusiveGateway" | "bpmn:EventBasedGateway" | "bpmn:ComplexGateway" => {
                Self::Gateway
            }
            "bpmn:SequenceFlow" => Self::SequenceFlow,
            "bpmn:Process" => Self::Process,
            "bpmn:Participant" => Self::Participant,
            "bpmn:Collaboration" => Self::Collaboration,
            _ => Self::Other,
        }
    }

    pub fn is_event(self) -> bool {
        matches!(
            self,
            Self::StartEvent | Self::EndEvent | Self::IntermediateCatchEvent | Self::IntermediateThrowEvent | Self::BoundaryEvent
        )
    }

    /// Events that may wait on a timer: start, intermediate catch and boundary events.
    pub fn is_timer_capable(self) -> bool {
        matches!(self, Self::StartEvent | Self::IntermediateCatchEvent | Self::BoundaryEvent)
    }

    pub fn is_activity(self) -> bool {
        matches!(
            self,
            Self::Task | Self::ServiceTask | Self::SendTask | Self::BusinessRuleTask | Self::ScriptTask | Self::UserTask | Self::SubProcess
        )
    }

    /// Elements that live inside a process and can carry execution listeners.
    pub fn is_flow_element(self) -> bool {
        self.is_event() || self.is_activity() || matches!(self, Self::Gateway | Self::SequenceFlow)
    }

    /// Tasks whose implementation can be delegated to a connector.
    pub fn is_service_task_like(self) -> bool {
        matches!(self, Self::ServiceTask | Self::SendTask | Self::BusinessRuleTask)
    }

    /// Events that may throw a message and therefore host an implementation.
    pub fn is_message_throw_capable(self) -> bool {
        matches!(self, Self::EndEvent | Self::IntermediateThrowEvent)
    }
}
