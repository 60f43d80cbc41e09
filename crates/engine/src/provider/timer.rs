//! Timer event definition entries.
//!
//! A timer definition holds exactly one of `timeDate`, `timeDuration` or
//! `timeCycle`, each a formal expression whose `body` is the ISO 8601 value.

use propanel_model::Document;
use propanel_types::NodeId;

use super::lookup::{is_timer_supported, timer_event_definition};
use super::{PropertiesProvider, ProviderContext};
use crate::entry::Group;
use crate::variant::{SlotKind, Variant, VariantFieldEditor};

pub const TIMER_GROUP: &str = "timer";
pub const TIMER_TYPE_ENTRY: &str = "timerEventDefinitionType";
pub const TIMER_VALUE_ENTRY: &str = "timerEventDefinitionValue";

const FORMAL_EXPRESSION: &str = "bpmn:FormalExpression";

const TIME_DATE_DESCRIPTION: &str = "A specific point in time defined as ISO 8601 combined date and time representation.\n\
    2019-10-01T12:00:00Z - UTC time\n\
    2019-10-02T08:09:40+02:00 - UTC plus 2 hours zone offset\n\
    Documentation: https://docs.camunda.org/manual/latest/reference/bpmn20/events/timer-events/#time-date";

const TIME_DURATION_DESCRIPTION: &str = "A time duration defined as ISO 8601 durations format.\n\
    PT15S - 15 seconds\n\
    PT1H30M - 1 hour and 30 minutes\n\
    P14D - 14 days\n\
    Documentation: https://docs.camunda.org/manual/latest/reference/bpmn20/events/timer-events/#time-duration";

const TIME_CYCLE_DESCRIPTION: &str = "A cycle defined as ISO 8601 repeating intervals format.\n\
    R5/PT10S - every 10 seconds, up to 5 times\n\
    R/P1D - every day, infinitely\n\
    Documentation: https://docs.camunda.org/manual/latest/reference/bpmn20/events/timer-events/#time-cycle";

/// Which kind of timer value a definition holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerDefinitionType {
    TimeDate,
    TimeDuration,
    TimeCycle,
}

impl Variant for TimerDefinitionType {
    const ALL: &'static [Self] = &[Self::TimeDate, Self::TimeDuration, Self::TimeCycle];

    fn slot(self) -> &'static str {
        match self {
            Self::TimeDate => "timeDate",
            Self::TimeDuration => "timeDuration",
            Self::TimeCycle => "timeCycle",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::TimeDate => "Date",
            Self::TimeDuration => "Duration",
            Self::TimeCycle => "Cycle",
        }
    }

    fn slot_kind(self) -> SlotKind {
        SlotKind::Node {
            type_name: FORMAL_EXPRESSION,
            payload: "body",
        }
    }

    fn description(self) -> Option<&'static str> {
        Some(match self {
            Self::TimeDate => TIME_DATE_DESCRIPTION,
            Self::TimeDuration => TIME_DURATION_DESCRIPTION,
            Self::TimeCycle => TIME_CYCLE_DESCRIPTION,
        })
    }
}

/// Type select plus, once a type is chosen, the value field.
#[derive(Debug, Default)]
pub struct TimerProvider;

impl PropertiesProvider for TimerProvider {
    fn id(&self) -> &'static str {
        TIMER_GROUP
    }

    fn groups(&self, context: &ProviderContext, document: &Document, element_id: &str, business_object: NodeId) -> Vec<Group> {
        if !is_timer_supported(document, business_object) {
            return Vec::new();
        }
        let Some(definition) = timer_event_definition(document, business_object) else {
            return Vec::new();
        };

        let editor = VariantFieldEditor::<TimerDefinitionType>::new(element_id, definition);
        let mut entries = vec![editor.select_entry(TIMER_TYPE_ENTRY, "Type", true, context)];
        if editor.active_variant(document).is_some() {
            entries.push(editor.value_entry(TIMER_VALUE_ENTRY, "Value", document, context));
        }

        vec![Group::entries(TIMER_GROUP, context.translate("Timer"), entries)]
    }
}
