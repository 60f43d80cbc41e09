//! Connector output parameter list.

use propanel_model::Document;
use propanel_types::{NodeId, PropertyValue};
use tracing::debug;

use super::lookup::{INPUT_OUTPUT, OUTPUT_PARAMETER, are_connectors_supported, connector, input_output, output_parameters};
use super::{PropertiesProvider, ProviderContext};
use crate::entry::{Action, Entry, FieldBinding, Group, ListEntry, ListItem};
use crate::{Command, CommandExecutor};

pub const CONNECTOR_OUTPUT_GROUP: &str = "CamundaPlatform__ConnectorOutput";

#[derive(Debug, Default)]
pub struct ConnectorOutputProvider;

impl PropertiesProvider for ConnectorOutputProvider {
    fn id(&self) -> &'static str {
        CONNECTOR_OUTPUT_GROUP
    }

    fn groups(&self, context: &ProviderContext, document: &Document, element_id: &str, business_object: NodeId) -> Vec<Group> {
        if !are_connectors_supported(document, business_object) {
            return Vec::new();
        }
        let Some(connector) = connector(document, business_object) else {
            return Vec::new();
        };

        let items = output_parameters(document, connector)
            .into_iter()
            .enumerate()
            .map(|(index, parameter)| {
                let id = format!("{element_id}-connector-outputParameter-{index}");
                ListItem {
                    label: document.get_text(parameter, "name").unwrap_or_default().to_string(),
                    entries: parameter_entries(context, element_id, &id, parameter),
                    auto_focus_entry: Some(format!("{id}-name")),
                    remove: Some(remove_parameter(element_id, connector, parameter)),
                    id,
                }
            })
            .collect();

        let list = ListEntry {
            items,
            add: Some(add_parameter(element_id, connector)),
        };
        vec![Group::list(CONNECTOR_OUTPUT_GROUP, context.translate("Connector outputs"), list)]
    }
}

fn parameter_entries(context: &ProviderContext, element_id: &str, id: &str, parameter: NodeId) -> Vec<Entry> {
    vec![
        Entry::text_field(
            format!("{id}-name"),
            context.translate("Process variable name"),
            None,
            context.debounce_input,
            FieldBinding::text_property(element_id, parameter, "name"),
        ),
        Entry::text_field(
            format!("{id}-value"),
            context.translate("Variable assignment value"),
            None,
            context.debounce_input,
            FieldBinding::text_property(element_id, parameter, "value"),
        ),
    ]
}

fn remove_parameter(element_id: &str, connector: NodeId, parameter: NodeId) -> Action {
    let element_id = element_id.to_string();
    Action::new(move |executor| {
        let Some(input_output) = input_output(executor.document(), connector) else {
            debug!(connector = %connector, "no input/output mapping; nothing to remove");
            return Ok(());
        };
        executor.execute(Command::remove_from_list(element_id.clone(), input_output, "outputParameters", vec![parameter]))
    })
}

/// Creates the input/output mapping when missing, then appends a parameter,
/// all in one undo step.
fn add_parameter(element_id: &str, connector: NodeId) -> Action {
    let element_id = element_id.to_string();
    Action::new(move |executor| {
        let mut commands = Vec::new();

        let input_output = match input_output(executor.document(), connector) {
            Some(input_output) => input_output,
            None => {
                let input_output = executor.create_node(
                    INPUT_OUTPUT,
                    vec![
                        ("inputParameters".to_string(), PropertyValue::List(Vec::new())),
                        ("outputParameters".to_string(), PropertyValue::List(Vec::new())),
                    ],
                    Some(connector),
                );
                commands.push(Command::update(
                    element_id.clone(),
                    connector,
                    [("inputOutput", Some(PropertyValue::Ref(input_output)))],
                ));
                input_output
            }
        };

        commands.push(create_output_parameter(executor, &element_id, input_output));
        executor.execute(Command::MultiCommand(commands))
    })
}

fn create_output_parameter(executor: &mut dyn CommandExecutor, element_id: &str, input_output: NodeId) -> Command {
    let name = executor.next_id("Output_");
    let parameter = executor.create_node(OUTPUT_PARAMETER, vec![("name".to_string(), PropertyValue::text(name))], Some(input_output));
    Command::add_to_list(element_id, input_output, "outputParameters", vec![parameter])
}
