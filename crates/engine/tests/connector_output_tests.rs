use propanel_engine::provider::{CONNECTOR_OUTPUT_GROUP, ConnectorOutputProvider, ProviderContext, lookup};
use propanel_engine::{CommandExecutor, GroupBody, Modeler, PropertiesPanel};
use propanel_model::Document;
use propanel_types::NodeId;

fn load_fixture() -> Modeler {
    let diagram = include_str!("data/connector.yaml");
    Modeler::new(Document::from_yaml_str(diagram).expect("load connector fixture"))
}

fn panel() -> PropertiesPanel {
    PropertiesPanel::new(ProviderContext::default()).with_provider(ConnectorOutputProvider)
}

fn connector(document: &Document, element_id: &str) -> NodeId {
    let element = document.element(element_id).expect("element registered");
    lookup::connector(document, element).expect("connector present")
}

fn output_parameters(document: &Document, element_id: &str) -> Vec<NodeId> {
    lookup::output_parameters(document, connector(document, element_id))
}

#[test]
fn lists_one_item_per_output_parameter() {
    let modeler = load_fixture();
    let panel = panel();

    let groups = panel.groups(modeler.document(), "ServiceTask_1").unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].id, CONNECTOR_OUTPUT_GROUP);
    assert_eq!(groups[0].label, "Connector outputs");

    let GroupBody::List(list) = &groups[0].body else {
        panic!("connector outputs should be a list group");
    };
    let ids: Vec<&str> = list.items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["ServiceTask_1-connector-outputParameter-0", "ServiceTask_1-connector-outputParameter-1"]);
    assert_eq!(list.items[0].label, "status");
    assert_eq!(list.items[0].auto_focus_entry.as_deref(), Some("ServiceTask_1-connector-outputParameter-0-name"));
}

#[test]
fn reads_and_writes_parameter_entries() {
    let mut modeler = load_fixture();
    let panel = panel();
    let value_entry = "ServiceTask_1-connector-outputParameter-0-value";

    assert_eq!(panel.value(modeler.document(), "ServiceTask_1", value_entry).unwrap().as_deref(), Some("${statusCode}"));
    assert_eq!(panel.value(modeler.document(), "ServiceTask_1", "ServiceTask_1-connector-outputParameter-1-value").unwrap(), None);

    panel
        .set_value(&mut modeler, "ServiceTask_1", "ServiceTask_1-connector-outputParameter-0-name", "httpStatus")
        .unwrap();
    let parameter = output_parameters(modeler.document(), "ServiceTask_1")[0];
    assert_eq!(modeler.document().get_text(parameter, "name"), Some("httpStatus"));

    panel.set_value(&mut modeler, "ServiceTask_1", value_entry, "").unwrap();
    assert_eq!(modeler.document().get_text(parameter, "value"), None);
}

#[test]
fn adds_parameter_to_existing_mapping() {
    let mut modeler = load_fixture();
    let panel = panel();
    let input_output = lookup::input_output(modeler.document(), connector(modeler.document(), "ServiceTask_1")).unwrap();

    panel.add_item(&mut modeler, "ServiceTask_1", CONNECTOR_OUTPUT_GROUP).unwrap();

    let parameters = output_parameters(modeler.document(), "ServiceTask_1");
    assert_eq!(parameters.len(), 3);
    let added = modeler.document().node(parameters[2]).unwrap();
    assert_eq!(added.type_name(), "camunda:OutputParameter");
    assert_eq!(added.parent(), Some(input_output));
    assert!(added.get("name").and_then(|name| name.as_text()).is_some_and(|name| name.starts_with("Output_")));
    assert_eq!(modeler.command_stack().undo_len(), 1);
}

#[test]
fn creates_missing_mapping_in_the_same_step() {
    let mut modeler = load_fixture();
    let panel = panel();
    let connector = connector(modeler.document(), "ServiceTask_Empty");
    assert!(lookup::input_output(modeler.document(), connector).is_none());

    panel.add_item(&mut modeler, "ServiceTask_Empty", CONNECTOR_OUTPUT_GROUP).unwrap();

    let input_output = lookup::input_output(modeler.document(), connector).expect("mapping created");
    assert!(modeler.document().is_type(input_output, "camunda:InputOutput"));
    assert_eq!(output_parameters(modeler.document(), "ServiceTask_Empty").len(), 1);
    assert_eq!(modeler.command_stack().undo_len(), 1);

    assert!(modeler.undo());
    assert!(lookup::input_output(modeler.document(), connector).is_none());
}

#[test]
fn generated_names_are_unique() {
    let mut modeler = load_fixture();
    let panel = panel();

    panel.add_item(&mut modeler, "ServiceTask_Empty", CONNECTOR_OUTPUT_GROUP).unwrap();
    panel.add_item(&mut modeler, "ServiceTask_Empty", CONNECTOR_OUTPUT_GROUP).unwrap();

    let document = modeler.document();
    let names: Vec<&str> = output_parameters(document, "ServiceTask_Empty")
        .into_iter()
        .filter_map(|parameter| document.get_text(parameter, "name"))
        .collect();
    assert_eq!(names.len(), 2);
    assert_ne!(names[0], names[1]);
}

#[test]
fn removes_parameter() {
    let mut modeler = load_fixture();
    let panel = panel();
    let kept = output_parameters(modeler.document(), "ServiceTask_1")[1];

    panel
        .remove_item(&mut modeler, "ServiceTask_1", "ServiceTask_1-connector-outputParameter-0")
        .unwrap();

    assert_eq!(output_parameters(modeler.document(), "ServiceTask_1"), vec![kept]);

    assert!(modeler.undo());
    assert_eq!(output_parameters(modeler.document(), "ServiceTask_1").len(), 2);
}

#[test]
fn message_end_events_expose_their_connector() {
    let modeler = load_fixture();
    let panel = panel();

    let snapshot = panel.snapshot(modeler.document(), "MessageEndEvent_1").unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].items[0].label, "result");
}

#[test]
fn no_group_without_a_connector() {
    let modeler = load_fixture();
    let panel = panel();

    assert!(panel.groups(modeler.document(), "ServiceTask_NoConnector").unwrap().is_empty());
    assert!(panel.groups(modeler.document(), "UserTask_1").unwrap().is_empty());
}
