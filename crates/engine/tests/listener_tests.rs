use propanel_engine::provider::{EXECUTION_LISTENER_GROUP, ListenerProvider, ProviderContext, lookup};
use propanel_engine::{CommandExecutor, Group, GroupBody, ListEntry, Modeler, PanelError, PropertiesPanel};
use propanel_model::Document;
use propanel_types::NodeId;

fn load_fixture() -> Modeler {
    let diagram = include_str!("data/listener.yaml");
    Modeler::new(Document::from_yaml_str(diagram).expect("load listener fixture"))
}

fn panel() -> PropertiesPanel {
    PropertiesPanel::new(ProviderContext::default()).with_provider(ListenerProvider)
}

fn listener_group(panel: &PropertiesPanel, document: &Document, element_id: &str) -> Option<Group> {
    panel
        .groups(document, element_id)
        .expect("element registered")
        .into_iter()
        .find(|group| group.id == EXECUTION_LISTENER_GROUP)
}

fn list(group: &Group) -> &ListEntry {
    match &group.body {
        GroupBody::List(list) => list,
        GroupBody::Entries(_) => panic!("listener group should be a list"),
    }
}

fn listeners(document: &Document, element_id: &str) -> Vec<NodeId> {
    let element = document.element(element_id).expect("element registered");
    lookup::listener_container(document, element)
        .map(|container| lookup::execution_listeners(document, container))
        .unwrap_or_default()
}

fn first_listener(document: &Document, element_id: &str) -> NodeId {
    listeners(document, element_id)[0]
}

mod listeners {
    use super::*;

    #[test]
    fn should_display() {
        let modeler = load_fixture();
        let group = listener_group(&panel(), modeler.document(), "Participant_1").expect("group shown");

        assert_eq!(group.label, "Execution listeners");
        assert_eq!(list(&group).items.len(), listeners(modeler.document(), "Participant_1").len());
        assert_eq!(list(&group).items[0].id, "Participant_1-listener-0");
    }

    #[test]
    fn should_not_display() {
        let modeler = load_fixture();
        let panel = panel();

        assert!(listener_group(&panel, modeler.document(), "Collaboration_1").is_none());
        assert!(listener_group(&panel, modeler.document(), "Participant_NoProcess").is_none());
    }

    #[test]
    fn should_display_proper_label() {
        let modeler = load_fixture();
        let panel = panel();

        let group = listener_group(&panel, modeler.document(), "Participant_1").unwrap();
        assert_eq!(list(&group).items[0].label, "Start: Java class");

        let group = listener_group(&panel, modeler.document(), "DelegateExpression").unwrap();
        assert_eq!(list(&group).items[0].label, "Start: Delegate expression");
    }

    #[test]
    fn should_add_new_listener() {
        let mut modeler = load_fixture();

        panel().add_item(&mut modeler, "Participant_1", EXECUTION_LISTENER_GROUP).unwrap();

        let listeners = listeners(modeler.document(), "Participant_1");
        assert_eq!(listeners.len(), 2);
        let added = listeners[1];
        assert_eq!(modeler.document().get_text(added, "event"), Some("start"));
        assert_eq!(modeler.document().get_text(added, "class"), Some(""));
    }

    #[test]
    fn should_create_non_existing_extension_elements() {
        let mut modeler = load_fixture();
        let empty = modeler.document().element("Empty").unwrap();
        assert!(lookup::extension_elements(modeler.document(), empty).is_none());

        panel().add_item(&mut modeler, "Empty", EXECUTION_LISTENER_GROUP).unwrap();

        let extension_elements = lookup::extension_elements(modeler.document(), empty).expect("created");
        assert_eq!(modeler.document().node(extension_elements).unwrap().parent(), Some(empty));
        assert_eq!(listeners(modeler.document(), "Empty").len(), 1);
        assert_eq!(modeler.command_stack().undo_len(), 1);

        assert!(modeler.undo());
        assert!(lookup::extension_elements(modeler.document(), empty).is_none());
    }

    #[test]
    fn should_reuse_existing_extension_elements() {
        let mut modeler = load_fixture();
        let element = modeler.document().element("OtherExtensions").unwrap();
        let existing = lookup::extension_elements(modeler.document(), element).unwrap();

        panel().add_item(&mut modeler, "OtherExtensions", EXECUTION_LISTENER_GROUP).unwrap();

        assert_eq!(lookup::extension_elements(modeler.document(), element), Some(existing));
        assert_eq!(modeler.document().get_list(existing, "values").len(), 2);
        assert_eq!(listeners(modeler.document(), "OtherExtensions").len(), 1);
    }

    #[test]
    fn should_delete_listener() {
        let mut modeler = load_fixture();

        panel().remove_item(&mut modeler, "Participant_1", "Participant_1-listener-0").unwrap();

        assert!(listeners(modeler.document(), "Participant_1").is_empty());
    }

    #[test]
    fn should_update_on_external_change() {
        let mut modeler = load_fixture();
        let panel = panel();
        let original = listeners(modeler.document(), "Participant_1").len();

        panel.add_item(&mut modeler, "Participant_1", EXECUTION_LISTENER_GROUP).unwrap();
        assert!(modeler.undo());

        let group = listener_group(&panel, modeler.document(), "Participant_1").unwrap();
        assert_eq!(list(&group).items.len(), original);
    }

    #[test]
    fn sequence_flows_take() {
        let mut modeler = load_fixture();
        let panel = panel();

        panel.add_item(&mut modeler, "SequenceFlow_1", EXECUTION_LISTENER_GROUP).unwrap();
        let listener = first_listener(modeler.document(), "SequenceFlow_1");
        assert_eq!(modeler.document().get_text(listener, "event"), Some("take"));

        let error = panel
            .set_value(&mut modeler, "SequenceFlow_1", "SequenceFlow_1-listener-0-eventType", "start")
            .unwrap_err();
        assert!(matches!(error, PanelError::InvalidOption { .. }));
    }
}

mod java_class {
    use super::*;

    const ENTRY: &str = "JavaClass-listener-0-javaClass";

    #[test]
    fn should_not_display() {
        let modeler = load_fixture();
        let groups = panel().groups(modeler.document(), "Expression").unwrap();
        assert!(groups[0].find_entry("Expression-listener-0-javaClass").is_none());
    }

    #[test]
    fn should_display() {
        let modeler = load_fixture();
        let listener = first_listener(modeler.document(), "JavaClass");

        let value = panel().value(modeler.document(), "JavaClass", ENTRY).unwrap();
        assert_eq!(value.as_deref(), modeler.document().get_text(listener, "class"));
    }

    #[test]
    fn should_update() {
        let mut modeler = load_fixture();

        panel().set_value(&mut modeler, "JavaClass", ENTRY, "newValue").unwrap();

        let listener = first_listener(modeler.document(), "JavaClass");
        assert_eq!(modeler.document().get_text(listener, "class"), Some("newValue"));
    }

    #[test]
    fn should_update_on_external_change() {
        let mut modeler = load_fixture();
        let panel = panel();
        let original = panel.value(modeler.document(), "JavaClass", ENTRY).unwrap();

        panel.set_value(&mut modeler, "JavaClass", ENTRY, "newValue").unwrap();
        assert!(modeler.undo());

        assert_eq!(panel.value(modeler.document(), "JavaClass", ENTRY).unwrap(), original);
    }

    #[test]
    fn clearing_keeps_the_listener_type() {
        let mut modeler = load_fixture();
        let panel = panel();

        panel.set_value(&mut modeler, "JavaClass", ENTRY, "").unwrap();

        assert_eq!(panel.value(modeler.document(), "JavaClass", "JavaClass-listener-0-listenerType").unwrap().as_deref(), Some("class"));
    }
}

mod expression {
    use super::*;

    const ENTRY: &str = "Expression-listener-0-expression";

    #[test]
    fn should_not_display() {
        let modeler = load_fixture();
        let groups = panel().groups(modeler.document(), "JavaClass").unwrap();
        assert!(groups[0].find_entry("JavaClass-listener-0-expression").is_none());
    }

    #[test]
    fn should_display() {
        let modeler = load_fixture();
        let value = panel().value(modeler.document(), "Expression", ENTRY).unwrap();
        assert_eq!(value.as_deref(), Some("${listener.notify(execution)}"));
    }

    #[test]
    fn should_update() {
        let mut modeler = load_fixture();

        panel().set_value(&mut modeler, "Expression", ENTRY, "newValue").unwrap();

        let listener = first_listener(modeler.document(), "Expression");
        assert_eq!(modeler.document().get_text(listener, "expression"), Some("newValue"));
    }

    #[test]
    fn should_update_on_external_change() {
        let mut modeler = load_fixture();
        let panel = panel();

        panel.set_value(&mut modeler, "Expression", ENTRY, "newValue").unwrap();
        assert!(modeler.undo());

        assert_eq!(panel.value(modeler.document(), "Expression", ENTRY).unwrap().as_deref(), Some("${listener.notify(execution)}"));
    }
}

mod delegate_expression {
    use super::*;

    const ENTRY: &str = "DelegateExpression-listener-0-delegateExpression";

    #[test]
    fn should_not_display() {
        let modeler = load_fixture();
        let groups = panel().groups(modeler.document(), "Expression").unwrap();
        assert!(groups[0].find_entry("Expression-listener-0-delegateExpression").is_none());
    }

    #[test]
    fn should_display() {
        let modeler = load_fixture();
        let value = panel().value(modeler.document(), "DelegateExpression", ENTRY).unwrap();
        assert_eq!(value.as_deref(), Some("${myListener}"));
    }

    #[test]
    fn should_update() {
        let mut modeler = load_fixture();

        panel().set_value(&mut modeler, "DelegateExpression", ENTRY, "newValue").unwrap();

        let listener = first_listener(modeler.document(), "DelegateExpression");
        assert_eq!(modeler.document().get_text(listener, "delegateExpression"), Some("newValue"));
    }

    #[test]
    fn should_update_on_external_change() {
        let mut modeler = load_fixture();
        let panel = panel();

        panel.set_value(&mut modeler, "DelegateExpression", ENTRY, "newValue").unwrap();
        assert!(modeler.undo());

        assert_eq!(panel.value(modeler.document(), "DelegateExpression", ENTRY).unwrap().as_deref(), Some("${myListener}"));
    }
}

mod listener_type {
    use super::*;

    #[test]
    fn switching_replaces_the_implementation() {
        let mut modeler = load_fixture();
        let panel = panel();

        panel
            .set_value(&mut modeler, "JavaClass", "JavaClass-listener-0-listenerType", "delegateExpression")
            .unwrap();

        let listener = first_listener(modeler.document(), "JavaClass");
        assert!(modeler.document().get(listener, "class").is_none());
        assert_eq!(modeler.document().get_text(listener, "delegateExpression"), Some(""));

        let groups = panel.groups(modeler.document(), "JavaClass").unwrap();
        assert!(groups[0].find_entry("JavaClass-listener-0-javaClass").is_none());
        assert!(groups[0].find_entry("JavaClass-listener-0-delegateExpression").is_some());
        assert_eq!(list(&groups[0]).items[0].label, "End: Delegate expression");
    }

    #[test]
    fn none_is_not_offered() {
        let mut modeler = load_fixture();

        let error = panel()
            .set_value(&mut modeler, "JavaClass", "JavaClass-listener-0-listenerType", "")
            .unwrap_err();

        assert!(matches!(error, PanelError::InvalidOption { .. }));
    }

    #[test]
    fn script_entries() {
        let mut modeler = load_fixture();
        let panel = panel();

        assert_eq!(panel.value(modeler.document(), "ScriptListener", "ScriptListener-listener-0-scriptFormat").unwrap().as_deref(), Some("groovy"));
        assert_eq!(panel.value(modeler.document(), "ScriptListener", "ScriptListener-listener-0-scriptValue").unwrap().as_deref(), Some("println 'done'"));

        panel.set_value(&mut modeler, "ScriptListener", "ScriptListener-listener-0-scriptValue", "print 1").unwrap();
        assert_eq!(panel.value(modeler.document(), "ScriptListener", "ScriptListener-listener-0-scriptValue").unwrap().as_deref(), Some("print 1"));
    }

    #[test]
    fn switching_to_script_creates_a_script_node() {
        let mut modeler = load_fixture();
        let panel = panel();

        panel
            .set_value(&mut modeler, "Expression", "Expression-listener-0-listenerType", "script")
            .unwrap();

        let listener = first_listener(modeler.document(), "Expression");
        let script = modeler.document().get_ref(listener, "script").expect("script node");
        assert!(modeler.document().is_type(script, "camunda:Script"));
        assert!(modeler.document().get(listener, "expression").is_none());
        assert_eq!(panel.value(modeler.document(), "Expression", "Expression-listener-0-scriptValue").unwrap(), None);
    }
}

mod field_injection {
    use super::*;

    const FIELDS: &str = "FieldInjected-listener-0-fields";

    fn fields(modeler: &Modeler) -> Vec<NodeId> {
        let listener = first_listener(modeler.document(), "FieldInjected");
        modeler.document().get_list(listener, "fields").to_vec()
    }

    #[test]
    fn should_add_field() {
        let mut modeler = load_fixture();
        let original = fields(&modeler);

        panel().add_item(&mut modeler, "FieldInjected", FIELDS).unwrap();

        let fields = fields(&modeler);
        assert_eq!(fields.len(), original.len() + 1);
        assert!(modeler.document().is_type(fields[2], "camunda:Field"));
    }

    #[test]
    fn should_remove_field() {
        let mut modeler = load_fixture();
        let original = fields(&modeler);

        panel().remove_item(&mut modeler, "FieldInjected", "FieldInjected-listener-0-field-0").unwrap();

        assert_eq!(fields(&modeler), original[1..].to_vec());
    }

    #[test]
    fn field_entries() {
        let mut modeler = load_fixture();
        let panel = panel();

        assert_eq!(panel.value(modeler.document(), "FieldInjected", "FieldInjected-listener-0-field-1-value").unwrap().as_deref(), Some("world"));

        panel
            .set_value(&mut modeler, "FieldInjected", "FieldInjected-listener-0-field-0-name", "salutation")
            .unwrap();
        let field = fields(&modeler)[0];
        assert_eq!(modeler.document().get_text(field, "name"), Some("salutation"));
    }
}
