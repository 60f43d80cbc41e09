use propanel_model::Document;
use propanel_util::PanelConfig;
use tracing::debug;

use crate::entry::{Entry, EntryKind, Group, GroupView};
use crate::provider::{ConnectorOutputProvider, ListenerProvider, PropertiesProvider, ProviderContext, TimerProvider};
use crate::{CommandExecutor, PanelError};

/// Ordered set of providers queried for every selected element.
#[derive(Debug)]
pub struct PropertiesPanel {
    providers: Vec<Box<dyn PropertiesProvider>>,
    context: ProviderContext,
}

impl PropertiesPanel {
    /// Panel without providers.
    pub fn new(context: ProviderContext) -> Self {
        Self {
            providers: Vec::new(),
            context,
        }
    }

    /// Panel with the timer, connector output and execution listener providers.
    pub fn with_default_providers(config: &PanelConfig) -> Self {
        Self::new(ProviderContext::from_config(config))
            .with_provider(TimerProvider)
            .with_provider(ConnectorOutputProvider)
            .with_provider(ListenerProvider)
    }

    pub fn with_provider(mut self, provider: impl PropertiesProvider + 'static) -> Self {
        self.register(Box::new(provider));
        self
    }

    pub fn register(&mut self, provider: Box<dyn PropertiesProvider>) {
        self.providers.push(provider);
    }

    pub fn context(&self) -> &ProviderContext {
        &self.context
    }

    /// Groups of every provider supporting the element, in registration order.
    pub fn groups(&self, document: &Document, element_id: &str) -> Result<Vec<Group>, PanelError> {
        let business_object = document.element_checked(element_id)?;
        let groups: Vec<Group> = self
            .providers
            .iter()
            .flat_map(|provider| provider.groups(&self.context, document, element_id, business_object))
            .collect();
        debug!(element = element_id, groups = groups.len(), "built property groups");
        Ok(groups)
    }

    /// Current values of every group, ready for display or serialization.
    pub fn snapshot(&self, document: &Document, element_id: &str) -> Result<Vec<GroupView>, PanelError> {
        Ok(self.groups(document, element_id)?.iter().map(|group| group.view(document)).collect())
    }

    pub fn value(&self, document: &Document, element_id: &str, entry_id: &str) -> Result<Option<String>, PanelError> {
        let groups = self.groups(document, element_id)?;
        Ok(find_entry(&groups, entry_id)?.value(document))
    }

    /// Write `value` through the entry's setter.
    pub fn set_value(&self, executor: &mut dyn CommandExecutor, element_id: &str, entry_id: &str, value: &str) -> Result<(), PanelError> {
        let groups = self.groups(executor.document(), element_id)?;
        let entry = find_entry(&groups, entry_id)?;
        let Some(binding) = entry.binding() else {
            return Err(PanelError::NotEditable(entry_id.to_string()));
        };
        debug!(element = element_id, entry = entry_id, "setting entry value");
        binding.set(executor, value)
    }

    /// Run the add action of the list addressed by `list_id` (a list group id
    /// or a nested list entry id).
    pub fn add_item(&self, executor: &mut dyn CommandExecutor, element_id: &str, list_id: &str) -> Result<(), PanelError> {
        let groups = self.groups(executor.document(), element_id)?;
        let list = groups
            .iter()
            .find_map(|group| group.find_list(list_id))
            .ok_or_else(|| PanelError::UnknownEntry(list_id.to_string()))?;
        let add = list.add.as_ref().ok_or_else(|| PanelError::NotEditable(list_id.to_string()))?;
        debug!(element = element_id, list = list_id, "adding list item");
        add.run(executor)
    }

    pub fn remove_item(&self, executor: &mut dyn CommandExecutor, element_id: &str, item_id: &str) -> Result<(), PanelError> {
        let groups = self.groups(executor.document(), element_id)?;
        let item = groups
            .iter()
            .find_map(|group| group.find_item(item_id))
            .ok_or_else(|| PanelError::UnknownEntry(item_id.to_string()))?;
        let remove = item.remove.as_ref().ok_or_else(|| PanelError::NotEditable(item_id.to_string()))?;
        debug!(element = element_id, item = item_id, "removing list item");
        remove.run(executor)
    }
}

impl Default for PropertiesPanel {
    fn default() -> Self {
        Self::with_default_providers(&PanelConfig::default())
    }
}

/// Entry with `entry_id` in any of `groups`.
pub fn find_entry<'a>(groups: &'a [Group], entry_id: &str) -> Result<&'a Entry, PanelError> {
    groups
        .iter()
        .find_map(|group| group.find_entry(entry_id))
        .ok_or_else(|| PanelError::UnknownEntry(entry_id.to_string()))
}

/// Whether `entry_id` names a list entry rather than a scalar field.
pub fn is_list_entry(groups: &[Group], entry_id: &str) -> bool {
    find_entry(groups, entry_id).is_ok_and(|entry| matches!(entry.kind, EntryKind::List(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Modeler;

    const DIAGRAM: &str = r#"
elements:
  - $type: bpmn:UserTask
    id: Task_1
    extensionElements:
      $type: bpmn:ExtensionElements
      values:
        - $type: camunda:ExecutionListener
          event: end
          expression: "${done}"
  - $type: bpmn:Collaboration
    id: Collaboration_1
"#;

    fn modeler() -> Modeler {
        Modeler::new(Document::from_yaml_str(DIAGRAM).unwrap())
    }

    #[test]
    fn unknown_element_is_an_error() {
        let panel = PropertiesPanel::default();
        let error = panel.groups(modeler().document(), "Missing_1").unwrap_err();
        assert!(matches!(error, PanelError::Model(_)));
    }

    #[test]
    fn unsupported_elements_have_no_groups() {
        let panel = PropertiesPanel::default();
        assert!(panel.groups(modeler().document(), "Collaboration_1").unwrap().is_empty());
    }

    #[test]
    fn entries_are_addressed_by_id() {
        let panel = PropertiesPanel::default();
        let mut modeler = modeler();

        assert_eq!(panel.value(modeler.document(), "Task_1", "Task_1-listener-0-expression").unwrap().as_deref(), Some("${done}"));
        panel.set_value(&mut modeler, "Task_1", "Task_1-listener-0-expression", "${finished}").unwrap();
        assert_eq!(panel.value(modeler.document(), "Task_1", "Task_1-listener-0-expression").unwrap().as_deref(), Some("${finished}"));

        let error = panel.set_value(&mut modeler, "Task_1", "Task_1-listener-0-fields", "x").unwrap_err();
        assert!(matches!(error, PanelError::NotEditable(_)));
        let error = panel.set_value(&mut modeler, "Task_1", "Task_1-listener-9-expression", "x").unwrap_err();
        assert!(matches!(error, PanelError::UnknownEntry(_)));
    }

    #[test]
    fn snapshot_serializes_without_empty_fields() {
        let panel = PropertiesPanel::default();
        let snapshot = panel.snapshot(modeler().document(), "Task_1").unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();

        let group = &json[0];
        assert_eq!(group["id"], "CamundaPlatform__ExecutionListener");
        assert!(group.get("entries").is_none());
        let event_type = &group["items"][0]["entries"][0];
        assert_eq!(event_type["kind"], "select");
        assert_eq!(event_type["value"], "end");
        assert!(event_type.get("description").is_none());
        assert_eq!(group["items"][0]["label"], "End: Expression");
    }

    #[test]
    fn list_items_are_added_and_removed_by_id() {
        let panel = PropertiesPanel::default();
        let mut modeler = modeler();

        panel.add_item(&mut modeler, "Task_1", "Task_1-listener-0-fields").unwrap();
        let groups = panel.groups(modeler.document(), "Task_1").unwrap();
        assert!(is_list_entry(&groups, "Task_1-listener-0-fields"));
        assert!(groups[0].find_item("Task_1-listener-0-field-0").is_some());

        panel.remove_item(&mut modeler, "Task_1", "Task_1-listener-0").unwrap();
        let snapshot = panel.snapshot(modeler.document(), "Task_1").unwrap();
        assert!(snapshot[0].items.is_empty());
    }
}
