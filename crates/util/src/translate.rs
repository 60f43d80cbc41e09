//! Label translation.

use indexmap::IndexMap;

use crate::PanelConfig;

/// Maps source labels to their configured translation.
///
/// Labels without an override are returned unchanged.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    overrides: IndexMap<String, String>,
}

impl Translator {
    pub fn new(overrides: IndexMap<String, String>) -> Self {
        Self { overrides }
    }

    pub fn from_config(config: &PanelConfig) -> Self {
        Self::new(config.translations.clone())
    }

    pub fn translate(&self, label: &str) -> String {
        self.overrides.get(label).cloned().unwrap_or_else(|| label.to_string())
    }
}
