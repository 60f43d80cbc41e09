use propanel_model::ModelError;
use thiserror::Error;

/// Errors surfaced by the panel engine.
#[derive(Debug, Error)]
pub enum PanelError {
    /// The document rejected a read or write.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// No entry, list or item with the given id exists for the element.
    #[error("unknown entry '{0}'")]
    UnknownEntry(String),
    /// The entry exists but does not support the requested operation.
    #[error("entry '{0}' does not support this operation")]
    NotEditable(String),
    /// A select received a value outside of its options.
    #[error("'{value}' is not an option of entry '{entry}'")]
    InvalidOption { entry: String, value: String },
}
