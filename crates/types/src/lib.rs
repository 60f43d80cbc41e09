//! Shared type definitions for the propanel workspace.
//!
//! The document model, the command stack and the entry providers all speak in
//! terms of the small vocabulary defined here: node handles, property values
//! and the closed set of diagram element categories the panel understands.

pub mod element;
pub mod value;

pub use element::ElementKind;
pub use value::{NodeId, PropertyValue};
