//! Schema module - Converter configuration and animation input types.

mod config;
mod document;

pub use config::*;
pub use document::*;
