//! Docf Manifest Model
//!
//! This crate defines the metadata document carried at the root of every
//! `.docf` package, together with the operations that validate, load, save and
//! synthesize it.
//!
//! The manifest is stored as pretty-printed JSON (`manifest.json`) next to the
//! `docs/` payload folder.

pub mod constants;
pub mod errors;
pub mod generate;
pub mod manifest;
pub mod types;
pub mod validation;

pub use errors::ManifestError;
pub use generate::{generate, is_markdown, scan_docs};
pub use manifest::{load, save};
pub use types::Manifest;
pub use validation::{validate_entry_file, validate_value};
