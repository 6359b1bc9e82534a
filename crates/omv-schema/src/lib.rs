//! # omv-schema: Schema Validation for OWASP Metadata
//!
//! Provides the three collaborators the validation pipeline relies on:
//!
//! - [`SchemaStore`]: the schema store, addressed by [`SchemaKind`]. The
//!   built-in store embeds the chapter, committee, and project schemas
//!   (plus their shared definitions); [`SchemaStore::from_dir`] loads an
//!   override set from disk.
//! - [`load_document`] / [`parse_document`]: the YAML loader. Empty input
//!   becomes [`Document::Empty`] instead of an error.
//! - [`SchemaStore::validate_document`]: JSON Schema (Draft 7) validation
//!   with format assertion, reporting one canonical violation message in
//!   the conventional `'type' is a required property` phrasing.
//!
//! ## Crate Policy
//!
//! - Depends only on `omv-core` internally.
//! - Cross-schema `$ref`s are resolved from memory. No network access.
//!
//! [`SchemaKind`]: omv_core::SchemaKind
//! [`Document::Empty`]: omv_core::Document::Empty

pub mod load;
pub mod message;
pub mod store;
pub mod validate;

pub use load::{load_document, parse_document};
pub use store::{SchemaError, SchemaSource, SchemaStore};
pub use validate::{ValidationViolations, Violation};
