//! # omv-core: Foundational Types for the OWASP Metadata Validator
//!
//! Defines the small set of types shared by every stage of the validation
//! pipeline (discovery, loading, validation, reporting).
//!
//! ## Key Design Principles
//!
//! 1. **One table of recognized files.** [`SchemaKind`] is the single source
//!    of truth for which metadata filenames are accepted and which schema
//!    each one selects. It is fixed at build time.
//!
//! 2. **Explicit "no data".** An empty metadata file loads as
//!    [`Document::Empty`], never as an error. Schema validation rejects it
//!    later, so a caller can tell an empty file apart from malformed YAML.
//!
//! 3. **One error taxonomy.** [`ValidatorError`] enumerates every terminal
//!    failure of a run. Every variant maps to exit code 1.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `omv-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod kind;

pub use document::Document;
pub use error::ValidatorError;
pub use kind::{accepted_file_names, SchemaKind};
