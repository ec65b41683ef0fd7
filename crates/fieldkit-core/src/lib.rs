//! Core library for typing and normalizing OCR-scanned text fields.
//!
//! This crate provides:
//! - A field type contract (`FieldType`) and a closed set of handlers
//!   for human names, calendar dates and proper nouns
//! - OCR-confusable glyph correction for numeric dates
//! - Fuzzy match scoring for record linkage
//! - A process-wide handler registry keyed by type tag

pub mod error;
pub mod models;
pub mod fields;

pub use error::{ConfigError, FieldError, Result};
pub use models::config::{DateConfig, FieldkitConfig, NameConfig};
pub use models::value::{FieldKind, FieldValue, StorageType};
pub use fields::{ExtractionMatch, FieldHandler, FieldType};
pub use fields::handlers::{DateHandler, HumanNameHandler, ProperNounHandler};
pub use fields::registry::{get_handler, HandlerRegistry};
pub use fields::similarity::{PartialRatio, Similarity};
