//! Field handlers, one module per field type.

pub mod confusables;
pub mod date;
pub mod human_name;
pub mod patterns;
pub mod proper_noun;
pub mod text;

pub use date::{parse_flexible, DateHandler};
pub use human_name::HumanNameHandler;
pub use proper_noun::ProperNounHandler;
