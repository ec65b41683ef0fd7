//! Data models shared across field handlers.

pub mod config;
pub mod value;
