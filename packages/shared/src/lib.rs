//! Utilities shared across the Hearth chat relay packages.

pub mod logger;
pub mod time;
