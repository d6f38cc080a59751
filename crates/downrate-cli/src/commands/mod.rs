//! CLI command implementations

pub mod convert;
pub mod design;
pub mod json_output;
pub mod spectrum;
