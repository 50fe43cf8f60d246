//! CLI command implementations.

pub mod animate;
pub mod common;
pub mod devices;
pub mod select;
pub mod version;
