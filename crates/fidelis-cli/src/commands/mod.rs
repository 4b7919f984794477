//! CLI command implementations.

pub mod accuracy;
pub mod common;
pub mod generate;
pub mod kernel;
pub mod params;
pub mod predict;
pub mod version;
