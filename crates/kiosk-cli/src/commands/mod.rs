//! CLI command implementations.

pub mod assets;
pub mod serve;

pub use assets::execute as assets_execute;
pub use serve::execute as serve_execute;
