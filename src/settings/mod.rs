//! Configuration loading and resolution utilities.
//!
//! `load` is the primary entry point: it merges configuration files,
//! environment variables and CLI overrides into a [`ResolvedConfig`] that the
//! session driver consumes.

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::{ResolvedConfig, StartMode};
