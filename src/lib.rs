//! Shared support for the `sift` binary.
//!
//! The menu engine and the selectable modes live in their own crates; this
//! crate only carries the pieces the binary itself needs, directory
//! resolution and logging setup.

pub mod app_dirs;
pub mod logging;
