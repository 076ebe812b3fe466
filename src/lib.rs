//! Grid Merge (workspace facade crate).
//!
//! Re-exports the workspace crates as `grid_merge::{core,input,term,types}`
//! and holds the shell configuration used by the binary.

pub mod config;

pub use grid_merge_core as core;
pub use grid_merge_input as input;
pub use grid_merge_term as term;
pub use grid_merge_types as types;

pub use config::ShellConfig;
