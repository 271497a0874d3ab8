//! Workspace package hosting the cross-crate integration tests.
pub use pathcopy_core::*;
