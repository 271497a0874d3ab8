//! pathcopy - configurable representations of file paths
//!
//! This crate provides:
//! - A pipeline engine that rewrites a path through an ordered list of
//!   elements (replacements, regexes, quoting, a value stack, nested commands)
//! - Validation of pipelines, including cycles between commands
//! - A registry of built-in and user-defined commands and its JSON config
pub mod config;
pub mod error;
pub mod interfaces;
pub mod pipeline;
pub mod plugins;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use config::Config;
pub use interfaces::{ActiveCommand, Context, OsServices, Plugin, PluginProvider, SystemServices};
pub use pipeline::{
    Pipeline, PipelineElement, PopDestination, PushSource, RegexSpec, ValidationContext,
};
pub use plugins::{BuiltinKind, BuiltinPlugin, PipelinePlugin, PluginRegistry};
