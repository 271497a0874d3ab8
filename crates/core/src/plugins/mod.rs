//! Command implementations and the registry that resolves them

pub mod builtin;
pub mod pipeline_plugin;
pub mod registry;

pub use builtin::{BuiltinKind, BuiltinPlugin};
pub use pipeline_plugin::PipelinePlugin;
pub use registry::PluginRegistry;
