//! Command (plugin) interfaces
//!
//! A command turns a selected path into the text that gets copied. Pipelines
//! refer to commands only by [`PluginId`]; the provider resolves them on use.

use super::Context;
use crate::{pipeline::Pipeline, types::PluginId};

/// A command that can produce a path representation
pub trait Plugin: Send + Sync {
    fn id(&self) -> PluginId;

    /// Human-readable name shown to users
    fn description(&self) -> &str;

    /// Compute this command's representation of `path`
    fn get_path(&self, path: &str, ctx: &Context<'_>) -> String;

    /// Whether the command applies to `file` located in `parent_path`
    fn enabled(&self, _parent_path: &str, _file: &str, _ctx: &Context<'_>) -> bool {
        true
    }

    /// The pipeline backing this command, if it is defined by one.
    /// Used to validate nested references.
    fn pipeline(&self) -> Option<&Pipeline> {
        None
    }
}

/// Capability to look up commands by id
pub trait PluginProvider {
    fn resolve_plugin(&self, id: &PluginId) -> Option<&dyn Plugin>;
}
