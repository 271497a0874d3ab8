//! Elements that delegate to other commands

use tracing::{debug, warn};

use super::validation::ValidationContext;
use crate::error::{Error, Result};
use crate::interfaces::{Context, PluginProvider};
use crate::types::PluginId;

/// Replace `path` with the output of command `id`. Without a provider, if
/// the command is gone, or if it is already running further up the chain,
/// the path is left as is.
pub fn apply_plugin(id: &PluginId, path: &mut String, ctx: &Context<'_>) {
    if ctx.is_active(id) {
        warn!("Command {} is already running, reference ignored", id);
        return;
    }
    let Some(provider) = ctx.plugins else {
        debug!("No plugin provider, skipping command {}", id);
        return;
    };
    match provider.resolve_plugin(id) {
        Some(plugin) => *path = plugin.get_path(path, ctx),
        None => warn!("Command {} not found, path unchanged", id),
    }
}

/// Whether command `id` is enabled for `file`. A missing command, or one
/// already running further up the chain, disables the element; a missing
/// provider does not.
pub fn plugin_enabled(id: &PluginId, parent_path: &str, file: &str, ctx: &Context<'_>) -> bool {
    if ctx.is_active(id) {
        debug!("Command {} refers back to itself, disabled", id);
        return false;
    }
    let Some(provider) = ctx.plugins else {
        return true;
    };
    provider
        .resolve_plugin(id)
        .is_some_and(|plugin| plugin.enabled(parent_path, file, ctx))
}

/// Check that command `id` resolves and, when it is backed by a pipeline,
/// that the nested pipeline is valid and does not lead back to a command
/// already on the chain in `visited`.
pub fn validate_reference(
    id: &PluginId,
    plugins: Option<&dyn PluginProvider>,
    visited: &mut ValidationContext,
) -> Result<()> {
    let provider = plugins.ok_or(Error::NoPluginProvider(*id))?;
    let plugin = provider
        .resolve_plugin(id)
        .ok_or(Error::PluginNotFound(*id))?;
    let Some(nested) = plugin.pipeline() else {
        return Ok(());
    };

    visited.enter(*id)?;
    let result = nested
        .validate(plugins, visited)
        .map_err(|source| Error::InvalidNestedPipeline {
            plugin: *id,
            source: Box::new(source),
        });
    visited.leave(id);
    result
}
