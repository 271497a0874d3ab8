use anyhow::{Result, anyhow};
use pathcopy_core::{PluginId, PluginRegistry};

/// Resolve a command given on the command line, either by id or by its
/// description (case-insensitive).
pub fn resolve_plugin_ref(registry: &PluginRegistry, reference: &str) -> Result<PluginId> {
    if let Ok(id) = reference.parse::<PluginId>() {
        if registry.contains(&id) {
            return Ok(id);
        }
        return Err(anyhow!("No command with id {}", id));
    }

    registry
        .find_by_description(reference)
        .map(|plugin| plugin.id())
        .ok_or_else(|| anyhow!("No command named '{}'", reference))
}
