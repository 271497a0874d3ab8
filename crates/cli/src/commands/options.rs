use anyhow::{Context, Result, anyhow};
use pathcopy_core::Config;

use crate::utils::resolve_plugin_ref;

pub fn options_command(config: &Config, plugin_ref: &str) -> Result<()> {
    let registry = config.build_registry()?;
    let id = resolve_plugin_ref(&registry, plugin_ref)?;
    let plugin = registry
        .get(&id)
        .ok_or_else(|| anyhow!("No command with id {}", id))?;

    let options = plugin
        .pipeline()
        .map(|pipeline| pipeline.options())
        .unwrap_or_default();
    let json = serde_json::to_string_pretty(&options).context("Failed to serialize options")?;
    println!("{json}");
    Ok(())
}
