use anyhow::{Result, bail};
use pathcopy_core::Config;
use tracing::info;

use crate::utils::resolve_plugin_ref;

pub fn validate_command(config: &Config, plugin_ref: Option<&str>) -> Result<()> {
    let registry = config.build_registry()?;

    let failures = match plugin_ref {
        Some(reference) => {
            let id = resolve_plugin_ref(&registry, reference)?;
            registry
                .validate(&id)
                .err()
                .map(|e| vec![(id, e)])
                .unwrap_or_default()
        }
        None => registry.validate_all(),
    };

    if failures.is_empty() {
        info!("Validated {} configured commands", config.plugins.len());
        println!("✅ All commands are valid");
        return Ok(());
    }

    for (id, error) in &failures {
        let description = registry.get(id).map(|p| p.description()).unwrap_or("?");
        eprintln!("❌ {} {}: {}", id, description, error);
    }
    bail!("{} invalid command(s)", failures.len())
}
