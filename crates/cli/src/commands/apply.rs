use anyhow::{Context as _, Result, anyhow, bail};
use pathcopy_core::{Config, Context, PipelineOptions, PluginProvider};
use std::path::Path;
use tracing::{debug, info, warn};

use super::launch::LaunchCommand;
use crate::display::{join_paths, parent_and_file};
use crate::utils::resolve_plugin_ref;

/// Separator used when neither the pipeline nor the config sets one
pub const DEFAULT_SEPARATOR: &str = "\n";

pub fn apply_command(
    config: &Config,
    plugin_ref: &str,
    paths: &[String],
    dry_run: bool,
    execute: bool,
) -> Result<()> {
    let registry = config.build_registry()?;
    let id = resolve_plugin_ref(&registry, plugin_ref)?;
    registry
        .validate(&id)
        .with_context(|| format!("Command {} cannot be used", plugin_ref))?;
    let plugin = registry
        .get(&id)
        .ok_or_else(|| anyhow!("No command with id {}", id))?;

    let options = plugin
        .pipeline()
        .map(|pipeline| pipeline.options())
        .unwrap_or_default();
    let provider: &dyn PluginProvider = &registry;
    let ctx = Context::new(Some(provider));

    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        if !visible_for(&options, Path::new(path)) {
            warn!("Command {} is hidden for {}", plugin.description(), path);
            continue;
        }
        let (parent, file) = parent_and_file(path);
        if !plugin.enabled(parent, file, &ctx) {
            warn!("Command {} is disabled for {}", plugin.description(), path);
            continue;
        }
        let result = plugin.get_path(path, &ctx);
        debug!("{} -> {}", path, result);
        results.push(result);
    }

    let default_separator = config.paths_separator.as_deref().unwrap_or(DEFAULT_SEPARATOR);
    println!("{}", join_paths(&results, options.separator_or(default_separator)));

    if !(dry_run || execute) {
        return Ok(());
    }
    let Some(command) = LaunchCommand::from_options(&options, &results)? else {
        info!("Command {} does not launch an executable", plugin.description());
        return Ok(());
    };

    if dry_run {
        println!("{}", command.to_shell_command());
        return Ok(());
    }

    let shell_cmd = command.to_shell_command();
    info!("Running: {}", shell_cmd);
    let status = command
        .execute()
        .with_context(|| format!("Failed to execute: {}", shell_cmd))?;
    if !status.success() {
        bail!("{} exited with {}", command.program, status);
    }
    Ok(())
}

/// Apply the pipeline's per-type visibility. Paths that do not exist
/// locally are treated as files.
fn visible_for(options: &PipelineOptions, path: &Path) -> bool {
    if path.is_dir() {
        options.show_for_folders
    } else {
        options.show_for_files
    }
}
