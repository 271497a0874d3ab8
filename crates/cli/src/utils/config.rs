use anyhow::{Context, Result};
use pathcopy_core::Config;
use std::path::Path;
use tracing::debug;

/// Load `explicit` if given, otherwise the nearest config above the
/// current directory. No config at all yields an empty one.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        debug!("Using config file: {}", path.display());
        return Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    Config::discover(&cwd).context("Failed to load config")
}
