use crate::{
    error::{Error, Result},
    pipeline::Pipeline,
    plugins::{PipelinePlugin, PluginRegistry},
    types::PluginId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names searched for, in order, in each directory
pub const CONFIG_FILE_NAMES: [&str; 2] = [".pathcopy.json", "pathcopy.json"];

/// A user-defined command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CommandConfig {
    pub id: PluginId,
    pub description: String,
    #[serde(default)]
    pub pipeline: Pipeline,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Separator used when a pipeline does not set its own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths_separator: Option<String>,

    #[serde(default)]
    pub plugins: Vec<CommandConfig>,

    // Where the config was loaded from (internal, not exposed in JSON)
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config {}: {e}", path.display())))?;
        config.source = Some(path.to_path_buf());
        debug!(
            "Loaded {} commands from {}",
            config.plugins.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        debug!("Saved {} commands to {}", self.plugins.len(), path.display());
        Ok(())
    }

    /// Walk up from `start_path` and return the first config file found
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Load the nearest config above `start_path`, or an empty one
    pub fn discover(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => Self::load_from_file(&path),
            None => {
                debug!("No config found above {}", start_path.display());
                Ok(Self::default())
            }
        }
    }

    /// Build a registry with the built-in commands plus every configured
    /// one. Fails on duplicate ids.
    pub fn build_registry(&self) -> Result<PluginRegistry> {
        let mut registry = PluginRegistry::with_builtins();
        for command in &self.plugins {
            registry.register_pipeline(PipelinePlugin::new(
                command.id,
                command.description.clone(),
                command.pipeline.clone(),
            ))?;
        }
        Ok(registry)
    }

    /// Check ids are unique and every configured pipeline is valid.
    /// Reports the first problem found.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = self.plugins.iter().find(|c| !seen.insert(c.id)) {
            return Err(Error::DuplicatePlugin(duplicate.id));
        }

        let registry = self.build_registry()?;
        for command in &self.plugins {
            registry.validate(&command.id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{PipelineElement, PopDestination, PushSource};
    use crate::plugins::BuiltinKind;

    fn sample() -> Config {
        Config {
            paths_separator: Some(", ".to_string()),
            plugins: vec![CommandConfig {
                id: PluginId::from_u128(0x10),
                description: "Quoted unix path".to_string(),
                pipeline: Pipeline::new(vec![
                    PipelineElement::ApplyPlugin {
                        plugin: BuiltinKind::UnixPath.id(),
                    },
                    PipelineElement::push(PushSource::EntirePath),
                    PipelineElement::pop(PopDestination::EntirePath),
                    PipelineElement::Quotes,
                ]),
            }],
            source: None,
        }
    }

    #[test]
    fn test_config_serialization() {
        let config = sample();
        let json = serde_json::to_string_pretty(&config).unwrap();
        println!("Serialized config:\n{json}");

        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
        assert!(parsed.source.is_none());
    }

    #[test]
    fn test_build_registry_includes_builtins() {
        let registry = sample().build_registry().unwrap();
        assert_eq!(registry.len(), BuiltinKind::ALL.len() + 1);
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut config = sample();
        config.plugins.push(config.plugins[0].clone());
        assert!(matches!(config.validate(), Err(Error::DuplicatePlugin(_))));
    }

    #[test]
    fn test_find_config_file_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        sample().save_to_file(&dir.path().join("pathcopy.json")).unwrap();

        let found = Config::find_config_file(&nested).unwrap();
        assert_eq!(found, dir.path().join("pathcopy.json"));

        let loaded = Config::discover(&nested).unwrap();
        assert_eq!(loaded.plugins.len(), 1);
        assert_eq!(loaded.source.as_deref(), Some(found.as_path()));
    }

    #[test]
    fn test_save_to_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("pathcopy.json");
        assert!(matches!(sample().save_to_file(&path), Err(Error::IoError(_))));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".pathcopy.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load_from_file(&path), Err(Error::ConfigError(_))));
    }
}
