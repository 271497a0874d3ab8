//! Command registry
//!
//! Owns every command in an arena and resolves them by id. Pipelines only
//! ever hold ids, so commands referring to each other never own each other.

use std::collections::HashMap;

use tracing::debug;

use super::{BuiltinPlugin, PipelinePlugin};
use crate::{
    error::{Error, Result},
    interfaces::{Plugin, PluginProvider},
    pipeline::ValidationContext,
    types::PluginId,
};

/// Registry of available commands, in registration order
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
    index: HashMap<PluginId, usize>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field(
                "plugins",
                &self.plugins.iter().map(|p| p.id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in commands
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for plugin in BuiltinPlugin::all() {
            // Built-in ids are distinct, registration cannot fail
            let _ = registry.register(Box::new(plugin));
        }
        registry
    }

    /// Register a command. Ids must be unique.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> Result<()> {
        let id = plugin.id();
        if self.index.contains_key(&id) {
            return Err(Error::DuplicatePlugin(id));
        }
        debug!("Registering command {} ({})", id, plugin.description());
        self.index.insert(id, self.plugins.len());
        self.plugins.push(plugin);
        Ok(())
    }

    /// Register a pipeline-backed command
    pub fn register_pipeline(&mut self, plugin: PipelinePlugin) -> Result<()> {
        self.register(Box::new(plugin))
    }

    /// Get a command by id
    pub fn get(&self, id: &PluginId) -> Option<&dyn Plugin> {
        self.index.get(id).map(|&slot| self.plugins[slot].as_ref())
    }

    /// Check if a command exists
    pub fn contains(&self, id: &PluginId) -> bool {
        self.index.contains_key(id)
    }

    /// Find a command by its description, ignoring case
    pub fn find_by_description(&self, description: &str) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|p| p.description().eq_ignore_ascii_case(description))
            .map(|p| p.as_ref())
    }

    /// All commands in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Plugin> {
        self.plugins.iter().map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Validate the pipeline of command `id` against this registry.
    /// Commands that are not pipeline-backed are always valid.
    pub fn validate(&self, id: &PluginId) -> Result<()> {
        let plugin = self.get(id).ok_or(Error::PluginNotFound(*id))?;
        match plugin.pipeline() {
            Some(pipeline) => {
                let mut visited = ValidationContext::for_plugin(*id);
                pipeline.validate(Some(self), &mut visited)
            }
            None => Ok(()),
        }
    }

    /// Validate every pipeline-backed command, returning the failures
    pub fn validate_all(&self) -> Vec<(PluginId, Error)> {
        self.plugins
            .iter()
            .filter(|p| p.pipeline().is_some())
            .filter_map(|p| self.validate(&p.id()).err().map(|e| (p.id(), e)))
            .collect()
    }
}

impl PluginProvider for PluginRegistry {
    fn resolve_plugin(&self, id: &PluginId) -> Option<&dyn Plugin> {
        self.get(id)
    }
}
