//! Cycle detection state for pipeline validation

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::types::PluginId;

/// Commands on the current chain of nested pipeline references.
///
/// Created fresh for each top-level validation and threaded by reference
/// through nested ones. Must not be shared between concurrent validations.
#[derive(Debug, Default, Clone)]
pub struct ValidationContext {
    visited: HashSet<PluginId>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for validating the pipeline of command `id` itself
    pub fn for_plugin(id: PluginId) -> Self {
        let mut context = Self::new();
        context.visited.insert(id);
        context
    }

    /// Record that validation descends into command `id`.
    /// Fails if `id` is already on the chain.
    pub fn enter(&mut self, id: PluginId) -> Result<()> {
        if self.visited.insert(id) {
            Ok(())
        } else {
            Err(Error::CycleDetected(id))
        }
    }

    pub fn leave(&mut self, id: &PluginId) {
        self.visited.remove(id);
    }

    pub fn contains(&self, id: &PluginId) -> bool {
        self.visited.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}
