//! Interfaces between the pipeline engine and its host
//!
//! The engine never enumerates commands or touches the OS directly: commands
//! are resolved through a [`PluginProvider`] and OS lookups go through
//! [`SystemServices`]. Both travel together in a [`Context`].

pub mod plugin;
pub mod system;

pub use plugin::{Plugin, PluginProvider};
pub use system::{OsServices, SystemServices};

use crate::types::PluginId;

static OS_SERVICES: OsServices = OsServices;

/// One link of the chain of commands currently running, innermost first.
/// Each pipeline-backed command adds itself before running its pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ActiveCommand<'a> {
    id: PluginId,
    caller: Option<&'a ActiveCommand<'a>>,
}

impl<'a> ActiveCommand<'a> {
    pub fn new(id: PluginId, caller: Option<&'a ActiveCommand<'a>>) -> Self {
        Self { id, caller }
    }

    pub fn id(&self) -> PluginId {
        self.id
    }

    /// Whether `id` is this command or one of its callers
    pub fn contains(&self, id: &PluginId) -> bool {
        let mut link = Some(self);
        while let Some(current) = link {
            if current.id == *id {
                return true;
            }
            link = current.caller;
        }
        false
    }
}

/// Collaborators available to elements while a pipeline runs
#[derive(Clone, Copy)]
pub struct Context<'a> {
    /// Command lookup; `None` when the host cannot resolve commands
    pub plugins: Option<&'a dyn PluginProvider>,
    pub system: &'a dyn SystemServices,
    /// Commands being run around the current pipeline
    pub active: Option<&'a ActiveCommand<'a>>,
}

impl<'a> Context<'a> {
    /// Context backed by the real operating system
    pub fn new(plugins: Option<&'a dyn PluginProvider>) -> Self {
        Self {
            plugins,
            system: &OS_SERVICES,
            active: None,
        }
    }

    pub fn with_system(mut self, system: &'a dyn SystemServices) -> Self {
        self.system = system;
        self
    }

    /// Context for running the pipeline of the command in `link`
    pub fn within<'b>(&self, link: &'b ActiveCommand<'b>) -> Context<'b>
    where
        'a: 'b,
    {
        Context {
            plugins: self.plugins,
            system: self.system,
            active: Some(link),
        }
    }

    /// Whether command `id` is already running further up the chain
    pub fn is_active(&self, id: &PluginId) -> bool {
        self.active.is_some_and(|link| link.contains(id))
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("plugins", &self.plugins.is_some())
            .field("active", &self.active.map(|link| link.id()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_chain_lookup() {
        let outer = ActiveCommand::new(PluginId::from_u128(1), None);
        let inner = ActiveCommand::new(PluginId::from_u128(2), Some(&outer));

        let ctx = Context::new(None);
        assert!(!ctx.is_active(&PluginId::from_u128(1)));

        let nested = ctx.within(&inner);
        assert!(nested.is_active(&PluginId::from_u128(1)));
        assert!(nested.is_active(&PluginId::from_u128(2)));
        assert!(!nested.is_active(&PluginId::from_u128(3)));
    }
}
