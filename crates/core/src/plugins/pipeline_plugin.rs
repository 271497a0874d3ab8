use tracing::trace;

use crate::{
    interfaces::{ActiveCommand, Context, Plugin},
    pipeline::Pipeline,
    types::PluginId,
};

/// A user-defined command whose output is produced by a pipeline
#[derive(Debug, Clone)]
pub struct PipelinePlugin {
    id: PluginId,
    description: String,
    pipeline: Pipeline,
}

impl PipelinePlugin {
    pub fn new(id: PluginId, description: impl Into<String>, pipeline: Pipeline) -> Self {
        Self {
            id,
            description: description.into(),
            pipeline,
        }
    }
}

impl Plugin for PipelinePlugin {
    fn id(&self) -> PluginId {
        self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    // The pipeline runs with this command on the active chain, so a nested
    // reference back to it is skipped instead of recursing.
    fn get_path(&self, path: &str, ctx: &Context<'_>) -> String {
        trace!("Running command {} on {}", self.id, path);
        let link = ActiveCommand::new(self.id, ctx.active);
        self.pipeline.apply(path, &ctx.within(&link))
    }

    fn enabled(&self, parent_path: &str, file: &str, ctx: &Context<'_>) -> bool {
        let link = ActiveCommand::new(self.id, ctx.active);
        self.pipeline
            .should_be_enabled_in(parent_path, file, &ctx.within(&link))
    }

    fn pipeline(&self) -> Option<&Pipeline> {
        Some(&self.pipeline)
    }
}
