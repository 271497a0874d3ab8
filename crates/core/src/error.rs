use std::io;

use crate::types::PluginId;

/// Errors that can occur during pathcopy operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Referenced command not found: {0}")]
    PluginNotFound(PluginId),

    #[error("Command {0} references itself through its pipeline")]
    CycleDetected(PluginId),

    #[error("Nested pipeline of command {plugin} is invalid: {source}")]
    InvalidNestedPipeline {
        plugin: PluginId,
        #[source]
        source: Box<Error>,
    },

    #[error("No plugin provider available to resolve command {0}")]
    NoPluginProvider(PluginId),

    #[error("Duplicate command id: {0}")]
    DuplicatePlugin(PluginId),

    #[error("Invalid command id: {0}")]
    InvalidPluginId(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error means the pipeline itself is unusable, as opposed to
    /// a failure loading or saving settings.
    pub fn is_invalid_pipeline(&self) -> bool {
        matches!(
            self,
            Error::PluginNotFound(_)
                | Error::CycleDetected(_)
                | Error::InvalidNestedPipeline { .. }
                | Error::NoPluginProvider(_)
        )
    }

    /// Innermost cause of a nested pipeline failure.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::InvalidNestedPipeline { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type alias for pathcopy operations
pub type Result<T> = std::result::Result<T, Error>;
