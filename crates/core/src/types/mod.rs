pub mod options;
pub mod plugin_id;
pub mod value_stack;

// Re-export commonly used types
pub use options::PipelineOptions;
pub use plugin_id::PluginId;
pub use value_stack::ValueStack;
