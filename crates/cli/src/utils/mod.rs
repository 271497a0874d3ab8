pub mod config;
pub mod parser;

pub use config::load_config;
pub use parser::resolve_plugin_ref;
