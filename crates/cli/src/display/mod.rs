pub mod formatter;

pub use formatter::{format_plugin_line, join_paths, parent_and_file};
