use serde::{Deserialize, Serialize};

/// Global formatting and launch settings gathered from a pipeline.
///
/// Elements only ever write these fields; the last writer in pipeline order
/// wins, except `copy_paths_recursively` which can only be switched on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct PipelineOptions {
    /// Separator between copied paths; empty means the caller's default
    pub paths_separator: String,
    pub copy_paths_recursively: bool,
    /// Program to launch with the results; empty means copy only
    pub executable: String,
    pub arguments: String,
    pub use_filelist: bool,
    pub show_for_files: bool,
    pub show_for_folders: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            paths_separator: String::new(),
            copy_paths_recursively: false,
            executable: String::new(),
            arguments: String::new(),
            use_filelist: false,
            show_for_files: true,
            show_for_folders: true,
        }
    }
}

impl PipelineOptions {
    /// Separator to use, falling back to `default` when none was set
    pub fn separator_or<'a>(&'a self, default: &'a str) -> &'a str {
        if self.paths_separator.is_empty() {
            default
        } else {
            &self.paths_separator
        }
    }

    pub fn launches_executable(&self) -> bool {
        !self.executable.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_show_everywhere() {
        let options = PipelineOptions::default();
        assert!(options.show_for_files);
        assert!(options.show_for_folders);
        assert!(!options.copy_paths_recursively);
        assert!(!options.launches_executable());
        assert_eq!(options.separator_or("\n"), "\n");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options: PipelineOptions =
            serde_json::from_str(r#"{ "paths_separator": ";" }"#).unwrap();
        assert_eq!(options.separator_or("\n"), ";");
        assert!(options.show_for_folders);
    }
}
