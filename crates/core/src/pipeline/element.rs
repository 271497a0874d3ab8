//! The pipeline element kinds and their dispatch

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::host;
use super::plugins;
use super::regex::{RegexSpec, replace_all};
use super::stack::{PopDestination, PushSource};
use super::text;
use super::validation::ValidationContext;
use crate::error::Result;
use crate::interfaces::{Context, PluginProvider};
use crate::types::{PipelineOptions, PluginId, ValueStack};

/// One step of a pipeline.
///
/// Elements carry only their construction parameters and are never mutated
/// after construction (regex patterns are compiled lazily behind a
/// one-time initialization guard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineElement {
    /// Resolve the path if it is a symbolic link or junction
    FollowSymlink,
    Quotes,
    /// Quote only paths containing spaces
    OptionalQuotes,
    EmailLinks,
    EncodeUriWhitespace,
    EncodeUriChars,
    BackToForwardSlashes,
    ForwardToBackslashes,
    RemoveFileExt,
    FindReplace {
        old_value: String,
        new_value: String,
    },
    Regex {
        regex: RegexSpec,
        replacement: String,
    },
    UnexpandEnvironmentStrings,
    InjectDriveLabel,
    CopyNPathParts {
        num_parts: usize,
        first: bool,
    },
    ApplyPlugin {
        plugin: PluginId,
    },
    ApplyPipelinePlugin {
        plugin: PluginId,
    },
    PushToStack {
        source: PushSource,
    },
    PopFromStack {
        destination: PopDestination,
    },
    SwapStackValues,
    DuplicateStackValue,
    PathsSeparator {
        separator: String,
    },
    RecursiveCopy,
    Executable {
        executable: String,
    },
    ExecutableWithFilelist {
        executable: String,
    },
    CommandLine {
        executable: String,
        arguments: String,
        use_filelist: bool,
    },
    Visibility {
        files: bool,
        folders: bool,
    },
}

impl PipelineElement {
    /// Regex replacement element
    pub fn regex(pattern: impl Into<String>, replacement: impl Into<String>, ignore_case: bool) -> Self {
        PipelineElement::Regex {
            regex: RegexSpec::new(pattern, ignore_case),
            replacement: replacement.into(),
        }
    }

    pub fn find_replace(old_value: impl Into<String>, new_value: impl Into<String>) -> Self {
        PipelineElement::FindReplace {
            old_value: old_value.into(),
            new_value: new_value.into(),
        }
    }

    pub fn push(source: PushSource) -> Self {
        PipelineElement::PushToStack { source }
    }

    pub fn pop(destination: PopDestination) -> Self {
        PipelineElement::PopFromStack { destination }
    }

    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineElement::FollowSymlink => "follow_symlink",
            PipelineElement::Quotes => "quotes",
            PipelineElement::OptionalQuotes => "optional_quotes",
            PipelineElement::EmailLinks => "email_links",
            PipelineElement::EncodeUriWhitespace => "encode_uri_whitespace",
            PipelineElement::EncodeUriChars => "encode_uri_chars",
            PipelineElement::BackToForwardSlashes => "back_to_forward_slashes",
            PipelineElement::ForwardToBackslashes => "forward_to_backslashes",
            PipelineElement::RemoveFileExt => "remove_file_ext",
            PipelineElement::FindReplace { .. } => "find_replace",
            PipelineElement::Regex { .. } => "regex",
            PipelineElement::UnexpandEnvironmentStrings => "unexpand_environment_strings",
            PipelineElement::InjectDriveLabel => "inject_drive_label",
            PipelineElement::CopyNPathParts { .. } => "copy_n_path_parts",
            PipelineElement::ApplyPlugin { .. } => "apply_plugin",
            PipelineElement::ApplyPipelinePlugin { .. } => "apply_pipeline_plugin",
            PipelineElement::PushToStack { .. } => "push_to_stack",
            PipelineElement::PopFromStack { .. } => "pop_from_stack",
            PipelineElement::SwapStackValues => "swap_stack_values",
            PipelineElement::DuplicateStackValue => "duplicate_stack_value",
            PipelineElement::PathsSeparator { .. } => "paths_separator",
            PipelineElement::RecursiveCopy => "recursive_copy",
            PipelineElement::Executable { .. } => "executable",
            PipelineElement::ExecutableWithFilelist { .. } => "executable_with_filelist",
            PipelineElement::CommandLine { .. } => "command_line",
            PipelineElement::Visibility { .. } => "visibility",
        }
    }

    /// Transform `path` without access to the value stack.
    /// Stack and option elements do nothing here.
    pub fn modify_path(&self, path: &mut String, ctx: &Context<'_>) {
        match self {
            PipelineElement::FollowSymlink => host::follow_symlink(path, ctx.system),
            PipelineElement::Quotes => text::quote(path),
            PipelineElement::OptionalQuotes => text::quote_if_spaced(path),
            PipelineElement::EmailLinks => text::email_link(path),
            PipelineElement::EncodeUriWhitespace => {
                text::percent_encode(path, text::is_uri_whitespace)
            }
            PipelineElement::EncodeUriChars => text::percent_encode(path, text::is_uri_reserved),
            PipelineElement::BackToForwardSlashes => text::replace_char(path, '\\', '/'),
            PipelineElement::ForwardToBackslashes => text::replace_char(path, '/', '\\'),
            PipelineElement::RemoveFileExt => text::remove_file_ext(path),
            PipelineElement::FindReplace {
                old_value,
                new_value,
            } => text::find_replace(path, old_value, new_value),
            PipelineElement::Regex { regex, replacement } => {
                if let Some(re) = regex.compiled() {
                    *path = replace_all(re, path, replacement);
                }
            }
            PipelineElement::UnexpandEnvironmentStrings => {
                host::unexpand_environment_strings(path, ctx.system)
            }
            PipelineElement::InjectDriveLabel => host::inject_drive_label(path, ctx.system),
            PipelineElement::CopyNPathParts { num_parts, first } => {
                text::copy_n_path_parts(path, *num_parts, *first)
            }
            PipelineElement::ApplyPlugin { plugin }
            | PipelineElement::ApplyPipelinePlugin { plugin } => {
                plugins::apply_plugin(plugin, path, ctx)
            }
            PipelineElement::PushToStack { .. }
            | PipelineElement::PopFromStack { .. }
            | PipelineElement::SwapStackValues
            | PipelineElement::DuplicateStackValue
            | PipelineElement::PathsSeparator { .. }
            | PipelineElement::RecursiveCopy
            | PipelineElement::Executable { .. }
            | PipelineElement::ExecutableWithFilelist { .. }
            | PipelineElement::CommandLine { .. }
            | PipelineElement::Visibility { .. } => {}
        }
    }

    /// Transform `path` with access to the run's value stack
    pub fn modify_path_with_stack(&self, path: &mut String, stack: &mut ValueStack, ctx: &Context<'_>) {
        match self {
            PipelineElement::PushToStack { source } => stack.push(source.value_for(path)),
            PipelineElement::PopFromStack { destination } => match stack.pop() {
                Some(value) => destination.apply(path, value),
                None => trace!("Pop on empty stack ignored"),
            },
            PipelineElement::SwapStackValues => {
                if !stack.swap_top() {
                    trace!("Swap needs two stack values, ignored");
                }
            }
            PipelineElement::DuplicateStackValue => {
                if !stack.duplicate_top() {
                    trace!("Duplicate on empty stack ignored");
                }
            }
            _ => self.modify_path(path, ctx),
        }
    }

    pub fn modify_options(&self, options: &mut PipelineOptions) {
        match self {
            PipelineElement::PathsSeparator { separator } => {
                options.paths_separator = separator.clone();
            }
            PipelineElement::RecursiveCopy => options.copy_paths_recursively = true,
            PipelineElement::Executable { executable } => {
                options.executable = executable.clone();
                options.use_filelist = false;
            }
            PipelineElement::ExecutableWithFilelist { executable } => {
                options.executable = executable.clone();
                options.use_filelist = true;
            }
            PipelineElement::CommandLine {
                executable,
                arguments,
                use_filelist,
            } => {
                options.executable = executable.clone();
                options.arguments = arguments.clone();
                options.use_filelist = *use_filelist;
            }
            PipelineElement::Visibility { files, folders } => {
                options.show_for_files = *files;
                options.show_for_folders = *folders;
            }
            _ => {}
        }
    }

    pub fn should_be_enabled_for(&self, parent_path: &str, file: &str, ctx: &Context<'_>) -> bool {
        match self {
            PipelineElement::Regex { regex, .. } => regex.is_valid(),
            PipelineElement::ApplyPlugin { plugin }
            | PipelineElement::ApplyPipelinePlugin { plugin } => {
                plugins::plugin_enabled(plugin, parent_path, file, ctx)
            }
            _ => true,
        }
    }

    /// Validate the element. Only command references can be invalid.
    pub fn validate(
        &self,
        plugins: Option<&dyn PluginProvider>,
        visited: &mut ValidationContext,
    ) -> Result<()> {
        match self {
            PipelineElement::ApplyPlugin { plugin }
            | PipelineElement::ApplyPipelinePlugin { plugin } => {
                plugins::validate_reference(plugin, plugins, visited)
            }
            _ => Ok(()),
        }
    }
}
