use anyhow::{Context, Result};
use pathcopy_core::PipelineOptions;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Token in the configured arguments replaced by the copied paths
pub const FILES_PLACEHOLDER: &str = "%FILES%";

/// Program launched with the transformed paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Temporary file holding the paths, when the command uses a filelist
    pub filelist: Option<PathBuf>,
}

impl LaunchCommand {
    /// Build the launch command described by `options`, or `None` if the
    /// pipeline does not set an executable. With a filelist the paths are
    /// written one per line to a temporary file that outlives the process.
    pub fn from_options(options: &PipelineOptions, paths: &[String]) -> Result<Option<Self>> {
        if !options.launches_executable() {
            return Ok(None);
        }

        if !options.use_filelist {
            return Ok(Some(Self::new(&options.executable, &options.arguments, paths)));
        }

        let mut file = tempfile::Builder::new()
            .prefix("pathcopy-")
            .suffix(".txt")
            .tempfile()
            .context("Failed to create filelist")?;
        for path in paths {
            writeln!(file, "{path}").context("Failed to write filelist")?;
        }
        let (_, filelist) = file.keep().context("Failed to keep filelist")?;
        debug!("Wrote {} paths to {}", paths.len(), filelist.display());

        let inputs = vec![filelist.to_string_lossy().into_owned()];
        let mut command = Self::new(&options.executable, &options.arguments, &inputs);
        command.filelist = Some(filelist);
        Ok(Some(command))
    }

    /// Split `arguments` on whitespace and substitute every
    /// [`FILES_PLACEHOLDER`] token with `inputs`; without a placeholder the
    /// inputs are appended.
    pub fn new(program: &str, arguments: &str, inputs: &[String]) -> Self {
        let mut args = Vec::new();
        let mut substituted = false;
        for token in arguments.split_whitespace() {
            if token == FILES_PLACEHOLDER {
                args.extend(inputs.iter().cloned());
                substituted = true;
            } else {
                args.push(token.to_string());
            }
        }
        if !substituted {
            args.extend(inputs.iter().cloned());
        }

        Self {
            program: program.to_string(),
            args,
            filelist: None,
        }
    }

    pub fn to_shell_command(&self) -> String {
        let mut cmd = quote_arg(&self.program);
        for arg in &self.args {
            cmd.push(' ');
            cmd.push_str(&quote_arg(arg));
        }
        cmd
    }

    pub fn execute(&self) -> std::io::Result<ExitStatus> {
        Command::new(&self.program).args(&self.args).status()
    }
}

fn quote_arg(arg: &str) -> String {
    if arg.contains(' ') {
        format!("'{arg}'")
    } else {
        arg.to_string()
    }
}
