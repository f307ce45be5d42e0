//! The `NetworkCompiler` trait and the `netconvert` process adapter.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::{CompilerConfig, ExternalToolError, IntermediateFiles};

/// Turns the three intermediate files into a compiled network.
///
/// The generator only talks to the external tool through this trait, so
/// everything up to and including file emission runs without the binary
/// installed.
pub trait NetworkCompiler {
    /// Compile `files` into `output` and return the path of the result.
    ///
    /// Must not remove or modify the intermediate files.
    fn compile(&self, files: &IntermediateFiles, output: &Path) -> Result<PathBuf, ExternalToolError>;
}

impl<C: NetworkCompiler + ?Sized> NetworkCompiler for &C {
    fn compile(&self, files: &IntermediateFiles, output: &Path) -> Result<PathBuf, ExternalToolError> {
        (**self).compile(files, output)
    }
}

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs the `netconvert` command-line tool as a child process.
#[derive(Clone, Debug, Default)]
pub struct Netconvert {
    config: CompilerConfig,
}

impl Netconvert {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// The full command line, without spawning it.
    pub fn command(&self, files: &IntermediateFiles, output: &Path) -> Command {
        let mut cmd = Command::new(&self.config.netconvert);
        if self.config.verbose {
            cmd.arg("-v");
        }
        cmd.arg(file_arg("--node-files", &files.nodes))
            .arg(file_arg("--edge-files", &files.edges))
            .arg(file_arg("--connection-files", &files.connections))
            .arg(file_arg("--output-file", output))
            .args(&self.config.extra_args);
        cmd
    }

    fn tool(&self) -> String {
        self.config.netconvert.display().to_string()
    }

    fn wait(&self, mut child: Child) -> Result<ExitStatus, ExternalToolError> {
        let tool = self.tool();
        let Some(limit) = self.config.timeout() else {
            return child.wait().map_err(|source| ExternalToolError::Wait { tool, source });
        };

        let started = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {}
                Err(source) => return Err(ExternalToolError::Wait { tool, source }),
            }
            if started.elapsed() >= limit {
                // The child may exit between try_wait and kill.
                if let Err(e) = child.kill() {
                    debug!(tool = %tool, error = %e, "kill after timeout failed");
                }
                if let Err(e) = child.wait() {
                    debug!(tool = %tool, error = %e, "reaping killed compiler failed");
                }
                return Err(ExternalToolError::TimedOut { tool, after: limit });
            }
            thread::sleep(POLL_INTERVAL.min(limit.saturating_sub(started.elapsed())));
        }
    }

    /// Launch the editor on `output` without waiting for it.  The child is
    /// never reaped; it outlives the compile call.
    fn open_editor(&self, output: &Path) {
        match Command::new(&self.config.netedit).arg(output).spawn() {
            Ok(child) => debug!(pid = child.id(), output = %output.display(), "opened editor"),
            Err(e) => warn!(
                editor = %self.config.netedit.display(),
                error = %e,
                "could not open editor"
            ),
        }
    }
}

impl NetworkCompiler for Netconvert {
    fn compile(&self, files: &IntermediateFiles, output: &Path) -> Result<PathBuf, ExternalToolError> {
        let mut cmd = self.command(files, output);
        debug!(command = ?cmd, "running network compiler");

        let child = cmd
            .spawn()
            .map_err(|source| ExternalToolError::Spawn { tool: self.tool(), source })?;
        let status = self.wait(child)?;
        if !status.success() {
            return Err(ExternalToolError::Failed { tool: self.tool(), code: status.code() });
        }

        if self.config.open_editor {
            self.open_editor(output);
        }
        Ok(output.to_owned())
    }
}

fn file_arg(flag: &str, path: &Path) -> String {
    format!("{flag}={}", path.display())
}
