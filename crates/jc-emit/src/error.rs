//! Error types for jc-emit.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use jc_core::ConfigError;

/// Errors that abort emission.  Raised before the external compiler runs.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("compiler config {path}: {reason}")]
    CompilerConfig { path: PathBuf, reason: String },
}

/// Alias for `Result<T, EmitError>`.
pub type EmitResult<T> = Result<T, EmitError>;

/// Failure of the external network compiler.
///
/// Reported alongside the written intermediate files rather than as an
/// [`EmitError`]: the files stay on disk and the graph stays in memory, so
/// the call can be inspected or retried.
#[derive(Debug, Error)]
pub enum ExternalToolError {
    #[error("could not launch {tool}: {source}")]
    Spawn {
        tool:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("lost track of {tool}: {source}")]
    Wait {
        tool:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed with {}", exit_label(.code))]
    Failed { tool: String, code: Option<i32> },

    #[error("{tool} did not finish within {after:?} and was killed")]
    TimedOut { tool: String, after: Duration },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit status {c}"),
        None => "no exit status (terminated by signal)".to_owned(),
    }
}
