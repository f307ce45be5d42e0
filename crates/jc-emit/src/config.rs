//! External compiler settings.
//!
//! Loaded from JSON; every field is optional:
//!
//! ```json
//! {
//!   "netconvert":   "/opt/sumo/bin/netconvert",
//!   "verbose":      false,
//!   "extra_args":   ["--tls.minor-left.max-speed=1"],
//!   "timeout_secs": 60,
//!   "open_editor":  true,
//!   "netedit":      "netedit"
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::{EmitError, EmitResult};

/// Forces protected left-turn phases at every signal.
pub const PROTECTED_LEFT_ARG: &str = "--tls.minor-left.max-speed=1";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Network compiler binary, looked up on `PATH` when relative.
    pub netconvert:   PathBuf,
    /// Pass `-v` to the compiler.
    pub verbose:      bool,
    /// Appended after the file arguments.
    pub extra_args:   Vec<String>,
    /// Kill the compiler after this many seconds.  `None` waits indefinitely.
    pub timeout_secs: Option<f64>,
    /// Open the compiled network in the editor after a successful run.
    pub open_editor:  bool,
    pub netedit:      PathBuf,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            netconvert:   PathBuf::from("netconvert"),
            verbose:      true,
            extra_args:   vec![PROTECTED_LEFT_ARG.to_owned()],
            timeout_secs: None,
            open_editor:  false,
            netedit:      PathBuf::from("netedit"),
        }
    }
}

impl CompilerConfig {
    pub fn with_timeout(mut self, secs: f64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Configured timeout.  Non-positive, non-finite, or values too large
    /// for a `Duration` disable it.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|s| *s > 0.0)
            .and_then(|s| Duration::try_from_secs_f64(s).ok())
    }
}

/// Load a [`CompilerConfig`] from a JSON file.
pub fn load_compiler_config(path: &Path) -> EmitResult<CompilerConfig> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|e| EmitError::CompilerConfig {
        path:   path.to_owned(),
        reason: e.to_string(),
    })
}
