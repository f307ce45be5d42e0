//! End-to-end generation: compose, write the intermediate files, compile.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use jc_compose::{JunctionGraph, NetworkComposer};
use jc_core::NetworkDescription;

use crate::csv::write_node_table;
use crate::xml::write_intermediate;
use crate::{
    CompilerConfig, EmitResult, ExternalToolError, IntermediateFiles, Netconvert, NetworkCompiler,
    OutputTarget, NODE_TABLE_FILE,
};

/// Result of one generation run.
///
/// The graph and the intermediate files are kept whatever the compiler
/// reported; [`NetworkGenerator::retry`] reruns only the compile step.
#[derive(Debug)]
pub struct GeneratedNetwork {
    pub graph:      JunctionGraph,
    pub files:      IntermediateFiles,
    pub node_table: Option<PathBuf>,
    /// Requested location of the compiled network.
    pub output:     PathBuf,
    pub compiled:   Result<PathBuf, ExternalToolError>,
}

impl GeneratedNetwork {
    pub fn is_success(&self) -> bool {
        self.compiled.is_ok()
    }
}

/// Fluent driver for one working directory.
///
/// # Example
///
/// ```rust,ignore
/// let generated = NetworkGenerator::new(Netconvert::default(), "./work")
///     .output(OutputTarget::FileName("junction.net.xml".into()))
///     .export_node_table(true)
///     .generate(&NetworkComposer::new(central))?;
///
/// if let Err(e) = &generated.compiled {
///     eprintln!("compiler failed: {e}; inputs kept in ./work");
/// }
/// ```
pub struct NetworkGenerator<C> {
    compiler:    C,
    working_dir: PathBuf,
    output:      OutputTarget,
    node_table:  bool,
}

impl<C: NetworkCompiler> NetworkGenerator<C> {
    pub fn new(compiler: C, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            compiler,
            working_dir: working_dir.into(),
            output:      OutputTarget::default(),
            node_table:  false,
        }
    }

    pub fn output(mut self, target: OutputTarget) -> Self {
        self.output = target;
        self
    }

    /// Also write `nodes.csv` next to the intermediate files.
    pub fn export_node_table(mut self, enabled: bool) -> Self {
        self.node_table = enabled;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn files(&self) -> IntermediateFiles {
        IntermediateFiles::in_dir(&self.working_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output.resolve(&self.working_dir)
    }

    /// Compose the network, write the intermediate files, and run the
    /// compiler.
    ///
    /// Configuration errors are returned before anything touches the disk.
    /// A compiler failure is not an error here; it is reported in
    /// [`GeneratedNetwork::compiled`].
    pub fn generate(&self, composer: &NetworkComposer) -> EmitResult<GeneratedNetwork> {
        let graph = composer.compose()?;

        fs::create_dir_all(&self.working_dir)?;
        let files = self.files();
        write_intermediate(&graph, &files)?;

        let node_table = if self.node_table {
            let path = self.working_dir.join(NODE_TABLE_FILE);
            write_node_table(&graph, &path)?;
            Some(path)
        } else {
            None
        };

        let output = self.output_path();
        let compiled = self.run_compiler(&files, &output);
        Ok(GeneratedNetwork { graph, files, node_table, output, compiled })
    }

    /// Run the compiler again on the files of an earlier run.
    pub fn retry<'a>(&self, network: &'a mut GeneratedNetwork) -> Result<&'a Path, &'a ExternalToolError> {
        network.compiled = self.run_compiler(&network.files, &network.output);
        network.compiled.as_deref()
    }

    fn run_compiler(&self, files: &IntermediateFiles, output: &Path) -> Result<PathBuf, ExternalToolError> {
        let result = self.compiler.compile(files, output);
        match &result {
            Ok(path) => info!(output = %path.display(), "network compiled"),
            Err(e) => warn!(
                error = %e,
                working_dir = %self.working_dir.display(),
                "network compiler failed; intermediate files kept"
            ),
        }
        result
    }
}

/// One-shot generation with the `netconvert` adapter.
pub fn generate_network(
    description: NetworkDescription,
    working_dir: &Path,
    output:      OutputTarget,
    config:      CompilerConfig,
) -> EmitResult<GeneratedNetwork> {
    NetworkGenerator::new(Netconvert::new(config), working_dir)
        .output(output)
        .generate(&NetworkComposer::from_description(description))
}
