//! junction-net — compile junction descriptions into a road network.
//!
//! Reads a central junction (and optionally its neighbors) from JSON, writes
//! the intermediate node/edge/connection files to a working directory, and
//! runs `netconvert` on them.
//!
//! ```text
//! junction-net --network data/network.json --work-dir out
//! junction-net --central data/central.json --neighbor A=a.json --neighbor B=b.json
//! RUST_LOG=debug junction-net --network data/network.json --node-table
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jc_compose::NetworkComposer;
use jc_core::{NetworkDescription, load_network_json, parse_junction, parse_neighbor};
use jc_emit::{
    CompilerConfig, DEFAULT_OUTPUT, Netconvert, NetworkGenerator, OutputTarget,
    load_compiler_config,
};

#[derive(Parser)]
#[command(name = "junction-net")]
#[command(about = "Compile junction descriptions into a road network")]
struct Cli {
    /// Central junction plus neighbors in one JSON file
    #[arg(long, conflicts_with = "central", required_unless_present = "central")]
    network: Option<PathBuf>,

    /// Central junction as a bare JSON array of approaches
    #[arg(long)]
    central: Option<PathBuf>,

    /// Neighbor junction as ID=FILE, ID being a central approach node ("A", "B", …)
    #[arg(long = "neighbor", value_name = "ID=FILE", requires = "central")]
    neighbors: Vec<String>,

    /// Directory for the intermediate files
    #[arg(long, default_value = ".")]
    work_dir: PathBuf,

    /// Compiled network: a bare file name goes into the working directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: String,

    /// Compiler settings (JSON)
    #[arg(long)]
    compiler_config: Option<PathBuf>,

    /// Override the netconvert binary
    #[arg(long)]
    netconvert: Option<PathBuf>,

    /// Kill netconvert after this many seconds
    #[arg(long)]
    timeout: Option<f64>,

    /// Open the result in netedit
    #[arg(long)]
    open_editor: bool,

    /// Also write nodes.csv
    #[arg(long)]
    node_table: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let description = load_description(&cli)?;
    let config = compiler_config(&cli)?;
    let output = output_target(&cli.output);

    let generated = NetworkGenerator::new(Netconvert::new(config), &cli.work_dir)
        .output(output)
        .export_node_table(cli.node_table)
        .generate(&NetworkComposer::from_description(description))
        .context("network generation failed")?;

    info!(
        nodes = generated.graph.node_count(),
        edges = generated.graph.edge_count(),
        connections = generated.graph.connection_count(),
        work_dir = %cli.work_dir.display(),
        "intermediate files written"
    );

    match &generated.compiled {
        Ok(path) => {
            println!("{}", path.display());
            Ok(())
        }
        Err(e) => bail!(
            "{e}; intermediate files kept in {}",
            cli.work_dir.display()
        ),
    }
}

// ── Inputs ────────────────────────────────────────────────────────────────────

fn load_description(cli: &Cli) -> Result<NetworkDescription> {
    if let Some(path) = &cli.network {
        return load_network_json(path).with_context(|| format!("loading {}", path.display()));
    }
    let Some(path) = &cli.central else {
        bail!("either --network or --central is required");
    };

    let central = parse_junction(&read(path)?)
        .with_context(|| format!("parsing {}", path.display()))?;

    let mut description = NetworkDescription { central, ..NetworkDescription::default() };
    for arg in &cli.neighbors {
        let Some((id, file)) = arg.split_once('=') else {
            bail!("--neighbor expects ID=FILE, got {arg:?}");
        };
        let file = Path::new(file);
        let neighbor = parse_neighbor(id, &read(file)?)
            .with_context(|| format!("parsing neighbor {id} from {}", file.display()))?;
        description.neighbors.insert(id.to_owned(), neighbor);
    }
    Ok(description)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn compiler_config(cli: &Cli) -> Result<CompilerConfig> {
    let mut config = match &cli.compiler_config {
        Some(path) => load_compiler_config(path)?,
        None => CompilerConfig::default(),
    };
    if let Some(bin) = &cli.netconvert {
        config.netconvert = bin.clone();
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(secs);
    }
    config.open_editor |= cli.open_editor;
    Ok(config)
}

fn output_target(arg: &str) -> OutputTarget {
    let path = Path::new(arg);
    if path.components().count() > 1 || path.is_absolute() {
        OutputTarget::Path(path.to_owned())
    } else {
        OutputTarget::FileName(arg.to_owned())
    }
}
