//! layermap-render: Apply a saved mapping configuration to a JSON dataset
//!
//! Writes one JSON object per record: `{"index": 0, "layers": [...]}`.
//!
//! Usage:
//!   layermap-render data.json --config configs.json --name products
//!
//!   # Read data from stdin
//!   cat data.json | layermap-render --config configs.json --name products --compact

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use layermap::{ConfigStore, DataSource, KeyConfig, Workspace};
use std::io::{stdin, Read};

#[derive(Parser, Debug)]
#[command(name = "layermap-render")]
#[command(about = "Render layer text for every record using a saved configuration", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Config store file written by the plugin
    #[arg(long)]
    config: String,

    /// Name of the saved configuration to apply
    #[arg(long)]
    name: String,

    /// Maximum nesting depth for key discovery (default: 3)
    #[arg(long)]
    max_depth: Option<usize>,

    /// One JSON object per line instead of pretty-printing
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let args = Args::parse();

    let store = ConfigStore::load(&args.config)?;
    let saved = store.get(&args.name)?;

    let mut config = KeyConfig::default();
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }

    let (source, content) = match &args.input {
        Some(path) => (
            DataSource::File,
            std::fs::read(path).context(format!("Failed to read {}", path))?,
        ),
        None => {
            let mut content = Vec::new();
            stdin()
                .read_to_end(&mut content)
                .context("Failed to read stdin")?;
            (DataSource::Paste, content)
        }
    };

    let mut workspace = Workspace::new(config);
    workspace.ingest_bytes(source, &content)?;
    if workspace.apply_config(saved) == 0 {
        bail!("Configuration '{}' matches none of the keys in the input", saved.name);
    }

    for record in workspace.render_all() {
        let output = if args.compact {
            serde_json::to_string(&record)?
        } else {
            serde_json::to_string_pretty(&record)?
        };
        println!("{}", output);
    }

    Ok(())
}
