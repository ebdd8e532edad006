//! layermap-keys: Discover the key paths addressable in a JSON dataset
//!
//! Usage:
//!   # Read from file, one key per line
//!   layermap-keys data.json
//!
//!   # Read from stdin, print a JSON array
//!   curl -s https://example.com/api/items | layermap-keys --json
//!
//!   # Walk deeper and sample more records
//!   layermap-keys --max-depth 5 --sample-size 50 data.json

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use layermap::{load_dataset, KeyConfig};
use std::fs::File;
use std::io::{stdin, BufReader, Read};

#[derive(Parser, Debug)]
#[command(name = "layermap-keys")]
#[command(about = "List the key paths found in a JSON dataset", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Maximum nesting depth to walk (default: 3)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Number of leading records to sample (default: 10)
    #[arg(long)]
    sample_size: Option<usize>,

    /// Print keys as a JSON array
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let args = Args::parse();

    let mut config = KeyConfig::default();
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }
    if let Some(size) = args.sample_size {
        config.sample_size = size;
    }

    let reader: Box<dyn Read> = if let Some(file_path) = &args.input {
        let file = File::open(file_path).context(format!("Failed to open {}", file_path))?;
        Box::new(BufReader::new(file))
    } else {
        Box::new(stdin())
    };

    let dataset = load_dataset(reader, &config)?;
    eprintln!("{} records, {}", dataset.len(), dataset.shape);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dataset.keys)?);
    } else {
        for key in &dataset.keys {
            println!("{}", key);
        }
    }

    Ok(())
}
