//! # bindfig demo application
//!
//! A sample CLI tool that shows how to integrate bindfig into a real
//! application. It exists purely to demonstrate and manually verify the
//! crate's features.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example bindfig_demo -- port=8080 hosts=a,b
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature              | How to exercise it                                                  |
//! |----------------------|---------------------------------------------------------------------|
//! | Argument binding     | `cargo run --example bindfig_demo -- port=8080 hosts=a,b`           |
//! | Flag alias           | `cargo run --example bindfig_demo -- v=true`                        |
//! | Env alias            | `DEMO_PORT=9000 cargo run --example bindfig_demo`                   |
//! | List separator       | `cargo run --example bindfig_demo -- retries=1:2:4`                 |
//! | JSON document        | `cargo run --example bindfig_demo -- --config demo.json`            |
//! | Coercion errors      | `cargo run --example bindfig_demo -- port=99999`                    |
//! | Debug logging        | `RUST_LOG=bindfig=trace cargo run --example bindfig_demo -- port=1` |

mod config;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bindfig::{BindArgs, Bindfig};

use config::DemoConfig;

/// bindfig demo: a sample CLI app for showcasing bindfig integration.
#[derive(Parser, Debug)]
#[command(name = "bindfig-demo")]
struct Cli {
    /// JSON document to load before the environment and settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ignore the process environment.
    #[arg(long)]
    no_env: bool,

    #[command(flatten)]
    settings: BindArgs,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = Bindfig::builder::<DemoConfig>().args(cli.settings.into_args());
    if let Some(path) = &cli.config {
        builder = builder.document(path);
    }
    if cli.no_env {
        builder = builder.no_env();
    }

    let config = builder.load().unwrap_or_else(|e| {
        eprintln!("Failed to load config:\n{e}");
        std::process::exit(1);
    });

    if config.verbose {
        println!("[verbose] Resolved configuration for {:?}", config.name);
        println!();
    }

    let entries = [
        ("name", config.name.clone()),
        ("verbose", config.verbose.to_string()),
        ("port", config.port.to_string()),
        ("hosts", format!("{:?}", config.hosts)),
        ("ratio", config.ratio.to_string()),
        ("retries", format!("{:?}", config.retries)),
    ];
    let max_key_len = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in &entries {
        println!("{key:<max_key_len$}  {value}");
    }
}
