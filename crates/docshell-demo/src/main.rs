#![forbid(unsafe_code)]

//! docshell walkthrough
//!
//! Mounts the layout provider in a headless host, replays a scripted
//! session (drags, shortcuts, viewport changes, mobile overlays) and prints
//! the rendered shell after each step.
//!
//! # Running
//!
//! ```sh
//! cargo run -p docshell-demo -- [CONFIG.toml|CONFIG.json] [--prefs PATH]
//! ```
//!
//! Set `RUST_LOG=docshell_runtime=debug` to watch the provider.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use docshell_demo::demo_config;
use docshell_demo::env::{demo_viewport, log_json};
use docshell_demo::scenario::{Host, walkthrough};
use docshell_layout::LayoutConfig;
use docshell_runtime::FileStorage;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "docshell-demo",
    about = "Replay a scripted session against the docshell layout and print each frame",
    version
)]
struct Args {
    /// Layout config (`.json` is JSON, anything else TOML). Defaults to the bundled one.
    config: Option<PathBuf>,

    /// Load and save panel preferences at this path.
    #[arg(long)]
    prefs: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if log_json() {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => LayoutConfig::from_file(path)?,
        None => demo_config()?,
    };
    let (cols, rows) = demo_viewport();
    tracing::info!(cols, rows, "mounting shell");

    let mut host = Host::mount(config, cols, rows);
    if let Some(path) = args.prefs {
        host = host.with_storage(FileStorage::new(path));
    }

    for (step, snapshot) in walkthrough(&mut host)?.iter().enumerate() {
        println!("── {step}: {}", snapshot.title);
        println!("{}", snapshot.frame);
        println!();
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "walkthrough failed");
            ExitCode::FAILURE
        }
    }
}
