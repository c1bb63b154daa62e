//! Interactive shell for linked sparse matrices
//!
//! ```bash
//! # Interactive session
//! ringmat
//!
//! # Replay a command script, keeping every sum/product without asking
//! ringmat --script session.txt --no-confirm
//!
//! # Trace engine activity
//! RUST_LOG=ringmat=debug ringmat
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ringmat::shell::{Shell, ShellConfig};
use ringmat::ArithmeticConfig;

#[derive(Parser, Debug)]
#[command(name = "ringmat")]
#[command(about = "Create, combine and inspect sparse matrices from the command line")]
#[command(version)]
struct Args {
    /// Read commands from this file instead of standard input
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Keep every sum and product without asking
    #[arg(long)]
    no_confirm: bool,

    /// Prompt printed before each command
    #[arg(long, default_value = ">> ")]
    prompt: String,

    /// Width of one rendered cell
    #[arg(long, default_value_t = 6)]
    cell_width: usize,

    /// Decimals shown per rendered cell
    #[arg(long, default_value_t = 1)]
    precision: usize,

    /// Widest product (in columns) that uses a dense row accumulator
    #[arg(long, default_value_t = ringmat::matrix::config::DEFAULT_DENSE_ACCUM_THRESHOLD)]
    dense_threshold: usize,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(args.log_level.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let config = ShellConfig {
        prompt: args.prompt,
        cell_width: args.cell_width,
        precision: args.precision,
        confirm_save: !args.no_confirm,
        arithmetic: ArithmeticConfig {
            dense_accum_threshold: args.dense_threshold,
        },
    };

    let stdout = io::stdout().lock();
    match args.script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            Shell::new(BufReader::new(file), stdout, config).run()?;
        }
        None => Shell::new(io::stdin().lock(), stdout, config).run()?,
    }

    Ok(())
}
