// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

mod progress;

use anyhow::{Context, Result};
use clap::Parser;
use jfs_logging::CliLoggingArgs;
use jfs_warmup_core::{collect_paths, warm_up, WarmupOptions, DEFAULT_THREADS};
use progress::WarmupProgress;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "jfs-warmup",
    version,
    about = "Build cache for target directories/files of a mounted JuiceFS"
)]
struct Cli {
    /// Files or directories to warm up
    #[arg(value_name = "PATH")]
    paths: Vec<String>,

    /// File containing a list of paths, one per line
    #[arg(short, long, env = "JFS_WARMUP_FILE")]
    file: Option<PathBuf>,

    /// Number of concurrent workers used by the JuiceFS client
    #[arg(
        short = 'p',
        long,
        env = "JFS_WARMUP_THREADS",
        default_value_t = DEFAULT_THREADS,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    threads: u16,

    /// Run in background: do not wait for the cache to be built
    #[arg(short, long, env = "JFS_WARMUP_BACKGROUND")]
    background: bool,

    /// Print a JSON summary on stdout
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    logging: CliLoggingArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.logging.init("jfs-warmup").context("failed to initialize logging")?;

    let paths = collect_paths(cli.paths, cli.file.as_deref())?;
    let options = WarmupOptions {
        threads: cli.threads,
        background: cli.background,
        ..Default::default()
    };
    debug!(
        paths = paths.len(),
        threads = options.threads,
        background = options.background,
        "starting warm up"
    );

    let progress = WarmupProgress::new(paths.len() as u64, cli.background || cli.json);
    let result = warm_up(&paths, &options, &progress);
    progress.finish();
    let report = result.context("warm up aborted")?;

    if cli.json {
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}
