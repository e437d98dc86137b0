// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Logging initialization for jfs-warmup binaries
//!
//! Console output goes to stderr so that stdout stays free for machine
//! readable results. `RUST_LOG` always overrides the CLI level.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use tracing::Level;

/// Output format for log messages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable plaintext format
    #[default]
    Plaintext,
    /// Structured JSON format
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Plaintext => write!(f, "plaintext"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for Level {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

impl std::fmt::Display for CliLogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CliLogLevel::Error => "error",
            CliLogLevel::Warn => "warn",
            CliLogLevel::Info => "info",
            CliLogLevel::Debug => "debug",
            CliLogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Logging flags shared by every binary; use with `#[command(flatten)]`.
///
/// Logs go to the console unless `--log-file` or `--log-dir` is given.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct CliLoggingArgs {
    #[arg(long, value_enum, global = true, help = "Log verbosity level (default: info)")]
    pub log_level: Option<CliLogLevel>,

    #[arg(long, value_enum, global = true, help = "Log output format (default: plaintext)")]
    pub log_format: Option<LogFormat>,

    #[arg(long, global = true, help = "Directory for log files")]
    pub log_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Log file name or path")]
    pub log_file: Option<PathBuf>,
}

impl CliLoggingArgs {
    pub fn init(&self, component: &str) -> anyhow::Result<()> {
        self.init_with_default_level(component, CliLogLevel::Info)
    }

    pub fn init_with_default_level(
        &self,
        component: &str,
        default_level: CliLogLevel,
    ) -> anyhow::Result<()> {
        let level = self.log_level.unwrap_or(default_level).into();
        let format = self.log_format.unwrap_or_default();

        match self.resolve_log_path(component) {
            Some(path) => init_to_file(component, level, format, &path),
            None => init(component, level, format),
        }
    }

    /// File to log into, if file logging was requested.
    ///
    /// An absolute `--log-file` wins; a relative one is placed under
    /// `--log-dir` when both are set. A bare file name without `--log-dir`
    /// lands in [`standard_log_dir`]. `--log-dir` alone uses `<component>.log`.
    pub fn resolve_log_path(&self, component: &str) -> Option<PathBuf> {
        match (&self.log_file, &self.log_dir) {
            (Some(file), _) if file.is_absolute() => Some(file.clone()),
            (Some(file), Some(dir)) => Some(dir.join(file)),
            (Some(file), None) if is_bare_name(file) => Some(standard_log_dir().join(file)),
            (Some(file), None) => Some(file.clone()),
            (None, Some(dir)) => Some(dir.join(format!("{component}.log"))),
            (None, None) => None,
        }
    }
}

/// Platform data directory for log files, e.g. `~/.local/share/jfs-warmup` on Linux.
pub fn standard_log_dir() -> PathBuf {
    let mut path = dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"));
    path.push("jfs-warmup");
    path
}

fn is_bare_name(path: &Path) -> bool {
    path.parent().map_or(true, |parent| parent.as_os_str().is_empty())
}

/// Console logging on stderr.
pub fn init(component: &str, default_level: Level, format: LogFormat) -> anyhow::Result<()> {
    init_with_writer(component, default_level, format, io::stderr)
}

pub fn init_to_file(
    component: &str,
    default_level: Level,
    format: LogFormat,
    log_path: &Path,
) -> anyhow::Result<()> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let log_file = fs::OpenOptions::new().create(true).append(true).open(log_path)?;

    init_with_writer(component, default_level, format, log_file)
}

pub fn init_with_writer<W>(
    component: &str,
    default_level: Level,
    format: LogFormat,
    writer: W,
) -> anyhow::Result<()>
where
    W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(component, default_level)));

    match format {
        LogFormat::Json => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer).json();
            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
        LogFormat::Plaintext => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer).with_target(false);
            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
    }

    Ok(())
}

/// Filter directive: the default level globally and for the component's target.
fn default_filter(component: &str, level: Level) -> String {
    format!("{},{}={}", level, component.replace('-', "_"), level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_log_level_conversion() {
        assert_eq!(Level::from(CliLogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(CliLogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(CliLogLevel::Info), Level::INFO);
        assert_eq!(Level::from(CliLogLevel::Debug), Level::DEBUG);
        assert_eq!(Level::from(CliLogLevel::Trace), Level::TRACE);
        assert_eq!(CliLogLevel::default(), CliLogLevel::Info);
        assert_eq!(CliLogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_console_by_default() {
        let args = CliLoggingArgs::default();
        assert_eq!(args.resolve_log_path("jfs-warmup"), None);
    }

    #[test]
    fn test_log_path_resolution() {
        let dir_only = CliLoggingArgs {
            log_dir: Some(PathBuf::from("/var/log/jfs")),
            ..Default::default()
        };
        assert_eq!(
            dir_only.resolve_log_path("jfs-warmup"),
            Some(PathBuf::from("/var/log/jfs/jfs-warmup.log"))
        );

        let relative_file = CliLoggingArgs {
            log_dir: Some(PathBuf::from("/var/log/jfs")),
            log_file: Some(PathBuf::from("run.log")),
            ..Default::default()
        };
        assert_eq!(
            relative_file.resolve_log_path("jfs-warmup"),
            Some(PathBuf::from("/var/log/jfs/run.log"))
        );

        let absolute_file = CliLoggingArgs {
            log_dir: Some(PathBuf::from("/var/log/jfs")),
            log_file: Some(PathBuf::from("/tmp/other.log")),
            ..Default::default()
        };
        assert_eq!(
            absolute_file.resolve_log_path("jfs-warmup"),
            Some(PathBuf::from("/tmp/other.log"))
        );
    }

    #[test]
    fn test_default_filter_uses_crate_target() {
        assert_eq!(default_filter("jfs-warmup", Level::DEBUG), "DEBUG,jfs_warmup=DEBUG");
    }

    #[test]
    fn test_bare_file_name_goes_to_standard_dir() {
        let args = CliLoggingArgs {
            log_file: Some(PathBuf::from("warmup.log")),
            ..Default::default()
        };
        let path = args.resolve_log_path("jfs-warmup").unwrap();
        assert!(path.ends_with("jfs-warmup/warmup.log"));

        let nested = CliLoggingArgs {
            log_file: Some(PathBuf::from("logs/warmup.log")),
            ..Default::default()
        };
        assert_eq!(
            nested.resolve_log_path("jfs-warmup"),
            Some(PathBuf::from("logs/warmup.log"))
        );
    }

    #[test]
    fn test_init_to_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("warmup.log");
        // A global subscriber may already be installed by another test; the
        // file must exist either way.
        let _ = init_to_file("jfs-warmup", Level::INFO, LogFormat::Plaintext, &path);
        assert!(path.exists());
    }
}
