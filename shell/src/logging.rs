//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `MYSHELL_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `warn`
//!
//! Logs go to whatever fd 2 is at the time of the write, so while a
//! pipeline with `2>` is being set up they land in that file too.

use anyhow::Result;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
	let level = match cli_level {
		Some(lvl) => level_from_log_level(lvl),
		None => std::env::var("MYSHELL_LOG")
			.ok()
			.and_then(|s| parse_level_str(&s))
			.unwrap_or(tracing::Level::WARN),
	};

	fmt()
		.with_max_level(level)
		.with_target(true)
		.with_writer(std::io::stderr)
		.try_init()
		.map_err(|e| anyhow::anyhow!(e))?;

	Ok(())
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
	match lvl {
		LogLevel::Error => tracing::Level::ERROR,
		LogLevel::Warn => tracing::Level::WARN,
		LogLevel::Info => tracing::Level::INFO,
		LogLevel::Debug => tracing::Level::DEBUG,
		LogLevel::Trace => tracing::Level::TRACE,
	}
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
	match s.trim().to_lowercase().as_str() {
		"error" => Some(tracing::Level::ERROR),
		"warn" | "warning" => Some(tracing::Level::WARN),
		"info" => Some(tracing::Level::INFO),
		"debug" => Some(tracing::Level::DEBUG),
		"trace" => Some(tracing::Level::TRACE),
		_ => None,
	}
}
