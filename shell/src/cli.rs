use std::path::PathBuf;

use clap::{Parser,ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(
	name = "myshell",
	version,
	about = "A small interactive shell: pipelines, redirections and background jobs.",
	long_about = None
)]
pub struct CliArgs {
	/// Run a single command line and exit.
	#[arg(short = 'c', long, value_name = "LINE")]
	pub command: Option<String>,

	/// Text shown when the shell is ready for input.
	#[arg(long, value_name = "TEXT", default_value = "myshell>")]
	pub prompt: String,

	/// Directory `cd` goes to without an argument. Defaults to `$HOME`.
	#[arg(long, value_name = "DIR")]
	pub home: Option<PathBuf>,

	/// File that records every child process start.
	#[arg(long, value_name = "PATH", default_value = "log.txt")]
	pub event_log: PathBuf,

	/// Do not record child process starts.
	#[arg(long)]
	pub no_event_log: bool,

	/// Print the command table before executing each pipeline.
	#[arg(long)]
	pub show_table: bool,

	/// Logging level (error, warn, info, debug, trace).
	///
	/// If omitted, `MYSHELL_LOG` or `warn` is used.
	#[arg(long, value_enum, value_name = "LEVEL")]
	pub log_level: Option<LogLevel>,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
	Error,
	Warn,
	Info,
	Debug,
	Trace,
}

pub fn parse() -> CliArgs {
	CliArgs::parse()
}
