use std::env;
use std::path::{Path,PathBuf};

use crate::cli::CliArgs;

#[derive(Debug, Clone)]
pub struct Config {
	pub prompt: String,
	pub home: Option<PathBuf>,
	pub event_log: Option<PathBuf>,
	pub show_table: bool,
}

impl Default for Config {
	fn default() -> Config {
		Config {
			prompt: "myshell>".to_string(),
			home: env::var_os("HOME").map(PathBuf::from),
			event_log: None,
			show_table: false,
		}
	}
}

// `cd` must not move the event log, so it is pinned to the directory the
// shell started in.
fn absolute(path: &Path) -> PathBuf {
	if path.is_absolute() {
		return path.to_path_buf();
	}
	match env::current_dir() {
		Ok(cwd) => cwd.join(path),
		Err(_) => path.to_path_buf(),
	}
}

impl Config {
	pub fn from_args(args: &CliArgs) -> Config {
		let defaults = Config::default();
		Config {
			prompt: args.prompt.clone(),
			home: args.home.clone().or(defaults.home),
			event_log: if args.no_event_log { None } else { Some(absolute(&args.event_log)) },
			show_table: args.show_table,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::Parser;

	#[test]
	fn defaults_from_empty_command_line() {
		let args = CliArgs::parse_from(["myshell"]);
		let config = Config::from_args(&args);
		assert_eq!(config.prompt, "myshell>");
		assert!(!config.show_table);
		let log = config.event_log.unwrap();
		assert!(log.is_absolute());
		assert!(log.ends_with("log.txt"));
	}

	#[test]
	fn flags_override_defaults() {
		let args = CliArgs::parse_from([
			"myshell", "--prompt", "$ ", "--home", "/srv", "--no-event-log", "--show-table", "-c", "ls",
		]);
		let config = Config::from_args(&args);
		assert_eq!(config.prompt, "$ ");
		assert_eq!(config.home, Some(PathBuf::from("/srv")));
		assert_eq!(config.event_log, None);
		assert!(config.show_table);
		assert_eq!(args.command.as_deref(), Some("ls"));
	}
}
