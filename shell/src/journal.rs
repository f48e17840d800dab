use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use nix::unistd::Pid;
use tracing::warn;

/// Append-only record of child process starts. Losing a line is never
/// worth stopping the shell for, so write failures only warn.
#[derive(Debug, Clone)]
pub struct Journal {
	path: Option<PathBuf>,
}

impl Journal {
	pub fn new(path: Option<PathBuf>) -> Journal {
		Journal { path: path }
	}

	pub fn disabled() -> Journal {
		Journal { path: None }
	}

	pub fn record_start(&self, pid: Pid, program: &str) {
		let path = match self.path {
			Some(ref p) => p,
			None => return,
		};
		let line = format!("Child process {} ({}) was started at {}\n", pid, program, Utc::now().format("%H:%M:%S"));
		let r = fs::OpenOptions::new()
			.append(true)
			.create(true)
			.open(path)
			.and_then(|mut f| f.write_all(line.as_bytes()));
		if let Err(e) = r {
			warn!(path = %path.display(), error = %e, "failed to write event log");
		}
	}
}
