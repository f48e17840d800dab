#![allow(dead_code)]

use std::io::Write;
use std::path::{Path,PathBuf};
use std::process::{Command,Output,Stdio};

pub const PROMPT: &str = "P>";

pub struct ShellHandler {
	pub dir: tempfile::TempDir,
}

impl ShellHandler {
	pub fn new() -> ShellHandler {
		ShellHandler { dir: tempfile::tempdir().unwrap() }
	}

	pub fn path(&self, name: &str) -> PathBuf {
		self.dir.path().join(name)
	}

	pub fn log_path(&self) -> PathBuf {
		self.path("events.log")
	}

	pub fn command(&self) -> Command {
		let mut cmd = Command::new(env!("CARGO_BIN_EXE_myshell"));
		cmd.current_dir(self.dir.path())
			.arg("--prompt").arg(PROMPT)
			.arg("--event-log").arg(self.log_path())
			.env_remove("MYSHELL_LOG");
		cmd
	}

	/// Feeds `script` on stdin and waits for the shell and everything that
	/// still holds its stdout or stderr.
	pub fn run(&self, script: &str) -> Output {
		let mut child = self.command()
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.spawn()
			.unwrap();
		child.stdin.take().unwrap().write_all(script.as_bytes()).unwrap();
		child.wait_with_output().unwrap()
	}

	pub fn read(&self, name: &str) -> String {
		std::fs::read_to_string(self.path(name)).unwrap()
	}

	pub fn write(&self, name: &str, contents: &str) {
		std::fs::write(self.path(name), contents).unwrap()
	}
}

pub fn stdout(out: &Output) -> String {
	String::from_utf8_lossy(&out.stdout).into_owned()
}

pub fn stderr(out: &Output) -> String {
	String::from_utf8_lossy(&out.stderr).into_owned()
}

pub fn wait_for_file(path: &Path, expected: &str) -> String {
	let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
	loop {
		let text = std::fs::read_to_string(path).unwrap_or_default();
		if text == expected || std::time::Instant::now() > deadline {
			return text;
		}
		std::thread::sleep(std::time::Duration::from_millis(20));
	}
}
