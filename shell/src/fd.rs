//! Scoped ownership of the descriptors a pipeline needs.
//!
//! Every descriptor created here is close-on-exec: redirection files are
//! opened through `std::fs`, saved stdio copies come from
//! `try_clone_to_owned`, and pipes are made with `O_CLOEXEC`. Only what is
//! installed onto 0, 1 and 2 with `dup2` survives into an exec'd stage.

use std::fs;
use std::io::{self,Write};
use std::os::fd::{AsFd,AsRawFd,BorrowedFd,OwnedFd,RawFd};
use std::path::Path;

use nix::fcntl::OFlag;
use nix::unistd;
use tracing::{debug,warn};

use crate::error::{Result,ShellError};

pub const STDIN: RawFd = libc::STDIN_FILENO;
pub const STDOUT: RawFd = libc::STDOUT_FILENO;
pub const STDERR: RawFd = libc::STDERR_FILENO;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode { Read, Truncate, Append }

pub fn open_redirect(path: &Path, mode: RedirectMode) -> Result<OwnedFd> {
	let mut oopt = fs::OpenOptions::new();
	let _ = match mode {
		RedirectMode::Read => oopt.read(true),
		RedirectMode::Truncate => oopt.write(true).create(true).truncate(true),
		RedirectMode::Append => oopt.append(true).create(true),
	};
	let file = oopt.open(path).map_err(|e| ShellError::Redirect { path: path.to_owned(), source: e })?;
	let fd = OwnedFd::from(file);
	debug!(path = %path.display(), ?mode, fd = fd.as_raw_fd(), "opened redirection");
	Ok(fd)
}

/// Returns `(read_end, write_end)`.
pub fn pipe() -> Result<(OwnedFd, OwnedFd)> {
	unistd::pipe2(OFlag::O_CLOEXEC).map_err(ShellError::Pipe)
}

/// Makes `target` refer to the same open file as `fd`.
pub fn install(fd: BorrowedFd, target: RawFd) -> Result<()> {
	let raw = fd.as_raw_fd();
	if raw == target {
		return Ok(());
	}
	unistd::dup2(raw, target).map_err(ShellError::Stdio)?;
	Ok(())
}

/// The shell's own stdin, stdout and stderr, saved for the length of one
/// execution. Dropping without `restore` still puts them back.
#[derive(Debug)]
pub struct SavedStdio {
	stdin: OwnedFd,
	stdout: OwnedFd,
	stderr: OwnedFd,
	restored: bool,
}

impl SavedStdio {
	pub fn save() -> Result<SavedStdio> {
		let _ = io::stdout().flush();
		Ok(SavedStdio {
			stdin: io::stdin().as_fd().try_clone_to_owned()?,
			stdout: io::stdout().as_fd().try_clone_to_owned()?,
			stderr: io::stderr().as_fd().try_clone_to_owned()?,
			restored: false,
		})
	}

	pub fn stdin(&self) -> BorrowedFd<'_> {
		self.stdin.as_fd()
	}

	pub fn stdout(&self) -> BorrowedFd<'_> {
		self.stdout.as_fd()
	}

	pub fn stderr(&self) -> BorrowedFd<'_> {
		self.stderr.as_fd()
	}

	fn put_back(&self) -> Result<()> {
		let _ = io::stdout().flush();
		let _ = io::stderr().flush();
		install(self.stdin(), STDIN)?;
		install(self.stdout(), STDOUT)?;
		install(self.stderr(), STDERR)
	}

	pub fn restore(mut self) -> Result<()> {
		self.restored = true;
		self.put_back()
	}
}

impl Drop for SavedStdio {
	fn drop(&mut self) {
		if !self.restored {
			if let Err(e) = self.put_back() {
				warn!(error = %e, "could not restore standard streams");
			}
		}
	}
}
