use std::{ffi,io};
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
	#[error("Error: empty command in pipeline")]
	EmptyStage,

	#[error("syntax error: {0}")]
	Parse(String),

	#[error("Nul char error: {0}")]
	Nul(#[from] ffi::NulError),

	#[error("cd: {}: Directory not found", .path.display())]
	Chdir { path: PathBuf, source: nix::Error },

	#[error("{}: {source}", .path.display())]
	Redirect { path: PathBuf, source: io::Error },

	#[error("Piping Error: {0}")]
	Pipe(nix::Error),

	#[error("fork: {0}")]
	Fork(nix::Error),

	#[error("standard stream error: {0}")]
	Stdio(nix::Error),
}

impl ShellError {
	/// Fatal errors end the interactive session; everything else is
	/// reported and the shell carries on with the next line.
	pub fn is_fatal(&self) -> bool {
		match *self {
			ShellError::Redirect { .. } | ShellError::Pipe(_) | ShellError::Fork(_) | ShellError::Stdio(_) => true,
			_ => false,
		}
	}

	pub fn exit_code(&self) -> i32 {
		match *self {
			ShellError::Redirect { .. } => 1,
			ShellError::Pipe(_) => 2,
			ShellError::Fork(_) => 3,
			ShellError::Stdio(_) => 4,
			_ => 1,
		}
	}
}

impl From<io::Error> for ShellError {
	fn from(e: io::Error) -> ShellError {
		ShellError::Stdio(e.raw_os_error().map_or(nix::Error::EIO, nix::Error::from_raw))
	}
}

pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fatal_errors_carry_distinct_codes() {
		let redirect = ShellError::Redirect {
			path: PathBuf::from("x"),
			source: io::Error::from(io::ErrorKind::NotFound),
		};
		let codes = [
			redirect.exit_code(),
			ShellError::Pipe(nix::Error::EMFILE).exit_code(),
			ShellError::Fork(nix::Error::EAGAIN).exit_code(),
			ShellError::Stdio(nix::Error::EBADF).exit_code(),
		];
		assert!(redirect.is_fatal());
		assert_eq!(codes, [1, 2, 3, 4]);
	}

	#[test]
	fn local_errors_are_not_fatal() {
		assert!(!ShellError::EmptyStage.is_fatal());
		assert!(!ShellError::Parse("x".to_string()).is_fatal());
		let chdir = ShellError::Chdir { path: PathBuf::from("/nope"), source: nix::Error::ENOENT };
		assert!(!chdir.is_fatal());
		assert_eq!(chdir.to_string(), "cd: /nope: Directory not found");
	}
}
