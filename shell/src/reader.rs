use std::mem;
use std::os::fd::RawFd;

use nix::errno::Errno;
use nix::unistd;

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
	Line(String),
	Interrupted,
	Eof,
}

/// Reads command lines straight from a descriptor, one byte at a time, so
/// that anything after the current line is still there for a stage that
/// inherits the same stdin.
#[derive(Debug)]
pub struct LineReader {
	fd: RawFd,
	buf: Vec<u8>,
}

impl LineReader {
	pub fn new(fd: RawFd) -> LineReader {
		LineReader { fd: fd, buf: vec![] }
	}

	pub fn stdin() -> LineReader {
		LineReader::new(libc::STDIN_FILENO)
	}

	fn take(&mut self) -> String {
		String::from_utf8_lossy(&mem::take(&mut self.buf)).into_owned()
	}

	pub fn read_line(&mut self) -> nix::Result<Input> {
		let mut byte = [0u8; 1];
		loop {
			match unistd::read(self.fd, &mut byte) {
				Ok(0) => {
					if self.buf.is_empty() {
						return Ok(Input::Eof);
					}
					return Ok(Input::Line(self.take()));
				},
				Ok(_) => match byte[0] {
					b'\n' => { return Ok(Input::Line(self.take())); },
					c => self.buf.push(c),
				},
				Err(Errno::EINTR) => {
					self.buf.clear();
					return Ok(Input::Interrupted);
				},
				Err(e) => { return Err(e); },
			}
		}
	}
}
