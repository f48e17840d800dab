use std::fmt;
use std::ffi::CString;
use std::path::{Path,PathBuf};

use crate::error::{Result,ShellError};

/// One program invocation: the program name followed by its arguments.
/// Every element is an owned copy of what the parser handed over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Argv {
	words: Vec<String>,
}

impl Argv {
	pub fn new() -> Argv {
		Argv { words: Vec::with_capacity(5) }
	}

	pub fn append(&mut self, text: &str) {
		self.words.push(text.to_owned());
	}

	pub fn program(&self) -> Option<&str> {
		self.words.first().map(|s| s.as_str())
	}

	pub fn args(&self) -> &[String] {
		self.words.get(1 ..).unwrap_or(&[])
	}

	pub fn words(&self) -> &[String] {
		&self.words
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	pub fn to_cstrings(&self) -> Result<Vec<CString>> {
		let argv: std::result::Result<Vec<CString>, _> = self.words.iter().map(|s| CString::new(s.as_bytes())).collect();
		Ok(argv?)
	}
}

impl<'a> From<&'a [&'a str]> for Argv {
	fn from(words: &'a [&'a str]) -> Argv {
		let mut argv = Argv::new();
		for w in words {
			argv.append(w);
		}
		argv
	}
}

/// Where the final stage writes its standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdoutTarget<'a> {
	Inherit,
	Truncate(&'a Path),
	Append(&'a Path),
}

#[derive(Debug, Default)]
pub struct Pipeline {
	stages: Vec<Argv>,
	input: Option<PathBuf>,
	output: Option<PathBuf>,
	append: Option<PathBuf>,
	error: Option<PathBuf>,
	background: bool,
}

impl Pipeline {
	pub fn new() -> Pipeline {
		Pipeline { stages: Vec::with_capacity(1), ..Pipeline::default() }
	}

	/// Appends `argv` as the next stage. An empty vector is rejected and
	/// the pipeline is left as it was.
	pub fn add_stage(&mut self, argv: Argv) -> Result<()> {
		if argv.is_empty() {
			return Err(ShellError::EmptyStage);
		}
		self.stages.push(argv);
		Ok(())
	}

	pub fn set_input<P: Into<PathBuf>>(&mut self, path: P) {
		self.input = Some(path.into());
	}

	pub fn set_output<P: Into<PathBuf>>(&mut self, path: P) {
		self.output = Some(path.into());
	}

	pub fn set_append<P: Into<PathBuf>>(&mut self, path: P) {
		self.append = Some(path.into());
	}

	pub fn set_error<P: Into<PathBuf>>(&mut self, path: P) {
		self.error = Some(path.into());
	}

	pub fn set_background(&mut self, background: bool) {
		self.background = background;
	}

	pub fn clear(&mut self) {
		self.stages.clear();
		self.input = None;
		self.output = None;
		self.append = None;
		self.error = None;
		self.background = false;
	}

	pub fn stages(&self) -> &[Argv] {
		&self.stages
	}

	pub fn len(&self) -> usize {
		self.stages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.stages.is_empty()
	}

	pub fn input(&self) -> Option<&Path> {
		self.input.as_deref()
	}

	pub fn output(&self) -> Option<&Path> {
		self.output.as_deref()
	}

	pub fn append(&self) -> Option<&Path> {
		self.append.as_deref()
	}

	pub fn error(&self) -> Option<&Path> {
		self.error.as_deref()
	}

	pub fn is_background(&self) -> bool {
		self.background
	}

	/// Append wins over output when both are declared.
	pub fn stdout_target(&self) -> StdoutTarget<'_> {
		match (self.append(), self.output()) {
			(Some(p), _) => StdoutTarget::Append(p),
			(None, Some(p)) => StdoutTarget::Truncate(p),
			(None, None) => StdoutTarget::Inherit,
		}
	}

	pub fn command_line(&self) -> String {
		let stages: Vec<String> = self.stages.iter().map(|argv| argv.words().join(" ")).collect();
		let mut line = stages.join(" | ");
		if self.background {
			line.push_str(" &");
		}
		line
	}
}

fn slot(path: Option<&Path>) -> String {
	path.map_or_else(|| "default".to_string(), |p| p.display().to_string())
}

impl fmt::Display for Pipeline {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		writeln!(f)?;
		writeln!(f, "              COMMAND TABLE                ")?;
		writeln!(f)?;
		writeln!(f, "  #   Simple Commands")?;
		writeln!(f, "  --- ----------------------------------------------------------")?;
		for (i, argv) in self.stages.iter().enumerate() {
			write!(f, "  {:<3} ", i)?;
			for word in argv.words() {
				write!(f, "\"{}\" \t", word)?;
			}
			writeln!(f)?;
		}
		writeln!(f)?;
		writeln!(f, "  Output       Append       Input        Error        Background")?;
		writeln!(f, "  ------------ ------------ ------------ ------------ ------------")?;
		writeln!(f, "  {:<12} {:<12} {:<12} {:<12} {:<12}",
			slot(self.output()), slot(self.append()), slot(self.input()), slot(self.error()),
			if self.background { "YES" } else { "NO" })?;
		writeln!(f)
	}
}
