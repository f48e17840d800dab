use std::io::{self,Write};

use tracing::debug;

use crate::builder::PipelineBuilder;
use crate::config::Config;
use crate::error::{Result,ShellError};
use crate::eval::{self,Flow};
use crate::global;
use crate::journal::Journal;
use crate::parser;
use crate::reader::{Input,LineReader};
use crate::signal::Interrupts;

/// The shell's state between lines: configuration, the reused pipeline and
/// everything execution needs. Passed explicitly to whoever acts on it.
pub struct Shell {
	config: Config,
	state: global::State,
	builder: PipelineBuilder,
}

impl Shell {
	pub fn new(config: Config) -> Shell {
		let journal = Journal::new(config.event_log.clone());
		let state = global::State::new(config.home.clone(), journal);
		Shell { config: config, state: state, builder: PipelineBuilder::new() }
	}

	pub fn prompt(&self) {
		let mut stdout = io::stdout();
		let _ = stdout.write_all(self.config.prompt.as_bytes());
		let _ = stdout.flush();
	}

	pub fn acknowledge_interrupt(&self) {
		println!(" Ctrl + C Handled");
		self.prompt();
	}

	pub fn builder(&mut self) -> &mut PipelineBuilder {
		&mut self.builder
	}

	/// Parses `line` into the pipeline and executes it.
	pub fn run_line(&mut self, line: &str) -> Result<Flow> {
		if let Err(e) = parser::parse(line, &mut self.builder) {
			self.builder.clear();
			eprintln!("{}", ShellError::Parse(e));
			return Ok(Flow::Continue);
		}
		self.pipeline_complete()
	}

	/// Executes whatever has been built so far, then clears it. Local errors
	/// are reported here; fatal ones are handed back.
	pub fn pipeline_complete(&mut self) -> Result<Flow> {
		let pipeline = self.builder.pipeline();
		if self.config.show_table && !pipeline.is_empty() {
			print!("{}", pipeline);
		}
		debug!(command = %pipeline.command_line(), "executing");
		let r = eval::eval(&mut self.state, pipeline);
		self.builder.clear();
		match r {
			Err(ref e) if !e.is_fatal() => {
				eprintln!("{}", e);
				Ok(Flow::Continue)
			},
			r => r,
		}
	}

	pub fn report_jobs(&mut self) {
		for job in self.state.job_set.reap() {
			eprintln!("[{}] Done\t{}", job.id, job.command);
		}
	}

	/// The read-eval loop. Returns when input ends or `exit` is run.
	pub fn run(&mut self, reader: &mut LineReader, interrupts: &Interrupts) -> Result<Flow> {
		self.prompt();
		loop {
			match reader.read_line().map_err(ShellError::Stdio)? {
				Input::Line(line) => {
					if self.run_line(&line)? == Flow::Exit {
						return Ok(Flow::Exit);
					}
					self.report_jobs();
				},
				Input::Interrupted => {},
				Input::Eof => {
					if interrupts.take() {
						println!(" Ctrl + C Handled");
					}
					return Ok(Flow::Continue);
				},
			}
			if interrupts.take() {
				self.acknowledge_interrupt();
			} else {
				self.prompt();
			}
		}
	}
}
