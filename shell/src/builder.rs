use std::mem;

use tracing::warn;

use crate::parser::PipelineSink;
use crate::types::{Argv,Pipeline};

/// Accumulates one pipeline while the parser walks a line. The same
/// `Pipeline` is reused for every line: it is cleared, never rebuilt.
#[derive(Debug, Default)]
pub struct PipelineBuilder {
	pipeline: Pipeline,
	current: Option<Argv>,
}

impl PipelineBuilder {
	pub fn new() -> PipelineBuilder {
		PipelineBuilder { pipeline: Pipeline::new(), current: None }
	}

	pub fn pipeline(&self) -> &Pipeline {
		&self.pipeline
	}

	pub fn clear(&mut self) {
		self.current = None;
		self.pipeline.clear();
	}
}

impl PipelineSink for PipelineBuilder {
	fn begin_stage(&mut self) {
		if self.current.is_some() {
			warn!("stage begun before the previous one was committed");
		}
		self.current = Some(Argv::new());
	}

	fn push_arg(&mut self, arg: &str) {
		self.current.get_or_insert_with(Argv::new).append(arg);
	}

	fn commit_stage(&mut self) {
		let argv = mem::take(&mut self.current).unwrap_or_default();
		if let Err(e) = self.pipeline.add_stage(argv) {
			warn!(error = %e, "stage rejected");
			eprintln!("{}", e);
		}
	}

	fn set_input_redirect(&mut self, path: &str) {
		self.pipeline.set_input(path);
	}

	fn set_output_redirect(&mut self, path: &str) {
		self.pipeline.set_output(path);
	}

	fn set_append_redirect(&mut self, path: &str) {
		self.pipeline.set_append(path);
	}

	fn set_error_redirect(&mut self, path: &str) {
		self.pipeline.set_error(path);
	}

	fn set_background(&mut self) {
		self.pipeline.set_background(true);
	}
}
