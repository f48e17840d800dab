use std::path::PathBuf;

use crate::job;
use crate::journal;

/// Everything a pipeline's execution may touch besides the pipeline itself.
pub struct State {
	pub home: Option<PathBuf>,
	pub job_set: job::JobSet,
	pub journal: journal::Journal,
}

impl State {
	pub fn new(home: Option<PathBuf>, journal: journal::Journal) -> State {
		let job_set = job::JobSet::new();
		State { home: home, job_set: job_set, journal: journal }
	}
}
