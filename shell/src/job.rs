use nix::errno::Errno;
use nix::sys::wait::{waitpid,WaitPidFlag,WaitStatus};
use nix::unistd::Pid;
use tracing::{debug,warn};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum State { Active, Terminated }

pub trait WaitStatusExt {
	fn state(self) -> State;
}

impl WaitStatusExt for WaitStatus {
	fn state(self) -> State {
		match self {
			WaitStatus::Exited(..) => State::Terminated,
			WaitStatus::Signaled(..) => State::Terminated,
			_ => State::Active,
		}
	}
}

/// Blocks until `pid` has terminated. Interrupted waits are retried; an
/// interrupt never cancels a foreground stage.
pub fn wait_for(pid: Pid) -> Option<WaitStatus> {
	loop {
		match waitpid(pid, None) {
			Ok(status) => if status.state() == State::Terminated {
				debug!(%pid, ?status, "child exited");
				return Some(status);
			},
			Err(Errno::EINTR) => continue,
			Err(Errno::ECHILD) => return None,
			Err(e) => {
				warn!(%pid, error = %e, "waitpid failed");
				return None;
			},
		}
	}
}

#[derive(Debug)]
pub struct Job {
	pub id: usize,
	pub pids: Vec<Pid>,
	pub command: String,
}

impl Job {
	pub fn state(&self) -> State {
		if self.pids.is_empty() { State::Terminated } else { State::Active }
	}

	fn collect(&mut self) {
		self.pids.retain(|&pid| {
			match waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
				Ok(status) => status.state() == State::Active,
				Err(Errno::EINTR) => true,
				Err(_) => false,
			}
		});
	}
}

/// Background pipelines that have not been collected yet.
#[derive(Debug, Default)]
pub struct JobSet {
	jobs: Vec<Job>,
}

impl JobSet {
	pub fn new() -> JobSet {
		JobSet { jobs: vec![] }
	}

	pub fn push(&mut self, pids: Vec<Pid>, command: String) -> usize {
		let id = self.jobs.iter().map(|j| j.id).max().unwrap_or(0) + 1;
		debug!(id, ?pids, %command, "background job started");
		self.jobs.push(Job { id: id, pids: pids, command: command });
		id
	}

	pub fn len(&self) -> usize {
		self.jobs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.jobs.is_empty()
	}

	/// Non-blocking collection of finished background children. Returns
	/// the jobs whose every stage has exited.
	pub fn reap(&mut self) -> Vec<Job> {
		for job in self.jobs.iter_mut() {
			job.collect();
		}
		let (done, running): (Vec<Job>, Vec<Job>) = self.jobs.drain(..).partition(|j| j.state() == State::Terminated);
		self.jobs = running;
		for job in &done {
			debug!(id = job.id, command = %job.command, "background job done");
		}
		done
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::process;
	use std::thread::sleep;
	use std::time::{Duration,Instant};

	fn spawn(program: &str, args: &[&str]) -> Pid {
		let child = process::Command::new(program).args(args).spawn().unwrap();
		Pid::from_raw(child.id() as i32)
	}

	#[test]
	fn finished_jobs_are_reaped() {
		let mut jobs = JobSet::new();
		let id = jobs.push(vec![spawn("true", &[])], "true".to_string());
		assert_eq!(id, 1);
		let deadline = Instant::now() + Duration::from_secs(5);
		let mut done = vec![];
		while done.is_empty() && Instant::now() < deadline {
			done = jobs.reap();
			sleep(Duration::from_millis(20));
		}
		assert_eq!(done.len(), 1);
		assert_eq!(done[0].command, "true");
		assert!(jobs.is_empty());
	}

	#[test]
	fn running_jobs_stay_tracked() {
		let mut jobs = JobSet::new();
		let pid = spawn("sleep", &["5"]);
		jobs.push(vec![pid], "sleep 5".to_string());
		assert!(jobs.reap().is_empty());
		assert_eq!(jobs.len(), 1);
		let _ = nix::sys::signal::kill(pid, nix::sys::signal::Signal::SIGKILL);
		assert!(wait_for(pid).is_some());
	}

	#[test]
	fn job_ids_increase() {
		let mut jobs = JobSet::new();
		assert_eq!(jobs.push(vec![], "a".to_string()), 1);
		assert_eq!(jobs.push(vec![], "b".to_string()), 2);
	}
}
