use std::ffi::CString;
use std::io::{self,Write};
use std::os::fd::{AsFd,OwnedFd};

use nix::errno::Errno;
use nix::sys::signal::{self,SigHandler,Signal};
use nix::unistd::{self,ForkResult,Pid};
use tracing::{debug,info};

use crate::builtin;
use crate::error::{Result,ShellError};
use crate::fd::{self,RedirectMode,SavedStdio};
use crate::global;
use crate::job;
use crate::types::{Pipeline,StdoutTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
	Continue,
	Exit,
}

fn exec_stage(argv: &[CString]) -> ! {
	// The shell ignores SIGPIPE; a stage must not inherit that.
	unsafe {
		let _ = signal::signal(Signal::SIGPIPE, SigHandler::SigDfl);
	}
	let e = match unistd::execvp(&argv[0], argv) {
		Ok(never) => match never {},
		Err(e) => e,
	};
	let _ = writeln!(&mut io::stderr(), "Execution Error: {}: {}", argv[0].to_string_lossy(), e.desc());
	let code = if e == Errno::ENOENT { 127 } else { 126 };
	unsafe { libc::_exit(code) }
}

fn spawn_stage(argv: &[CString]) -> Result<Pid> {
	match unsafe { unistd::fork() }.map_err(ShellError::Fork)? {
		ForkResult::Parent { child } => Ok(child),
		ForkResult::Child => exec_stage(argv),
	}
}

fn open_stdout(pipeline: &Pipeline) -> Result<Option<OwnedFd>> {
	match pipeline.stdout_target() {
		StdoutTarget::Inherit => Ok(None),
		StdoutTarget::Truncate(path) => fd::open_redirect(path, RedirectMode::Truncate).map(Some),
		StdoutTarget::Append(path) => fd::open_redirect(path, RedirectMode::Append).map(Some),
	}
}

/// Wires every stage onto 0/1/2 in turn and forks it. Returns the pids in
/// stage order and whether a built-in asked the shell to exit.
fn spawn_stages(state: &mut global::State, pipeline: &Pipeline, cargvs: &[Vec<CString>], saved: &SavedStdio) -> Result<(Vec<Pid>, Flow)> {
	let input = match pipeline.input() {
		Some(path) => Some(fd::open_redirect(path, RedirectMode::Read)?),
		None => None,
	};
	let error = match pipeline.error() {
		Some(path) => Some(fd::open_redirect(path, RedirectMode::Truncate)?),
		None => None,
	};
	fd::install(error.as_ref().map_or(saved.stderr(), |f| f.as_fd()), fd::STDERR)?;

	let stages = pipeline.stages();
	let last = stages.len() - 1;
	let mut pids = Vec::with_capacity(stages.len());
	let mut upstream: Option<OwnedFd> = None;

	for (i, (argv, cargv)) in stages.iter().zip(cargvs).enumerate() {
		let program = argv.program().unwrap_or_default();
		if let Some(func) = builtin::match_builtin(program) {
			debug!(stage = i, program, "running built-in");
			return Ok((pids, func(state, argv)));
		}
		let (stdout, next_upstream) = if i == last {
			(open_stdout(pipeline)?, None)
		} else {
			let (read_end, write_end) = fd::pipe()?;
			(Some(write_end), Some(read_end))
		};

		let stdin_fd = match (&upstream, &input) {
			(Some(up), _) => up.as_fd(),
			(None, Some(file)) => file.as_fd(),
			(None, None) => saved.stdin(),
		};
		let stdout_fd = stdout.as_ref().map_or(saved.stdout(), |f| f.as_fd());
		let _ = io::stdout().flush();
		fd::install(stdin_fd, fd::STDIN)?;
		fd::install(stdout_fd, fd::STDOUT)?;

		let pid = spawn_stage(cargv)?;
		debug!(stage = i, %pid, program, "spawned");
		state.journal.record_start(pid, program);
		pids.push(pid);

		// The child holds its own copies now. The read end for the next
		// stage stays open until that stage has been forked.
		drop(stdout);
		upstream = next_upstream;
	}
	Ok((pids, Flow::Continue))
}

/// Runs `pipeline` to completion (or dispatches it, when backgrounded) and
/// leaves the shell's standard streams exactly as it found them.
pub fn eval(state: &mut global::State, pipeline: &Pipeline) -> Result<Flow> {
	if pipeline.is_empty() {
		return Ok(Flow::Continue);
	}

	// Converted before anything is forked, so a bad argument cannot strand
	// stages that are already running.
	let cargvs = pipeline.stages().iter().map(|argv| argv.to_cstrings()).collect::<Result<Vec<_>>>()?;

	let saved = SavedStdio::save()?;
	let (pids, flow) = spawn_stages(state, pipeline, &cargvs, &saved)?;
	saved.restore()?;

	if flow == Flow::Exit {
		return Ok(flow);
	}
	if pipeline.is_background() {
		if !pids.is_empty() {
			let id = state.job_set.push(pids, pipeline.command_line());
			info!(job = id, command = %pipeline.command_line(), "running in background");
		}
	} else {
		for pid in pids {
			job::wait_for(pid);
		}
	}
	Ok(flow)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::journal::Journal;
	use crate::types::Argv;

	#[test]
	fn bad_argument_in_a_later_stage_forks_nothing() {
		let dir = tempfile::tempdir().unwrap();
		let log = dir.path().join("log.txt");
		let mut state = global::State::new(None, Journal::new(Some(log.clone())));
		let mut pipeline = Pipeline::new();
		pipeline.add_stage(Argv::from(&["true"][..])).unwrap();
		pipeline.add_stage(Argv::from(&["ca\0t"][..])).unwrap();

		let err = eval(&mut state, &pipeline).unwrap_err();
		assert!(!err.is_fatal());
		assert!(!log.exists());
		assert!(state.job_set.is_empty());
	}
}
