use std::path::Path;

use nix::unistd;
use tracing::debug;

use crate::error::ShellError;
use crate::eval::Flow;
use crate::global;
use crate::types::Argv;

pub type Builtin = fn(&mut global::State, &Argv) -> Flow;

pub fn builtin_exit(_: &mut global::State, _: &Argv) -> Flow {
	debug!("exit requested");
	Flow::Exit
}

pub fn builtin_cd(state: &mut global::State, argv: &Argv) -> Flow {
	let target = match argv.args().first() {
		Some(dir) => Path::new(dir),
		None => match state.home {
			Some(ref home) => home.as_path(),
			None => {
				eprintln!("cd: HOME not set");
				return Flow::Continue;
			},
		},
	};
	match unistd::chdir(target) {
		Ok(()) => debug!(dir = %target.display(), "changed directory"),
		Err(e) => eprintln!("{}", ShellError::Chdir { path: target.to_owned(), source: e }),
	}
	Flow::Continue
}

pub fn match_builtin(name: &str) -> Option<Builtin> {
	if name.eq_ignore_ascii_case("exit") {
		Some(builtin_exit)
	} else if name.eq_ignore_ascii_case("cd") {
		Some(builtin_cd)
	} else {
		None
	}
}
