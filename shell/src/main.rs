use std::process;

use anyhow::{Context,Result};

use myshell::cli;
use myshell::config::Config;
use myshell::error::ShellError;
use myshell::eval::Flow;
use myshell::logging;
use myshell::reader::LineReader;
use myshell::shell::Shell;
use myshell::signal::Interrupts;

fn run(args: &cli::CliArgs) -> Result<Flow> {
	let mut shell = Shell::new(Config::from_args(args));
	if let Some(ref line) = args.command {
		return Ok(shell.run_line(line)?);
	}
	let interrupts = Interrupts::install().context("installing SIGINT handler")?;
	let mut reader = LineReader::stdin();
	Ok(shell.run(&mut reader, &interrupts)?)
}

fn main() {
	let args = cli::parse();
	if let Err(e) = logging::init_logging(args.log_level) {
		eprintln!("myshell: {:#}", e);
	}

	match run(&args) {
		Ok(Flow::Exit) => println!("Exiting..\nGoodbye!"),
		Ok(Flow::Continue) => {},
		Err(e) => {
			eprintln!("myshell: {:#}", e);
			let code = e.downcast_ref::<ShellError>().map_or(1, |e| e.exit_code());
			process::exit(code);
		},
	}
}
