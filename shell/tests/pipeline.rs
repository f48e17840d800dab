mod common;

use common::*;

#[test]
fn two_stage_pipe_then_prompt() {
	let sh = ShellHandler::new();
	let out = sh.run("echo hi | tr h H\n");
	assert!(out.status.success());
	assert_eq!(stdout(&out), format!("{}Hi\n{}", PROMPT, PROMPT));
}

#[test]
fn input_and_output_redirection() {
	let sh = ShellHandler::new();
	sh.write("in.txt", "abc\n");
	let out = sh.run("cat < in.txt > out.txt\n");
	assert!(out.status.success());
	assert_eq!(sh.read("out.txt"), "abc\n");
	assert_eq!(stdout(&out), format!("{}{}", PROMPT, PROMPT));
}

#[test]
fn append_wins_over_output() {
	let sh = ShellHandler::new();
	sh.write("app.txt", "old\n");
	let out = sh.run("echo new > trunc.txt >> app.txt\n");
	assert!(out.status.success());
	assert_eq!(sh.read("app.txt"), "old\nnew\n");
	assert!(!sh.path("trunc.txt").exists());
}

#[test]
fn output_truncates() {
	let sh = ShellHandler::new();
	sh.write("out.txt", "a much longer previous content\n");
	sh.run("echo short > out.txt\n");
	assert_eq!(sh.read("out.txt"), "short\n");
}

#[test]
fn large_data_crosses_several_stages_intact() {
	let sh = ShellHandler::new();
	let out = sh.run("seq 1 100000 | cat | cat > seq.txt\n");
	assert!(out.status.success());
	let expected: String = (1 .. 100001).map(|n| format!("{}\n", n)).collect();
	assert!(expected.len() > 65536);
	assert_eq!(sh.read("seq.txt"), expected);
}

#[test]
fn error_redirect_covers_every_stage() {
	let sh = ShellHandler::new();
	let out = sh.run("ls /definitely-missing-1 | ls /definitely-missing-2 2> err.txt\n");
	assert!(out.status.success());
	let err = sh.read("err.txt");
	assert!(err.contains("definitely-missing-1"), "{}", err);
	assert!(err.contains("definitely-missing-2"), "{}", err);
	assert!(!stderr(&out).contains("definitely-missing"));
}

#[test]
fn shell_streams_are_restored_after_redirection() {
	let sh = ShellHandler::new();
	let out = sh.run("echo one > one.txt\necho two\n");
	assert_eq!(sh.read("one.txt"), "one\n");
	assert_eq!(stdout(&out), format!("{}{}two\n{}", PROMPT, PROMPT, PROMPT));
}

#[test]
fn empty_lines_do_nothing() {
	let sh = ShellHandler::new();
	let out = sh.run("\n   \n");
	assert!(out.status.success());
	assert_eq!(stdout(&out), PROMPT.repeat(3));
}

#[test]
fn single_command_mode() {
	let sh = ShellHandler::new();
	let out = sh.command().arg("-c").arg("echo hi | tr h H").output().unwrap();
	assert!(out.status.success());
	assert_eq!(stdout(&out), "Hi\n");
}

#[test]
fn command_table_is_printed_on_request() {
	let sh = ShellHandler::new();
	let out = sh.command().arg("--show-table").arg("-c").arg("true 2> e.txt").output().unwrap();
	let text = stdout(&out);
	assert!(text.contains("COMMAND TABLE"));
	assert!(text.contains("e.txt"));
}

#[test]
fn every_child_start_is_journaled() {
	let sh = ShellHandler::new();
	sh.run("echo a | cat | cat\ntrue\n");
	let log = std::fs::read_to_string(sh.log_path()).unwrap();
	assert_eq!(log.lines().count(), 4);
	assert!(log.lines().all(|l| l.starts_with("Child process ")));
}

#[test]
fn journal_can_be_disabled() {
	let sh = ShellHandler::new();
	sh.command().arg("--no-event-log").arg("-c").arg("true").output().unwrap();
	assert!(!sh.log_path().exists());
}
