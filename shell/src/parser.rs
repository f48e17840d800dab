type ParseResult<T> = Result<T, String>;

/// What the parser drives while it walks a line. One pipeline is built per
/// line; the caller decides what "complete" means once `parse` returns.
pub trait PipelineSink {
	fn begin_stage(&mut self);
	fn push_arg(&mut self, arg: &str);
	fn commit_stage(&mut self);
	fn set_input_redirect(&mut self, path: &str);
	fn set_output_redirect(&mut self, path: &str);
	fn set_append_redirect(&mut self, path: &str);
	fn set_error_redirect(&mut self, path: &str);
	fn set_background(&mut self);
}

#[derive(Debug, PartialEq, Eq)]
enum RedirectType { Input, Output, Append }

struct Parser<'a> {
	line: &'a str,
	i: usize,
}

impl<'a> Parser<'a> {
	fn peek(&self) -> Option<u8> {
		self.line.as_bytes().get(self.i).cloned()
	}

	fn proceed_while<F>(&mut self, f: F) where F: Fn(u8) -> bool {
		while let Some(c) = self.peek() {
			if !f(c) { break; }
			self.i += 1;
		}
	}

	fn is_whitespace(c: u8) -> bool {
		match c {
			b' ' | b'\t' | b'\n' | b'\r' => true,
			_ => false,
		}
	}

	fn is_letter(c: u8) -> bool {
		match c {
			b'>' | b'<' | b'&' | b'|' => false,
			_ => !Parser::is_whitespace(c),
		}
	}

	fn is_digit(c: u8) -> bool {
		b'0' <= c && c <= b'9'
	}

	fn skip_whitespaces(&mut self) {
		self.proceed_while(Parser::is_whitespace);
	}

	fn at_end(&self) -> bool {
		self.i >= self.line.len()
	}

	fn read_word(&mut self) -> &'a str {
		let orig = self.i;
		self.proceed_while(Parser::is_letter);
		&self.line[orig .. self.i]
	}

	fn read_number(&mut self) -> Option<Result<i32, std::num::ParseIntError>> {
		let orig = self.i;
		self.proceed_while(Parser::is_digit);
		if orig == self.i {
			None
		} else {
			Some(self.line[orig .. self.i].parse())
		}
	}

	fn parse_redirect<S: PipelineSink>(&mut self, sink: &mut S) -> ParseResult<bool> {
		let orig = self.i;
		let num = self.read_number();

		let typ = match self.peek() {
			Some(b'<') => {
				self.i += 1;
				RedirectType::Input
			},
			Some(b'>') => if self.line.as_bytes().get(self.i + 1) == Some(&b'>') {
				self.i += 2;
				RedirectType::Append
			} else {
				self.i += 1;
				RedirectType::Output
			},
			_ => {
				self.i = orig;
				return Ok(false);
			},
		};

		let from = match num {
			None => if typ == RedirectType::Input { 0 } else { 1 },
			Some(Ok(n)) => n,
			Some(Err(e)) => { return Err(e.to_string()); },
		};

		self.skip_whitespaces();
		let target = self.read_word();
		if target.is_empty() {
			return Err("empty redirect".to_string());
		}

		match (from, typ) {
			(0, RedirectType::Input) => sink.set_input_redirect(target),
			(1, RedirectType::Output) => sink.set_output_redirect(target),
			(1, RedirectType::Append) => sink.set_append_redirect(target),
			(2, RedirectType::Output) => sink.set_error_redirect(target),
			(n, typ) => { return Err(format!("unsupported redirect: {} {:?}", n, typ)); },
		}
		Ok(true)
	}

	fn parse_command<S: PipelineSink>(&mut self, sink: &mut S) -> ParseResult<()> {
		sink.begin_stage();
		let mut words = 0;
		loop {
			self.skip_whitespaces();
			if self.parse_redirect(sink)? {
				continue;
			}
			let word = self.read_word();
			if word.is_empty() {
				break;
			}
			sink.push_arg(word);
			words += 1;
		}
		if words == 0 {
			return Err("empty command".to_string());
		}
		sink.commit_stage();
		Ok(())
	}

	fn parse_pipeline<S: PipelineSink>(&mut self, sink: &mut S) -> ParseResult<()> {
		self.skip_whitespaces();
		if self.at_end() {
			return Ok(());
		}

		loop {
			self.parse_command(sink)?;
			match self.peek() {
				Some(b'|') => { self.i += 1; },
				Some(b'&') => {
					self.i += 1;
					sink.set_background();
					self.skip_whitespaces();
					if let Some(c) = self.peek() {
						return Err(format!("character after '&': '{}'", c as char));
					} else {
						break;
					}
				},
				Some(c) => { return Err(format!("unknown command separator: '{}'", c as char)); },
				None => { break; },
			}
		}
		Ok(())
	}
}

/// Parses one input line into `sink`. A blank line produces no stages.
/// On error the sink may hold a partial pipeline and should be cleared.
pub fn parse<S: PipelineSink>(line: &str, sink: &mut S) -> ParseResult<()> {
	let mut parser = Parser { line: line, i: 0 };
	parser.parse_pipeline(sink)
}
