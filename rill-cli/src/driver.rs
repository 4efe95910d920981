//! `Session`: the parse-and-run pipeline a `main.rs` invokes once per
//! process (§10.1).

use std::fs;

use rill_eval::{Environment, Interpreter, Value};
use rill_lex::{Lexer, TokenKind};
use rill_par::Parser;

use crate::config::Config;
use crate::error::DriverError;

pub struct Session {
    config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<Value, DriverError> {
        let source = fs::read_to_string(&self.config.path).map_err(|source| DriverError::ReadSource {
            path: self.config.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.config.path.display(), "source read");

        if self.config.dump_tokens {
            self.dump_tokens(&source);
        }

        let (program, handler) = Parser::new(Lexer::new(&source)).parse();
        if handler.has_errors() {
            return Err(DriverError::ParseFailed(handler.into_diagnostics()));
        }

        if self.config.dump_ast {
            eprintln!("{:#?}", program);
        }

        let mut interpreter = Interpreter::new(std::io::stdout());
        let env = Environment::new();
        Ok(interpreter.eval_program(&program, &env))
    }

    fn dump_tokens(&self, source: &str) {
        let mut lexer = Lexer::new(source);
        let mut count = 0usize;
        loop {
            let token = lexer.next_token();
            eprintln!("{:?}", token);
            count += 1;
            if token.kind == TokenKind::Eof {
                break;
            }
        }
        tracing::debug!(count, "lexing complete");
    }
}
