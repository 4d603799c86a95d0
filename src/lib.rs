pub mod args;
pub mod err;
pub mod lex;
pub mod parse;

pub use args::Args;
pub use err::{ErrorKind, ParseError, Result};
pub use parse::{parse, Parser};

use err::Handler;

/// Checks source units and prints the outcome of each.
#[derive(Default)]
pub struct Checker {
    show_tokens: bool,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print the token stream of every unit before parsing it.
    pub fn show_tokens(mut self, show: bool) -> Self {
        self.show_tokens = show;
        self
    }

    pub fn run(&mut self, src: &str) -> Result<()> {
        if self.show_tokens {
            for t in lex::tokenize(src) {
                println!(
                    "{}:{}-{} {} '{}'",
                    t.line, t.start_column, t.end_column, t.kind, t.text
                );
            }
        }

        let handler = Handler::new(src);
        match parse(src) {
            Ok(()) => {
                println!("Parsing completed successfully.");
                Ok(())
            }
            Err(e) => {
                handler.report(&e);
                Err(e)
            }
        }
    }
}
