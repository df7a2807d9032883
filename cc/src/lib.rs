pub mod codegen;
pub mod error;
pub mod grammer;

pub use codegen::{Codegen, Item};
pub use error::{Error, LexError};
pub use grammer::lexer::Lexer;
pub use grammer::parsercore::Parser;

use arch::Target;
use grammer::ast::Program;

pub fn parse(code: &str) -> Result<Program, Error> {
    Parser::new(Lexer::new(code)).parse()
}

/// Source text to assembly lines for `target`.
pub fn compile(code: &str, target: Target) -> Result<Vec<Item>, Error> {
    let program = parse(code)?;
    Codegen::new(target).program(&program)
}
