//! MiniC parsing pipeline
//!
//! `lexer` turns source text into a token stream, `parser` turns the token
//! stream into the AST defined in `ast`.  The parser is recursive descent
//! over an LL(1) grammar; the single place it looks two tokens ahead is to
//! tell an assignment (`x = ...`) from a plain identifier expression.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use self::lexer::{Lexer, Token, TokenKind};
pub use self::parser::Parser;

use self::ast::Program;
use crate::diagnostics::CompileError;

/// Lex and parse a source string in one step.
pub fn parse(source: &str) -> Result<Program, CompileError> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse_program()
}
