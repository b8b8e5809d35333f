//! Fatal compile-time diagnostics
//!
//! The whole pipeline shares one error type, [`CompileError`].  Every pass
//! returns `Result<_, CompileError>`; the first error unwinds to the driver,
//! which renders it and exits.  There is no error recovery and no batching:
//! one diagnostic per compiler invocation.
//!
//! A diagnostic may carry a secondary [`Note`] (clang-style two-location
//! errors), e.g. pointing at the previous declaration of a redefined symbol.
//!
//! [`Reporter`] owns the source text and filename and renders the error in
//! the familiar shape:
//!
//! ```text
//! test.c:3:9: error: use of undeclared identifier 'y'
//! 3 |     x = y + 1;
//!   |         ^~~~~
//! 1 error generated.
//! ```

use crate::parser::ast::SourceLocation;
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use std::fmt;
use std::io;

/// Secondary location attached to a [`CompileError`]
#[derive(Debug, Clone)]
pub struct Note {
    pub message: String,
    pub location: SourceLocation,
}

/// A fatal compile error with a primary location and optional note
#[derive(Debug, Clone)]
pub struct CompileError {
    pub message: String,
    pub location: SourceLocation,
    pub note: Option<Note>,
}

impl CompileError {
    pub fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
            note: None,
        }
    }

    /// Attach a secondary note pointing at another source location
    pub fn with_note(mut self, message: impl Into<String>, location: SourceLocation) -> Self {
        self.note = Some(Note {
            message: message.into(),
            location,
        });
        self
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for CompileError {}

/// Renders diagnostics against the source text.
///
/// Holds the filename and the split source lines so that tokens do not have
/// to carry their line's text around.
pub struct Reporter {
    filename: String,
    lines: Vec<String>,
}

impl Reporter {
    pub fn new(filename: &str, source: &str) -> Self {
        Self {
            filename: filename.to_string(),
            lines: source.lines().map(str::to_string).collect(),
        }
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        self.lines.get(line.wrapping_sub(1)).map(String::as_str)
    }

    fn render_block(&self, out: &mut String, severity: &str, message: &str, loc: SourceLocation) {
        out.push_str(&format!(
            "{}:{}:{}: {}: {}\n",
            self.filename, loc.line, loc.column, severity, message
        ));
        if let Some(text) = self.line_text(loc.line) {
            out.push_str(&format!("{} | {}\n", loc.line, text));
            out.push_str(&format!(
                "  | {}^~~~~\n",
                " ".repeat(loc.column.saturating_sub(1))
            ));
        }
    }

    /// Render the diagnostic as plain text (no color), including the
    /// trailing `1 error generated.` line.
    pub fn render(&self, err: &CompileError) -> String {
        let mut out = String::new();
        self.render_block(&mut out, "error", &err.message, err.location);
        if let Some(note) = &err.note {
            self.render_block(&mut out, "note", &note.message, note.location);
        }
        out.push_str("1 error generated.\n");
        out
    }

    /// Print the diagnostic to standard error, colored if stderr is a
    /// terminal.
    pub fn emit(&self, err: &CompileError) {
        if !io::stderr().is_tty() {
            eprint!("{}", self.render(err));
            return;
        }

        self.emit_block("error", &err.message, err.location, true);
        if let Some(note) = &err.note {
            self.emit_block("note", &note.message, note.location, false);
        }
        eprintln!("1 error generated.");
    }

    fn emit_block(&self, severity: &str, message: &str, loc: SourceLocation, is_error: bool) {
        let head = format!("{}:{}:{}:", self.filename, loc.line, loc.column);
        let tag = format!("{}:", severity);
        let tag = if is_error {
            tag.red().bold()
        } else {
            tag.cyan().bold()
        };
        eprintln!("{} {} {}", head.bold(), tag, message);
        if let Some(text) = self.line_text(loc.line) {
            eprintln!("{} | {}", loc.line, text);
            let caret = format!("{}^~~~~", " ".repeat(loc.column.saturating_sub(1)));
            eprintln!("  | {}", caret.green());
        }
    }
}
