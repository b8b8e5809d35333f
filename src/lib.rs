//! # Introduction
//!
//! minicc compiles MiniC — a small C subset with `int`, `float`, `bool`,
//! and `void` functions — down to an LLVM-flavoured textual IR.  The first
//! error encountered anywhere in the pipeline is rendered as a clang-style
//! diagnostic and ends the compilation; there is no recovery and no second
//! diagnostic.
//!
//! ## Compilation pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Semantic analysis / emission → IR text
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds an AST by recursive
//!    descent; the AST pretty-prints itself as a box-drawing tree.
//! 2. [`sema`] — walks the AST once, resolving names against a scope stack,
//!    applying the implicit-conversion rules, and emitting IR as it goes.
//! 3. [`ir`] — the emitted module: functions of basic blocks over virtual
//!    registers, rendered deterministically by `Display`.
//! 4. [`diagnostics`] — the shared [`diagnostics::CompileError`] type and
//!    the renderer that turns it into `file:line:col: error: ...` output.
//!
//! ## Supported MiniC
//!
//! Types: `int`, `float`, `bool`; `void` for functions only.
//! Control flow: `if/else` (braced), `while`, `return`.
//! Conversions: `bool` → `int` → `float` widening anywhere; `int`/`float`
//! to `bool` only where a condition is expected. Narrowing is an error.

pub mod diagnostics;
pub mod ir;
pub mod parser;
pub mod sema;
