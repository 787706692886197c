//! Core library for CADL, a small language for declaring, randomizing and
//! drawing ASCII cats. Implements lexing, parsing, scoped evaluation, mood
//! overrides and rendering.

pub mod ast;
pub mod diagnostics;
pub mod environment;
pub mod lexer;
pub mod mood;
pub mod parser;
pub mod render;
pub mod repl;
pub mod runtime;
pub mod value;

pub use diagnostics::{CadlError, Diagnostic, DiagnosticKind, SourceSpan};
pub use repl::Repl;
pub use runtime::{ExecutionContext, Interpreter};
