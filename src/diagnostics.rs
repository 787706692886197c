use std::fmt;

use thiserror::Error;

/// Represents a byte span within a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

impl SourceSpan {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Classification of a diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A character no lexical pattern accepts.
    Lex,
    Parse,
    /// Unbound identifier, or a call to something that is not a function.
    Name,
    /// Bare identifier used where a quoted value is required.
    Value,
    /// Operation applied to a value of the wrong kind, e.g. drawing a non-cat.
    Type,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::Lex => "LexError",
            DiagnosticKind::Parse => "ParseError",
            DiagnosticKind::Name => "NameError",
            DiagnosticKind::Value => "ValueError",
            DiagnosticKind::Type => "TypeError",
        };
        f.write_str(name)
    }
}

/// Rich diagnostic information surfaced to end users.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Option<SourceSpan>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            notes: Vec::new(),
        }
    }

    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(span) = self.span {
            write!(f, " ({}..{})", span.start, span.end)?;
        }
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

/// Unified error type for the CADL toolchain.
#[derive(Debug, Error)]
pub enum CadlError {
    #[error("{0}")]
    Diagnostic(#[from] Diagnostic),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CadlError {
    /// The diagnostic kind, or `None` for I/O failures.
    pub fn kind(&self) -> Option<&DiagnosticKind> {
        match self {
            CadlError::Diagnostic(diag) => Some(&diag.kind),
            CadlError::Io(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CadlError>;
