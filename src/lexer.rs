use std::fmt;

use crate::diagnostics::{Diagnostic, DiagnosticKind, SourceSpan};

/// Token categories, in the order the scanner tries them.
///
/// The declaration order is significant: at every position the first
/// pattern that matches wins, so keywords sit before `Id` and the
/// two-character operators sit before their one-character prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    Comment,
    Whitespace,
    Cat,
    Func,
    Draw,
    RandomCat,
    Return,
    While,
    If,
    Else,
    Eq,
    NotEq,
    Not,
    Assign,
    Dot,
    LParen,
    RParen,
    LCurly,
    RCurly,
    Semi,
    Comma,
    String,
    Integer,
    Id,
    Unknown,
    Eof,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Comment => "COMMENT",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Cat => "CAT",
            TokenKind::Func => "FUNC",
            TokenKind::Draw => "DRAW",
            TokenKind::RandomCat => "RANDOMCAT",
            TokenKind::Return => "RETURN",
            TokenKind::While => "WHILE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Eq => "EQ",
            TokenKind::NotEq => "NOTEQ",
            TokenKind::Not => "NOT",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Dot => "DOT",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LCurly => "LCURLY",
            TokenKind::RCurly => "RCURLY",
            TokenKind::Semi => "SEMI",
            TokenKind::Comma => "COMMA",
            TokenKind::String => "STRING",
            TokenKind::Integer => "INTEGER",
            TokenKind::Id => "ID",
            TokenKind::Unknown => "UNKNOWN",
            TokenKind::Eof => "EOF",
        }
    }

    fn is_discarded(self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::Whitespace)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: SourceSpan,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lexeme.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} {}", self.kind, self.lexeme)
        }
    }
}

enum Pattern {
    Literal(&'static str),
    LineComment,
    Whitespace,
    QuotedString,
    Digits,
    Identifier,
    AnyChar,
}

const PATTERNS: &[(TokenKind, Pattern)] = &[
    (TokenKind::Comment, Pattern::LineComment),
    (TokenKind::Whitespace, Pattern::Whitespace),
    (TokenKind::Cat, Pattern::Literal("cat")),
    (TokenKind::Func, Pattern::Literal("func")),
    (TokenKind::Draw, Pattern::Literal("draw")),
    (TokenKind::RandomCat, Pattern::Literal("randomcat")),
    (TokenKind::Return, Pattern::Literal("return")),
    (TokenKind::While, Pattern::Literal("while")),
    (TokenKind::If, Pattern::Literal("if")),
    (TokenKind::Else, Pattern::Literal("else")),
    (TokenKind::Eq, Pattern::Literal("==")),
    (TokenKind::NotEq, Pattern::Literal("!=")),
    (TokenKind::Not, Pattern::Literal("!")),
    (TokenKind::Assign, Pattern::Literal("=")),
    (TokenKind::Dot, Pattern::Literal(".")),
    (TokenKind::LParen, Pattern::Literal("(")),
    (TokenKind::RParen, Pattern::Literal(")")),
    (TokenKind::LCurly, Pattern::Literal("{")),
    (TokenKind::RCurly, Pattern::Literal("}")),
    (TokenKind::Semi, Pattern::Literal(";")),
    (TokenKind::Comma, Pattern::Literal(",")),
    (TokenKind::String, Pattern::QuotedString),
    (TokenKind::Integer, Pattern::Digits),
    (TokenKind::Id, Pattern::Identifier),
    (TokenKind::Unknown, Pattern::AnyChar),
];

impl Pattern {
    /// Byte length of the match anchored at the start of `rest`.
    fn match_len(&self, rest: &str) -> Option<usize> {
        match self {
            Pattern::Literal(text) => rest.starts_with(*text).then_some(text.len()),
            Pattern::LineComment => rest
                .starts_with("//")
                .then(|| rest.find('\n').unwrap_or(rest.len())),
            Pattern::Whitespace => {
                non_empty(prefix_len(rest, |ch| matches!(ch, ' ' | '\t' | '\n')))
            }
            Pattern::QuotedString => {
                let body = rest.strip_prefix('"')?;
                body.find('"').map(|end| end + 2)
            }
            Pattern::Digits => non_empty(prefix_len(rest, |ch| ch.is_ascii_digit())),
            Pattern::Identifier => {
                let first = rest.chars().next().filter(char::is_ascii_alphabetic)?;
                let tail = &rest[first.len_utf8()..];
                Some(1 + prefix_len(tail, |ch| ch.is_ascii_alphanumeric() || ch == '_'))
            }
            Pattern::AnyChar => rest.chars().next().map(char::len_utf8),
        }
    }
}

fn prefix_len(text: &str, predicate: impl Fn(char) -> bool) -> usize {
    text.find(|ch: char| !predicate(ch)).unwrap_or(text.len())
}

fn non_empty(len: usize) -> Option<usize> {
    (len > 0).then_some(len)
}

pub struct Lexer<'a> {
    source: &'a str,
    current: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, current: 0 }
    }

    fn next_match(&self) -> (TokenKind, usize) {
        let rest = &self.source[self.current..];
        PATTERNS
            .iter()
            .find_map(|(kind, pattern)| pattern.match_len(rest).map(|len| (*kind, len)))
            .unwrap_or((TokenKind::Unknown, rest.len()))
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, Diagnostic> {
        let mut tokens = Vec::new();
        while self.current < self.source.len() {
            let (kind, len) = self.next_match();
            let start = self.current;
            let end = start + len;
            self.current = end;
            if kind.is_discarded() {
                continue;
            }
            let lexeme = &self.source[start..end];
            if kind == TokenKind::Unknown {
                return Err(Diagnostic::new(
                    DiagnosticKind::Lex,
                    format!("unexpected character '{lexeme}'"),
                )
                .with_span(SourceSpan { start, end }));
            }
            tokens.push(Token {
                kind,
                lexeme: lexeme.to_string(),
                span: SourceSpan { start, end },
            });
        }
        tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            span: SourceSpan::new(self.current, self.current),
        });
        tracing::trace!(count = tokens.len(), "tokenized source");
        Ok(tokens)
    }
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, Diagnostic> {
    Lexer::new(source).tokenize()
}

/// Cursor over a token sequence that always ends in `Eof`.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    current: usize,
}

impl TokenStream {
    pub fn new(source: &str) -> Result<Self, Diagnostic> {
        Ok(Self::from_tokens(tokenize(source)?))
    }

    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|tok| tok.kind) != Some(TokenKind::Eof) {
            let end = tokens.last().map(|tok| tok.span.end).unwrap_or(0);
            tokens.push(Token {
                kind: TokenKind::Eof,
                lexeme: String::new(),
                span: SourceSpan::new(end, end),
            });
        }
        Self { tokens, current: 0 }
    }

    /// The token under the cursor.
    pub fn pointer(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Moves past the current token and returns the new one. Stays put on `Eof`.
    pub fn advance(&mut self) -> &Token {
        if !self.at_end() {
            self.current += 1;
        }
        self.pointer()
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.pointer().kind == kind
    }

    pub fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of `kind` or reports what was found instead.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, Diagnostic> {
        let token = self.pointer().clone();
        if token.kind == kind {
            self.advance();
            Ok(token)
        } else {
            Err(Diagnostic::new(
                DiagnosticKind::Parse,
                format!("unexpected token {token} while parsing, expected {kind}"),
            )
            .with_span(token.span))
        }
    }

    pub fn at_end(&self) -> bool {
        self.pointer().kind == TokenKind::Eof
    }
}
