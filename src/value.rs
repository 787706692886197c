use std::{cell::RefCell, fmt, rc::Rc};

use indexmap::IndexMap;

use crate::{
    ast::FunDecl,
    diagnostics::{CadlError, Diagnostic, DiagnosticKind},
};

/// Trait keys the renderer and mood engine understand.
pub const TRAIT_NAMES: [&str; 6] = ["ears", "mouth", "body", "tail", "whiskers", "mood"];

/// The language's only structured value.
///
/// A key mapped to `None` is present but unset: it still counts as locked
/// for the mood engine, but renders with the default fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cat {
    traits: IndexMap<String, Option<String>>,
}

impl Cat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_traits<K, V>(traits: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            traits: traits
                .into_iter()
                .map(|(key, value)| (key.into(), Some(value.into())))
                .collect(),
        }
    }

    /// Value of a trait, `None` when absent or unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.traits.get(name).and_then(|value| value.as_deref())
    }

    /// Whether the key exists at all, set or not.
    pub fn contains(&self, name: &str) -> bool {
        self.traits.contains_key(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Option<String>) {
        self.traits.insert(name.into(), value);
    }

    pub fn traits(&self) -> &IndexMap<String, Option<String>> {
        &self.traits
    }

}

impl fmt::Display for Cat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cat {{")?;
        for (idx, (key, value)) in self.traits.iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            match value {
                Some(value) => write!(f, " {key}: \"{value}\"")?,
                None => write!(f, " {key}: nil")?,
            }
        }
        if !self.traits.is_empty() {
            write!(f, " ")?;
        }
        write!(f, "}}")
    }
}

/// Shared handle to a cat. Every binding, parameter and alias of one cat
/// sees the same traits.
pub type CatRef = Rc<RefCell<Cat>>;

#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Int(i64),
    Bool(bool),
    Str(String),
    Cat(CatRef),
    Function(Rc<FunDecl>),
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::Str(value.into())
    }

    pub fn cat(cat: Cat) -> Self {
        Value::Cat(Rc::new(RefCell::new(cat)))
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Int(n) => *n != 0,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::Cat(_) | Value::Function(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Int(_) => "integer",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Cat(_) => "cat",
            Value::Function(_) => "function",
        }
    }

    /// Lifts a stored trait back into a runtime value.
    pub fn from_trait(value: Option<&str>) -> Self {
        match value {
            Some(text) => Value::string(text),
            None => Value::Nil,
        }
    }

    /// Converts a value into something a trait slot can hold.
    pub fn into_trait(self, trait_name: &str) -> Result<Option<String>, CadlError> {
        match self {
            Value::Nil => Ok(None),
            Value::Str(s) => Ok(Some(s)),
            Value::Int(n) => Ok(Some(n.to_string())),
            Value::Bool(b) => Ok(Some(b.to_string())),
            other => Err(CadlError::from(Diagnostic::new(
                DiagnosticKind::Type,
                format!(
                    "trait `{trait_name}` cannot hold a {} value",
                    other.type_name()
                ),
            ))),
        }
    }

    pub fn into_cat(self, name: &str) -> Result<CatRef, CadlError> {
        match self {
            Value::Cat(cat) => Ok(cat),
            other => Err(CadlError::from(Diagnostic::new(
                DiagnosticKind::Type,
                format!("`{name}` is a {}, expected a cat", other.type_name()),
            ))),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(n), Value::Bool(b)) | (Value::Bool(b), Value::Int(n)) => *n == i64::from(*b),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Cat(a), Value::Cat(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Cat(cat) => write!(f, "{}", cat.borrow()),
            Value::Function(fun) => write!(f, "<func {}>", fun.name),
        }
    }
}
