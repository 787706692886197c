use indexmap::IndexMap;

use crate::{
    diagnostics::{CadlError, Diagnostic, DiagnosticKind},
    value::Value,
};

pub type Scope = IndexMap<String, Value>;

/// Stack of binding scopes over one global scope.
///
/// The global scope is created with the manager and can never be popped.
/// Every function call pushes a scope and pops it on the way out.
#[derive(Debug)]
pub struct ScopeManager {
    scopes: Vec<Scope>,
}

impl Default for ScopeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeManager {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
        tracing::trace!(depth = self.scopes.len(), "pushed scope");
    }

    /// Drops the innermost scope. The global scope is kept.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
        tracing::trace!(depth = self.scopes.len(), "popped scope");
    }

    /// Number of live scopes, global included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Creates or overwrites `name` in the innermost scope only.
    pub fn declare(&mut self, name: impl Into<String>, value: Value) {
        self.innermost().insert(name.into(), value);
    }

    pub fn lookup(&self, name: &str) -> Result<Value, CadlError> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .cloned()
            .ok_or_else(|| {
                CadlError::from(Diagnostic::new(
                    DiagnosticKind::Name,
                    format!("name `{name}` is not defined"),
                ))
            })
    }

    /// Rebinds the nearest scope that already holds `name`.
    ///
    /// When no scope binds it, the name is declared in the innermost scope.
    pub fn update(&mut self, name: &str, value: Value) {
        match self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(name))
        {
            Some(slot) => *slot = value,
            None => self.declare(name, value),
        }
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.contains_key(name))
    }

    fn innermost(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}
