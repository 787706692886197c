use std::io::{self, Write};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    ast::Node,
    diagnostics::{CadlError, Diagnostic, DiagnosticKind, Result},
    environment::ScopeManager,
    mood::apply_mood_override,
    parser,
    render::render_cat,
    value::{Cat, Value},
};

pub const EARS_OPTIONS: [&str; 5] = ["pointy", "droopy", "round", "long", "short"];
pub const MOUTH_OPTIONS: [&str; 5] = ["smile", "frown", "neutral", "open", "smirk"];
pub const BODY_OPTIONS: [&str; 4] = ["smooth", "fluffy", "normal", "chubby"];
pub const TAIL_OPTIONS: [&str; 4] = ["none", "fluffy", "straight", "curled"];
pub const WHISKERS_OPTIONS: [&str; 3] = ["long", "short", "curled"];
pub const MOOD_OPTIONS: [&str; 6] = ["happy", "sleepy", "excited", "loving", "curious", "angry"];

const RANDOM_TRAITS: [(&str, &[&str]); 5] = [
    ("ears", &EARS_OPTIONS),
    ("mouth", &MOUTH_OPTIONS),
    ("body", &BODY_OPTIONS),
    ("tail", &TAIL_OPTIONS),
    ("whiskers", &WHISKERS_OPTIONS),
];

fn pick(rng: &mut impl Rng, options: &[&'static str]) -> &'static str {
    options[rng.gen_range(0..options.len())]
}

/// Builds a cat with random traits.
///
/// Half of the time a mood is drawn first and its override applied, and only
/// the traits the override left untouched are randomized. Otherwise every
/// trait but the mood is randomized and the mood stays unset.
pub fn random_cat(rng: &mut impl Rng) -> Cat {
    let mut cat = Cat::new();
    if rng.gen_bool(0.5) {
        cat.set("mood", Some(pick(rng, &MOOD_OPTIONS).to_string()));
        apply_mood_override(&mut cat);
    }
    for (name, options) in RANDOM_TRAITS {
        if !cat.contains(name) {
            cat.set(name, Some(pick(rng, options).to_string()));
        }
    }
    cat
}

/// Interpreter-wide settings.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    /// Seed for random cats; `None` draws one from the OS.
    pub seed: Option<u64>,
}

pub struct Interpreter<W: Write = io::Stdout> {
    scopes: ScopeManager,
    rng: StdRng,
    out: W,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_context(ExecutionContext::default())
    }

    pub fn with_context(context: ExecutionContext) -> Self {
        Self::with_output(io::stdout(), context)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(out: W, context: ExecutionContext) -> Self {
        let rng = match context.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            scopes: ScopeManager::new(),
            rng,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn scopes(&self) -> &ScopeManager {
        &self.scopes
    }

    pub fn eval_source(&mut self, source: &str) -> Result<()> {
        let program = parser::parse_program(source)?;
        self.run(&program)
    }

    /// Executes a program. A top-level `return` ends it early.
    pub fn run(&mut self, program: &Node) -> Result<()> {
        let result = self.visit(program).map(|_| ());
        self.out.flush()?;
        result
    }

    pub fn evaluate(&mut self, node: &Node) -> Result<Value> {
        match self.visit(node)? {
            Flow::Value(value) => Ok(value),
            Flow::Next | Flow::Return(_) => Ok(Value::Nil),
        }
    }

    fn visit(&mut self, node: &Node) -> Result<Flow> {
        match node {
            Node::StmtList(statements) => {
                for statement in statements {
                    if let Flow::Return(value) = self.visit(statement)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Next)
            }
            Node::Nil => Ok(Flow::Value(Value::Nil)),
            Node::CatDecl { name, traits } => {
                let mut cat = Cat::new();
                for init in traits {
                    reject_bare_identifier(&init.value, &init.name, "trait value")?;
                    let value = self.evaluate(&init.value)?.into_trait(&init.name)?;
                    cat.set(init.name.clone(), value);
                }
                tracing::debug!(cat = %name, traits = cat.traits().len(), "declared cat");
                self.scopes.declare(name.clone(), Value::cat(cat));
                Ok(Flow::Next)
            }
            Node::CatDeclSimple { name } => {
                tracing::debug!(cat = %name, "declared cat");
                self.scopes.declare(name.clone(), Value::cat(Cat::new()));
                Ok(Flow::Next)
            }
            Node::Draw { name } => {
                self.draw(name)?;
                Ok(Flow::Next)
            }
            Node::RandomCatDecl { name } => {
                let cat = random_cat(&mut self.rng);
                tracing::debug!(cat = %name, "generated random cat: {cat}");
                self.scopes.declare(name.clone(), Value::cat(cat));
                Ok(Flow::Next)
            }
            Node::AssignRandomCat { name } => {
                let cat = random_cat(&mut self.rng);
                tracing::debug!(cat = %name, "regenerated random cat: {cat}");
                self.scopes.update(name, Value::cat(cat));
                Ok(Flow::Next)
            }
            Node::TraitAssign {
                name,
                trait_name,
                value,
            } => {
                reject_bare_identifier(value, trait_name, "trait value")?;
                let value = self.evaluate(value)?.into_trait(trait_name)?;
                let cat = self.scopes.lookup(name)?.into_cat(name)?;
                let mut cat = cat.borrow_mut();
                cat.set(trait_name.clone(), value);
                if trait_name == "mood" {
                    apply_mood_override(&mut cat);
                }
                Ok(Flow::Next)
            }
            Node::Assign { name, value } => {
                reject_bare_identifier(value, name, "value")?;
                let value = self.evaluate(value)?;
                self.scopes.update(name, value);
                Ok(Flow::Next)
            }
            Node::Return(expr) => {
                let value = if expr.is_nil() {
                    Value::Nil
                } else {
                    self.evaluate(expr)?
                };
                Ok(Flow::Return(value))
            }
            Node::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.visit(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Next)
            }
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.visit(then_branch)
                } else if !else_branch.is_nil() {
                    self.visit(else_branch)
                } else {
                    Ok(Flow::Next)
                }
            }
            Node::Block(statements) => self.visit(statements),
            Node::FunDecl(fun) => {
                self.scopes
                    .declare(fun.name.clone(), Value::Function(fun.clone()));
                Ok(Flow::Next)
            }
            Node::CallStmt { name, args } => {
                self.call(name, args)?;
                Ok(Flow::Next)
            }
            Node::CallExp { name, args } => Ok(Flow::Value(self.call(name, args)?)),
            Node::Integer(n) => Ok(Flow::Value(Value::Int(*n))),
            Node::String(raw) => Ok(Flow::Value(Value::string(strip_quotes(raw)))),
            Node::Id(name) => Ok(Flow::Value(self.scopes.lookup(name)?)),
            Node::Attr { name, trait_name } => {
                let cat = self.scopes.lookup(name)?.into_cat(name)?;
                let value = Value::from_trait(cat.borrow().get(trait_name));
                Ok(Flow::Value(value))
            }
            Node::Not(expr) => {
                let value = self.evaluate(expr)?;
                Ok(Flow::Value(Value::Bool(!value.is_truthy())))
            }
            Node::Eq(left, right) => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Ok(Flow::Value(Value::Bool(left == right)))
            }
            Node::NotEq(left, right) => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Ok(Flow::Value(Value::Bool(left != right)))
            }
        }
    }

    /// Applies the mood override to the bound cat and writes the art.
    fn draw(&mut self, name: &str) -> Result<()> {
        let cat = self.scopes.lookup(name)?.into_cat(name)?;
        let art = {
            let mut cat = cat.borrow_mut();
            apply_mood_override(&mut cat);
            render_cat(&cat)
        };
        tracing::debug!(cat = %name, "drawing cat");
        writeln!(self.out, "{art}")?;
        if !name.eq_ignore_ascii_case("noname") {
            writeln!(self.out, "{name}")?;
        }
        Ok(())
    }

    fn call(&mut self, name: &str, args: &[Node]) -> Result<Value> {
        let fun = match self.scopes.lookup(name)? {
            Value::Function(fun) => fun,
            other => {
                return Err(CadlError::from(Diagnostic::new(
                    DiagnosticKind::Name,
                    format!("`{name}` is a {}, not a function", other.type_name()),
                )));
            }
        };
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.evaluate(arg)?);
        }
        tracing::debug!(function = %name, args = values.len(), "calling function");

        self.scopes.push_scope();
        for (param, value) in fun.params.iter().zip(values) {
            self.scopes.declare(param.clone(), value);
        }
        let flow = self.visit(&fun.body);
        self.scopes.pop_scope();

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Next | Flow::Value(_) => Ok(Value::Nil),
        }
    }
}

/// Unquoted names are not accepted as assigned values.
fn reject_bare_identifier(value: &Node, target: &str, what: &str) -> Result<()> {
    match value {
        Node::Id(bad) => Err(CadlError::from(
            Diagnostic::new(DiagnosticKind::Value, format!("{what} '{bad}' must be quoted"))
                .with_note(format!("example: {target} = \"{bad}\";")),
        )),
        _ => Ok(()),
    }
}

fn strip_quotes(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

enum Flow {
    Next,
    Value(Value),
    Return(Value),
}
