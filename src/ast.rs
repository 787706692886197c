use std::rc::Rc;

/// One `name = expr;` entry inside a cat declaration body.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitInit {
    pub name: String,
    pub value: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Node,
}

/// Syntax tree handed from the parser to the interpreter.
///
/// Statements and expressions share one type; the interpreter dispatches on
/// the variant. Nodes are never mutated after parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    StmtList(Vec<Node>),
    /// Placeholder for an absent expression or `else` branch.
    Nil,
    CatDecl {
        name: String,
        traits: Vec<TraitInit>,
    },
    CatDeclSimple {
        name: String,
    },
    Draw {
        name: String,
    },
    RandomCatDecl {
        name: String,
    },
    AssignRandomCat {
        name: String,
    },
    TraitAssign {
        name: String,
        trait_name: String,
        value: Box<Node>,
    },
    Assign {
        name: String,
        value: Box<Node>,
    },
    Return(Box<Node>),
    While {
        condition: Box<Node>,
        body: Box<Node>,
    },
    If {
        condition: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Box<Node>,
    },
    Block(Box<Node>),
    FunDecl(Rc<FunDecl>),
    CallStmt {
        name: String,
        args: Vec<Node>,
    },
    CallExp {
        name: String,
        args: Vec<Node>,
    },
    Integer(i64),
    /// Raw literal text, delimiters included.
    String(String),
    Id(String),
    Attr {
        name: String,
        trait_name: String,
    },
    Not(Box<Node>),
    Eq(Box<Node>, Box<Node>),
    NotEq(Box<Node>, Box<Node>),
}

impl Node {
    pub fn is_nil(&self) -> bool {
        matches!(self, Node::Nil)
    }
}
