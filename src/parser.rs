use std::rc::Rc;

use crate::{
    ast::{FunDecl, Node, TraitInit},
    diagnostics::{Diagnostic, DiagnosticKind},
    lexer::{Token, TokenKind, TokenStream},
};

pub fn parse_program(source: &str) -> Result<Node, Diagnostic> {
    let tokens = TokenStream::new(source)?;
    Parser::new(tokens).parse_program()
}

pub struct Parser {
    tokens: TokenStream,
}

impl Parser {
    pub fn new(tokens: TokenStream) -> Self {
        Self { tokens }
    }

    pub fn parse_program(mut self) -> Result<Node, Diagnostic> {
        let mut statements = Vec::new();
        while !self.tokens.at_end() {
            statements.push(self.parse_statement()?);
        }
        Ok(Node::StmtList(statements))
    }

    fn parse_statement(&mut self) -> Result<Node, Diagnostic> {
        match self.tokens.pointer().kind {
            TokenKind::Cat => self.parse_cat_decl(),
            TokenKind::RandomCat => {
                self.tokens.advance();
                let name = self.identifier("expected cat name after `randomcat`")?;
                self.tokens.expect(TokenKind::Semi)?;
                Ok(Node::RandomCatDecl { name })
            }
            TokenKind::Draw => {
                self.tokens.advance();
                let name = self.identifier("expected cat name after `draw`")?;
                self.tokens.expect(TokenKind::Semi)?;
                Ok(Node::Draw { name })
            }
            TokenKind::Func => self.parse_function(),
            TokenKind::Return => {
                self.tokens.advance();
                let value = if self.tokens.check(TokenKind::Semi) {
                    Node::Nil
                } else {
                    self.parse_expression()?
                };
                self.tokens.expect(TokenKind::Semi)?;
                Ok(Node::Return(Box::new(value)))
            }
            TokenKind::While => {
                self.tokens.advance();
                let condition = self.parse_condition()?;
                let body = self.parse_statement()?;
                Ok(Node::While {
                    condition: Box::new(condition),
                    body: Box::new(body),
                })
            }
            TokenKind::If => self.parse_if(),
            TokenKind::LCurly => self.parse_block(),
            TokenKind::Id => self.parse_identifier_statement(),
            _ => Err(self.unexpected("expected a statement")),
        }
    }

    fn parse_cat_decl(&mut self) -> Result<Node, Diagnostic> {
        self.tokens.expect(TokenKind::Cat)?;
        let name = self.identifier("expected cat name after `cat`")?;
        if self.tokens.matches(TokenKind::Semi) {
            return Ok(Node::CatDeclSimple { name });
        }
        self.tokens.expect(TokenKind::LCurly)?;
        let mut traits = Vec::new();
        while !self.tokens.check(TokenKind::RCurly) {
            let trait_name = self.identifier("expected trait name in cat body")?;
            self.tokens.expect(TokenKind::Assign)?;
            let value = self.parse_expression()?;
            self.tokens.expect(TokenKind::Semi)?;
            traits.push(TraitInit {
                name: trait_name,
                value,
            });
        }
        self.tokens.expect(TokenKind::RCurly)?;
        self.tokens.matches(TokenKind::Semi);
        Ok(Node::CatDecl { name, traits })
    }

    fn parse_function(&mut self) -> Result<Node, Diagnostic> {
        self.tokens.expect(TokenKind::Func)?;
        let name = self.identifier("expected function name after `func`")?;
        self.tokens.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.tokens.check(TokenKind::RParen) {
            loop {
                params.push(self.identifier("expected parameter name")?);
                if !self.tokens.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.tokens.expect(TokenKind::RParen)?;
        if !self.tokens.check(TokenKind::LCurly) {
            return Err(self.unexpected("expected `{` to start function body"));
        }
        let body = self.parse_block()?;
        Ok(Node::FunDecl(Rc::new(FunDecl { name, params, body })))
    }

    fn parse_if(&mut self) -> Result<Node, Diagnostic> {
        self.tokens.expect(TokenKind::If)?;
        let condition = self.parse_condition()?;
        let then_branch = self.parse_statement()?;
        let else_branch = if self.tokens.matches(TokenKind::Else) {
            self.parse_statement()?
        } else {
            Node::Nil
        };
        Ok(Node::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    fn parse_condition(&mut self) -> Result<Node, Diagnostic> {
        self.tokens.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.tokens.expect(TokenKind::RParen)?;
        Ok(condition)
    }

    fn parse_block(&mut self) -> Result<Node, Diagnostic> {
        self.tokens.expect(TokenKind::LCurly)?;
        let mut statements = Vec::new();
        while !self.tokens.check(TokenKind::RCurly) {
            if self.tokens.at_end() {
                return Err(self.unexpected("expected `}` to close block"));
            }
            statements.push(self.parse_statement()?);
        }
        self.tokens.expect(TokenKind::RCurly)?;
        Ok(Node::Block(Box::new(Node::StmtList(statements))))
    }

    /// Statements that open with a name: trait assignment, assignment or call.
    fn parse_identifier_statement(&mut self) -> Result<Node, Diagnostic> {
        let name = self.identifier("expected identifier")?;
        let node = match self.tokens.pointer().kind {
            TokenKind::Dot => {
                self.tokens.advance();
                let trait_name = self.identifier("expected trait name after `.`")?;
                self.tokens.expect(TokenKind::Assign)?;
                let value = self.parse_expression()?;
                Node::TraitAssign {
                    name,
                    trait_name,
                    value: Box::new(value),
                }
            }
            TokenKind::Assign => {
                self.tokens.advance();
                if self.tokens.matches(TokenKind::RandomCat) {
                    Node::AssignRandomCat { name }
                } else {
                    let value = self.parse_expression()?;
                    Node::Assign {
                        name,
                        value: Box::new(value),
                    }
                }
            }
            TokenKind::LParen => {
                let args = self.parse_arguments()?;
                Node::CallStmt { name, args }
            }
            _ => return Err(self.unexpected("expected `.`, `=` or `(` after identifier")),
        };
        self.tokens.expect(TokenKind::Semi)?;
        Ok(node)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Node>, Diagnostic> {
        self.tokens.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.tokens.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.tokens.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.tokens.expect(TokenKind::RParen)?;
        Ok(args)
    }

    fn parse_expression(&mut self) -> Result<Node, Diagnostic> {
        let mut left = self.parse_unary()?;
        loop {
            if self.tokens.matches(TokenKind::Eq) {
                let right = self.parse_unary()?;
                left = Node::Eq(Box::new(left), Box::new(right));
            } else if self.tokens.matches(TokenKind::NotEq) {
                let right = self.parse_unary()?;
                left = Node::NotEq(Box::new(left), Box::new(right));
            } else {
                return Ok(left);
            }
        }
    }

    fn parse_unary(&mut self) -> Result<Node, Diagnostic> {
        if self.tokens.matches(TokenKind::Not) {
            let operand = self.parse_unary()?;
            return Ok(Node::Not(Box::new(operand)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Node, Diagnostic> {
        let token = self.tokens.pointer().clone();
        match token.kind {
            TokenKind::Integer => {
                self.tokens.advance();
                token.lexeme.parse().map(Node::Integer).map_err(|_| {
                    Diagnostic::new(
                        DiagnosticKind::Parse,
                        format!("integer literal `{}` is out of range", token.lexeme),
                    )
                    .with_span(token.span)
                })
            }
            TokenKind::String => {
                self.tokens.advance();
                Ok(Node::String(token.lexeme))
            }
            TokenKind::Id => {
                self.tokens.advance();
                match self.tokens.pointer().kind {
                    TokenKind::Dot => {
                        self.tokens.advance();
                        let trait_name = self.identifier("expected trait name after `.`")?;
                        Ok(Node::Attr {
                            name: token.lexeme,
                            trait_name,
                        })
                    }
                    TokenKind::LParen => {
                        let args = self.parse_arguments()?;
                        Ok(Node::CallExp {
                            name: token.lexeme,
                            args,
                        })
                    }
                    _ => Ok(Node::Id(token.lexeme)),
                }
            }
            TokenKind::LParen => {
                self.tokens.advance();
                let inner = self.parse_expression()?;
                self.tokens.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.unexpected("expected an expression")),
        }
    }

    fn identifier(&mut self, message: &str) -> Result<String, Diagnostic> {
        if self.tokens.check(TokenKind::Id) {
            let token = self.tokens.pointer().lexeme.clone();
            self.tokens.advance();
            Ok(token)
        } else {
            Err(self.unexpected(message))
        }
    }

    fn unexpected(&self, message: &str) -> Diagnostic {
        let token: &Token = self.tokens.pointer();
        Diagnostic::new(
            DiagnosticKind::Parse,
            format!("{message}, found {token}"),
        )
        .with_span(token.span)
    }
}
