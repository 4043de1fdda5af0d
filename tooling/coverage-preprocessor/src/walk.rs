// SPDX-License-Identifier: Apache-2.0
//
// Depth-first walk over the parts of a Solidity parse tree the preprocessor
// cares about. Every node is entered before its children and left after them.

use solang_parser::pt::{
    CatchClause, ContractPart, FunctionDefinition, SourceUnit, SourceUnitPart, Statement,
};

/// A node handed to a [`Visitor`].
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// Functions, constructors, modifiers, fallback/receive and free functions.
    Function(&'a FunctionDefinition),
    Statement(&'a Statement),
}

pub trait Visitor<'a> {
    fn enter(&mut self, _node: Node<'a>, _parent: Option<Node<'a>>) {}

    fn leave(&mut self, _node: Node<'a>, _parent: Option<Node<'a>>) {}
}

pub fn walk<'a, V: Visitor<'a>>(unit: &'a SourceUnit, visitor: &mut V) {
    for part in &unit.0 {
        match part {
            SourceUnitPart::ContractDefinition(contract) => {
                for part in &contract.parts {
                    if let ContractPart::FunctionDefinition(func) = part {
                        walk_function(func, visitor);
                    }
                }
            }
            SourceUnitPart::FunctionDefinition(func) => walk_function(func, visitor),
            _ => {}
        }
    }
}

fn walk_function<'a, V: Visitor<'a>>(func: &'a FunctionDefinition, visitor: &mut V) {
    let node = Node::Function(func);
    visitor.enter(node, None);
    if let Some(body) = &func.body {
        walk_statement(body, Some(node), visitor);
    }
    visitor.leave(node, None);
}

fn walk_statement<'a, V: Visitor<'a>>(
    stmt: &'a Statement,
    parent: Option<Node<'a>>,
    visitor: &mut V,
) {
    let node = Node::Statement(stmt);
    visitor.enter(node, parent);
    for child in children(stmt) {
        walk_statement(child, Some(node), visitor);
    }
    visitor.leave(node, parent);
}

/// Direct sub-statements, in source order.
fn children(stmt: &Statement) -> Vec<&Statement> {
    match stmt {
        Statement::Block { statements, .. } => statements.iter().collect(),
        Statement::If(_, _, consequent, alternate) => std::iter::once(&**consequent)
            .chain(alternate.as_deref())
            .collect(),
        Statement::For(_, init, _, _, body) => {
            init.as_deref().into_iter().chain(body.as_deref()).collect()
        }
        Statement::While(_, _, body) | Statement::DoWhile(_, body, _) => vec![&**body],
        Statement::Try(_, _, returns, catches) => returns
            .iter()
            .map(|(_, block)| &**block)
            .chain(catches.iter().map(|clause| match clause {
                CatchClause::Simple(_, _, block) => block,
                CatchClause::Named(_, _, _, block) => block,
            }))
            .collect(),
        _ => Vec::new(),
    }
}
