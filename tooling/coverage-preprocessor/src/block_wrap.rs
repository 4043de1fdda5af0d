// SPDX-License-Identifier: Apache-2.0
//
// Brackets every bare body of an `if`, `else`, `for` or `while`.
//
// The instrumenter injects coverage events at the start of each branch and
// loop body; once every body is a block it never has to special-case a lone
// statement.

use solang_parser::pt::Statement;
use tracing::debug;

use crate::error::{Phase, PreprocessError};
use crate::parse::{parse, statement_extent};
use crate::splice::SpliceLedger;
use crate::walk::{walk, Node, Visitor};

struct BodyWrapper<'s> {
    source: &'s str,
    ledger: SpliceLedger,
}

impl BodyWrapper<'_> {
    fn wrap_unless_block(&mut self, construct: &str, body: &Statement) {
        if matches!(body, Statement::Block { .. }) {
            return;
        }
        if let Some(extent) = statement_extent(self.source, body) {
            debug!(construct, start = extent.start, end = extent.end, "bracketing bare body");
            self.ledger.wrap(extent);
        }
    }
}

impl<'a> Visitor<'a> for BodyWrapper<'_> {
    fn enter(&mut self, node: Node<'a>, _parent: Option<Node<'a>>) {
        let Node::Statement(stmt) = node else {
            return;
        };
        match stmt {
            Statement::If(_, _, consequent, alternate) => {
                self.wrap_unless_block("if", consequent);
                if let Some(alternate) = alternate {
                    self.wrap_unless_block("else", alternate);
                }
            }
            Statement::For(_, _, _, _, Some(body)) => self.wrap_unless_block("for", body),
            Statement::While(_, _, body) => self.wrap_unless_block("while", body),
            _ => {}
        }
    }
}

/// Parse `source` and bracket every bare control-flow body.
///
/// Returns the new text and the number of bodies wrapped. Apart from the
/// inserted `{`/`}` pairs the text is unchanged.
pub fn wrap_bodies(source: &str) -> Result<(String, usize), PreprocessError> {
    let unit = parse(source, Phase::BlockWrap)?;

    let mut wrapper = BodyWrapper {
        source,
        ledger: SpliceLedger::new(),
    };
    walk(&unit, &mut wrapper);

    let wrapped = wrapper.ledger.wraps();
    Ok((wrapper.ledger.apply(source), wrapped))
}
