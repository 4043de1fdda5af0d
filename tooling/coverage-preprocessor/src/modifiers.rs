// SPDX-License-Identifier: Apache-2.0
//
// Blanks out `pure`, `view` and `constant` on function declarations.
//
// Every removed keyword is overwritten with filler of the same byte length,
// so no offset, line or column elsewhere in the file moves.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use solang_parser::pt::{FunctionAttribute, Mutability};
use tracing::debug;

use crate::error::{Phase, PreprocessError};
use crate::parse::{parse, span};
use crate::splice::overwrite;
use crate::walk::{walk, Node, Visitor};

static TRAILING_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n ]+$").expect("trailing whitespace pattern is valid"));

/// A state-mutability keyword the instrumenter cannot tolerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrippedModifier {
    Pure,
    View,
    Constant,
}

impl StrippedModifier {
    pub const ALL: [StrippedModifier; 3] = [
        StrippedModifier::Pure,
        StrippedModifier::View,
        StrippedModifier::Constant,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            StrippedModifier::Pure => "pure",
            StrippedModifier::View => "view",
            StrippedModifier::Constant => "constant",
        }
    }

    fn from_mutability(mutability: &Mutability) -> Option<(Self, Range<usize>)> {
        let (kind, loc) = match mutability {
            Mutability::Pure(loc) => (StrippedModifier::Pure, loc),
            Mutability::View(loc) => (StrippedModifier::View, loc),
            Mutability::Constant(loc) => (StrippedModifier::Constant, loc),
            _ => return None,
        };
        Some((kind, span(loc)?))
    }
}

impl fmt::Display for StrippedModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for StrippedModifier {
    type Err = PreprocessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrippedModifier::ALL
            .into_iter()
            .find(|m| m.keyword() == s.trim())
            .ok_or_else(|| PreprocessError::UnknownModifier(s.trim().to_string()))
    }
}

/// Same-width stand-in for a removed modifier.
///
/// Any run of spaces and line breaks at the end of the span is kept verbatim
/// so line numbers after the modifier do not change; the rest becomes spaces.
pub fn filler(modifier_text: &str) -> String {
    let trailing = TRAILING_BREAKS
        .find(modifier_text)
        .map_or("", |m| m.as_str());
    let mut out = " ".repeat(modifier_text.len() - trailing.len());
    out.push_str(trailing);
    out
}

struct ModifierCollector<'t> {
    targets: &'t [StrippedModifier],
    found: Vec<(StrippedModifier, Range<usize>)>,
}

impl<'a> Visitor<'a> for ModifierCollector<'_> {
    fn enter(&mut self, node: Node<'a>, _parent: Option<Node<'a>>) {
        let Node::Function(func) = node else {
            return;
        };
        for attribute in &func.attributes {
            if let FunctionAttribute::Mutability(mutability) = attribute {
                if let Some((kind, span)) = StrippedModifier::from_mutability(mutability) {
                    if self.targets.contains(&kind) {
                        self.found.push((kind, span));
                    }
                }
            }
        }
    }
}

/// Parse `source` afresh and blank out every targeted modifier.
///
/// Returns the new text and how many modifiers were removed. The output has
/// exactly the byte length of the input.
pub fn strip_modifiers(
    source: &str,
    targets: &[StrippedModifier],
) -> Result<(String, usize), PreprocessError> {
    let unit = parse(source, Phase::ModifierStrip)?;

    let mut collector = ModifierCollector {
        targets,
        found: Vec::new(),
    };
    walk(&unit, &mut collector);

    let mut output = source.to_string();
    for (kind, span) in &collector.found {
        let replacement = filler(&output[span.clone()]);
        debug!(modifier = %kind, start = span.start, end = span.end, "stripping modifier");
        overwrite(&mut output, span.clone(), &replacement);
    }

    Ok((output, collector.found.len()))
}
