// SPDX-License-Identifier: Apache-2.0
//
// Thin layer over solang-parser: parse failures become `PreprocessError`s and
// node locations become byte ranges into the exact text that was parsed.

use std::ops::Range;

use solang_parser::pt::{CodeLocation, Loc, SourceUnit, Statement};
use tracing::debug;

use crate::error::{ParseDiagnostic, Phase, PreprocessError};

/// Parse `source`, tagging any failure with the pass that asked for it.
pub fn parse(source: &str, phase: Phase) -> Result<SourceUnit, PreprocessError> {
    match solang_parser::parse(source, 0) {
        Ok((unit, _comments)) => Ok(unit),
        Err(diagnostics) => {
            debug!(%phase, count = diagnostics.len(), "parser rejected source");
            Err(PreprocessError::Parse {
                phase,
                diagnostics: diagnostics
                    .into_iter()
                    .map(|d| ParseDiagnostic {
                        span: span(&d.loc),
                        message: d.message,
                    })
                    .collect(),
            })
        }
    }
}

/// Byte range of a location, or `None` for locations outside the file.
pub fn span(loc: &Loc) -> Option<Range<usize>> {
    match loc {
        Loc::File(_, start, end) => Some(*start..*end),
        _ => None,
    }
}

/// The text range a statement occupies, including its terminating `;`.
///
/// solang-parser ends simple statements before the semicolon, while compound
/// statements already end on their last token. If the next significant
/// character after the reported end is a `;` it belongs to this statement,
/// since Solidity has no empty statement.
pub fn statement_extent(source: &str, stmt: &Statement) -> Option<Range<usize>> {
    let mut range = span(&stmt.loc())?;
    if !matches!(stmt, Statement::Block { .. }) {
        if let Some(semi) = trailing_semicolon(source, range.end) {
            range.end = semi + 1;
        }
    }
    Some(range)
}

fn trailing_semicolon(source: &str, from: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut i = from;

    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = source[i..].find('\n').map_or(bytes.len(), |nl| i + nl);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = i + 2 + source[i + 2..].find("*/")? + 2;
            }
            b';' => return Some(i),
            _ => return None,
        }
    }

    None
}
