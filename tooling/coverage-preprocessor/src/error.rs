// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::Range;

use thiserror::Error;

/// Which pass was parsing when the source was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The initial parse that drives body bracketing.
    BlockWrap,
    /// The fresh re-parse of the bracketed source before modifier removal.
    ModifierStrip,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::BlockWrap => f.write_str("block-wrap"),
            Phase::ModifierStrip => f.write_str("modifier-strip"),
        }
    }
}

/// A single parser complaint, detached from the parser's own types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    /// Byte span in the text that was handed to the parser, when known.
    pub span: Option<Range<usize>>,
    pub message: String,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some(span) => write!(f, "{}..{}: {}", span.start, span.end, self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("{phase}: source does not parse: {}", summarize(.diagnostics))]
    Parse {
        phase: Phase,
        diagnostics: Vec<ParseDiagnostic>,
    },

    #[error("unknown modifier '{0}' (expected pure, view or constant)")]
    UnknownModifier(String),
}

fn summarize(diagnostics: &[ParseDiagnostic]) -> String {
    match diagnostics {
        [] => "no diagnostics reported".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (and {} more)", first, rest.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_names_phase_and_first_diagnostic() {
        let err = PreprocessError::Parse {
            phase: Phase::ModifierStrip,
            diagnostics: vec![
                ParseDiagnostic {
                    span: Some(10..11),
                    message: "unexpected '}'".to_string(),
                },
                ParseDiagnostic {
                    span: None,
                    message: "unexpected end of file".to_string(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "modifier-strip: source does not parse: 10..11: unexpected '}' (and 1 more)"
        );
    }
}
