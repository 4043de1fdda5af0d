// SPDX-License-Identifier: Apache-2.0
//
// Text edits against a buffer whose parse tree must not go stale mid-pass.
//
// Brace insertions are recorded against offsets in the ORIGINAL source and
// applied together in one left-to-right pass. The running drift of that pass
// is the offset ledger: the n-th brace written lands at `offset + n`.

use std::ops::Range;

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Brace {
    // Closing sorts first so `}` never lands after a `{` recorded at the same offset.
    Close,
    Open,
}

impl Brace {
    fn as_char(self) -> char {
        match self {
            Brace::Open => '{',
            Brace::Close => '}',
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Insertion {
    at: usize,
    brace: Brace,
    seq: usize,
}

impl Insertion {
    /// Outer spans are recorded before the spans nested inside them, so at a
    /// shared offset opening braces go in recording order and closing braces
    /// in reverse.
    fn sort_key(&self) -> (usize, Brace, isize) {
        let seq = self.seq as isize;
        match self.brace {
            Brace::Open => (self.at, self.brace, seq),
            Brace::Close => (self.at, self.brace, -seq),
        }
    }
}

/// Pending `{`/`}` pairs for one source buffer.
#[derive(Debug, Default)]
pub struct SpliceLedger {
    pending: Vec<Insertion>,
    wraps: usize,
}

impl SpliceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a brace pair around `span` (offsets into the original source).
    pub fn wrap(&mut self, span: Range<usize>) {
        let seq = self.wraps;
        self.pending.push(Insertion {
            at: span.start,
            brace: Brace::Open,
            seq,
        });
        self.pending.push(Insertion {
            at: span.end,
            brace: Brace::Close,
            seq,
        });
        self.wraps += 1;
    }

    /// Number of brace pairs recorded so far.
    pub fn wraps(&self) -> usize {
        self.wraps
    }

    /// Write every recorded brace into `source`, returning the new text.
    pub fn apply(mut self, source: &str) -> String {
        self.pending.sort_by_key(Insertion::sort_key);

        let mut output = String::with_capacity(source.len() + self.pending.len());
        let mut cursor = 0;
        for (drift, insertion) in self.pending.iter().enumerate() {
            output.push_str(&source[cursor..insertion.at]);
            output.push(insertion.brace.as_char());
            trace!(
                offset = insertion.at,
                shifted = insertion.at + drift,
                brace = %insertion.brace.as_char(),
                "brace inserted"
            );
            cursor = insertion.at;
        }
        output.push_str(&source[cursor..]);
        output
    }
}

/// Overwrite `span` of `buffer` with text of the same byte length.
pub fn overwrite(buffer: &mut String, span: Range<usize>, replacement: &str) {
    debug_assert_eq!(span.len(), replacement.len(), "overwrite must keep length");
    buffer.replace_range(span, replacement);
}
