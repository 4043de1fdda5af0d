//! Solidity Coverage Preprocessor
//!
//! Source-to-source normalisation run before coverage instrumentation. Two
//! passes rewrite a contract so the instrumenter can inject events anywhere
//! without special cases, while keeping every reported line and column valid:
//!
//! 1. Every bare body of an `if`, `else`, `for` or `while` is bracketed:
//!    `if (c) doX();` becomes `if (c) {doX();}`.
//! 2. The source is re-parsed and the `pure`, `view` and `constant` function
//!    modifiers are overwritten with spaces of the same width.
//!
//! # Pipeline
//!
//! ```text
//! contracts/Token.sol
//!     |
//!     | parse -> walk -> brace insertions (block_wrap)
//!     v
//! bracketed source
//!     |
//!     | re-parse -> walk -> same-width blanking (modifiers)
//!     v
//! instrumenter input
//! ```
//!
//! # Modules
//!
//! - `preprocess` - Orchestrates the passes (`normalize`, `Preprocessor`)
//! - `block_wrap` - Bracketing of bare control-flow bodies
//! - `modifiers` - Removal of `pure`/`view`/`constant`
//! - `splice` - Brace ledger and same-length overwrites
//! - `walk` - Depth-first enter/leave traversal of the parse tree
//! - `parse` - solang-parser front end and byte-span helpers
//! - `config` - Environment and default configuration
//! - `error` - Error types

pub mod block_wrap;
pub mod config;
pub mod error;
pub mod modifiers;
pub mod parse;
pub mod preprocess;
pub mod splice;
pub mod walk;

pub use config::PreprocessConfig;
pub use error::{ParseDiagnostic, Phase, PreprocessError};
pub use modifiers::StrippedModifier;
pub use preprocess::{normalize, PreprocessResult, Preprocessor};
