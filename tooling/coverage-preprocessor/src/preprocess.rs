// SPDX-License-Identifier: Apache-2.0
//
// Runs the two passes in order. The bracketed text is always re-parsed before
// modifiers are stripped: every brace insertion leaves the first parse tree's
// offsets pointing at the wrong characters.

use tracing::debug;

use crate::block_wrap::wrap_bodies;
use crate::config::PreprocessConfig;
use crate::error::PreprocessError;
use crate::modifiers::strip_modifiers;

/// Result of preprocessing a single Solidity source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessResult {
    pub output: String,
    pub bodies_wrapped: usize,
    pub modifiers_stripped: usize,
}

impl PreprocessResult {
    /// Whether the output differs from the input.
    pub fn changed(&self) -> bool {
        self.bodies_wrapped > 0 || self.modifiers_stripped > 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    config: PreprocessConfig,
}

impl Preprocessor {
    pub fn new(config: PreprocessConfig) -> Self {
        Preprocessor { config }
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Preprocess one source file. Any parse failure aborts the whole run;
    /// there is no partial output.
    pub fn run(&self, source: &str) -> Result<PreprocessResult, PreprocessError> {
        let mut result = PreprocessResult {
            output: source.to_string(),
            bodies_wrapped: 0,
            modifiers_stripped: 0,
        };

        if self.config.wrap_bodies {
            let (output, wrapped) = wrap_bodies(&result.output)?;
            result.output = output;
            result.bodies_wrapped = wrapped;
        }

        if !self.config.strip_modifiers.is_empty() {
            let (output, stripped) = strip_modifiers(&result.output, &self.config.strip_modifiers)?;
            result.output = output;
            result.modifiers_stripped = stripped;
        }

        debug!(
            bodies_wrapped = result.bodies_wrapped,
            modifiers_stripped = result.modifiers_stripped,
            "preprocessed source"
        );
        Ok(result)
    }
}

/// Bracket bare bodies and blank out `pure`/`view`/`constant` with the
/// default configuration.
pub fn normalize(source: &str) -> Result<String, PreprocessError> {
    Preprocessor::default().run(source).map(|result| result.output)
}
