use anyhow::{Context, Result};
use std::env;

use crate::modifiers::StrippedModifier;

/// What the preprocessor does to each source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessConfig {
    /// Bracket bare `if`/`else`/`for`/`while` bodies
    pub wrap_bodies: bool,
    /// Modifiers to blank out; empty disables the strip pass
    pub strip_modifiers: Vec<StrippedModifier>,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        PreprocessConfig {
            wrap_bodies: true,
            strip_modifiers: StrippedModifier::ALL.to_vec(),
        }
    }
}

impl PreprocessConfig {
    /// Load configuration from environment variables, falling back to defaults.
    /// Call dotenvy::dotenv() before calling this.
    pub fn from_env() -> Result<Self> {
        let mut config = PreprocessConfig::default();

        if let Ok(raw) = env::var("COVERAGE_PREPROCESS_WRAP") {
            config.wrap_bodies = raw
                .trim()
                .parse()
                .context("COVERAGE_PREPROCESS_WRAP must be true or false")?;
        }

        if let Ok(raw) = env::var("COVERAGE_PREPROCESS_STRIP") {
            config.strip_modifiers = parse_modifier_list(&raw)
                .context("COVERAGE_PREPROCESS_STRIP must list pure, view and/or constant")?;
        }

        Ok(config)
    }
}

/// Parse a comma-separated modifier list. An empty list is allowed.
pub fn parse_modifier_list(raw: &str) -> Result<Vec<StrippedModifier>> {
    let mut modifiers = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let modifier: StrippedModifier = name.parse()?;
        if !modifiers.contains(&modifier) {
            modifiers.push(modifier);
        }
    }
    Ok(modifiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strips_all_three() {
        let config = PreprocessConfig::default();
        assert!(config.wrap_bodies);
        assert_eq!(config.strip_modifiers.len(), 3);
    }

    #[test]
    fn test_parse_modifier_list() {
        assert_eq!(
            parse_modifier_list("view, pure,view").unwrap(),
            vec![StrippedModifier::View, StrippedModifier::Pure]
        );
        assert!(parse_modifier_list("").unwrap().is_empty());
        assert!(parse_modifier_list(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_modifier_list_rejects_unknown() {
        let err = parse_modifier_list("view,payable").unwrap_err();
        assert!(err.to_string().contains("payable"));
    }
}
