//! Core configuration.
//!
//! # Responsibility
//! - Hold session-level defaults stamped onto created records.
//! - Load those defaults from a JSON document supplied by the host.
//!
//! # Invariants
//! - Every key is optional; missing keys fall back to `CoreConfig::default()`.
//! - Blank author names are rejected instead of stamping empty authors.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_AUTHOR: &str = "Agência Brakeel";
const DEFAULT_SYSTEM_AUTHOR: &str = "Sistema";

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    BlankField(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid core config: {err}"),
            Self::BlankField(field) => write!(f, "core config field `{field}` must not be blank"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::BlankField(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Author stamped on user-created notes and tasks.
    pub author: String,
    /// Author shown on system-generated history entries (`movimentacao`
    /// notes loaded with existing data). Validated only: the core itself
    /// never writes system notes.
    pub system_author: String,
    /// Log level handed to `init_logging`.
    pub log_level: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            system_author: DEFAULT_SYSTEM_AUTHOR.to_string(),
            log_level: default_log_level().to_string(),
        }
    }
}

impl CoreConfig {
    /// Parses a JSON config document and validates it.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.author.trim().is_empty() {
            return Err(ConfigError::BlankField("author"));
        }
        if self.system_author.trim().is_empty() {
            return Err(ConfigError::BlankField("system_author"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig};

    #[test]
    fn empty_document_yields_defaults() {
        let config = CoreConfig::from_json_str("{}").expect("empty config should parse");
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.author, "Agência Brakeel");
    }

    #[test]
    fn overrides_are_applied() {
        let config = CoreConfig::from_json_str(r#"{"author":"Equipe Sul","log_level":"warn"}"#)
            .expect("config should parse");
        assert_eq!(config.author, "Equipe Sul");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.system_author, "Sistema");
    }

    #[test]
    fn default_system_author_matches_seeded_history() {
        let data = crate::seed::demo_data().expect("demo fixture should parse");
        let system_notes: Vec<_> = data
            .notes
            .iter()
            .filter(|note| note.kind == crate::model::note::NoteKind::StageChange)
            .collect();
        assert!(!system_notes.is_empty());
        let system_author = CoreConfig::default().system_author;
        assert!(system_notes.iter().all(|note| note.author == system_author));
    }

    #[test]
    fn rejects_blank_author_and_unknown_keys() {
        let blank = CoreConfig::from_json_str(r#"{"author":"  "}"#).unwrap_err();
        assert!(matches!(blank, ConfigError::BlankField("author")));

        let unknown = CoreConfig::from_json_str(r#"{"autor":"x"}"#).unwrap_err();
        assert!(matches!(unknown, ConfigError::Parse(_)));
    }
}
