//! Scoring data configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::assessment::{NormTableError, NormTables};

use super::error::ValidationError;

/// Optional file overrides for scoring reference data
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringConfig {
    /// YAML file replacing the built-in norm tables
    pub norms_path: Option<PathBuf>,

    /// Markdown reference text passed to the interpretation prompt
    pub knowledge_base_path: Option<PathBuf>,
}

impl ScoringConfig {
    /// Loads the configured norm tables, or the built-in ones.
    pub fn load_norms(&self) -> Result<NormTables, NormTableError> {
        match &self.norms_path {
            Some(path) => NormTables::from_yaml_file(path),
            None => Ok(NormTables::builtin()),
        }
    }

    /// Reads the knowledge base, if one is configured.
    pub fn load_knowledge_base(&self) -> std::io::Result<Option<String>> {
        self.knowledge_base_path
            .as_ref()
            .map(std::fs::read_to_string)
            .transpose()
    }

    /// Validate scoring configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for path in [&self.norms_path, &self.knowledge_base_path].into_iter().flatten() {
            if !path.is_file() {
                return Err(ValidationError::FileNotFound(path.display().to_string()));
            }
        }
        Ok(())
    }
}
