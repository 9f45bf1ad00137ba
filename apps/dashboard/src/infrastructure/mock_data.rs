use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::project::Project;
use crate::domain::task::Task;
use crate::domain::user::User;

// Compiled in so the binary runs without a data directory.
const BUNDLED: &str = include_str!("../../data/mock-data.json");

/// Errors raised while loading a bootstrap dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static seed data standing in for a backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Dataset {
    /// The fixture shipped with the crate
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json(BUNDLED)
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a dataset file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }
}
