use super::WizardStore;
use crate::shared::fs_atomic::{atomic_write_file, read_optional};
use std::path::{Path, PathBuf};

pub const WIZARD_RECORD_FILE_NAME: &str = "virumap-app-wizard.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read wizard record {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse wizard record {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode wizard record for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write wizard record {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// On-disk copy of the [`WizardStore`], rewritten after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFile {
    path: PathBuf,
}

impl StoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_state_root(state_root: &Path) -> Self {
        Self::new(state_root.join(WIZARD_RECORD_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<WizardStore>, StoreError> {
        let raw = read_optional(&self.path).map_err(|source| StoreError::Read {
            path: self.path.display().to_string(),
            source,
        })?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                path: self.path.display().to_string(),
                source,
            })
    }

    pub fn save(&self, store: &WizardStore) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(store).map_err(|source| StoreError::Encode {
            path: self.path.display().to_string(),
            source,
        })?;
        atomic_write_file(&self.path, &body).map_err(|source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }
}
