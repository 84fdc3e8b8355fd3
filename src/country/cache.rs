use super::data::LangOption;
use crate::shared::fs_atomic::{atomic_write_file, read_optional};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const COUNTRY_RESULT_FILE_NAME: &str = "country-result.json";

/// Last geolocation outcome, kept so later visits skip the network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryResult {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub lang: Vec<LangOption>,
    #[serde(default)]
    pub supported: Vec<LangOption>,
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to read country cache {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse country cache {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode country cache for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write country cache {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCacheFile {
    path: PathBuf,
}

impl CountryCacheFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_state_root(state_root: &Path) -> Self {
        Self::new(state_root.join(COUNTRY_RESULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<CountryResult>, CacheError> {
        let Some(raw) = read_optional(&self.path).map_err(|source| CacheError::Read {
            path: self.path.display().to_string(),
            source,
        })?
        else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| CacheError::Parse {
                path: self.path.display().to_string(),
                source,
            })
    }

    pub fn save(&self, result: &CountryResult) -> Result<(), CacheError> {
        let body = serde_json::to_vec_pretty(result).map_err(|source| CacheError::Encode {
            path: self.path.display().to_string(),
            source,
        })?;
        atomic_write_file(&self.path, &body).map_err(|source| CacheError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }
}
