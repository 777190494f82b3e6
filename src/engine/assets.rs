// Asset loading rooted at a base directory

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("failed to read asset {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode image {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
}

/// Resolves relative asset names against a base directory
pub struct AssetRoot {
    base: PathBuf,
}

impl AssetRoot {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        self.base.join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_file()
    }

    pub fn load_bytes(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve(name);
        if !path.is_file() {
            return Err(AssetError::NotFound(name.to_string()));
        }
        std::fs::read(&path).map_err(|source| AssetError::Read {
            name: name.to_string(),
            source,
        })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}
