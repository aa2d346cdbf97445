//! Read-through cache for loaded datasets.
//!
//! Entries are keyed by source path, a SHA-256 fingerprint of the source
//! bytes and the column names used to load them. A changed file gets a new
//! fingerprint and therefore misses; the stale entry for that path is
//! replaced on the next insert.

use log::debug;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::models::Dataset;
use crate::pipeline::{LoaderOptions, PipelineError, PipelineResult, SampleLoader};

/// Identity of one loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub path: PathBuf,
    pub fingerprint: String,
    pub options: LoaderOptions,
}

impl CacheKey {
    pub fn new(path: impl Into<PathBuf>, content: &[u8], options: &LoaderOptions) -> Self {
        Self {
            path: path.into(),
            fingerprint: calculate_checksum(content),
            options: options.clone(),
        }
    }
}

/// Storage for loaded datasets, injected into [`load_cached`].
pub trait DatasetCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<Arc<Dataset>>;

    /// Store `dataset`, replacing any entry for the same path.
    fn insert(&self, key: CacheKey, dataset: Arc<Dataset>);
}

/// In-memory cache holding at most one dataset per source path.
#[derive(Clone, Default)]
pub struct InMemoryDatasetCache {
    entries: Arc<RwLock<HashMap<PathBuf, (CacheKey, Arc<Dataset>)>>>,
}

impl InMemoryDatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl DatasetCache for InMemoryDatasetCache {
    fn get(&self, key: &CacheKey) -> Option<Arc<Dataset>> {
        let entries = self.entries.read();
        entries
            .get(&key.path)
            .filter(|(stored, _)| stored == key)
            .map(|(_, dataset)| Arc::clone(dataset))
    }

    fn insert(&self, key: CacheKey, dataset: Arc<Dataset>) {
        self.entries
            .write()
            .insert(key.path.clone(), (key, dataset));
    }
}

/// Calculate the SHA-256 checksum of source content as lowercase hex.
pub fn calculate_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Load a CSV file, consulting `cache` first when one is given.
///
/// The file is always read so its fingerprint reflects the current content.
pub fn load_cached(
    path: &Path,
    options: &LoaderOptions,
    cache: Option<&dyn DatasetCache>,
) -> PipelineResult<Arc<Dataset>> {
    let bytes = std::fs::read(path).map_err(|e| PipelineError::io(path, e))?;

    let Some(cache) = cache else {
        return SampleLoader::load_from_bytes(&bytes, options).map(Arc::new);
    };

    let key = CacheKey::new(path, &bytes, options);
    if let Some(hit) = cache.get(&key) {
        debug!("Dataset cache hit for {}", path.display());
        return Ok(hit);
    }

    let dataset = Arc::new(SampleLoader::load_from_bytes(&bytes, options)?);
    cache.insert(key, Arc::clone(&dataset));
    Ok(dataset)
}
