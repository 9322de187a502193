use anyhow::{bail, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;

use super::document::Document;
use super::loader::ContentLoader;

/// An immutable, complete set of documents.
#[derive(Debug, Default)]
pub struct Snapshot {
    documents: HashMap<String, Arc<Document>>,
}

impl Snapshot {
    /// Build a snapshot, rejecting duplicate paths.
    pub fn new(documents: Vec<Document>) -> Result<Self> {
        let mut map = HashMap::with_capacity(documents.len());
        for document in documents {
            let path = document.path.clone();
            if map.insert(path.clone(), Arc::new(document)).is_some() {
                bail!("Duplicate document path: {}", path);
            }
        }
        Ok(Self { documents: map })
    }

    pub fn lookup(&self, path: &str) -> Option<Arc<Document>> {
        self.documents.get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Document paths in sorted order.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<_> = self.documents.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn documents(&self) -> impl Iterator<Item = &Arc<Document>> {
        self.documents.values()
    }
}

/// Thread-safe holder of the current snapshot.
///
/// Readers clone the `Arc` and keep working against it; a reload builds the
/// replacement completely before swapping it in, so no reader ever sees a
/// partially loaded store.
#[derive(Debug, Default)]
pub struct ContentStore {
    current: RwLock<Arc<Snapshot>>,
}

impl ContentStore {
    pub fn new(documents: Vec<Document>) -> Result<Self> {
        Ok(Self {
            current: RwLock::new(Arc::new(Snapshot::new(documents)?)),
        })
    }

    pub fn load(loader: &ContentLoader) -> Result<Self> {
        Self::new(loader.load()?)
    }

    /// The snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    pub fn lookup(&self, path: &str) -> Option<Arc<Document>> {
        self.snapshot().lookup(path)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Document paths of the current snapshot, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.snapshot().paths().into_iter().map(str::to_string).collect()
    }

    /// Swap in a new set of documents. On error the current snapshot stays.
    pub fn replace(&self, documents: Vec<Document>) -> Result<usize> {
        let next = Arc::new(Snapshot::new(documents)?);
        let count = next.len();

        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = next;

        Ok(count)
    }

    /// Reload everything from `loader` and swap it in atomically.
    pub fn reload(&self, loader: &ContentLoader) -> Result<usize> {
        let count = self.replace(loader.load()?)?;
        info!("Content reloaded: {} documents", count);
        Ok(count)
    }
}
