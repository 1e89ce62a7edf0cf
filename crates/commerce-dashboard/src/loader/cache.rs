//! Memoized dataset access.

use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{Dataset, DatasetPaths};
use crate::error::Result;

static SHARED: DatasetCache = DatasetCache::new();

/// A load-once cell holding a [`Dataset`].
///
/// The first successful [`get_or_load`](Self::get_or_load) reads the files;
/// every later call returns the same `Arc`. A failed load leaves the cell
/// empty.
#[derive(Debug, Default)]
pub struct DatasetCache {
    cell: OnceCell<(DatasetPaths, Arc<Dataset>)>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn get_or_load(&self, paths: &DatasetPaths) -> Result<Arc<Dataset>> {
        let (loaded_from, dataset) = self
            .cell
            .get_or_try_init(|| Dataset::load(paths).map(|d| (paths.clone(), Arc::new(d))))?;

        if loaded_from != paths {
            warn!(
                "Dataset already loaded from {}; ignoring {}",
                loaded_from.orders.display(),
                paths.orders.display()
            );
        } else {
            debug!("Serving cached dataset");
        }
        Ok(Arc::clone(dataset))
    }

    /// The cached dataset, if loaded.
    pub fn get(&self) -> Option<Arc<Dataset>> {
        self.cell.get().map(|(_, dataset)| Arc::clone(dataset))
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// Process-wide dataset, loaded on first access.
pub fn shared_dataset(paths: &DatasetPaths) -> Result<Arc<Dataset>> {
    SHARED.get_or_load(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_load_leaves_cache_empty() {
        let cache = DatasetCache::new();
        assert!(cache.get_or_load(&DatasetPaths::in_dir("missing")).is_err());
        assert!(!cache.is_loaded());
        assert!(cache.get().is_none());
    }
}
