//! A served catalogue that can be replaced while it is being read.
//!
//! Readers take a snapshot: an `Arc` of the current index that stays valid for as long as
//! they hold it. A reload builds a complete new index first and only then swaps it in, so a
//! failed reload leaves the current index untouched and readers never see a partial state.

use std::sync::{Arc, PoisonError, RwLock};

use url::Url;

use stubcat_index::Index;

use crate::fs::FileSource;
use crate::lifecycle::{LoadFailure, Served, load, load_from};

pub struct SharedCatalogue {
    current: RwLock<Arc<Index>>,
}

impl SharedCatalogue {
    pub fn new(served: Served) -> Self {
        Self { current: RwLock::new(served.into_index()) }
    }

    /// The index that is current at the time of the call.
    pub fn snapshot(&self) -> Arc<Index> {
        // A panic while holding the lock cannot leave the `Arc` half-written.
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Load `source` and, if it validates, make it the current index.
    pub fn reload(&self, uri: Url, source: String) -> Result<Arc<Index>, LoadFailure> {
        self.swap(load(uri, source))
    }

    /// Read the stub at `uri` and, if it validates, make it the current index.
    pub fn reload_from(
        &self,
        files: &mut dyn FileSource,
        uri: &Url,
    ) -> Result<Arc<Index>, LoadFailure> {
        self.swap(load_from(files, uri))
    }

    fn swap(&self, loaded: Result<Served, LoadFailure>) -> Result<Arc<Index>, LoadFailure> {
        let index = match loaded {
            Ok(served) => served.into_index(),
            Err(failure) => {
                log::debug!("Reload of {} failed, keeping the current catalogue", failure.uri);
                return Err(failure);
            }
        };
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = index.clone();
        log::debug!("Swapped in new catalogue: {}", index.catalogue().uri);
        Ok(index)
    }
}
