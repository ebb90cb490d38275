//! Table Cache and Fetch Entry Point
//!
//! Fetched tables are cached per dataset with a time-to-live so repeated
//! questions within a session do not hammer the remote endpoints. The cache
//! is a performance optimization only; a failed fetch is never cached.

use std::time::Duration;

use moka::sync::Cache;
use polars::prelude::DataFrame;

use crate::config::Settings;
use crate::fetch::DataClient;
use crate::sources::Dataset;

/// TTL cache keyed by dataset.
pub struct TableCache {
    inner: Cache<Dataset, DataFrame>,
}

impl TableCache {
    pub fn new(ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(4)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }

    pub fn get(&self, dataset: Dataset) -> Option<DataFrame> {
        self.inner.get(&dataset)
    }

    pub fn store(&self, dataset: Dataset, frame: DataFrame) {
        self.inner.insert(dataset, frame);
    }
}

/// Cached access to the remote datasets.
///
/// This is the layer that implements the empty-table contract: any fetch
/// failure is logged and converted into an empty frame. Callers must treat
/// an empty frame as "source unusable", not as "no rows matched".
pub struct DataService {
    client: DataClient,
    cache: TableCache,
}

impl DataService {
    pub fn new(settings: Settings) -> Self {
        let cache = TableCache::new(settings.cache_ttl);
        let client = DataClient::new(settings);
        Self { client, cache }
    }

    pub fn table(&self, dataset: Dataset) -> DataFrame {
        if let Some(frame) = self.cache.get(dataset) {
            tracing::debug!("cache hit for '{}' ({} rows)", dataset.label(), frame.height());
            return frame;
        }

        match self.client.fetch(dataset) {
            Ok(frame) => {
                tracing::info!("fetched '{}' ({} rows)", dataset.label(), frame.height());
                self.cache.store(dataset, frame.clone());
                frame
            }
            Err(err) => {
                tracing::error!("fetching '{}' failed: {:#}", dataset.label(), err);
                DataFrame::empty()
            }
        }
    }
}
