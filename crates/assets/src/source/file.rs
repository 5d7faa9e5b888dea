use super::pool::IoPool;
use super::{FetchFuture, Source};
use crate::config::LoaderConfig;
use crate::error::LoadError;

/// Reads locators as filesystem paths on a thread pool
#[derive(Clone)]
pub struct FileSource {
    pool: IoPool,
}

impl FileSource {
    pub fn new(config: &LoaderConfig) -> Result<Self, LoadError> {
        Ok(Self {
            pool: IoPool::new(config.thread_count())?,
        })
    }

    pub(crate) fn with_pool(pool: IoPool) -> Self {
        Self { pool }
    }
}

impl Source for FileSource {
    fn fetch(&self, locator: &str) -> FetchFuture {
        let path = locator.strip_prefix("file://").unwrap_or(locator).to_owned();
        let id = locator.to_owned();
        self.pool.run(locator, move || {
            std::fs::read(&path).map_err(|e| LoadError::fetch(&id, e))
        })
    }
}
