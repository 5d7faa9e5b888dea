use super::pool::IoPool;
use super::{FetchFuture, Source};
use crate::config::LoaderConfig;
use crate::error::LoadError;
use reqwest::blocking::Client;

/// Performs blocking GET requests on a thread pool
#[derive(Clone)]
pub struct HttpSource {
    pool: IoPool,
    client: Client,
}

impl HttpSource {
    pub fn new(config: &LoaderConfig) -> Result<Self, LoadError> {
        Self::with_pool(IoPool::new(config.thread_count())?)
    }

    pub(crate) fn with_pool(pool: IoPool) -> Result<Self, LoadError> {
        let client = Client::builder()
            .build()
            .map_err(|e| LoadError::Init(e.to_string()))?;
        Ok(Self { pool, client })
    }
}

impl Source for HttpSource {
    fn fetch(&self, locator: &str) -> FetchFuture {
        let client = self.client.clone();
        let url = locator.to_owned();
        self.pool.run(locator, move || {
            let resp = client
                .get(&url)
                .send()
                .map_err(|e| LoadError::fetch(&url, e))?;

            let status = resp.status();
            if !status.is_success() {
                return Err(LoadError::fetch(&url, format!("status {status}")));
            }

            resp.bytes()
                .map(|bytes| bytes.to_vec())
                .map_err(|e| LoadError::fetch(&url, e))
        })
    }
}
