use super::{FetchFuture, Source, failed};
use crate::error::LoadError;
use futures::future;
use rustc_hash::FxHashMap;

/// Serves bytes kept in memory, useful for embedded resources
#[derive(Default, Clone)]
pub struct MemorySource {
    files: FxHashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the bytes served for `locator`
    pub fn with(mut self, locator: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(locator, bytes);
        self
    }

    pub fn insert(&mut self, locator: &str, bytes: impl Into<Vec<u8>>) {
        self.files.insert(locator.to_string(), bytes.into());
    }

    pub fn remove(&mut self, locator: &str) -> Option<Vec<u8>> {
        self.files.remove(locator)
    }
}

impl Source for MemorySource {
    fn fetch(&self, locator: &str) -> FetchFuture {
        match self.files.get(locator) {
            Some(bytes) => Box::pin(future::ready(Ok(bytes.clone()))),
            None => failed(LoadError::fetch(locator, "not found")),
        }
    }
}
