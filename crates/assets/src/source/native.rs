use super::file::FileSource;
use super::pool::IoPool;
use super::{FetchFuture, Source, is_http};
use crate::config::LoaderConfig;
use crate::error::LoadError;

#[cfg(feature = "http")]
use super::http::HttpSource;

/// Files from disk and, with the `http` feature, http(s) urls
#[derive(Clone)]
pub struct DefaultSource {
    file: FileSource,
    #[cfg(feature = "http")]
    http: HttpSource,
}

impl DefaultSource {
    pub fn new(config: &LoaderConfig) -> Result<Self, LoadError> {
        let pool = IoPool::new(config.thread_count())?;
        Ok(Self {
            #[cfg(feature = "http")]
            http: HttpSource::with_pool(pool.clone())?,
            file: FileSource::with_pool(pool),
        })
    }
}

impl Source for DefaultSource {
    fn fetch(&self, locator: &str) -> FetchFuture {
        if is_http(locator) {
            #[cfg(feature = "http")]
            return self.http.fetch(locator);

            #[cfg(not(feature = "http"))]
            return super::failed(LoadError::fetch(
                locator,
                "http locators need the 'http' feature",
            ));
        }

        self.file.fetch(locator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_routes_paths_to_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, "hello").unwrap();

        let source = DefaultSource::new(&LoaderConfig::new().threads(1)).unwrap();
        let bytes = block_on(source.fetch(path.to_str().unwrap())).unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[cfg(not(feature = "http"))]
    #[test]
    fn test_http_disabled() {
        let source = DefaultSource::new(&LoaderConfig::new().threads(1)).unwrap();
        let err = block_on(source.fetch("http://localhost/config.json")).unwrap_err();
        assert!(matches!(err, LoadError::Fetch { .. }));
    }
}
