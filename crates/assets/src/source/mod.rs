use crate::error::LoadError;
use futures::future::{self, LocalBoxFuture};

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(all(not(target_arch = "wasm32"), feature = "http"))]
mod http;
#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(not(target_arch = "wasm32"))]
mod pool;
#[cfg(target_arch = "wasm32")]
mod web;

pub use memory::MemorySource;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileSource;
#[cfg(all(not(target_arch = "wasm32"), feature = "http"))]
pub use http::HttpSource;
#[cfg(not(target_arch = "wasm32"))]
pub use native::DefaultSource;
#[cfg(target_arch = "wasm32")]
pub use web::XhrSource as DefaultSource;

/// Pending retrieval of the raw bytes behind a locator
pub type FetchFuture = LocalBoxFuture<'static, Result<Vec<u8>, LoadError>>;

/// Where the loader gets bytes from.
///
/// The returned future must own everything it needs, the loader keeps it
/// alive across `update` calls and polls it from the owner's thread.
pub trait Source {
    fn fetch(&self, locator: &str) -> FetchFuture;
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn fetch(&self, locator: &str) -> FetchFuture {
        (**self).fetch(locator)
    }
}

pub(crate) fn failed(err: LoadError) -> FetchFuture {
    Box::pin(future::ready(Err(err)))
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn is_http(locator: &str) -> bool {
    let lower = locator.get(..8).unwrap_or(locator).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
