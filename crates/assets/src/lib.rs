//! Batched loading of named images and json documents.
//!
//! Register descriptors, start a batch with [`ResourceLoader::load_all`], drive
//! it with [`ResourceLoader::update`] and read the results from the store once
//! the completion handler receives its [`BatchReport`].

mod config;
mod decode;
mod descriptor;
mod error;
mod loader;
mod manifest;
mod queue;
mod report;
pub mod source;
mod store;

pub use config::LoaderConfig;
pub use descriptor::{DescriptorId, ResourceDescriptor, ResourceKind};
pub use error::LoadError;
pub use loader::ResourceLoader;
pub use manifest::Manifest;
pub use queue::PendingQueue;
pub use report::{BatchReport, Settlement};
pub use store::{DecodedImage, ResourceStore};
