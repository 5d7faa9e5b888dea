pub use assets::source::{DefaultSource, MemorySource, Source};
pub use assets::{
    BatchReport, DecodedImage, DescriptorId, LoadError, LoaderConfig, Manifest,
    ResourceDescriptor, ResourceKind, ResourceLoader, Settlement,
};

#[cfg(feature = "logs")]
pub use crate::logs::{LogConfig, init_logs};
