//! Load batches of named images and json documents.
//!
//! ```no_run
//! use loadkit::prelude::*;
//!
//! let mut loader = ResourceLoader::new()?;
//! loader.register_json("config", "config.json");
//! loader.register_image("hero", "img/hero.png");
//! loader.load_all(|report| {
//!     for (settlement, err) in report.failed() {
//!         log::warn!("'{}' failed: {err}", settlement.name());
//!     }
//! })?;
//!
//! while !loader.update() {
//!     // do other work
//! }
//! # Ok::<(), LoadError>(())
//! ```

#[cfg(feature = "logs")]
pub mod logs;
pub mod prelude;

#[doc(inline)]
pub use assets;
