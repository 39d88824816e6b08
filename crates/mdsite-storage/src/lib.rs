//! Storage abstraction for mdsite.
//!
//! The site builder reads page sources and assets from one [`Storage`] and
//! writes generated output to another. Paths are always slash-separated and
//! relative to the storage root.
//!
//! The crate provides:
//! - [`Storage`] trait with `read()`, `write()`, `mtime()`, `exists()` and `create_dir_all()`
//! - [`FsStorage`] rooted at a local directory
//! - [`MockStorage`] for testing (behind `mock` feature flag)

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
