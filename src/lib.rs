//! # buffered-fs
//!
//! A read-only file system built from a single tar buffer, with recursive
//! module loading that never touches the disk.
//!
//! Ship one archive (downloaded, embedded, whatever), then read files from it
//! and load inter-dependent modules exactly as if it had been unpacked:
//!
//! - **Reads**: exact paths or regex patterns, re-rooted by a base directory
//! - **Modules**: relative paths, extension inference, directory indexes,
//!   `package.json` entry points and a `node_modules` fallback
//! - **Overrides**: provided modules replace resolution entirely
//! - **Host modules**: bare names are offered to a [`NativeLoader`] first
//!
//! ## Quick Start
//!
//! ```ignore
//! use buffered_fs::{from_tar, BufferedFs};
//! use serde_json::json;
//!
//! let fs = from_tar(std::fs::read("modules.tar")?).await?;
//! assert_eq!(fs.read_file("min")?, "test");
//!
//! fs.basedir("modules")?;
//! fs.provide("config", json!({ "debug": true }));
//! let exports = fs.require("./nested")?;
//! ```
//!
//! ## Executing Modules
//!
//! Loaded text is handed to an [`Executor`] together with a
//! [`ModuleLoader`] for nested `require` calls. The default
//! [`JsonExecutor`] treats modules as JSON documents in which
//! `{"$require": "./other"}` objects are replaced by other modules' exports.
//! Plug in a scripting engine by implementing [`Executor`] for its value type.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod error;
pub mod logger;
pub mod module;
pub mod path;

mod builder;
mod fs;

// =============================================================================
// Prelude - import commonly used items with a single `use`
// =============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use buffered_fs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BufferedFs, Executor, FsBuilder, FsError, JsonExecutor, Logger, MapNativeLoader,
        ModuleLoader, NativeLoader, ResolveConfig, Selector,
    };
}

// =============================================================================
// Core
// =============================================================================

pub use builder::FsBuilder;
pub use fs::BufferedFs;

pub use archive::{ArchiveReader, ContentMap, Selector, TarReader};
pub use config::{ResolveConfig, ResolveConfigBuilder};
pub use error::{FsError, NativeLoadError, Result};
pub use logger::{Logger, LoggerFunc};
pub use module::{
    Executor, JsonExecutor, MapNativeLoader, ModuleLoader, NativeLoader, NoNativeModules,
};
pub use path::Specifier;

// =============================================================================
// Constructors
// =============================================================================

/// Parse a tar buffer with default settings.
///
/// Parsing runs on tokio's blocking pool; call from within a runtime.
#[cfg(feature = "async")]
pub async fn from_tar(data: impl Into<Vec<u8>>) -> Result<BufferedFs> {
    FsBuilder::new().load_tar(data).await
}

/// Parse a tar buffer with default settings on the current thread.
pub fn from_tar_blocking(data: impl Into<Vec<u8>>) -> Result<BufferedFs> {
    FsBuilder::new().load_tar_blocking(data)
}
