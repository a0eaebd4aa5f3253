//! Builder pattern for `BufferedFs`.

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::archive::{ArchiveReader, TarReader};
use crate::config::ResolveConfig;
#[cfg(feature = "async")]
use crate::error::FsError;
use crate::error::Result;
use crate::fs::BufferedFs;
use crate::logger::Logger;
use crate::module::{Executor, JsonExecutor, NativeLoader, NoNativeModules};

/// Builder for configuring [`BufferedFs`].
///
/// Use [`BufferedFs::builder`] for JSON modules or
/// [`BufferedFs::with_executor`] for any other module representation.
pub struct FsBuilder<V = Value> {
    executor: Box<dyn Executor<V>>,
    natives: Box<dyn NativeLoader<V>>,
    config: ResolveConfig,
    logger: Logger,
    provided: FxHashMap<String, V>,
}

impl FsBuilder<Value> {
    /// Create a builder using the [`JsonExecutor`].
    pub fn new() -> Self {
        Self::with_executor(JsonExecutor)
    }
}

impl Default for FsBuilder<Value> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: 'static> FsBuilder<V> {
    /// Create a builder with a custom executor.
    pub fn with_executor(executor: impl Executor<V> + 'static) -> Self {
        Self {
            executor: Box::new(executor),
            natives: Box::new(NoNativeModules),
            config: ResolveConfig::default(),
            logger: Logger::default(),
            provided: FxHashMap::default(),
        }
    }

    /// Replace the executor.
    pub fn executor(mut self, executor: impl Executor<V> + 'static) -> Self {
        self.executor = Box::new(executor);
        self
    }

    /// Set the loader consulted for bare specifiers.
    ///
    /// Default: [`NoNativeModules`]
    pub fn native_loader(mut self, loader: impl NativeLoader<V> + 'static) -> Self {
        self.natives = Box::new(loader);
        self
    }

    /// Set the resolution conventions.
    pub fn config(mut self, config: ResolveConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the logger, shared with the tar reader.
    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Pre-register a provided module. The first registration wins.
    pub fn provide(mut self, name: impl Into<String>, value: V) -> Self {
        self.provided.entry(name.into()).or_insert(value);
        self
    }

    /// Build over an already initialized reader.
    pub fn build(self, reader: impl ArchiveReader + 'static) -> BufferedFs<V> {
        BufferedFs::from_parts(
            Box::new(reader),
            self.executor,
            self.natives,
            self.config,
            self.logger,
            self.provided,
        )
    }

    /// Parse a tar buffer on the current thread and build.
    pub fn load_tar_blocking(self, data: impl Into<Vec<u8>>) -> Result<BufferedFs<V>> {
        let reader = TarReader::new(data).with_logger(self.logger.clone());
        reader.init()?;
        Ok(self.build(reader))
    }

    /// Parse a tar buffer on tokio's blocking pool and build.
    ///
    /// Must be called from within a tokio runtime.
    #[cfg(feature = "async")]
    pub async fn load_tar(self, data: impl Into<Vec<u8>>) -> Result<BufferedFs<V>> {
        let reader = TarReader::new(data).with_logger(self.logger.clone());
        let reader = tokio::task::spawn_blocking(move || reader.init().map(|()| reader))
            .await
            .map_err(|e| FsError::Task(e.to_string()))??;
        Ok(self.build(reader))
    }
}
