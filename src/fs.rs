//! The buffered file system: read surface, base directory and overrides.
//!
//! Module resolution lives in [`crate::module`]; this file holds the state it
//! works against.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde_json::{json, Value};

use crate::archive::{ArchiveReader, Selector};
use crate::builder::FsBuilder;
use crate::config::ResolveConfig;
use crate::error::{FsError, Result};
use crate::logger::Logger;
use crate::module::{Executor, NativeLoader};

/// A read-only file system backed by a parsed archive.
///
/// Reads and `require` calls are synchronous and resolved against content
/// that never changes after construction. The only mutable state is the base
/// directory and the table of provided modules; callers sharing one instance
/// across threads should not race [`basedir`](Self::basedir) against reads.
///
/// # Example
///
/// ```ignore
/// let fs = buffered_fs::from_tar(bytes).await?;
/// fs.basedir("modules")?;
/// let index = fs.read_file("./")?;
/// let exports = fs.require("./nested")?;
/// ```
pub struct BufferedFs<V = Value> {
    pub(crate) reader: Box<dyn ArchiveReader>,
    pub(crate) executor: Box<dyn Executor<V>>,
    pub(crate) natives: Box<dyn NativeLoader<V>>,
    pub(crate) config: ResolveConfig,
    pub(crate) logger: Logger,
    provided: RwLock<FxHashMap<String, V>>,
}

impl BufferedFs<Value> {
    /// Builder for a file system whose modules are JSON values.
    pub fn builder() -> FsBuilder<Value> {
        FsBuilder::new()
    }
}

impl<V: 'static> BufferedFs<V> {
    /// Builder for a file system using a custom executor.
    pub fn with_executor(executor: impl Executor<V> + 'static) -> FsBuilder<V> {
        FsBuilder::with_executor(executor)
    }
}

impl<V> BufferedFs<V> {
    pub(crate) fn from_parts(
        reader: Box<dyn ArchiveReader>,
        executor: Box<dyn Executor<V>>,
        natives: Box<dyn NativeLoader<V>>,
        config: ResolveConfig,
        logger: Logger,
        provided: FxHashMap<String, V>,
    ) -> Self {
        Self {
            reader,
            executor,
            natives,
            config,
            logger,
            provided: RwLock::new(provided),
        }
    }

    /// Size in bytes of the archive buffer.
    pub fn byte_length(&self) -> usize {
        self.reader.byte_length()
    }

    /// Number of file entries.
    ///
    /// An archive without file entries counts as zero; any error other than
    /// not-found is returned.
    pub fn size(&self) -> Result<usize> {
        match self.read_files(Selector::any()) {
            Ok(files) => Ok(files.len()),
            Err(err) if err.is_not_found() => Ok(0),
            Err(err) => Err(err),
        }
    }

    /// Read the first file matching `selector`.
    pub fn read_file(&self, selector: impl Into<Selector>) -> Result<String> {
        let selector = selector.into();
        let key = selector.as_path().unwrap_or_default().to_string();
        self.read_files(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| FsError::not_found(key))
    }

    /// Read every file matching `selector`.
    ///
    /// `./` and any path ending in `/` read the directory index instead.
    pub fn read_files(&self, selector: impl Into<Selector>) -> Result<Vec<String>> {
        let selector = match selector.into() {
            Selector::Path(path) if path == "./" || path.ends_with('/') => {
                Selector::Path(self.config.index_path())
            }
            other => other,
        };
        self.reader.read(&selector)
    }

    /// Set the base directory for all later reads and resolutions.
    ///
    /// The value is trimmed, prefixed with `./` and stripped of trailing
    /// slashes. A blank value is rejected and the previous base is kept.
    pub fn basedir(&self, dir: &str) -> Result<()> {
        let dir = dir.trim();
        if dir.is_empty() {
            return Err(FsError::InvalidArgument(
                "base directory must not be empty".to_string(),
            ));
        }

        let mut dir = if dir.starts_with("./") {
            dir.to_string()
        } else {
            format!("./{dir}")
        };
        while dir.len() > 1 && dir.ends_with('/') {
            dir.pop();
        }

        self.logger
            .debug("Setting base directory", || Some(json!({ "basedir": dir })));
        self.reader.set_basedir(dir);
        Ok(())
    }

    /// The active base directory.
    pub fn current_basedir(&self) -> Option<String> {
        self.reader.basedir()
    }

    /// Every stored entry path, in archive order.
    pub fn paths(&self) -> Vec<String> {
        self.reader.paths()
    }

    /// Resolution conventions in use.
    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    /// The injected logger.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Register a value returned by `require(name)` without touching the
    /// archive. The first registration for a name wins.
    pub fn provide(&self, name: impl Into<String>, value: V) {
        let name = name.into();
        let mut provided = self.provided.write();
        if provided.contains_key(&name) {
            self.logger
                .debug("Module already provided", || Some(json!({ "name": name })));
            return;
        }
        provided.insert(name, value);
    }

    /// Check whether an override is registered under `name`.
    pub fn is_provided(&self, name: &str) -> bool {
        self.provided.read().contains_key(name)
    }
}

impl<V: Clone> BufferedFs<V> {
    pub(crate) fn provided(&self, name: &str) -> Option<V> {
        self.provided.read().get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::testing::tar_of;
    use std::io;

    fn fs(entries: &[(&str, &str)]) -> BufferedFs {
        BufferedFs::builder().load_tar_blocking(tar_of(entries)).unwrap()
    }

    #[test]
    fn test_empty_archive() {
        let fs = fs(&[]);
        assert!(fs.byte_length() > 0);
        assert_eq!(fs.size().unwrap(), 0);
        assert!(fs.read_file("anything").unwrap_err().is_not_found());
        assert!(fs.read_file("./").unwrap_err().is_not_found());
        assert!(fs.read_files(Selector::any()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_min_archive() {
        let fs = fs(&[("min", "test")]);
        assert!(fs.byte_length() > 0);
        assert_eq!(fs.size().unwrap(), 1);
        assert_eq!(fs.read_file("min").unwrap(), "test");
    }

    #[test]
    fn test_size_counts_distinct_paths() {
        let fs = fs(&[("dir/", ""), ("a", "1"), ("dir/b", "2"), ("dir/c", "3")]);
        assert_eq!(fs.size().unwrap(), 3);
        assert_eq!(fs.paths(), vec!["a", "dir/b", "dir/c"]);
    }

    #[test]
    fn test_directory_reads_default_to_index() {
        let fs = fs(&[("index.js", "root"), ("modules/index.js", "mod")]);
        assert_eq!(fs.read_file("./").unwrap(), "root");
        assert_eq!(fs.read_file("anything/").unwrap(), "root");

        fs.basedir("modules").unwrap();
        assert_eq!(fs.read_file("./").unwrap(), "mod");
        assert_eq!(fs.read_file("./index.js").unwrap(), "mod");
        assert_eq!(fs.read_file("other/").unwrap(), "mod");
    }

    #[test]
    fn test_read_files_by_pattern() {
        let fs = fs(&[("a.js", "a"), ("b.txt", "b"), ("c.js", "c")]);
        let found = fs.read_files(Selector::pattern(r"\.js$").unwrap()).unwrap();
        assert_eq!(found, vec!["a", "c"]);
        let first = fs.read_file(Selector::pattern(r"\.js$").unwrap()).unwrap();
        assert_eq!(first, "a");
    }

    #[test]
    fn test_basedir_normalization() {
        let fs = fs(&[]);
        fs.basedir("  modules/ ").unwrap();
        assert_eq!(fs.current_basedir().as_deref(), Some("./modules"));
        fs.basedir("./nested//").unwrap();
        assert_eq!(fs.current_basedir().as_deref(), Some("./nested"));
    }

    #[test]
    fn test_blank_basedir_keeps_previous() {
        let fs = fs(&[]);
        fs.basedir("modules").unwrap();

        for blank in ["", "   ", "\t\n"] {
            let err = fs.basedir(blank).unwrap_err();
            assert!(matches!(err, FsError::InvalidArgument(_)));
        }
        assert_eq!(fs.current_basedir().as_deref(), Some("./modules"));
    }

    #[test]
    fn test_blank_basedir_without_previous() {
        let fs = fs(&[]);
        assert!(fs.basedir(" ").is_err());
        assert!(fs.current_basedir().is_none());
    }

    #[test]
    fn test_provide_first_write_wins() {
        let fs = fs(&[]);
        fs.provide("x", Value::from(1));
        fs.provide("x", Value::from(2));
        assert!(fs.is_provided("x"));
        assert_eq!(fs.provided("x"), Some(Value::from(1)));
        assert!(fs.provided("y").is_none());
    }

    struct BrokenReader;

    impl ArchiveReader for BrokenReader {
        fn byte_length(&self) -> usize {
            0
        }
        fn basedir(&self) -> Option<String> {
            None
        }
        fn set_basedir(&self, _dir: String) {}
        fn paths(&self) -> Vec<String> {
            Vec::new()
        }
        fn read(&self, _selector: &Selector) -> Result<Vec<String>> {
            Err(io::Error::new(io::ErrorKind::InvalidData, "corrupt").into())
        }
    }

    #[test]
    fn test_size_only_downgrades_not_found() {
        let fs = BufferedFs::builder().build(BrokenReader);
        assert!(matches!(fs.size(), Err(FsError::Archive(_))));
    }
}
