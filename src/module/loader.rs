//! Nested `require` handle given to executors.

use crate::config::ResolveConfig;
use crate::error::Result;
use crate::fs::BufferedFs;

/// Resolves specifiers on behalf of the module being executed.
///
/// Relative specifiers resolve against the directory of the file that was
/// loaded, so `./a` inside `nested/deep/index.js` reads `nested/deep/a.js`.
pub struct ModuleLoader<'a, V> {
    fs: &'a BufferedFs<V>,
    path: String,
    dir: String,
}

impl<'a, V> ModuleLoader<'a, V> {
    pub(crate) fn new(fs: &'a BufferedFs<V>, path: String, dir: String) -> Self {
        Self { fs, path, dir }
    }

    /// Path of the module being executed.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Directory relative specifiers resolve against.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    /// Resolution conventions of the owning file system.
    pub fn config(&self) -> &ResolveConfig {
        self.fs.config()
    }

    /// The owning file system.
    pub fn fs(&self) -> &'a BufferedFs<V> {
        self.fs
    }
}

impl<V: Clone> ModuleLoader<'_, V> {
    /// Resolve and execute `specifier` from this module.
    ///
    /// Cycles are not detected: a module that transitively requires itself
    /// recurses until the stack runs out.
    pub fn require(&self, specifier: &str) -> Result<V> {
        self.fs.resolve(specifier, &self.dir)
    }
}
