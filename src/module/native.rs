//! Host-native modules: values that live outside the archive.

use rustc_hash::FxHashMap;

use crate::error::NativeLoadError;

/// Loads bare specifiers from the host.
///
/// Returning [`NativeLoadError::NotFound`] makes the resolver fall back to
/// the archive's dependency directory. Any other error is fatal.
pub trait NativeLoader<V>: Send + Sync {
    /// Load the module registered under `name`.
    fn load(&self, name: &str) -> Result<V, NativeLoadError>;
}

impl<V, F> NativeLoader<V> for F
where
    F: Fn(&str) -> Result<V, NativeLoadError> + Send + Sync,
{
    fn load(&self, name: &str) -> Result<V, NativeLoadError> {
        self(name)
    }
}

/// No native modules; every bare specifier goes to the archive.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNativeModules;

impl<V> NativeLoader<V> for NoNativeModules {
    fn load(&self, name: &str) -> Result<V, NativeLoadError> {
        Err(NativeLoadError::NotFound(name.to_string()))
    }
}

/// A simple map-based native module registry.
///
/// # Example
///
/// ```
/// use buffered_fs::MapNativeLoader;
/// use serde_json::json;
///
/// let mut natives = MapNativeLoader::new();
/// natives.insert("fs", json!({ "native": "fs" }));
/// assert!(natives.contains("fs"));
/// ```
#[derive(Debug, Clone)]
pub struct MapNativeLoader<V> {
    modules: FxHashMap<String, V>,
}

impl<V> Default for MapNativeLoader<V> {
    fn default() -> Self {
        Self {
            modules: FxHashMap::default(),
        }
    }
}

impl<V> MapNativeLoader<V> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module.
    pub fn insert(&mut self, name: impl Into<String>, module: V) {
        self.modules.insert(name.into(), module);
    }

    /// Check if a module is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<V: Clone + Send + Sync> NativeLoader<V> for MapNativeLoader<V> {
    fn load(&self, name: &str) -> Result<V, NativeLoadError> {
        self.modules
            .get(name)
            .cloned()
            .ok_or_else(|| NativeLoadError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_native_modules() {
        let err = NativeLoader::<u8>::load(&NoNativeModules, "fs").unwrap_err();
        assert!(matches!(err, NativeLoadError::NotFound(name) if name == "fs"));
    }

    #[test]
    fn test_map_loader() {
        let mut natives = MapNativeLoader::new();
        natives.insert("fs", 7u8);
        assert_eq!(natives.len(), 1);
        assert_eq!(natives.load("fs").unwrap(), 7);
        assert!(matches!(natives.load("path"), Err(NativeLoadError::NotFound(_))));
    }

    #[test]
    fn test_closure_loader() {
        let loader = |name: &str| -> Result<String, NativeLoadError> {
            Err(NativeLoadError::failed(name, "boom"))
        };
        assert!(matches!(
            loader.load("fs"),
            Err(NativeLoadError::Failed { .. })
        ));
    }
}
