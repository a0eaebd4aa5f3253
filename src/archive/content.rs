//! Parsed archive content, keyed by entry path.

use rustc_hash::FxHashMap;

/// Mapping from entry path to its content chunks, in archive order.
///
/// Repeated entries under the same path append chunks instead of replacing
/// earlier ones; reading a key concatenates all of its chunks.
#[derive(Debug, Default, Clone)]
pub struct ContentMap {
    entries: Vec<(String, Vec<Vec<u8>>)>,
    index: FxHashMap<String, usize>,
}

impl ContentMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk under `path`, creating the key on first use.
    pub fn append(&mut self, path: impl Into<String>, chunk: Vec<u8>) {
        let path = path.into();
        match self.index.get(&path) {
            Some(&slot) => self.entries[slot].1.push(chunk),
            None => {
                self.index.insert(path.clone(), self.entries.len());
                self.entries.push((path, vec![chunk]));
            }
        }
    }

    /// Concatenated content of `path`.
    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.index
            .get(path)
            .map(|&slot| self.entries[slot].1.concat())
    }

    /// Check if a key exists.
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over keys in archive order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    /// Iterate over `(key, chunks)` in archive order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Vec<u8>])> {
        self.entries
            .iter()
            .map(|(path, chunks)| (path.as_str(), chunks.as_slice()))
    }
}
