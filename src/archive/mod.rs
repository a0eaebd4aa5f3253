//! Archive readers: parse a buffer once, then serve reads from memory.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Read Flow                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  Selector::Path("./a.js")                                   │
//! │      └─► join(basedir, path) ─► strip "./" ─► exact key     │
//! │                                                             │
//! │  Selector::Pattern(/\.js$/)                                 │
//! │      └─► every key the pattern matches, in archive order    │
//! │                                                             │
//! │  no match ─► FsError::NotFound { key }                      │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`TarReader`] is the bundled implementation. Other formats plug in by
//! implementing [`ArchiveReader`].

mod content;
mod selector;
mod tar_reader;

#[cfg(test)]
pub(crate) mod testing;

pub use content::ContentMap;
pub use selector::Selector;
pub use tar_reader::TarReader;

use crate::error::Result;
use crate::path;

/// Contract between an archive reader and [`BufferedFs`](crate::BufferedFs).
///
/// Readers are parsed before they are handed to the file system; all methods
/// here are synchronous.
pub trait ArchiveReader: Send + Sync {
    /// Size in bytes of the raw archive buffer.
    fn byte_length(&self) -> usize;

    /// Active base directory, if one is set.
    fn basedir(&self) -> Option<String>;

    /// Replace the base directory. The value is already normalized.
    fn set_basedir(&self, dir: String);

    /// Every stored entry path, in archive order.
    fn paths(&self) -> Vec<String>;

    /// Read every entry matching `selector`.
    ///
    /// Fails with [`FsError::NotFound`](crate::FsError::NotFound) when nothing
    /// matches.
    fn read(&self, selector: &Selector) -> Result<Vec<String>>;
}

/// Turn a path selector into a content key.
///
/// The base directory, when set, is joined in front. Leading `./` segments
/// are then stripped.
pub fn lookup_key(basedir: Option<&str>, file: &str) -> String {
    match basedir {
        Some(dir) => path::strip_dot_slash(&path::join(&[dir, file])).to_string(),
        None => path::strip_dot_slash(file).to_string(),
    }
}

/// Decode entry content as text.
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
