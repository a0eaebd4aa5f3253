//! Tar archive reader.

use std::io::Read;
use std::sync::OnceLock;

use parking_lot::RwLock;
use serde_json::json;

use super::content::ContentMap;
use super::selector::Selector;
use super::{decode_text, lookup_key, ArchiveReader};
use crate::error::{FsError, Result};
use crate::logger::Logger;

/// Reads a tar buffer into a [`ContentMap`].
///
/// Parsing happens once in [`init`](Self::init); later calls return
/// immediately. Reads before `init` see an empty archive.
///
/// # Example
///
/// ```ignore
/// use buffered_fs::{ArchiveReader, Selector, TarReader};
///
/// let reader = TarReader::new(std::fs::read("site.tar")?);
/// reader.init()?;
/// let html = reader.read(&Selector::from("index.html"))?;
/// ```
pub struct TarReader {
    data: Vec<u8>,
    contents: OnceLock<ContentMap>,
    basedir: RwLock<Option<String>>,
    logger: Logger,
}

impl TarReader {
    /// Create an unparsed reader over `data`.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            contents: OnceLock::new(),
            basedir: RwLock::new(None),
            logger: Logger::default(),
        }
    }

    /// Attach a logger.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Parse the archive. Idempotent.
    pub fn init(&self) -> Result<()> {
        if let Some(contents) = self.contents.get() {
            self.logger.debug(
                "Tar reader already initialized",
                || Some(json!({ "entries": contents.len() })),
            );
            return Ok(());
        }

        let contents = parse(&self.data, &self.logger)?;
        self.logger.info(
            "Tar reader initialized",
            || Some(json!({ "entries": contents.len(), "bytes": self.data.len() })),
        );
        // A concurrent init may have won; both parsed the same bytes.
        let _ = self.contents.set(contents);
        Ok(())
    }

    /// Whether [`init`](Self::init) has completed.
    pub fn is_initialized(&self) -> bool {
        self.contents.get().is_some()
    }

    /// Parsed content, if initialized.
    pub fn contents(&self) -> Option<&ContentMap> {
        self.contents.get()
    }
}

impl ArchiveReader for TarReader {
    fn byte_length(&self) -> usize {
        self.data.len()
    }

    fn basedir(&self) -> Option<String> {
        self.basedir.read().clone()
    }

    fn set_basedir(&self, dir: String) {
        *self.basedir.write() = Some(dir);
    }

    fn paths(&self) -> Vec<String> {
        self.contents
            .get()
            .map(|c| c.paths().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn read(&self, selector: &Selector) -> Result<Vec<String>> {
        let contents = self.contents.get();

        let (key, found) = match selector {
            Selector::Path(file) => {
                let key = lookup_key(self.basedir().as_deref(), file);
                self.logger.debug("Reading file", || Some(json!({ "file": key })));
                let found = contents
                    .and_then(|c| c.get(&key))
                    .map(|bytes| vec![decode_text(&bytes)])
                    .unwrap_or_default();
                (key, found)
            }
            Selector::Pattern(pattern) => {
                self.logger.debug(
                    "Reading files by pattern",
                    || Some(json!({ "pattern": pattern.as_str() })),
                );
                let found: Vec<String> = contents
                    .into_iter()
                    .flat_map(ContentMap::iter)
                    .filter(|(path, _)| pattern.is_match(path))
                    .map(|(_, chunks)| decode_text(&chunks.concat()))
                    .collect();
                (pattern.as_str().to_string(), found)
            }
        };

        self.logger.debug(
            "Done reading file",
            || Some(json!({ "file": key, "matches": found.len() })),
        );
        if found.is_empty() {
            return Err(FsError::not_found(key));
        }
        Ok(found)
    }
}

/// Walk the tar stream, skipping directories and collecting file data.
fn parse(data: &[u8], logger: &Logger) -> Result<ContentMap> {
    let mut archive = tar::Archive::new(data);
    let mut contents = ContentMap::new();

    for entry in archive.entries()? {
        let mut entry = entry?;
        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        let kind = entry.header().entry_type();

        if name.ends_with('/') || kind.is_dir() || kind.is_pax_global_extensions() {
            logger.debug("Skipping archive entry", || Some(json!({ "entry": name })));
            continue;
        }

        let mut buf = Vec::new();
        entry.read_to_end(&mut buf)?;
        if buf.is_empty() {
            continue;
        }
        contents.append(name, buf);
    }

    Ok(contents)
}
