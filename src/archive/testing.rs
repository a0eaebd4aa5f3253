//! Archive builders for tests.

use tar::{Builder, EntryType, Header};

/// Build an in-memory tar. Paths ending in `/` become directory entries.
pub(crate) fn tar_of(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = Builder::new(Vec::new());
    for (path, data) in entries {
        let mut header = Header::new_gnu();
        if path.ends_with('/') {
            header.set_entry_type(EntryType::Directory);
            header.set_mode(0o755);
        } else {
            header.set_entry_type(EntryType::Regular);
            header.set_mode(0o644);
        }
        header.set_size(data.len() as u64);
        builder
            .append_data(&mut header, path, data.as_bytes())
            .expect("append entry");
    }
    builder.into_inner().expect("finish archive")
}
