//! Filesystem output sink.
//!
//! Each stream is persisted as one file at `<root>/<type>/<file>/<channel>`,
//! with file and channel as two-digit lowercase hex (e.g. `video/01/1f`).

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use xax_core::{OutputSink, SinkError, StreamKey};

/// How existing stream files are treated on the first write of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Start each stream file empty, so re-running gives the same output.
    #[default]
    Truncate,
    /// Append to whatever the file already holds.
    Append,
}

/// Writes every stream to its own file under a root directory.
///
/// Files are opened lazily on the first append for a key and stay open
/// until [`OutputSink::finish`].
pub struct DirectorySink {
    root: PathBuf,
    mode: WriteMode,
    files: HashMap<StreamKey, BufWriter<File>>,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mode: WriteMode::default(),
            files: HashMap::new(),
        }
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`'s stream.
    pub fn path_for(&self, key: &StreamKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    /// Number of stream files opened so far.
    pub fn open_streams(&self) -> usize {
        self.files.len()
    }
}

fn open_stream(root: &Path, mode: WriteMode, key: &StreamKey) -> io::Result<BufWriter<File>> {
    let path = root.join(key.relative_path());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        WriteMode::Truncate => options.write(true).truncate(true),
        WriteMode::Append => options.append(true),
    };

    log::debug!("Opening {} ({:?})", path.display(), mode);
    Ok(BufWriter::new(options.open(&path)?))
}

impl OutputSink for DirectorySink {
    fn append(&mut self, key: &StreamKey, bytes: &[u8]) -> Result<(), SinkError> {
        let writer = match self.files.entry(*key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(open_stream(&self.root, self.mode, key)?),
        };
        writer.write_all(bytes)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        for writer in self.files.values_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/sink_tests.rs"]
mod tests;
