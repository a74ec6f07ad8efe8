//! Rotating file writer.
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use super::FilePattern;

/// Rotating file writer.
///
/// Writes records into artifacts named after a [FilePattern], each holding at most
/// `capacity` units (lines, articles... the caller decides what a unit is).
///
/// - Records are never split: a record that would overflow a non-empty artifact goes into the next one.
/// - An artifact that reaches its capacity is closed right away, the next one is only created
///   when there is something to write in it.
/// - A record larger than the whole capacity gets an artifact of its own, which is then larger than
///   `capacity`. This is expected behaviour.
///
/// When the pattern holds `{name}`, a change of source also closes the artifact,
/// and each source gets its own index sequence starting at 0.
pub struct RotatingWriter {
    dst: PathBuf,
    pattern: FilePattern,
    capacity: u64,
    file: Option<BufWriter<File>>,
    size: u64,
    source: Option<String>,
    next_index: HashMap<String, u64>,
    created: Vec<PathBuf>,
}

impl RotatingWriter {
    /// Create a new [RotatingWriter].
    /// Note that nothing is created/written unless a write is performed.
    pub fn new(dst: &Path, pattern: FilePattern, capacity: u64) -> Self {
        Self {
            dst: dst.to_path_buf(),
            pattern,
            capacity,
            file: None,
            size: 0,
            source: None,
            next_index: HashMap::new(),
            created: Vec::new(),
        }
    }

    /// Write a record worth `units` units.
    pub fn write_record(&mut self, buf: &[u8], units: u64, source: &str) -> std::io::Result<()> {
        // sources only matter if they are part of the file name
        let source = if self.pattern.has_name() { source } else { "" };

        if self.source.as_deref() != Some(source) {
            if self.file.is_some() {
                debug!("source changed to {:?}, rotating", source);
                self.close()?;
            }
            self.source = Some(source.to_string());
        }

        // ignore if the artifact is empty (we're already on a new artifact)
        if self.file.is_some() && self.size > 0 && self.size + units > self.capacity {
            self.close()?;
        }

        if self.file.is_none() {
            self.create_next_file(source)?;
        }

        if let Some(file) = &mut self.file {
            file.write_all(buf)?;
            self.size += units;
        }

        if self.size >= self.capacity {
            self.close()?;
        }
        Ok(())
    }

    /// Open the next artifact for the provided source.
    fn create_next_file(&mut self, source: &str) -> std::io::Result<()> {
        let index = self.next_index.entry(source.to_string()).or_insert(0);
        let path = self.dst.join(self.pattern.format(*index, source));
        *index += 1;

        info!("creating {:?}", path);
        let file = File::create(&path)?;
        self.file = Some(BufWriter::new(file));
        self.size = 0;
        self.created.push(path);
        Ok(())
    }

    /// Flush and close the current artifact, if any.
    pub fn close(&mut self) -> std::io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        self.size = 0;
        Ok(())
    }

    /// Every artifact created so far, in creation order.
    pub fn artifacts(&self) -> &[PathBuf] {
        &self.created
    }
}

impl Drop for RotatingWriter {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            error!("could not close artifact: {}", e);
        }
    }
}
