//! JSON Lines article writer.
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::extract::Article;

use super::{FilePattern, RotatingWriter, WriterTrait};

/// Writes one JSON object per line, keys sorted.
///
/// Capacity is counted in articles.
pub struct JsonlWriter {
    handle: RotatingWriter,
}

impl JsonlWriter {
    pub fn new(dst: &Path, pattern: FilePattern, max_articles: u64) -> Self {
        Self {
            handle: RotatingWriter::new(dst, pattern, max_articles),
        }
    }
}

impl WriterTrait for JsonlWriter {
    fn write_single(&mut self, article: &Article) -> Result<(), Error> {
        let mut line = serde_json::to_string(article)?;
        line.push('\n');
        self.handle
            .write_record(line.as_bytes(), 1, &article.source())?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        Ok(self.handle.close()?)
    }

    fn artifacts(&self) -> Vec<PathBuf> {
        self.handle.artifacts().to_vec()
    }
}
