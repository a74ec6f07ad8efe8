//! Sentence-per-line corpus writer.
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::extract::Article;
use crate::text::{render, Segmenter};

use super::{FilePattern, RotatingWriter, WriterTrait};

/// Writes rendered articles (see [crate::text::render]) into rotated text files,
/// each article followed by a blank line.
///
/// Capacity is counted in lines, separators included.
pub struct TextWriter {
    handle: RotatingWriter,
    segmenter: Segmenter,
}

impl TextWriter {
    pub fn new(dst: &Path, pattern: FilePattern, max_lines: u64, segmenter: Segmenter) -> Self {
        Self {
            handle: RotatingWriter::new(dst, pattern, max_lines),
            segmenter,
        }
    }

    /// Write already rendered lines as one article.
    pub fn write_lines(&mut self, lines: &[String], source: &str) -> Result<(), Error> {
        let mut buf = String::new();
        for line in lines {
            buf.push_str(line);
            buf.push('\n');
        }
        // blank separator line
        buf.push('\n');

        self.handle
            .write_record(buf.as_bytes(), lines.len() as u64 + 1, source)?;
        Ok(())
    }
}

impl WriterTrait for TextWriter {
    fn write_single(&mut self, article: &Article) -> Result<(), Error> {
        let lines = render(article, &self.segmenter);
        self.write_lines(&lines, &article.source())
    }

    fn close(&mut self) -> Result<(), Error> {
        Ok(self.handle.close()?)
    }

    fn artifacts(&self) -> Vec<PathBuf> {
        self.handle.artifacts().to_vec()
    }
}
