use std::path::PathBuf;

use crate::error::Error;
use crate::extract::Article;

pub trait WriterTrait {
    /// Write a single article.
    ///
    /// Rotating writers use the source bundle of the article (see [Article::source]).
    fn write_single(&mut self, article: &Article) -> Result<(), Error>;

    /// Flush pending writes. The writer may still be used afterwards.
    fn close(&mut self) -> Result<(), Error>;

    /// Files created so far.
    fn artifacts(&self) -> Vec<PathBuf>;
}
