/*!
# Rotating file based writing

This module deals with writing extracted articles to files.

Plain text and JSON Lines corpora go through a [RotatingWriter], which creates new files
named after a [FilePattern] when a provided limit is reached.
Metadata goes into a single CSV file through [CsvWriter].

Every writer implements [WriterTrait], which is what pipelines use.
!*/
mod csvwriter;
mod jsonlwriter;
mod pattern;
mod rotating;
mod textwriter;
mod writertrait;
pub use csvwriter::CsvWriter;
pub use jsonlwriter::JsonlWriter;
pub use pattern::FilePattern;
pub use rotating::RotatingWriter;
pub use textwriter::TextWriter;
pub use writertrait::WriterTrait;
