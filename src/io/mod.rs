/*!
# IO utilities

Article saving (corpus files and metadata tables) and rejected document logging.
!*/
pub mod quarantine;
pub mod writer;
pub use quarantine::{ErrorSink, FolderLog, PrintLog};
pub use writer::{CsvWriter, FilePattern, JsonlWriter, TextWriter, WriterTrait};
