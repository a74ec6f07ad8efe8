//! Pipelines.
//!
//! [Metadata] and [Convert] are the two modes of the tool.
//! Both share the [extraction] stages, and the module
//! provides a light [pipeline::Pipeline] trait that enables easy and flexible pipeline creation.
use std::path::Path;

use log::debug;

use crate::error::Error;
use crate::io::{ErrorSink, FolderLog, PrintLog};

pub mod convert;
pub mod extraction;
pub mod metadata;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use convert::{Convert, ConvertSettings, Format};
pub use extraction::{Articles, Extraction, Extractor, ParallelExtraction, Policy, ProcessError};
pub use metadata::{Metadata, MetadataSettings};
pub use pipeline::{Pipeline, Summary};

/// Folder sink if a log folder is set, stdout otherwise.
pub(crate) fn error_sink(log: Option<&Path>) -> Result<Box<dyn ErrorSink>, Error> {
    match log {
        Some(folder) => {
            debug!("rejected documents go to {:?}", folder);
            Ok(Box::new(FolderLog::new(folder)?))
        }
        None => Ok(Box::new(PrintLog::stdout())),
    }
}

fn check_source(src: &Path) -> Result<(), Error> {
    if !src.is_dir() {
        return Err(Error::Settings(format!(
            "source has to be an existing folder: {:?}",
            src
        )));
    }
    Ok(())
}

fn check_common(log: Option<&Path>, workers: usize) -> Result<(), Error> {
    if let Some(log) = log {
        if !log.is_dir() {
            return Err(Error::Settings(format!(
                "log destination has to be an existing folder: {:?}",
                log
            )));
        }
    }
    if workers == 0 {
        return Err(Error::Settings(
            "at least one worker is needed".to_string(),
        ));
    }
    Ok(())
}
