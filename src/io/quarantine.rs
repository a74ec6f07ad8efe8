//! Rejected document logging.
//!
//! Documents that can't be turned into articles end up in an [ErrorSink]:
//! either saved as-is in a folder ([FolderLog]) or reported on a stream ([PrintLog]).
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use uuid::Uuid;

use crate::error::Error;
use crate::pipelines::ProcessError;

/// Receives rejected documents.
///
/// A sink failure is an [Error] and halts the run.
pub trait ErrorSink {
    fn log(&mut self, error: ProcessError) -> Result<(), Error>;
}

impl<S: ErrorSink + ?Sized> ErrorSink for Box<S> {
    fn log(&mut self, error: ProcessError) -> Result<(), Error> {
        (**self).log(error)
    }
}

/// Saves each rejected document in its own `<first issue>.<uuid>.xml` file,
/// such as `missing_title.6f1c2a8e-....xml`.
#[derive(Debug)]
pub struct FolderLog {
    dst: PathBuf,
}

impl FolderLog {
    pub fn new(dst: &Path) -> Result<Self, Error> {
        if !dst.is_dir() {
            return Err(Error::Settings(format!(
                "log destination has to be a folder: {:?}",
                dst
            )));
        }
        Ok(Self {
            dst: dst.to_path_buf(),
        })
    }
}

impl ErrorSink for FolderLog {
    fn log(&mut self, error: ProcessError) -> Result<(), Error> {
        let issue = error.issues.first().map(String::as_str).unwrap_or("error");
        let path = self
            .dst
            .join(format!("{}.{}.xml", slug(issue), Uuid::new_v4()));
        warn!("{} (saved to {:?})", error, path);
        std::fs::write(&path, error.document.as_bytes())?;
        debug!("wrote {} bytes to {:?}", error.document.len(), path);
        Ok(())
    }
}

/// File name friendly version of an issue.
fn slug(issue: &str) -> String {
    issue
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Prints an error block per rejected document.
pub struct PrintLog<W: Write> {
    out: W,
}

impl<W: Write> PrintLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl PrintLog<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ErrorSink for PrintLog<W> {
    fn log(&mut self, error: ProcessError) -> Result<(), Error> {
        warn!("{}", error);
        writeln!(self.out, "--- ERROR ---")?;
        for issue in &error.issues {
            writeln!(self.out, "{}", issue)?;
        }
        if let Some(origin) = &error.origin {
            writeln!(self.out, "in {}", origin)?;
        }
        Ok(())
    }
}
