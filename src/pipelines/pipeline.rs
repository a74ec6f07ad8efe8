//! Pipeline trait.
use std::path::PathBuf;

use crate::error::Error;

/// This trait must be implemented for each Pipeline,
/// and is generic over the return type so that
/// any custom pipeline that needs a return type can use the
/// trait aswell.
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}

/// Counters of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Documents read from the source.
    pub documents: usize,
    /// Articles written.
    pub articles: usize,
    /// Documents sent to the error sink.
    pub quarantined: usize,
    /// Files created, in creation order.
    pub artifacts: Vec<PathBuf>,
}
