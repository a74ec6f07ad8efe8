//! Metadata table generation.
//!
//! Every document of the source folder is turned into a row of a single CSV file,
//! see [Field::METADATA] for the columns.
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::Error;
use crate::extract::Field;
use crate::io::{CsvWriter, WriterTrait};
use crate::pipelines::extraction::{self, Articles, Extractor, Policy};
use crate::pipelines::pipeline::{Pipeline, Summary};
use crate::sources::pmc::Documents;

#[derive(Debug, Clone)]
pub struct MetadataSettings {
    /// Folder holding the bundles.
    pub src: PathBuf,
    /// CSV file, overwritten if present.
    pub dst: PathBuf,
    /// Folder for rejected documents. They are printed if unset.
    pub log: Option<PathBuf>,
    pub policy: Policy,
    pub workers: usize,
}

impl MetadataSettings {
    pub fn validate(&self) -> Result<(), Error> {
        super::check_source(&self.src)?;

        if self.dst.is_dir() {
            return Err(Error::Settings(format!(
                "destination has to be a file: {:?}",
                self.dst
            )));
        }
        let parent = match self.dst.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !parent.is_dir() {
            return Err(Error::Settings(format!(
                "destination folder does not exist: {:?}",
                parent
            )));
        }

        super::check_common(self.log.as_deref(), self.workers)
    }
}

pub struct Metadata {
    settings: MetadataSettings,
}

impl Metadata {
    /// Settings are validated here, before anything gets written.
    pub fn new(settings: MetadataSettings) -> Result<Self, Error> {
        settings.validate()?;
        Ok(Self { settings })
    }
}

impl Pipeline<Summary> for Metadata {
    fn run(&self) -> Result<Summary, Error> {
        let settings = &self.settings;
        info!("extracting metadata from {:?} to {:?}", settings.src, settings.dst);

        let documents = Documents::from_folder(&settings.src)?;
        let extractor = Extractor::new(&Field::METADATA, settings.policy);
        let results = extraction::extract(documents, extractor, settings.workers)?;
        let mut articles = Articles::new(results, super::error_sink(settings.log.as_deref())?);

        let mut writer = CsvWriter::new(&settings.dst, &Field::METADATA)?;
        let mut written = 0;
        for article in articles.by_ref() {
            writer.write_single(&article?)?;
            written += 1;
        }
        writer.close()?;

        let summary = Summary {
            documents: articles.documents(),
            articles: written,
            quarantined: articles.quarantined(),
            artifacts: writer.artifacts(),
        };
        if summary.quarantined > 0 {
            warn!(
                "{} out of {} documents could not be processed",
                summary.quarantined, summary.documents
            );
        }
        info!("wrote {} rows to {:?}", summary.articles, settings.dst);
        Ok(summary)
    }
}
