//! Corpus generation.
//!
//! Every usable article of the source folder is written into rotated corpus files,
//! either as flat text (one sentence per line, see [crate::text::render]) or as JSON Lines.
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use log::{debug, info, warn};

use crate::error::Error;
use crate::extract::Field;
use crate::io::{FilePattern, JsonlWriter, TextWriter, WriterTrait};
use crate::pipelines::extraction::{self, Articles, Extractor, Policy};
use crate::pipelines::pipeline::{Pipeline, Summary};
use crate::sources::pmc::Documents;
use crate::text::{is_usable, Segmenter};

/// Lines (text) or articles (jsonl) per file.
pub const DEFAULT_COUNT: u64 = 100_000;

/// Corpus file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Jsonl,
}

impl Format {
    /// Default file name pattern.
    pub fn default_pattern(&self) -> &'static str {
        match self {
            Format::Text => "oas.{id:02}.txt",
            Format::Jsonl => "oas.{id:02}.jsonl",
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" | "txt" => Ok(Format::Text),
            "jsonl" => Ok(Format::Jsonl),
            other => Err(format!("unknown format {:?} (text or jsonl)", other)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Text => f.write_str("text"),
            Format::Jsonl => f.write_str("jsonl"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvertSettings {
    /// Folder holding the bundles.
    pub src: PathBuf,
    /// Folder receiving the corpus files.
    pub dst: PathBuf,
    /// Capacity of each file: lines (separators included) for text, articles for jsonl.
    pub count: u64,
    /// File name pattern. Defaults to [Format::default_pattern].
    pub pattern: Option<String>,
    pub format: Format,
    /// Folder for rejected documents. They are printed if unset.
    pub log: Option<PathBuf>,
    pub policy: Policy,
    pub workers: usize,
}

impl ConvertSettings {
    pub fn new(src: PathBuf, dst: PathBuf) -> Self {
        Self {
            src,
            dst,
            count: DEFAULT_COUNT,
            pattern: None,
            format: Format::default(),
            log: None,
            policy: Policy::default(),
            workers: 1,
        }
    }

    pub fn pattern(&self) -> Result<FilePattern, Error> {
        self.pattern
            .as_deref()
            .unwrap_or_else(|| self.format.default_pattern())
            .parse()
            .map_err(Error::Settings)
    }

    pub fn validate(&self) -> Result<(), Error> {
        super::check_source(&self.src)?;
        if !self.dst.is_dir() {
            return Err(Error::Settings(format!(
                "destination has to be an existing folder: {:?}",
                self.dst
            )));
        }
        if self.count == 0 {
            return Err(Error::Settings(
                "count has to be greater than 0".to_string(),
            ));
        }
        self.pattern()?;
        super::check_common(self.log.as_deref(), self.workers)
    }
}

pub struct Convert {
    settings: ConvertSettings,
    pattern: FilePattern,
}

impl Convert {
    /// Settings are validated here, before anything gets written.
    pub fn new(settings: ConvertSettings) -> Result<Self, Error> {
        settings.validate()?;
        let pattern = settings.pattern()?;
        Ok(Self { settings, pattern })
    }

    fn writer(&self) -> Box<dyn WriterTrait> {
        let settings = &self.settings;
        match settings.format {
            Format::Text => Box::new(TextWriter::new(
                &settings.dst,
                self.pattern.clone(),
                settings.count,
                Segmenter::default(),
            )),
            Format::Jsonl => Box::new(JsonlWriter::new(
                &settings.dst,
                self.pattern.clone(),
                settings.count,
            )),
        }
    }
}

impl Pipeline<Summary> for Convert {
    fn run(&self) -> Result<Summary, Error> {
        let settings = &self.settings;
        info!(
            "converting {:?} to {} files in {:?}",
            settings.src, settings.format, settings.dst
        );

        let documents = Documents::from_folder(&settings.src)?;
        let extractor = Extractor::new(&Field::CONVERT, settings.policy);
        let results = extraction::extract(documents, extractor, settings.workers)?;
        let mut articles = Articles::new(results, super::error_sink(settings.log.as_deref())?);

        let mut writer = self.writer();
        let mut written = 0;
        let mut skipped = 0;
        for article in articles.by_ref() {
            let article = article?;
            if !is_usable(&article) {
                debug!("skipping {:?}: no abstract nor body", article.text(Field::Id));
                skipped += 1;
                continue;
            }
            writer.write_single(&article)?;
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
        info!(
            "wrote {} articles in {} files ({} without text)",
            summary.articles,
            summary.artifacts.len(),
            skipped
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format() {
        assert_eq!("text".parse::<Format>(), Ok(Format::Text));
        assert_eq!("jsonl".parse::<Format>(), Ok(Format::Jsonl));
        assert!("xml".parse::<Format>().is_err());
        assert_eq!(Format::Jsonl.to_string(), "jsonl");
    }

    #[test]
    fn default_pattern_follows_format() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = ConvertSettings::new(dir.path().into(), dir.path().into());
        assert_eq!(settings.pattern().unwrap().format(3, ""), "oas.03.txt");
        settings.format = Format::Jsonl;
        assert_eq!(settings.pattern().unwrap().format(3, ""), "oas.03.jsonl");
        settings.pattern = Some("{name}-{id}.txt".to_string());
        assert_eq!(settings.pattern().unwrap().format(3, "b"), "b-3.txt");
    }

    #[test]
    fn validation() {
        let dir = tempfile::tempdir().unwrap();
        let valid = ConvertSettings::new(dir.path().into(), dir.path().into());
        assert!(valid.validate().is_ok());

        let mut s = valid.clone();
        s.count = 0;
        assert!(s.validate().is_err());

        let mut s = valid.clone();
        s.pattern = Some("oas.txt".to_string());
        assert!(s.validate().is_err());

        let mut s = valid.clone();
        s.dst = dir.path().join("missing");
        assert!(s.validate().is_err());

        let mut s = valid;
        s.src = dir.path().join("missing");
        assert!(s.validate().is_err());
    }
}
