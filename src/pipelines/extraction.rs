//! Document to article extraction.
//!
//! [Extraction] and [ParallelExtraction] turn a stream of [Document]s into a stream of
//! `Result<Article, ProcessError>`, in input order.
//! [Articles] then routes rejected documents to an [ErrorSink] and only lets articles through.
use std::fmt;

use log::{debug, info};
use rayon::prelude::*;

use crate::error::Error;
use crate::extract::{Article, Field};
use crate::io::ErrorSink;
use crate::jats;
use crate::sources::{Document, Origin};

/// Issue reported when a document has not a single usable field.
pub const NO_FIELDS: &str = "No fields extracted";

/// Documents per worker pulled at once by [ParallelExtraction].
const BATCH_PER_WORKER: usize = 64;

/// What to do with fields that can't be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Every configured field is required, the document is rejected otherwise.
    #[default]
    Strict,
    /// Fields that can't be extracted are left out.
    Lenient,
}

/// A document that could not be turned into an [Article].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessError {
    /// Raw document text.
    pub document: String,
    pub origin: Option<Origin>,
    /// Human readable issues, such as `Bad XML` or `Missing title`.
    pub issues: Vec<String>,
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Some(origin) => write!(f, "{}: {}", origin, self.issues.join(", ")),
            None => write!(f, "{}", self.issues.join(", ")),
        }
    }
}

impl std::error::Error for ProcessError {}

/// Extracts a fixed set of fields from documents.
#[derive(Debug, Clone)]
pub struct Extractor {
    fields: Vec<Field>,
    policy: Policy,
}

impl Extractor {
    pub fn new(fields: &[Field], policy: Policy) -> Self {
        Self {
            fields: fields.to_vec(),
            policy,
        }
    }

    pub fn extract(&self, document: Document) -> Result<Article, ProcessError> {
        if let Some(issue) = document.unreadable.clone() {
            return Err(self.reject(document, vec![issue]));
        }

        let root = match jats::parse(&document.text) {
            Ok(root) => root,
            Err(e) => {
                debug!("{}", e);
                return Err(self.reject(document, vec![jats::BAD_XML.to_string()]));
            }
        };

        let mut article = Article::new();
        let mut issues = Vec::new();
        for field in &self.fields {
            match field.extract(&root) {
                Ok(Some(value)) => article.insert(*field, value),
                Ok(None) => issues.push(format!("Missing {}", field)),
                Err(e) => {
                    debug!("{}", e);
                    issues.push(format!("Missing {}", field));
                }
            }
        }

        match self.policy {
            Policy::Strict if !issues.is_empty() => Err(self.reject(document, issues)),
            Policy::Lenient if article.is_empty() => {
                Err(self.reject(document, vec![NO_FIELDS.to_string()]))
            }
            _ => {
                article.set_origin(document.origin);
                Ok(article)
            }
        }
    }

    fn reject(&self, document: Document, issues: Vec<String>) -> ProcessError {
        ProcessError {
            document: document.text,
            origin: document.origin,
            issues,
        }
    }
}

/// Sequential extraction, one document at a time.
pub struct Extraction<I> {
    documents: I,
    extractor: Extractor,
}

impl<I> Extraction<I>
where
    I: Iterator<Item = Document>,
{
    pub fn new(documents: I, extractor: Extractor) -> Self {
        Self {
            documents,
            extractor,
        }
    }
}

impl<I> Iterator for Extraction<I>
where
    I: Iterator<Item = Document>,
{
    type Item = Result<Article, ProcessError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.documents
            .next()
            .map(|document| self.extractor.extract(document))
    }
}

/// Multi-worker extraction.
///
/// Documents are pulled in batches and extracted on a dedicated rayon pool.
/// Results are yielded in input order whatever the number of workers.
pub struct ParallelExtraction<I> {
    documents: I,
    extractor: Extractor,
    pool: rayon::ThreadPool,
    batch_size: usize,
    pending: std::vec::IntoIter<Result<Article, ProcessError>>,
}

impl<I> ParallelExtraction<I>
where
    I: Iterator<Item = Document>,
{
    pub fn new(documents: I, extractor: Extractor, workers: usize) -> Result<Self, Error> {
        let workers = workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;
        info!("extracting with {} workers", workers);
        Ok(Self {
            documents,
            extractor,
            pool,
            batch_size: workers * BATCH_PER_WORKER,
            pending: Vec::new().into_iter(),
        })
    }
}

impl<I> Iterator for ParallelExtraction<I>
where
    I: Iterator<Item = Document>,
{
    type Item = Result<Article, ProcessError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(result) = self.pending.next() {
            return Some(result);
        }

        let batch: Vec<Document> = self.documents.by_ref().take(self.batch_size).collect();
        if batch.is_empty() {
            return None;
        }
        debug!("extracting a batch of {} documents", batch.len());

        // indexed parallel iterators collect in input order
        let extractor = &self.extractor;
        let results: Vec<_> = self.pool.install(|| {
            batch
                .into_par_iter()
                .map(|document| extractor.extract(document))
                .collect()
        });
        self.pending = results.into_iter();
        self.pending.next()
    }
}

/// Pick [Extraction] or [ParallelExtraction] depending on the number of workers.
pub fn extract<'a, I>(
    documents: I,
    extractor: Extractor,
    workers: usize,
) -> Result<Box<dyn Iterator<Item = Result<Article, ProcessError>> + 'a>, Error>
where
    I: Iterator<Item = Document> + 'a,
{
    if workers > 1 {
        Ok(Box::new(ParallelExtraction::new(
            documents, extractor, workers,
        )?))
    } else {
        Ok(Box::new(Extraction::new(documents, extractor)))
    }
}

/// Routes rejected documents to an [ErrorSink], yields articles.
///
/// A sink failure is yielded as an error, and should stop the run.
pub struct Articles<I, S> {
    results: I,
    sink: S,
    documents: usize,
    quarantined: usize,
}

impl<I, S> Articles<I, S>
where
    I: Iterator<Item = Result<Article, ProcessError>>,
    S: ErrorSink,
{
    pub fn new(results: I, sink: S) -> Self {
        Self {
            results,
            sink,
            documents: 0,
            quarantined: 0,
        }
    }

    /// Documents seen so far.
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Documents sent to the sink so far.
    pub fn quarantined(&self) -> usize {
        self.quarantined
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<I, S> Iterator for Articles<I, S>
where
    I: Iterator<Item = Result<Article, ProcessError>>,
    S: ErrorSink,
{
    type Item = Result<Article, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let result = self.results.next()?;
            self.documents += 1;
            match result {
                Ok(article) => return Some(Ok(article)),
                Err(rejected) => {
                    self.quarantined += 1;
                    if let Err(e) = self.sink.log(rejected) {
                        return Some(Err(e));
                    }
                }
            }
        }
    }
}
