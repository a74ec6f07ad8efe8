//! Field extractors.
//!
//! Each [Field] knows where its value lives in a JATS document and how to normalize it.
//! Extraction is pure: no state is shared between fields or documents.
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;

use super::article::Value;
use crate::jats::{Element, Path};

/// Placeholder for contributors without a usable name.
pub const UNKNOWN_AUTHOR: &str = "???";

/// Separator for multi-valued textual fields.
const SEPARATOR: &str = ";";

struct Paths {
    id: Path,
    journal: Path,
    volume: Path,
    issue: Path,
    year: Path,
    category: Path,
    doi: Path,
    issn: Path,
    authors: Path,
    given_names: Path,
    surname: Path,
    title: Path,
    abstracts: Vec<Path>,
    bodies: Vec<Path>,
    references: Path,
}

fn compile(path: &str) -> Path {
    match path.parse() {
        Ok(p) => p,
        Err(e) => panic!("invalid static path {}: {}", path, e),
    }
}

lazy_static! {
    static ref PATHS: Paths = Paths {
        id: compile("./front/article-meta/article-id[@pub-id-type='pmc']"),
        journal: compile("./front/journal-meta//journal-title"),
        volume: compile("./front/article-meta/volume"),
        issue: compile("./front/article-meta/issue"),
        year: compile("./front/article-meta/pub-date/year"),
        category: compile("./front/article-meta/article-categories//subject"),
        doi: compile("./front/article-meta/article-id[@pub-id-type='doi']"),
        issn: compile("./front/journal-meta/issn"),
        authors: compile("./front/article-meta/contrib-group/contrib/name"),
        given_names: compile("./given-names"),
        surname: compile("./surname"),
        title: compile("./front/article-meta/title-group/article-title"),
        abstracts: vec![
            compile("./front/article-meta/abstract//p"),
            compile("./front/article-meta/trans-abstract//p"),
        ],
        bodies: vec![compile("./body//sec/p"), compile("./body/p")],
        references: compile("./back/ref-list/ref"),
    };
}

/// Named field of an article.
///
/// Ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Id,
    Journal,
    Volume,
    Issue,
    Year,
    Category,
    Doi,
    Issn,
    Authors,
    Title,
    Abstract,
    Body,
    References,
}

/// An extractor could not produce a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl std::error::Error for FieldError {}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Id,
        Field::Journal,
        Field::Volume,
        Field::Issue,
        Field::Year,
        Field::Category,
        Field::Doi,
        Field::Issn,
        Field::Authors,
        Field::Title,
        Field::Abstract,
        Field::Body,
        Field::References,
    ];

    /// Fields used to build the text corpus.
    pub const CONVERT: [Field; 5] = [
        Field::Id,
        Field::Journal,
        Field::Title,
        Field::Abstract,
        Field::Body,
    ];

    /// Fields of the metadata table, in column order.
    pub const METADATA: [Field; 11] = [
        Field::Id,
        Field::Doi,
        Field::Issn,
        Field::Journal,
        Field::Volume,
        Field::Issue,
        Field::Year,
        Field::Category,
        Field::References,
        Field::Title,
        Field::Authors,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Journal => "journal",
            Field::Volume => "volume",
            Field::Issue => "issue",
            Field::Year => "year",
            Field::Category => "category",
            Field::Doi => "doi",
            Field::Issn => "issn",
            Field::Authors => "authors",
            Field::Title => "title",
            Field::Abstract => "abstract",
            Field::Body => "body",
            Field::References => "references",
        }
    }

    /// Extract the field from a document root.
    ///
    /// `Ok(None)` means that nothing was found (or only blank text),
    /// an error means that something was found but could not be converted.
    pub fn extract(&self, root: &Element) -> Result<Option<Value>, FieldError> {
        let paths = &*PATHS;
        let value = match self {
            Field::Id => first_text(root, &paths.id).map(Value::Text),
            Field::Journal => first_text(root, &paths.journal).map(Value::Text),
            Field::Volume => first_text(root, &paths.volume).map(Value::Text),
            Field::Issue => first_text(root, &paths.issue).map(Value::Text),
            Field::Category => {
                let mut subjects: Vec<String> = Vec::new();
                for subject in all_texts(root, &paths.category) {
                    if !subjects.contains(&subject) {
                        subjects.push(subject);
                    }
                }
                non_empty(subjects.join(SEPARATOR)).map(Value::Text)
            }
            Field::Doi => joined(root, &paths.doi).map(Value::Text),
            Field::Issn => joined(root, &paths.issn).map(Value::Text),
            Field::Year => Some(Value::Int(self.year(root, &paths.year)?)),
            Field::Authors => {
                let names: Vec<String> = paths
                    .authors
                    .select(root)
                    .into_iter()
                    .map(|name| author_name(name, paths))
                    .collect();
                non_empty(names.join(SEPARATOR)).map(Value::Text)
            }
            Field::Title => {
                let title = paths
                    .title
                    .select(root)
                    .into_iter()
                    .map(|t| t.itertext())
                    .collect::<String>();
                non_empty(collapse_whitespace(&title)).map(Value::Text)
            }
            Field::Abstract => paragraphs(root, &paths.abstracts).map(Value::Paragraphs),
            Field::Body => paragraphs(root, &paths.bodies).map(Value::Paragraphs),
            Field::References => {
                let count = paths.references.select(root).len();
                Some(Value::Int(count as i64))
            }
        };
        Ok(value)
    }

    /// Earliest publication year.
    fn year(&self, root: &Element, path: &Path) -> Result<i64, FieldError> {
        let mut earliest: Option<i64> = None;
        for year in path.select(root) {
            let text = year.itertext();
            let text = text.trim();
            let year: i64 = text.parse().map_err(|_| FieldError {
                field: *self,
                reason: format!("not a year: {:?}", text),
            })?;
            earliest = Some(earliest.map_or(year, |e| e.min(year)));
        }
        earliest.ok_or_else(|| FieldError {
            field: *self,
            reason: String::from("no publication year"),
        })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .find(|f| f.name() == s)
            .copied()
            .ok_or_else(|| format!("unknown field: {}", s))
    }
}

/// trimmed, [None] if empty.
fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == text.len() {
        Some(text)
    } else {
        Some(trimmed.to_string())
    }
}

fn first_text(root: &Element, path: &Path) -> Option<String> {
    path.find(root)
        .and_then(|e| e.text())
        .and_then(non_empty)
}

fn all_texts(root: &Element, path: &Path) -> Vec<String> {
    path.select(root)
        .into_iter()
        .filter_map(|e| e.text().and_then(non_empty))
        .collect()
}

fn joined(root: &Element, path: &Path) -> Option<String> {
    non_empty(all_texts(root, path).join(SEPARATOR))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `given surname`, or [UNKNOWN_AUTHOR] when there is (nearly) nothing.
fn author_name(name: &Element, paths: &Paths) -> String {
    let part = |path: &Path| {
        path.find(name)
            .and_then(|e| e.text())
            .unwrap_or_default()
    };
    let full = format!("{} {}", part(&paths.given_names), part(&paths.surname));
    let full = full.trim();
    if full.chars().count() > 3 {
        full.to_string()
    } else {
        UNKNOWN_AUTHOR.to_string()
    }
}

/// Paragraphs from the first candidate path that matches anything.
fn paragraphs(root: &Element, candidates: &[Path]) -> Option<Vec<String>> {
    candidates
        .iter()
        .map(|path| path.select(root))
        .find(|nodes| !nodes.is_empty())
        .map(|nodes| nodes.into_iter().map(|p| p.itertext()).collect())
}
