/*! Document sources.

A source yields [Document]s, raw XML text tagged with where it comes from.
The only source for now is [pmc::Documents], which streams documents out of the tar bundles
of the PMC Open Access Subset.
!*/
pub mod pmc;

use std::fmt;
use std::path::PathBuf;

/// Location of a document: the bundle it was read from and its member name.
///
/// An empty member name stands for the whole bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub archive: PathBuf,
    pub member: String,
}

impl Origin {
    pub fn new(archive: PathBuf, member: String) -> Self {
        Self { archive, member }
    }

    /// Bundle file name without its extension (`oa_comm_xml.PMC000xxxxxx` for
    /// `oa_comm_xml.PMC000xxxxxx.tar`).
    pub fn bundle_name(&self) -> String {
        self.archive
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.member.is_empty() {
            write!(f, "{}", self.archive.display())
        } else {
            write!(f, "{}:{}", self.archive.display(), self.member)
        }
    }
}

/// Raw document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub origin: Option<Origin>,
    /// Set when the source could not provide a usable document: `text` is then only a
    /// best-effort copy and the document is always rejected with this issue.
    pub unreadable: Option<String>,
}

impl Document {
    pub fn new(text: String, origin: Origin) -> Self {
        Self {
            text,
            origin: Some(origin),
            unreadable: None,
        }
    }

    pub fn unreadable(text: String, origin: Origin, issue: &str) -> Self {
        Self {
            text,
            origin: Some(origin),
            unreadable: Some(issue.to_string()),
        }
    }
}

/// Documents with no known origin, mostly for tests and library use.
impl From<String> for Document {
    fn from(text: String) -> Self {
        Self {
            text,
            origin: None,
            unreadable: None,
        }
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}
