/*! JATS document parsing.

The corpus is large and not uniformly well-formed, so parsing goes through three strategies,
stopping at the first one that produces a tree:

1. strict parsing of the raw text,
1. strict parsing after dropping the byte order mark and the xml declaration
   (the text is already decoded, so a declared encoding can only get in the way),
1. recovering parsing, that keeps unknown entities verbatim, ignores unmatched end tags
   and closes whatever is left open at the end of the document.

If none of them yields a root element, the document is rejected as `Bad XML`.
!*/
mod path;
mod tree;

use std::fmt;

use log::debug;

pub use path::Path;
pub use tree::{Element, Node};
use tree::{Mode, TreeBuilder};

/// Description used when a document can't be parsed at all.
pub const BAD_XML: &str = "Bad XML";

/// The document could not be turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    reason: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", BAD_XML, self.reason)
    }
}

impl std::error::Error for ParseError {}

/// Parse a raw document into its root [Element].
pub fn parse(raw: &str) -> Result<Element, ParseError> {
    let first = match TreeBuilder::new(Mode::Strict).build(raw) {
        Ok(root) => return Ok(root),
        Err(e) => e,
    };
    debug!("strict parsing failed: {}", first);

    if let Some(stripped) = strip_declaration(raw) {
        match TreeBuilder::new(Mode::Strict).build(stripped) {
            Ok(root) => return Ok(root),
            Err(e) => debug!("strict parsing without declaration failed: {}", e),
        }
    }

    TreeBuilder::new(Mode::Recover)
        .build(raw)
        .map_err(|reason| ParseError { reason })
}

/// Remove a leading BOM and xml declaration.
///
/// Returns [None] when there is nothing to remove.
fn strip_declaration(raw: &str) -> Option<&str> {
    let text = raw.trim_start_matches('\u{feff}').trim_start();
    let text = match text.strip_prefix("<?xml") {
        Some(rest) => {
            let end = rest.find("?>")?;
            &rest[end + 2..]
        }
        None => text,
    };

    if text.len() == raw.len() {
        None
    } else {
        Some(text)
    }
}
