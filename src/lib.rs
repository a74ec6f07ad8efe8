/*!
# oas

Metadata and text extraction out of the PMC Open Access Subset.

- [sources] streams raw JATS documents out of tar bundles,
- [jats] parses them, recovering from malformed markup when possible,
- [extract] pulls named fields out of the parsed documents,
- [text] segments and lays out article text,
- [io] writes articles (CSV, rotated text or JSON Lines files) and logs rejected documents,
- [pipelines] ties everything together.
!*/
pub mod error;
pub mod extract;
pub mod io;
pub mod jats;
pub mod pipelines;
pub mod sources;
pub mod text;
