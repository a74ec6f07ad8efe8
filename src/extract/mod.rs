/*! Field extraction.

An [Article] is built by running a set of [Field] extractors on a parsed JATS tree.
The set of fields is a static choice of the caller: [Field::CONVERT] for corpus generation,
[Field::METADATA] for the metadata table.
!*/
mod article;
mod field;

pub use article::{Article, Value};
pub use field::{Field, FieldError, UNKNOWN_AUTHOR};
