//! Text processing for corpus generation: sentence segmentation and article layout.
mod render;
mod segmenter;

pub use render::{is_usable, render};
pub use segmenter::{Abbreviations, Segmenter, Sentences};
