//! Rule based sentence segmentation.
//!
//! A word ending with `.`, `!` or `?` ends a sentence when the next word starts with an
//! uppercase letter or a digit, unless the word is a known abbreviation.
//! Trailing words are always returned as a last sentence, punctuated or not.
use std::collections::HashSet;

/// Words ending in a period that never end a sentence.
///
/// Matching is case insensitive (`Fig.` is covered by `fig.`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abbreviations {
    words: HashSet<String>,
}

impl Abbreviations {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}

impl Default for Abbreviations {
    fn default() -> Self {
        Self::new(["al.", "fig.", "i.e.", "e.g."])
    }
}

/// Splits paragraphs into sentences.
///
/// Built once and shared: it holds no mutable state.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    abbreviations: Abbreviations,
}

impl Segmenter {
    pub fn new(abbreviations: Abbreviations) -> Self {
        Self { abbreviations }
    }

    /// Lazily iterate over the sentences of a paragraph.
    pub fn sentences<'a>(&'a self, paragraph: &'a str) -> Sentences<'a> {
        Sentences {
            words: paragraph.split_whitespace().collect(),
            start: 0,
            abbreviations: &self.abbreviations,
        }
    }
}

/// Sentences of a paragraph, see [Segmenter::sentences].
pub struct Sentences<'a> {
    words: Vec<&'a str>,
    start: usize,
    abbreviations: &'a Abbreviations,
}

impl<'a> Sentences<'a> {
    fn is_boundary(&self, word: &str, next: &str) -> bool {
        let terminal = word.ends_with(['.', '!', '?']);
        let capitalized = next
            .chars()
            .next()
            .map(|c| c.is_uppercase() || c.is_ascii_digit())
            .unwrap_or(false);

        terminal && capitalized && !self.abbreviations.contains(word)
    }
}

impl<'a> Iterator for Sentences<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start >= self.words.len() {
            return None;
        }

        let last = self.words.len() - 1;
        let end = (self.start..last)
            .find(|&i| self.is_boundary(self.words[i], self.words[i + 1]))
            .unwrap_or(last);

        let sentence = self.words[self.start..=end].join(" ");
        self.start = end + 1;
        Some(sentence)
    }
}
