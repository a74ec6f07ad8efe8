//! Flat text layout of an article.
//!
//! ```text
//! --- <id> ---
//! --- <journal> ---
//! --- <title> ---
//!
//! first sentence of the first abstract paragraph
//! second sentence
//!
//! first sentence of the next paragraph (abstract, then body)
//! ```
use crate::extract::{Article, Field};

use super::Segmenter;

/// Can the article be part of the text corpus?
///
/// Articles without any abstract or body paragraph are dropped before writing.
pub fn is_usable(article: &Article) -> bool {
    [Field::Abstract, Field::Body].iter().any(|field| {
        article
            .paragraphs(*field)
            .map(|p| p.iter().any(|paragraph| !paragraph.trim().is_empty()))
            .unwrap_or(false)
    })
}

/// Render an article as lines (without line terminators).
///
/// Paragraphs that hold no sentence are skipped, absent sections produce nothing.
pub fn render(article: &Article, segmenter: &Segmenter) -> Vec<String> {
    let mut lines = Vec::new();
    for field in [Field::Id, Field::Journal, Field::Title] {
        lines.push(format!(
            "--- {} ---",
            article.text(field).unwrap_or_default()
        ));
    }
    lines.push(String::new());

    let mut first = true;
    for field in [Field::Abstract, Field::Body] {
        let paragraphs = match article.paragraphs(field) {
            Some(p) => p,
            None => continue,
        };
        for paragraph in paragraphs {
            let mut sentences = segmenter.sentences(paragraph).peekable();
            if sentences.peek().is_none() {
                continue;
            }
            if !first {
                lines.push(String::new());
            }
            first = false;
            lines.extend(sentences);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Value;

    fn article(abstract_: Option<Vec<&str>>, body: Option<Vec<&str>>) -> Article {
        let mut article = Article::new();
        article.insert(Field::Id, Value::Text("123".to_string()));
        article.insert(Field::Journal, Value::Text("Nature".to_string()));
        article.insert(Field::Title, Value::Text("A title".to_string()));
        let to_value = |p: Vec<&str>| Value::Paragraphs(p.into_iter().map(String::from).collect());
        if let Some(a) = abstract_ {
            article.insert(Field::Abstract, to_value(a));
        }
        if let Some(b) = body {
            article.insert(Field::Body, to_value(b));
        }
        article
    }

    #[test]
    fn layout() {
        let a = article(
            Some(vec!["Short abstract. Two sentences."]),
            Some(vec!["Body one.", "Body two. Really."]),
        );
        let lines = render(&a, &Segmenter::default());
        assert_eq!(
            lines,
            vec![
                "--- 123 ---",
                "--- Nature ---",
                "--- A title ---",
                "",
                "Short abstract.",
                "Two sentences.",
                "",
                "Body one.",
                "",
                "Body two.",
                "Really.",
            ]
        );
    }

    #[test]
    fn absent_section() {
        let a = article(None, Some(vec!["Only body."]));
        let lines = render(&a, &Segmenter::default());
        assert_eq!(lines[4..], ["Only body."]);
    }

    #[test]
    fn usable() {
        assert!(is_usable(&article(None, Some(vec!["x"]))));
        assert!(is_usable(&article(Some(vec!["x"]), None)));
        assert!(!is_usable(&article(None, None)));
        assert!(!is_usable(&article(Some(vec!["  "]), Some(vec![]))));
    }
}
