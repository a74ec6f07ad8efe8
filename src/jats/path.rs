//! Structural paths into a JATS tree.
//!
//! Supports the subset of ElementPath syntax the extractors use:
//! `./a/b`, `./a//b`, `.//b` and one `[@attr='value']` predicate per step.
use std::collections::HashSet;
use std::str::FromStr;

use super::tree::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    name: String,
    predicate: Option<(String, String)>,
}

impl Step {
    fn matches(&self, element: &Element) -> bool {
        if element.name() != self.name {
            return false;
        }
        match &self.predicate {
            Some((key, value)) => element.attribute(key) == Some(value.as_str()),
            None => true,
        }
    }

    /// Walks the children of `parent` in document order and keeps those reachable from a
    /// context element through this step.
    ///
    /// `below_context` is set when a strict ancestor of `parent` is a context element.
    fn collect<'a>(
        &self,
        parent: &'a Element,
        context: &HashSet<*const Element>,
        below_context: bool,
        out: &mut Vec<&'a Element>,
    ) {
        let parent_in_context = context.contains(&(parent as *const Element));
        let below = below_context || parent_in_context;
        let reachable = match self.axis {
            Axis::Child => parent_in_context,
            Axis::Descendant => below,
        };
        for child in parent.child_elements() {
            if reachable && self.matches(child) {
                out.push(child);
            }
            self.collect(child, context, below, out);
        }
    }
}

/// A compiled path, relative to the element it is applied on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    /// Every element matching the path, in document order, without duplicates.
    pub fn select<'a>(&self, root: &'a Element) -> Vec<&'a Element> {
        let mut context: HashSet<*const Element> = HashSet::new();
        context.insert(root as *const Element);
        let mut matches = Vec::new();
        for step in &self.steps {
            if context.is_empty() {
                return Vec::new();
            }
            matches = Vec::new();
            step.collect(root, &context, false, &mut matches);
            context = matches.iter().map(|e| *e as *const Element).collect();
        }
        matches
    }

    /// First matching element.
    pub fn find<'a>(&self, root: &'a Element) -> Option<&'a Element> {
        self.select(root).into_iter().next()
    }
}

impl FromStr for Path {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix('.')
            .ok_or_else(|| format!("path must be relative: {}", s))?;

        let mut steps = Vec::new();
        let mut rest = rest;
        while !rest.is_empty() {
            let (axis, tail) = if let Some(tail) = rest.strip_prefix("//") {
                (Axis::Descendant, tail)
            } else if let Some(tail) = rest.strip_prefix('/') {
                (Axis::Child, tail)
            } else {
                return Err(format!("expected '/' in {}", s));
            };

            let end = tail.find('/').unwrap_or(tail.len());
            let (raw_step, tail) = tail.split_at(end);
            steps.push(parse_step(axis, raw_step).ok_or_else(|| format!("bad step in {}", s))?);
            rest = tail;
        }

        if steps.is_empty() {
            return Err(format!("empty path: {}", s));
        }
        Ok(Self { steps })
    }
}

/// parses `name` or `name[@key='value']`.
fn parse_step(axis: Axis, raw: &str) -> Option<Step> {
    let (name, predicate) = match raw.find('[') {
        Some(open) => {
            let inner = raw[open..].strip_prefix("[@")?.strip_suffix(']')?;
            let (key, value) = inner.split_once('=')?;
            let value = value
                .strip_prefix('\'')
                .and_then(|v| v.strip_suffix('\''))
                .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))?;
            (&raw[..open], Some((key.to_string(), value.to_string())))
        }
        None => (raw, None),
    };

    if name.is_empty() {
        return None;
    }
    Some(Step {
        axis,
        name: name.to_string(),
        predicate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jats::tree::{Mode, TreeBuilder};

    fn tree(xml: &str) -> Element {
        TreeBuilder::new(Mode::Strict).build(xml).unwrap()
    }

    fn path(p: &str) -> Path {
        p.parse().unwrap()
    }

    #[test]
    fn child_steps() {
        let root = tree("<article><front><meta><t>x</t></meta></front><t>y</t></article>");
        let found = path("./front/meta/t").select(&root);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].itertext(), "x");
    }

    #[test]
    fn descendant_steps() {
        let root = tree("<r><body><sec><p>1</p><sec><p>2</p></sec></sec><p>3</p></body></r>");
        let texts: Vec<String> = path("./body//sec/p")
            .select(&root)
            .into_iter()
            .map(|e| e.itertext())
            .collect();
        assert_eq!(texts, vec!["1", "2"]);

        let direct: Vec<String> = path("./body/p")
            .select(&root)
            .into_iter()
            .map(|e| e.itertext())
            .collect();
        assert_eq!(direct, vec!["3"]);
    }

    #[test]
    fn nested_descendants_are_not_duplicated() {
        let root = tree("<r><sec><sec><p>a</p></sec></sec></r>");
        assert_eq!(path(".//sec//p").select(&root).len(), 1);
    }

    fn texts(p: &str, root: &Element) -> Vec<String> {
        path(p)
            .select(root)
            .into_iter()
            .map(|e| e.itertext())
            .collect()
    }

    #[test]
    fn nested_contexts_keep_document_order() {
        let root = tree(
            "<r><body><sec><p>1</p><sec><p>2</p><sec><p>3</p></sec></sec><p>4</p></sec>\
             <sec><p>5</p></sec></body></r>",
        );
        assert_eq!(texts("./body//sec/p", &root), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(texts(".//sec//p", &root), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(texts(".//sec/sec/p", &root), vec!["2", "3"]);
    }

    #[test]
    fn root_is_not_its_own_match() {
        let root = tree("<sec><sec><p>a</p></sec></sec>");
        assert_eq!(path(".//sec").select(&root).len(), 1);
        assert!(path("./sec/sec").find(&root).is_none());
    }

    #[test]
    fn predicates() {
        let root = tree(
            r#"<r><id type="doi">10.1/x</id><id type="pmc">123</id><id type="pmc">456</id></r>"#,
        );
        let pmc = path("./id[@type='pmc']").find(&root).unwrap();
        assert_eq!(pmc.text().as_deref(), Some("123"));
        assert_eq!(path(r#"./id[@type="doi"]"#).select(&root).len(), 1);
        assert!(path("./id[@type='pmid']").find(&root).is_none());
    }

    #[test]
    fn invalid_paths() {
        assert!("front/meta".parse::<Path>().is_err());
        assert!(".".parse::<Path>().is_err());
        assert!("./a[@b]".parse::<Path>().is_err());
        assert!("./a[b='c']".parse::<Path>().is_err());
    }
}
