//! Artifact file name templates.
//!
//! `{id}` is replaced by the rotation index, `{id:0N}` pads it with zeroes up to `N` digits,
//! `{name}` is replaced by the name of the source bundle.
use std::fmt::Write;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Index { width: usize },
    Name,
}

/// Parsed file name template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    segments: Vec<Segment>,
}

impl FilePattern {
    /// Does the pattern produce one series of files per source bundle?
    pub fn has_name(&self) -> bool {
        self.segments.iter().any(|s| *s == Segment::Name)
    }

    /// Build the file name of an artifact.
    pub fn format(&self, index: u64, name: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(l) => out.push_str(l),
                Segment::Index { width } => {
                    // writing into a String can't fail
                    let _ = write!(out, "{:0width$}", index, width = *width);
                }
                Segment::Name => out.push_str(name),
            }
        }
        out
    }
}

impl FromStr for FilePattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        let mut rest = s;
        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let close = rest[open..]
                .find('}')
                .map(|c| c + open)
                .ok_or_else(|| format!("unclosed placeholder in {:?}", s))?;
            let placeholder = &rest[open + 1..close];
            segments.push(match placeholder {
                "id" => Segment::Index { width: 0 },
                "name" => Segment::Name,
                p => match p.strip_prefix("id:0") {
                    Some(width) => Segment::Index {
                        width: width
                            .parse()
                            .map_err(|_| format!("bad index width in {:?}", s))?,
                    },
                    None => return Err(format!("unknown placeholder {{{}}} in {:?}", p, s)),
                },
            });
            rest = &rest[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        if !segments.iter().any(|s| matches!(s, Segment::Index { .. })) {
            return Err(format!("{:?} has no {{id}} placeholder", s));
        }
        if segments
            .iter()
            .any(|s| matches!(s, Segment::Literal(l) if l.contains('/') || l.contains('\\')))
        {
            return Err(format!("{:?} must be a file name, not a path", s));
        }
        Ok(Self { segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_index() {
        let p: FilePattern = "oas.{id:02}.txt".parse().unwrap();
        assert_eq!(p.format(0, "x"), "oas.00.txt");
        assert_eq!(p.format(7, "x"), "oas.07.txt");
        assert_eq!(p.format(123, "x"), "oas.123.txt");
        assert!(!p.has_name());
    }

    #[test]
    fn name_and_index() {
        let p: FilePattern = "{name}.{id}.txt".parse().unwrap();
        assert!(p.has_name());
        assert_eq!(p.format(3, "bundle"), "bundle.3.txt");
    }

    #[test]
    fn invalid() {
        assert!("oas.txt".parse::<FilePattern>().is_err());
        assert!("{name}.txt".parse::<FilePattern>().is_err());
        assert!("oas.{id".parse::<FilePattern>().is_err());
        assert!("oas.{idx}.txt".parse::<FilePattern>().is_err());
        assert!("oas.{id:0x}.txt".parse::<FilePattern>().is_err());
        assert!("dir/oas.{id}.txt".parse::<FilePattern>().is_err());
    }
}
