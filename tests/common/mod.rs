//! Fixtures shared by integration tests.
#![allow(dead_code)]
use std::fs::File;
use std::path::{Path, PathBuf};

/// Build a JATS article.
///
/// `None` fields are left out of the document.
pub struct ArticleXml<'a> {
    pub id: Option<&'a str>,
    pub journal: Option<&'a str>,
    pub year: Option<&'a str>,
    pub title: Option<&'a str>,
    pub abstract_: Option<&'a str>,
    pub body: Vec<&'a str>,
}

impl<'a> ArticleXml<'a> {
    /// A complete article.
    pub fn complete(id: &'a str) -> Self {
        Self {
            id: Some(id),
            journal: Some("Journal of Tests"),
            year: Some("2019"),
            title: Some("A title"),
            abstract_: Some("An abstract. It has two sentences."),
            body: vec!["See Fig. 2 for details. The end."],
        }
    }

    pub fn render(&self) -> String {
        let tag = |name: &str, value: Option<&str>| {
            value
                .map(|v| format!("<{0}>{1}</{0}>", name, v))
                .unwrap_or_default()
        };
        let id = self
            .id
            .map(|id| format!("<article-id pub-id-type=\"pmc\">{}</article-id>", id))
            .unwrap_or_default();
        let journal = self
            .journal
            .map(|j| {
                format!(
                    "<journal-title-group><journal-title>{}</journal-title></journal-title-group>",
                    j
                )
            })
            .unwrap_or_default();
        let year = self
            .year
            .map(|y| format!("<pub-date><year>{}</year></pub-date>", y))
            .unwrap_or_default();
        let title = self
            .title
            .map(|t| format!("<title-group><article-title>{}</article-title></title-group>", t))
            .unwrap_or_default();
        let abstract_ = self
            .abstract_
            .map(|a| format!("<abstract><p>{}</p></abstract>", a))
            .unwrap_or_default();
        let body: String = self.body.iter().map(|p| tag("p", Some(p))).collect();

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <!DOCTYPE article PUBLIC \"-//NLM//DTD JATS (Z39.96) Journal Archiving and Interchange DTD v1.1 20151215//EN\" \"JATS-archivearticle1.dtd\">\n\
             <article><front>\
             <journal-meta>{journal}<issn pub-type=\"epub\">1234-5678</issn></journal-meta>\
             <article-meta>{id}<article-id pub-id-type=\"doi\">10.1/x</article-id>\
             <article-categories><subj-group><subject>Research</subject></subj-group></article-categories>\
             {title}\
             <contrib-group><contrib><name><surname>Doe</surname><given-names>Jane</given-names></name></contrib></contrib-group>\
             {year}<volume>1</volume><issue>2</issue>{abstract_}\
             </article-meta></front>\
             <body>{body}</body>\
             <back><ref-list><ref/><ref/></ref-list></back></article>",
        )
    }
}

/// Write a tar bundle holding the provided members.
pub fn bundle(dir: &Path, name: &str, members: &[(&str, String)]) -> PathBuf {
    let members: Vec<(&str, &[u8])> = members
        .iter()
        .map(|(member, content)| (*member, content.as_bytes()))
        .collect();
    raw_bundle(dir, name, &members)
}

/// Write a tar bundle holding members that may not be valid UTF-8.
pub fn raw_bundle(dir: &Path, name: &str, members: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    let mut builder = tar::Builder::new(File::create(&path).unwrap());
    for (member, content) in members {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, member, *content).unwrap();
    }
    builder.finish().unwrap();
    path
}

/// Files of a folder, sorted by name.
pub fn files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    files.sort();
    files
}
