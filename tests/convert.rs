mod common;

use std::path::Path;

use common::{bundle, files, ArticleXml};
use oas::pipelines::{Convert, ConvertSettings, Format, Pipeline, Policy};

const RENDERED_1: &str = "--- 1 ---
--- Journal of Tests ---
--- A title ---

An abstract.
It has two sentences.

See Fig. 2 for details.
The end.

";

fn run(settings: ConvertSettings) -> oas::pipelines::Summary {
    Convert::new(settings).unwrap().run().unwrap()
}

fn names(dir: &Path) -> Vec<String> {
    files(dir)
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test_log::test]
fn text_corpus() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();

    let mut no_text = ArticleXml::complete("3");
    no_text.abstract_ = None;
    no_text.body = vec![];
    bundle(
        src.path(),
        "bundle.tar",
        &[
            ("PMC1.xml", ArticleXml::complete("1").render()),
            ("PMC2.xml", "<article><front>".to_string()),
            ("PMC3.xml", no_text.render()),
        ],
    );

    let summary = run(ConvertSettings::new(src.path().into(), dst.path().into()));
    assert_eq!(summary.documents, 3);
    assert_eq!(summary.quarantined, 2);
    assert_eq!(summary.articles, 1);
    assert_eq!(names(dst.path()), vec!["oas.00.txt"]);

    let content = std::fs::read_to_string(dst.path().join("oas.00.txt")).unwrap();
    assert_eq!(content, RENDERED_1);
}

#[test]
fn rotation() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    bundle(
        src.path(),
        "bundle.tar",
        &[
            ("PMC1.xml", ArticleXml::complete("1").render()),
            ("PMC2.xml", ArticleXml::complete("2").render()),
            ("PMC3.xml", ArticleXml::complete("3").render()),
        ],
    );

    // each article is 10 lines, separator included
    let mut settings = ConvertSettings::new(src.path().into(), dst.path().into());
    settings.count = 20;
    settings.pattern = Some("part-{id}.txt".to_string());
    let summary = run(settings);

    assert_eq!(summary.artifacts.len(), 2);
    assert_eq!(names(dst.path()), vec!["part-0.txt", "part-1.txt"]);
    let first = std::fs::read_to_string(dst.path().join("part-0.txt")).unwrap();
    let second = std::fs::read_to_string(dst.path().join("part-1.txt")).unwrap();
    assert_eq!(first.lines().count(), 20);
    assert!(first.starts_with(RENDERED_1));
    assert!(second.starts_with("--- 3 ---\n"));
}

#[test]
fn one_series_per_bundle() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    bundle(
        src.path(),
        "first.tar",
        &[("PMC1.xml", ArticleXml::complete("1").render())],
    );
    bundle(
        src.path(),
        "second.tar",
        &[
            ("PMC2.xml", ArticleXml::complete("2").render()),
            ("PMC3.xml", ArticleXml::complete("3").render()),
        ],
    );

    let mut settings = ConvertSettings::new(src.path().into(), dst.path().into());
    settings.count = 10;
    settings.pattern = Some("{name}.{id:03}.txt".to_string());
    run(settings);

    assert_eq!(
        names(dst.path()),
        vec!["first.000.txt", "second.000.txt", "second.001.txt"]
    );
}

#[test]
fn jsonl_corpus() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    let mut no_journal = ArticleXml::complete("2");
    no_journal.journal = None;
    bundle(
        src.path(),
        "bundle.tar",
        &[
            ("PMC1.xml", ArticleXml::complete("1").render()),
            ("PMC2.xml", no_journal.render()),
        ],
    );

    let mut settings = ConvertSettings::new(src.path().into(), dst.path().into());
    settings.format = Format::Jsonl;
    settings.policy = Policy::Lenient;
    let summary = run(settings);
    assert_eq!(summary.articles, 2);
    assert_eq!(names(dst.path()), vec!["oas.00.jsonl"]);

    let content = std::fs::read_to_string(dst.path().join("oas.00.jsonl")).unwrap();
    let articles: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0]["id"], "1");
    assert_eq!(articles[0]["journal"], "Journal of Tests");
    assert_eq!(articles[0]["abstract"][0], "An abstract. It has two sentences.");
    assert!(articles[1].get("journal").is_none());

    // keys are sorted
    let first_line = content.lines().next().unwrap();
    assert!(first_line.starts_with("{\"abstract\":"));
}

#[test]
fn empty_source_creates_nothing() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    bundle(src.path(), "empty.tar", &[]);

    let summary = run(ConvertSettings::new(src.path().into(), dst.path().into()));
    assert_eq!(summary.documents, 0);
    assert!(summary.artifacts.is_empty());
    assert!(names(dst.path()).is_empty());
}

#[test]
fn workers_keep_order() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    let members: Vec<(String, String)> = (0..200)
        .map(|i| {
            let id = i.to_string();
            (format!("PMC{}.xml", id), ArticleXml::complete(&id).render())
        })
        .collect();
    let members: Vec<(&str, String)> = members
        .iter()
        .map(|(name, xml)| (name.as_str(), xml.clone()))
        .collect();
    bundle(src.path(), "bundle.tar", &members);

    let sequential = tempfile::tempdir().unwrap();
    run(ConvertSettings::new(src.path().into(), sequential.path().into()));

    let mut settings = ConvertSettings::new(src.path().into(), dst.path().into());
    settings.workers = 8;
    run(settings);

    let read = |dir: &Path| std::fs::read_to_string(dir.join("oas.00.txt")).unwrap();
    assert_eq!(read(sequential.path()), read(dst.path()));
}
