//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use oas::pipelines::{ConvertSettings, Format, MetadataSettings, Policy};

#[derive(Debug, StructOpt)]
#[structopt(name = "oas", about = "PMC Open Access Subset extraction tool.")]
/// Holds every command that is callable by the `oas` command.
pub enum Oas {
    #[structopt(about = "Extract article metadata into a CSV file")]
    Metadata(Metadata),
    #[structopt(about = "Convert articles into a text corpus")]
    Convert(Convert),
}

/// Metadata command and parameters.
///
/// ```sh
/// oas-metadata 0.2.0
/// Extract article metadata into a CSV file
///
/// USAGE:
///     oas metadata [FLAGS] [OPTIONS] <src> <dst>
///
/// FLAGS:
///     -h, --help       Prints help information
///         --lenient    keep articles with missing fields
///
/// OPTIONS:
///         --log <log>            folder for documents that could not be processed
///     -w, --workers <workers>    number of extraction workers [default: 1]
///
/// ARGS:
///     <src>    source folder (contains *.tar bundles)
///     <dst>    destination CSV file
/// ```
#[derive(Debug, StructOpt)]
pub struct Metadata {
    #[structopt(parse(from_os_str), help = "source folder (contains *.tar bundles)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination CSV file")]
    pub dst: PathBuf,
    #[structopt(flatten)]
    pub common: Common,
}

/// Convert command and parameters.
#[derive(Debug, StructOpt)]
pub struct Convert {
    #[structopt(parse(from_os_str), help = "source folder (contains *.tar bundles)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination folder")]
    pub dst: PathBuf,
    #[structopt(
        long = "count",
        short = "c",
        default_value = "100000",
        help = "maximum number of lines (text) or articles (jsonl) per file"
    )]
    pub count: u64,
    #[structopt(
        long = "pattern",
        short = "p",
        help = "file name pattern, with {id} or {id:0N} and an optional {name}. [default: oas.{id:02}.<format>]"
    )]
    pub pattern: Option<String>,
    #[structopt(
        long = "format",
        short = "f",
        default_value = "text",
        help = "output format (text, jsonl)"
    )]
    pub format: Format,
    #[structopt(flatten)]
    pub common: Common,
}

/// Parameters shared by every command.
#[derive(Debug, StructOpt)]
pub struct Common {
    #[structopt(
        parse(from_os_str),
        long = "log",
        help = "folder for documents that could not be processed"
    )]
    pub log: Option<PathBuf>,
    #[structopt(long = "lenient", help = "keep articles with missing fields")]
    pub lenient: bool,
    #[structopt(
        long = "workers",
        short = "w",
        default_value = "1",
        help = "number of extraction workers"
    )]
    pub workers: usize,
}

impl Common {
    fn policy(&self) -> Policy {
        if self.lenient {
            Policy::Lenient
        } else {
            Policy::Strict
        }
    }
}

impl From<Metadata> for MetadataSettings {
    fn from(m: Metadata) -> Self {
        MetadataSettings {
            src: m.src,
            dst: m.dst,
            policy: m.common.policy(),
            log: m.common.log,
            workers: m.common.workers,
        }
    }
}

impl From<Convert> for ConvertSettings {
    fn from(c: Convert) -> Self {
        ConvertSettings {
            src: c.src,
            dst: c.dst,
            count: c.count,
            pattern: c.pattern,
            format: c.format,
            policy: c.common.policy(),
            log: c.common.log,
            workers: c.common.workers,
        }
    }
}
