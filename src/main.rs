//! # oas
//!
//! Extraction pipeline for the PMC Open Access Subset.
//!
//! This project can be used both as a tool to build metadata tables or text corpora
//! out of the PMC bundles, or as a lib to integrate JATS extraction into other projects.
//!
//! ## Getting started
//!
//! ```sh
//! oas 0.2.0
//! PMC Open Access Subset extraction tool.
//!
//! USAGE:
//!     oas <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     convert     Convert articles into a text corpus
//!     help        Prints this message or the help of the given subcommand(s)
//!     metadata    Extract article metadata into a CSV file
//! ```
//!
//! Use `RUST_LOG=info` (or `debug`) to follow progress.
use oas::pipelines::{Convert, Metadata, Pipeline};
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), oas::error::Error> {
    env_logger::init();

    let opt = cli::Oas::from_args();
    debug!("cli args\n{:#?}", opt);

    let summary = match opt {
        cli::Oas::Metadata(m) => Metadata::new(m.into())?.run()?,
        cli::Oas::Convert(c) => Convert::new(c.into())?.run()?,
    };

    info!(
        "{} documents, {} articles written, {} rejected, {} file(s)",
        summary.documents,
        summary.articles,
        summary.quarantined,
        summary.artifacts.len()
    );
    Ok(())
}
