//! PMC Open Access Subset bundles.
//!
//! A bundle is a `.tar` file holding `PMC*.xml` members.
//! Bundles can be very large, so they are read once, sequentially, without seeking.
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, error, info, warn};

use super::{Document, Origin};
use crate::error::Error;
use crate::jats::BAD_XML;

/// Issue reported for a bundle that could not be read to the end.
pub const UNREADABLE_BUNDLE: &str = "Unreadable bundle";

/// Number of documents that can wait between the bundle reader and the consumer.
const PENDING_DOCUMENTS: usize = 16;

/// Is the path a bundle we should read?
///
/// Bundles whose name starts with `_` are excluded on purpose.
pub fn is_bundle(path: &Path) -> bool {
    let is_tar = path
        .extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("tar"))
        .unwrap_or(false);
    let excluded = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().starts_with('_'))
        .unwrap_or(true);

    path.is_file() && is_tar && !excluded
}

/// Is the archive member a JATS document?
pub fn is_document_member(name: &str) -> bool {
    let name = name.to_uppercase();
    name.starts_with("PMC") && name.ends_with(".XML")
}

/// List the bundles of a folder, in directory listing order.
///
/// Fails if the folder can't be read.
pub fn list_bundles(folder: &Path) -> Result<Vec<PathBuf>, Error> {
    let bundles = std::fs::read_dir(folder)?
        .filter_map(|entry| {
            entry.map_or_else(
                |e| {
                    error!("error reading source directory: {}", e);
                    None
                },
                Some,
            )
        })
        .map(|entry| entry.path())
        .filter(|path| is_bundle(path))
        .collect();
    Ok(bundles)
}

/// Single-pass iterator over every document of a set of bundles.
///
/// Bundles are read in the provided order, members in archive order.
/// Reading happens on a background thread that stays at most [PENDING_DOCUMENTS] ahead
/// of the consumer. Dropping the iterator stops the reader.
///
/// Members that are not valid UTF-8 and bundles that fail partway through are yielded as
/// unreadable documents (see [Document::unreadable()]), so that they get rejected like any
/// other bad document.
///
/// The iterator can't be restarted: build a new one to read the bundles again.
pub struct Documents {
    receiver: Receiver<Document>,
    reader: Option<JoinHandle<()>>,
}

impl Documents {
    /// Stream documents from the bundles of `folder`.
    pub fn from_folder(folder: &Path) -> Result<Self, Error> {
        let bundles = list_bundles(folder)?;
        info!("found {} bundle(s) in {:?}", bundles.len(), folder);
        Self::from_bundles(bundles)
    }

    /// Stream documents from a provided list of bundles.
    pub fn from_bundles(bundles: Vec<PathBuf>) -> Result<Self, Error> {
        let (sender, receiver) = bounded(PENDING_DOCUMENTS);
        let reader = thread::Builder::new()
            .name("bundle-reader".to_string())
            .spawn(move || read_bundles(bundles, sender))?;

        Ok(Self {
            receiver,
            reader: Some(reader),
        })
    }
}

impl Iterator for Documents {
    type Item = Document;

    fn next(&mut self) -> Option<Self::Item> {
        match self.receiver.recv() {
            Ok(document) => Some(document),
            Err(_) => {
                // sender is gone: every bundle has been read
                if let Some(reader) = self.reader.take() {
                    if reader.join().is_err() {
                        error!("bundle reader panicked");
                    }
                }
                None
            }
        }
    }
}

/// What happened to a bundle.
enum Outcome {
    Read(usize),
    Disconnected,
}

fn read_bundles(bundles: Vec<PathBuf>, sender: Sender<Document>) {
    for bundle in bundles {
        info!("reading bundle {:?}", bundle);
        match read_bundle(&bundle, &sender) {
            Ok(Outcome::Read(nb)) => debug!("{:?}: {} document(s)", bundle, nb),
            Ok(Outcome::Disconnected) => {
                debug!("consumer is gone, stopping at {:?}", bundle);
                return;
            }
            // a broken bundle shouldn't prevent reading the next ones
            Err(e) => {
                error!("could not read bundle {:?}: {}", bundle, e);
                let origin = Origin::new(bundle.clone(), String::new());
                let document = Document::unreadable(e.to_string(), origin, UNREADABLE_BUNDLE);
                if sender.send(document).is_err() {
                    return;
                }
            }
        }
    }
}

fn read_bundle(bundle: &Path, sender: &Sender<Document>) -> Result<Outcome, Error> {
    let file = File::open(bundle)?;
    let mut archive = tar::Archive::new(BufReader::new(file));
    let mut nb_documents = 0;

    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let member = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        if !is_document_member(&member) {
            continue;
        }

        let mut content = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut content)?;
        let origin = Origin::new(bundle.to_path_buf(), member);
        let document = match String::from_utf8(content) {
            Ok(text) => Document::new(text, origin),
            Err(e) => {
                warn!("{} is not valid UTF-8: {}", origin, e.utf8_error());
                let text = String::from_utf8_lossy(e.as_bytes()).into_owned();
                Document::unreadable(text, origin, BAD_XML)
            }
        };
        if sender.send(document).is_err() {
            return Ok(Outcome::Disconnected);
        }
        nb_documents += 1;
    }

    Ok(Outcome::Read(nb_documents))
}
