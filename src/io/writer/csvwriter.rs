//! Metadata table writer.
use std::fs::File;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Error;
use crate::extract::{Article, Field};

use super::WriterTrait;

/// Writes one row per article into a single CSV file.
///
/// Every cell is quoted, the header holds the field names, missing fields are empty cells.
/// An existing file is overwritten.
pub struct CsvWriter {
    writer: csv::Writer<File>,
    fields: Vec<Field>,
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(dst: &Path, fields: &[Field]) -> Result<Self, Error> {
        info!("creating {:?}", dst);
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_path(dst)?;
        writer.write_record(fields.iter().map(|f| f.name()))?;

        Ok(Self {
            writer,
            fields: fields.to_vec(),
            path: dst.to_path_buf(),
        })
    }
}

impl WriterTrait for CsvWriter {
    fn write_single(&mut self, article: &Article) -> Result<(), Error> {
        let row = self.fields.iter().map(|field| {
            article
                .get(*field)
                .map(|value| value.to_cell())
                .unwrap_or_default()
        });
        self.writer.write_record(row)?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        Ok(self.writer.flush()?)
    }

    fn artifacts(&self) -> Vec<PathBuf> {
        vec![self.path.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Value;

    #[test]
    fn header_and_rows() {
        let dst = tempfile::tempdir().unwrap();
        let path = dst.path().join("meta.csv");
        std::fs::write(&path, "previous run").unwrap();

        let mut w = CsvWriter::new(&path, &[Field::Id, Field::Year, Field::Title]).unwrap();
        let mut article = Article::new();
        article.insert(Field::Id, Value::Text("42".to_string()));
        article.insert(Field::Year, Value::Int(2019));
        w.write_single(&article).unwrap();
        w.close().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec![r#""id","year","title""#, r#""42","2019","""#]);
    }

    #[test]
    fn header_only() {
        let dst = tempfile::tempdir().unwrap();
        let path = dst.path().join("meta.csv");
        let mut w = CsvWriter::new(&path, &Field::METADATA).unwrap();
        w.close().unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers.len(), 11);
        assert_eq!(headers[0], "id");
        assert_eq!(reader.records().count(), 0);
    }
}
