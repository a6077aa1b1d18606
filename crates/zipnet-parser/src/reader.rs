use std::collections::HashMap;

use tracing::{debug, warn};

use crate::errors::ParserError;
use crate::model::{RawColumn, RawRecord};

#[derive(Debug, Clone, Copy)]
pub struct ReaderOptions {
    pub delimiter: u8,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl ReaderOptions {
    fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter);
        builder
    }
}

pub fn read_raw_records(content: &str) -> Result<Vec<RawRecord>, ParserError> {
    read_raw_records_with(content, ReaderOptions::default())
}

/// Decodes delimited text with a header row into one [`RawRecord`] per data row.
///
/// Rows shorter than the header read the trailing columns as empty strings; extra
/// trailing fields are dropped.
pub fn read_raw_records_with(
    content: &str,
    options: ReaderOptions,
) -> Result<Vec<RawRecord>, ParserError> {
    let mut reader = options.reader_builder().from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|source| ParserError::Csv {
            row_index: 0,
            source,
        })?
        .clone();

    let missing: Vec<&'static str> = RawColumn::ALL
        .iter()
        .filter(|column| !headers.iter().any(|header| header == column.header()))
        .map(RawColumn::header)
        .collect();
    if !headers.is_empty() && !missing.is_empty() {
        warn!(?missing, "input header is missing expected columns");
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|source| ParserError::Csv {
            row_index: idx + 1,
            source,
        })?;

        let fields: HashMap<String, String> = headers
            .iter()
            .enumerate()
            .map(|(col_idx, name)| {
                (
                    name.to_string(),
                    record.get(col_idx).unwrap_or_default().to_string(),
                )
            })
            .collect();
        rows.push(RawRecord::from_fields(fields));
    }

    debug!(rows = rows.len(), columns = headers.len(), "decoded raw records");
    Ok(rows)
}
