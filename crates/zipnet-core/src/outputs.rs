use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::enricher::EnrichedRecord;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// Writes records as delimited text. Dates render as `YYYY-MM-DD`, missing values as
/// empty fields, and fields are quoted only when they need to be. An empty slice
/// produces no output at all, header included.
pub fn write_csv<W: Write>(writer: W, records: &[EnrichedRecord], delimiter: u8) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    debug!(rows = records.len(), "wrote CSV output");
    Ok(())
}

/// Writes records as a pretty-printed JSON array; missing values become `null`.
pub fn write_json<W: Write>(mut writer: W, records: &[EnrichedRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;
    debug!(rows = records.len(), "wrote JSON output");
    Ok(())
}

pub fn write_records<W: Write>(
    writer: W,
    records: &[EnrichedRecord],
    format: OutputFormat,
    delimiter: u8,
) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(writer, records, delimiter),
        OutputFormat::Json => write_json(writer, records),
    }
}

pub fn to_csv_string(records: &[EnrichedRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records, b',')?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
