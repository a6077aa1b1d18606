use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("CSV error at row {row_index}: {source}")]
    Csv {
        row_index: usize,
        #[source]
        source: csv::Error,
    },
}
