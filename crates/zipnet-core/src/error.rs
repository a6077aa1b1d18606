// crates/zipnet-core/src/error.rs

use thiserror::Error;
use zipnet_parser::ParserError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Input decoding failed: {0}")]
    Parser(#[from] ParserError),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
