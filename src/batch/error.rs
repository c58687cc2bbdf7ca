use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems with the input table
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read input file {}: {source}", path.display())]
    Unreadable { path: PathBuf, source: io::Error },
    #[error("input is missing required column {column:?}")]
    MissingColumn { column: &'static str },
    #[error("malformed input at line {line}: {source}")]
    Malformed { line: u64, source: csv::Error },
}

/// Fatal problems writing the result document
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write output file {}: {source}", path.display())]
    NotWritable { path: PathBuf, source: io::Error },
    #[error("failed to serialize result document: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Output(#[from] OutputError),
}
