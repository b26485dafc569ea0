//! Error types for capture and analysis runs.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("engine step failed with status {code} at sample offset {offset}")]
    EngineStep { code: i32, offset: usize },
    #[error("engine error: {0}")]
    Engine(String),
    #[error("export error: {0}")]
    Export(String),
}
