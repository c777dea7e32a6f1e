use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

pub type DashResult<T> = Result<T, DashError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashError {
    #[error("Failed to load {}: {reason}", .path.display())]
    FileLoad { path: PathBuf, reason: String },

    #[error("Unknown imputation strategy: {0:?}")]
    InvalidStrategy(String),

    #[error("Unknown chart kind: {0:?}")]
    InvalidChartKind(String),

    #[error("No data between {start} and {end}")]
    DateRangeEmpty { start: NaiveDate, end: NaiveDate },

    #[error("Panel index out of range: {0} (expected 1..=4)")]
    InvalidPanel(usize),

    #[error("Malformed update request: {0}")]
    MalformedRequest(String),

    #[error("Chart {index}: {source}")]
    Panel {
        index: usize,
        #[source]
        source: Box<DashError>,
    },
}

impl DashError {
    /// Attach the panel index an error was raised for.
    pub fn in_panel(self, index: usize) -> Self {
        match self {
            already @ DashError::Panel { .. } => already,
            other => DashError::Panel {
                index,
                source: Box::new(other),
            },
        }
    }

    /// Panel this error belongs to, if any.
    pub fn panel(&self) -> Option<usize> {
        match self {
            DashError::Panel { index, .. } => Some(*index),
            _ => None,
        }
    }
}
