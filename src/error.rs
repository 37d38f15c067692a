use std::path::PathBuf;
use thiserror::Error;

/// The main error type for voc2cls operations.
///
/// The pipeline only stops on input, layout and report errors. A
/// `VocXmlParse` for one annotation file is downgraded to a skip and
/// recorded in the [`RunReport`](crate::report::RunReport).
#[derive(Debug, Error)]
pub enum Voc2ClsError {
    #[error("Failed to read input directory {path}: {source}")]
    InputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse VOC XML from {path}: {message}")]
    VocXmlParse { path: PathBuf, message: String },

    #[error("Failed to create output directory {path}: {source}")]
    OutputLayout {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize run report: {0}")]
    ReportSerialize(#[from] serde_json::Error),
}
