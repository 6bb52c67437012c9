use std::path::PathBuf;

use crate::native::ParserError;

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("cannot read {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("JSON parse failed: {0}")]
    Native(#[from] ParserError),
}
