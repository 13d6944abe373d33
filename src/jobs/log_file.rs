//! Append-only job logs

use crate::core::error::JobError;
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Append `block` to the file at `path`, creating it if needed.
///
/// The block is handed to the OS as one append so entries from
/// overlapping runs never interleave mid-block.
pub async fn append(path: &Path, block: &str) -> Result<(), JobError> {
    let log_error = |source| JobError::Log {
        path: path.display().to_string(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(log_error)?;

    file.write_all(block.as_bytes()).await.map_err(log_error)?;
    file.flush().await.map_err(log_error)?;
    Ok(())
}
