use crate::result::Result;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs;

/// SHA-256 digest of a file's content as a lowercase hex string.
///
/// Used to fingerprint files when they are renamed, so that `undo` can
/// refuse to roll back a file whose content changed afterwards.
pub async fn sha256_file(path: &Path) -> Result<String> {
    let content = fs::read(path).await?;

    let mut hasher = Sha256::new();
    hasher.update(&content);

    Ok(format!("{:x}", hasher.finalize()))
}
