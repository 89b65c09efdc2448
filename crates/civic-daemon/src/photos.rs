//! Photo storage on the local filesystem

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Writes uploaded photos under a single directory
#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
}

impl PhotoStore {
    /// Use `dir`, creating it if needed
    pub async fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save `bytes` and return the stored file name
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> std::io::Result<String> {
        let name = stored_name(original_name, Utc::now());
        tokio::fs::write(self.dir.join(&name), bytes).await?;
        tracing::debug!(file = %name, size = bytes.len(), "Stored photo");
        Ok(name)
    }

    /// Delete a stored photo; a missing file is not an error
    pub async fn remove(&self, name: &str) -> std::io::Result<()> {
        match tokio::fs::remove_file(self.dir.join(name)).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// `<YYYYmmdd_HHMMSS>_<sanitized name>`
pub fn stored_name(original_name: &str, at: DateTime<Utc>) -> String {
    format!("{}_{}", at.format("%Y%m%d_%H%M%S"), sanitize_file_name(original_name))
}

/// Reduce a client-supplied file name to a safe basename.
///
/// Keeps ASCII letters, digits, `.`, `-` and `_`; whitespace becomes `_`.
/// Falls back to `photo.<ext>` when nothing usable is left.
pub fn sanitize_file_name(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);

    let cleaned: String = base
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');

    if cleaned.contains('.') {
        return cleaned.to_string();
    }

    let extension = base
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "jpg".to_string());
    format!("photo.{}", extension)
}
