//! Application state for API handlers

use crate::photos::PhotoStore;
use crate::storage::ReportStorage;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Storage backend
    pub storage: Arc<dyn ReportStorage>,

    /// Uploaded photo directory
    pub photos: Arc<PhotoStore>,

    /// Token that grants administrator access; `None` closes privileged routes
    pub admin_token: Option<Arc<str>>,

    /// Maximum request body size in bytes
    pub max_upload_bytes: usize,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        storage: Arc<dyn ReportStorage>,
        photos: Arc<PhotoStore>,
        admin_token: Option<String>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            storage,
            photos,
            admin_token: admin_token.filter(|t| !t.is_empty()).map(Arc::from),
            max_upload_bytes,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Get uptime as a human-readable string
    pub fn uptime(&self) -> String {
        let duration = chrono::Utc::now() - self.started_at;
        let secs = duration.num_seconds();

        if secs < 60 {
            format!("{}s", secs)
        } else if secs < 3600 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else if secs < 86400 {
            format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
        } else {
            format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
        }
    }
}
