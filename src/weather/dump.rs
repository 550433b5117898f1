//! Debug side channel: writes each raw forecast to disk, pretty-printed

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, warn};

use super::ResponseObserver;

/// Overwrites `path` with the latest provider payload. Failures are logged
/// and otherwise ignored.
#[derive(Debug, Clone)]
pub struct JsonDump {
    path: PathBuf,
}

impl JsonDump {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Pretty-printed with four-space indentation
fn render(payload: &Value) -> serde_json::Result<Vec<u8>> {
    let mut body = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut body, PrettyFormatter::with_indent(b"    "));
    payload.serialize(&mut serializer)?;
    Ok(body)
}

#[async_trait]
impl ResponseObserver for JsonDump {
    async fn observe(&self, payload: &Value) {
        let body = match render(payload) {
            Ok(body) => body,
            Err(e) => {
                warn!("Could not serialize forecast for debug dump: {}", e);
                return;
            }
        };

        match tokio::fs::write(&self.path, body).await {
            Ok(()) => debug!("Wrote raw forecast to {}", self.path.display()),
            Err(e) => warn!(
                "Could not write debug dump to {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}
