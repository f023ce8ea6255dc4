//! Location config passed to `get_file_location`.

use serde::{Deserialize, Serialize};
use url::Url;

/// Server-side settings a store uses to describe where a file is served from.
///
/// Stores are free to ignore it (a blob store may hand out its own URLs), but
/// the reference stores build `{mount}/files/{application_id}/{filename}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Public base URL the files endpoint is mounted under.
    pub mount: String,
    /// Application namespace inside the files endpoint.
    pub application_id: String,
}

impl LocationConfig {
    pub fn new(mount: impl Into<String>, application_id: impl Into<String>) -> Self {
        Self {
            mount: mount.into(),
            application_id: application_id.into(),
        }
    }

    /// Build the files-endpoint URL for `filename`.
    ///
    /// Path segments are percent-encoded. A mount that isn't a base URL is
    /// joined textually instead.
    pub fn file_url(&self, filename: &str) -> String {
        if let Ok(mut url) = Url::parse(&self.mount) {
            let pushed = match url.path_segments_mut() {
                Ok(mut segments) => {
                    segments
                        .pop_if_empty()
                        .extend(["files", self.application_id.as_str(), filename]);
                    true
                }
                Err(()) => false,
            };
            if pushed {
                return url.to_string();
            }
        }

        format!(
            "{}/files/{}/{}",
            self.mount.trim_end_matches('/'),
            self.application_id,
            filename
        )
    }
}
