//! `site.json` host snapshot.
//!
//! The CLI operates on a JSON document describing the host: registered
//! types, content items, authors, attachments, stored metadata, options and
//! the acting user. It is loaded into a [`MemoryHost`] and written back
//! after mutating commands.
//!
//! ```json
//! {
//!   "types": [{ "tag": "post", "label": "Posts" }],
//!   "items": [{ "id": 1, "title": "Hello", "type": "post", ... }],
//!   "meta": { "1": { "_octo_seo_title": "Custom" } },
//!   "options": { "octo_seo_settings": { "post_types": ["post"] } },
//!   "actor": { "manage_options": true, "edit_all": true }
//! }
//! ```

use super::{HostError, MemoryHost, SiteData};
use std::fs;
use std::path::{Path, PathBuf};

/// Location of a `site.json` snapshot.
#[derive(Debug, Clone)]
pub struct SiteFile {
    path: PathBuf,
}

impl SiteFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot into a fresh host.
    pub fn load(&self) -> Result<MemoryHost, HostError> {
        let content =
            fs::read_to_string(&self.path).map_err(|err| HostError::Io(self.path.clone(), err))?;
        let data: SiteData = serde_json::from_str(&content)?;
        Ok(MemoryHost::from_data(data))
    }

    /// Write the host state back, pretty-printed.
    pub fn save(&self, host: &MemoryHost) -> Result<(), HostError> {
        let mut json = serde_json::to_string_pretty(&host.snapshot())?;
        json.push('\n');
        fs::write(&self.path, json).map_err(|err| HostError::Io(self.path.clone(), err))
    }
}
