//! Host collaborators.
//!
//! The add-on never owns content: items, authors, attachments, per-item
//! metadata, options, the type registry and access control all belong to
//! the host system. Each concern is a small trait so components only ask
//! for what they use; [`Host`] bundles them for the composition root.
//!
//! # Module Structure
//!
//! ```text
//! host/
//! ├── memory.rs   # MemoryHost: RwLock-backed implementation
//! ├── file.rs     # SiteFile: site.json snapshot load/save
//! └── mod.rs      # traits and host-owned types (this file)
//! ```

mod file;
mod memory;

#[cfg(test)]
pub mod fixtures;

pub use file::SiteFile;
pub use memory::{Actor, MemoryHost, SiteData};

use crate::utils::date::DateTimeUtc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_type!(
    /// Content item identifier.
    ContentId
);
id_type!(
    /// Author identifier.
    AuthorId
);
id_type!(
    /// Media attachment identifier.
    AttachmentId
);

// ============================================================================
// Host-owned entities
// ============================================================================

/// A single addressable unit of published content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub title: String,
    /// Raw body markup, shortcodes included.
    #[serde(default)]
    pub body: String,
    pub published: DateTimeUtc,
    pub modified: DateTimeUtc,
    /// Content-type tag (`post`, `page`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub author: Option<AuthorId>,
    /// Canonical URL.
    pub url: String,
    #[serde(default)]
    pub featured_image: Option<AttachmentId>,
    #[serde(default)]
    pub comment_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    /// Display name.
    pub name: String,
    /// Author archive URL.
    pub url: String,
}

/// Stored media file. Dimensions are known only when the host recorded them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// A registered content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    pub tag: String,
    /// Plural display label.
    pub label: String,
    #[serde(default = "default_true")]
    pub public: bool,
}

impl ContentType {
    pub fn new(tag: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            label: label.into(),
            public: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Capabilities checked by the admin surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Change add-on settings.
    ManageOptions,
    /// Edit one content item.
    EditItem(ContentId),
}

impl Capability {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ManageOptions => "manage_options",
            Self::EditItem(_) => "edit_post",
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failures reported by host storage.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("content item {0} does not exist")]
    UnknownItem(ContentId),

    #[error("meta key `{key}` is read-only")]
    ReadOnly { key: String },

    #[error("IO error when accessing `{0}`")]
    Io(std::path::PathBuf, #[source] std::io::Error),

    #[error("site data is not valid JSON")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Traits
// ============================================================================

/// Lookup of host-owned entities.
pub trait ContentSource {
    fn content(&self, id: ContentId) -> Option<ContentItem>;
    fn author(&self, id: AuthorId) -> Option<Author>;
    fn attachment(&self, id: AttachmentId) -> Option<Attachment>;
}

/// Generic per-item key/value store.
pub trait MetaStore {
    fn get_meta(&self, id: ContentId, key: &str) -> Option<String>;
    fn set_meta(&self, id: ContentId, key: &str, value: &str) -> Result<(), HostError>;
}

/// Process-wide named options.
pub trait OptionStore {
    fn get_option(&self, name: &str) -> Option<Value>;
    fn set_option(&self, name: &str, value: Value) -> Result<(), HostError>;
}

/// Registered content types, in host order.
pub trait TypeRegistry {
    fn content_types(&self) -> Vec<ContentType>;

    /// Types the host exposes publicly.
    fn public_types(&self) -> Vec<ContentType> {
        self.content_types().into_iter().filter(|t| t.public).collect()
    }
}

/// Permission checks and one-time anti-forgery tokens for the current actor.
pub trait Access {
    fn current_user_can(&self, capability: Capability) -> bool;
    fn issue_token(&self, action: &str) -> String;
    /// Consumes the token: a second verification of the same value fails.
    fn verify_token(&self, action: &str, token: &str) -> bool;
}

/// Everything the add-on needs from its host.
pub trait Host: ContentSource + MetaStore + OptionStore + TypeRegistry + Access {}

impl<T> Host for T where T: ContentSource + MetaStore + OptionStore + TypeRegistry + Access + ?Sized {}
