//! In-process host backed by `RwLock`-guarded maps.

use super::{
    Access, Attachment, AttachmentId, Author, AuthorId, Capability, ContentId, ContentItem,
    ContentSource, ContentType, HostError, MetaStore, OptionStore, TypeRegistry,
};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

/// Permissions of the acting user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Actor {
    pub manage_options: bool,
    /// May edit every item.
    pub edit_all: bool,
    /// Items editable in addition to `edit_all`.
    pub editable: Vec<ContentId>,
}

/// Serializable snapshot of everything a [`MemoryHost`] holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteData {
    pub types: Vec<ContentType>,
    pub items: Vec<ContentItem>,
    pub authors: Vec<Author>,
    pub attachments: Vec<Attachment>,
    /// Per-item metadata keyed by item id, then meta key.
    pub meta: BTreeMap<ContentId, BTreeMap<String, String>>,
    pub options: BTreeMap<String, Value>,
    pub actor: Actor,
}

/// Thread-safe host storage.
#[derive(Debug)]
pub struct MemoryHost {
    types: RwLock<Vec<ContentType>>,
    items: RwLock<FxHashMap<ContentId, ContentItem>>,
    authors: RwLock<FxHashMap<AuthorId, Author>>,
    attachments: RwLock<FxHashMap<AttachmentId, Attachment>>,
    meta: RwLock<FxHashMap<ContentId, BTreeMap<String, String>>>,
    options: RwLock<BTreeMap<String, Value>>,
    actor: RwLock<Actor>,
    /// Outstanding tokens per action, oldest first.
    tokens: RwLock<FxHashMap<String, VecDeque<String>>>,
    token_counter: AtomicU64,
    token_key: [u8; 32],
    /// Keys the host refuses to write.
    #[cfg(test)]
    read_only: RwLock<rustc_hash::FxHashSet<String>>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::from_data(SiteData::default())
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: SiteData) -> Self {
        let SiteData {
            types,
            items,
            authors,
            attachments,
            meta,
            options,
            actor,
        } = data;

        Self {
            types: RwLock::new(types),
            items: RwLock::new(items.into_iter().map(|i| (i.id, i)).collect()),
            authors: RwLock::new(authors.into_iter().map(|a| (a.id, a)).collect()),
            attachments: RwLock::new(attachments.into_iter().map(|a| (a.id, a)).collect()),
            meta: RwLock::new(meta.into_iter().collect()),
            options: RwLock::new(options),
            actor: RwLock::new(actor),
            tokens: RwLock::new(FxHashMap::default()),
            token_counter: AtomicU64::new(0),
            token_key: token_key(),
            #[cfg(test)]
            read_only: RwLock::new(rustc_hash::FxHashSet::default()),
        }
    }

    /// Snapshot with items ordered by id.
    pub fn snapshot(&self) -> SiteData {
        let mut items: Vec<_> = self.items.read().values().cloned().collect();
        items.sort_by_key(|i| i.id);
        let mut authors: Vec<_> = self.authors.read().values().cloned().collect();
        authors.sort_by_key(|a| a.id);
        let mut attachments: Vec<_> = self.attachments.read().values().cloned().collect();
        attachments.sort_by_key(|a| a.id);

        SiteData {
            types: self.types.read().clone(),
            items,
            authors,
            attachments,
            meta: self
                .meta
                .read()
                .iter()
                .map(|(id, fields)| (*id, fields.clone()))
                .collect(),
            options: self.options.read().clone(),
            actor: self.actor.read().clone(),
        }
    }

    pub fn insert_item(&self, item: ContentItem) {
        self.items.write().insert(item.id, item);
    }

    pub fn insert_author(&self, author: Author) {
        self.authors.write().insert(author.id, author);
    }

    pub fn insert_attachment(&self, attachment: Attachment) {
        self.attachments.write().insert(attachment.id, attachment);
    }

    pub fn register_type(&self, content_type: ContentType) {
        let mut types = self.types.write();
        match types.iter_mut().find(|t| t.tag == content_type.tag) {
            Some(existing) => *existing = content_type,
            None => types.push(content_type),
        }
    }

    pub fn set_actor(&self, actor: Actor) {
        *self.actor.write() = actor;
    }

    /// Refuse future writes to `key`.
    #[cfg(test)]
    pub fn make_read_only(&self, key: &str) {
        self.read_only.write().insert(key.to_owned());
    }
}

/// Outstanding tokens kept per action; issuing more evicts the oldest.
pub const MAX_TOKENS_PER_ACTION: usize = 32;

/// Per-process key for token derivation.
fn token_key() -> [u8; 32] {
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let mut hasher = blake3::Hasher::new();
    hasher.update(&nanos.to_le_bytes());
    hasher.update(&std::process::id().to_le_bytes());
    *hasher.finalize().as_bytes()
}

impl ContentSource for MemoryHost {
    fn content(&self, id: ContentId) -> Option<ContentItem> {
        self.items.read().get(&id).cloned()
    }

    fn author(&self, id: AuthorId) -> Option<Author> {
        self.authors.read().get(&id).cloned()
    }

    fn attachment(&self, id: AttachmentId) -> Option<Attachment> {
        self.attachments.read().get(&id).cloned()
    }
}

impl MetaStore for MemoryHost {
    fn get_meta(&self, id: ContentId, key: &str) -> Option<String> {
        self.meta.read().get(&id).and_then(|m| m.get(key)).cloned()
    }

    fn set_meta(&self, id: ContentId, key: &str, value: &str) -> Result<(), HostError> {
        #[cfg(test)]
        {
            if self.read_only.read().contains(key) {
                return Err(HostError::ReadOnly { key: key.to_owned() });
            }
        }
        if !self.items.read().contains_key(&id) {
            return Err(HostError::UnknownItem(id));
        }
        self.meta
            .write()
            .entry(id)
            .or_default()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl OptionStore for MemoryHost {
    fn get_option(&self, name: &str) -> Option<Value> {
        self.options.read().get(name).cloned()
    }

    fn set_option(&self, name: &str, value: Value) -> Result<(), HostError> {
        self.options.write().insert(name.to_owned(), value);
        Ok(())
    }
}

impl TypeRegistry for MemoryHost {
    fn content_types(&self) -> Vec<ContentType> {
        self.types.read().clone()
    }
}

impl Access for MemoryHost {
    fn current_user_can(&self, capability: Capability) -> bool {
        let actor = self.actor.read();
        match capability {
            Capability::ManageOptions => actor.manage_options,
            Capability::EditItem(id) => actor.edit_all || actor.editable.contains(&id),
        }
    }

    fn issue_token(&self, action: &str) -> String {
        let n = self.token_counter.fetch_add(1, Ordering::Relaxed);
        let mut hasher = blake3::Hasher::new_keyed(&self.token_key);
        hasher.update(action.as_bytes());
        hasher.update(&n.to_le_bytes());
        let token = hex::encode(&hasher.finalize().as_bytes()[..10]);
        let mut tokens = self.tokens.write();
        let outstanding = tokens.entry(action.to_owned()).or_default();
        if outstanding.len() == MAX_TOKENS_PER_ACTION {
            outstanding.pop_front();
        }
        outstanding.push_back(token.clone());
        token
    }

    fn verify_token(&self, action: &str, token: &str) -> bool {
        let mut tokens = self.tokens.write();
        let Some(outstanding) = tokens.get_mut(action) else {
            return false;
        };
        let Some(pos) = outstanding.iter().position(|t| t == token) else {
            return false;
        };
        outstanding.remove(pos);
        if outstanding.is_empty() {
            tokens.remove(action);
        }
        true
    }
}
