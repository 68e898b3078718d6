//! Effective title and description of a content item.

use super::description;
use super::meta::SeoMeta;
use crate::host::{ContentItem, MetaStore};

/// Title and description a page is rendered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMeta {
    pub title: String,
    pub description: String,
}

/// Override-or-default resolution. Re-reads the store on every call.
pub struct MetaResolver<'h, M: ?Sized> {
    meta: SeoMeta<'h, M>,
}

impl<'h, M: MetaStore + ?Sized> MetaResolver<'h, M> {
    pub fn new(store: &'h M) -> Self {
        Self {
            meta: SeoMeta::new(store),
        }
    }

    /// Stored title override if non-empty, else the item's own title.
    pub fn title(&self, item: &ContentItem) -> String {
        let title = self.meta.title_override(item.id);
        if title.is_empty() {
            item.title.clone()
        } else {
            title
        }
    }

    /// Stored description override if non-empty, else derived from the body.
    pub fn description(&self, item: &ContentItem) -> String {
        let description = self.meta.description_override(item.id);
        if description.is_empty() {
            description::derive(&item.body)
        } else {
            description
        }
    }

    pub fn resolve(&self, item: &ContentItem) -> ResolvedMeta {
        ResolvedMeta {
            title: self.title(item),
            description: self.description(item),
        }
    }
}
