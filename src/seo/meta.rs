//! Per-item SEO overrides on top of the host's key/value store.

use crate::host::{ContentId, HostError, MetaStore};
use crate::utils::html::sanitize_text;

/// Meta key of the title override.
pub const TITLE_KEY: &str = "_octo_seo_title";

/// Meta key of the description override.
pub const DESCRIPTION_KEY: &str = "_octo_seo_description";

/// Reads and writes the two override fields of a content item.
///
/// Unset fields read as the empty string. Writes are coerced to plain text
/// first, so storing the same input twice leaves the same state.
pub struct SeoMeta<'h, M: ?Sized> {
    store: &'h M,
}

impl<'h, M: MetaStore + ?Sized> SeoMeta<'h, M> {
    pub fn new(store: &'h M) -> Self {
        Self { store }
    }

    pub fn title_override(&self, id: ContentId) -> String {
        self.store.get_meta(id, TITLE_KEY).unwrap_or_default()
    }

    pub fn description_override(&self, id: ContentId) -> String {
        self.store.get_meta(id, DESCRIPTION_KEY).unwrap_or_default()
    }

    pub fn set_title_override(&self, id: ContentId, raw: &str) -> Result<(), HostError> {
        self.store.set_meta(id, TITLE_KEY, &sanitize_text(raw))
    }

    pub fn set_description_override(&self, id: ContentId, raw: &str) -> Result<(), HostError> {
        self.store.set_meta(id, DESCRIPTION_KEY, &sanitize_text(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::host::fixtures::{self, POST};

    #[test]
    fn test_unset_reads_empty() {
        let host = MemoryHost::new();
        let meta = SeoMeta::new(&host);
        assert_eq!(meta.title_override(ContentId(42)), "");
        assert_eq!(meta.description_override(ContentId(42)), "");
    }

    #[test]
    fn test_set_sanitizes() {
        let host = fixtures::host();
        let meta = SeoMeta::new(&host);
        meta.set_title_override(POST, "  <b>Bold</b>\ttitle\n").unwrap();
        meta.set_description_override(POST, "<script>x()</script>Plain")
            .unwrap();
        assert_eq!(meta.title_override(POST), "Bold title");
        assert_eq!(meta.description_override(POST), "Plain");
    }

    #[test]
    fn test_set_is_idempotent() {
        let host = fixtures::host();
        let meta = SeoMeta::new(&host);
        meta.set_title_override(POST, "Same").unwrap();
        let first = host.snapshot();
        meta.set_title_override(POST, "Same").unwrap();
        assert_eq!(host.snapshot(), first);
    }

    #[test]
    fn test_uses_fixed_keys() {
        let host = fixtures::host();
        let meta = SeoMeta::new(&host);
        meta.set_title_override(POST, "T").unwrap();
        meta.set_description_override(POST, "D").unwrap();
        assert_eq!(host.get_meta(POST, "_octo_seo_title").as_deref(), Some("T"));
        assert_eq!(
            host.get_meta(POST, "_octo_seo_description").as_deref(),
            Some("D")
        );
    }

    #[test]
    fn test_write_error_propagates() {
        let host = MemoryHost::new();
        let meta = SeoMeta::new(&host);
        assert!(meta.set_title_override(ContentId(9), "x").is_err());
    }
}
