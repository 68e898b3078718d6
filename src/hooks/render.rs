//! Frontend callbacks: title filters and head markup.

use crate::host::{ContentId, ContentSource, MetaStore};
use crate::seo::{MetaResolver, SchemaBuilder, SeoMeta};
use crate::utils::html::escape_attr;
use crate::debug;

/// Marker written before the JSON-LD block.
pub const SCHEMA_COMMENT: &str = "<!-- Octo SEO Schema -->";

/// What is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderContext {
    /// Queried item, if any.
    pub item: Option<ContentId>,
    /// A single content item view, as opposed to an archive or listing.
    pub singular: bool,
}

impl RenderContext {
    pub fn singular(item: ContentId) -> Self {
        Self {
            item: Some(item),
            singular: true,
        }
    }

    pub fn archive() -> Self {
        Self::default()
    }

    /// The item of a singular view.
    pub fn singular_item(&self) -> Option<ContentId> {
        self.item.filter(|_| self.singular)
    }
}

/// Document title pieces joined by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TitleParts {
    pub title: String,
    pub page: Option<String>,
    pub tagline: Option<String>,
    pub site: Option<String>,
}

/// Replace `current` with the stored title override on singular views.
pub fn filter_title<M: MetaStore + ?Sized>(
    meta: &SeoMeta<'_, M>,
    ctx: &RenderContext,
    current: String,
) -> String {
    let Some(id) = ctx.singular_item() else {
        return current;
    };
    let title = meta.title_override(id);
    if title.is_empty() { current } else { title }
}

/// Same rule as [`filter_title`], applied to the `title` part.
pub fn filter_title_parts<M: MetaStore + ?Sized>(
    meta: &SeoMeta<'_, M>,
    ctx: &RenderContext,
    mut parts: TitleParts,
) -> TitleParts {
    parts.title = filter_title(meta, ctx, parts.title);
    parts
}

/// Write `<meta name="description">` with the resolved description.
pub fn write_description_tag<H: ContentSource + MetaStore + ?Sized>(
    host: &H,
    resolver: &MetaResolver<'_, H>,
    ctx: &RenderContext,
    out: &mut String,
) {
    let Some(item) = ctx.singular_item().and_then(|id| host.content(id)) else {
        return;
    };
    let description = resolver.description(&item);
    if description.is_empty() {
        return;
    }
    out.push_str("<meta name=\"description\" content=\"");
    out.push_str(&escape_attr(&description));
    out.push_str("\" />\n");
}

/// Write the JSON-LD `<script>` block of a singular view.
///
/// Nothing is written when the item cannot be resolved.
pub fn write_schema<H: ContentSource + MetaStore + ?Sized>(
    builder: &SchemaBuilder<'_, H>,
    ctx: &RenderContext,
    out: &mut String,
) {
    let Some(graph) = ctx.singular_item().and_then(|id| builder.build(id)) else {
        return;
    };
    let json = match graph.to_json_pretty() {
        Ok(json) => json,
        Err(e) => {
            debug!("schema"; "failed to serialize graph: {}", e);
            return;
        }
    };
    out.push('\n');
    out.push_str(SCHEMA_COMMENT);
    out.push_str("\n<script type=\"application/ld+json\">\n");
    // `</` would close the script element early
    out.push_str(&json.replace("</", "<\\/"));
    out.push_str("\n</script>\n");
}
