//! Shared test fixtures: a small site with a post, a page and an article.

use super::{
    Actor, Attachment, AttachmentId, Author, AuthorId, ContentId, ContentItem, ContentType,
    MemoryHost,
};
use crate::config::{SiteConfig, SiteInfoConfig};
use crate::utils::date::DateTimeUtc;

/// Post with author, featured image and comments.
pub const POST: ContentId = ContentId(1);
/// Page without featured image.
pub const PAGE: ContentId = ContentId(2);
/// Item of the custom `article` type, no featured image.
pub const ARTICLE: ContentId = ContentId(3);
/// Item whose type is registered but not public.
pub const REVISION: ContentId = ContentId(4);

pub const AUTHOR: AuthorId = AuthorId(10);
pub const IMAGE: AttachmentId = AttachmentId(20);

pub const POST_BODY: &str =
    "<p>Hello <b>world</b>! [shortcode]ignored[/shortcode] Extra text...";

pub fn item(id: ContentId, kind: &str, title: &str, slug: &str) -> ContentItem {
    ContentItem {
        id,
        title: title.into(),
        body: String::new(),
        published: DateTimeUtc::new(2024, 6, 15, 10, 0, 0),
        modified: DateTimeUtc::new(2024, 6, 16, 12, 30, 0),
        kind: kind.into(),
        author: Some(AUTHOR),
        url: format!("https://example.com/{slug}/"),
        featured_image: None,
        comment_count: 0,
    }
}

/// Host with public types `post`, `page`, `attachment`, `article`, an
/// actor allowed to do everything, and no stored overrides.
pub fn host() -> MemoryHost {
    let host = MemoryHost::new();

    host.register_type(ContentType::new("post", "Posts"));
    host.register_type(ContentType::new("page", "Pages"));
    host.register_type(ContentType::new("attachment", "Media"));
    host.register_type(ContentType::new("article", "Articles"));
    host.register_type(ContentType {
        public: false,
        ..ContentType::new("revision", "Revisions")
    });

    host.insert_item(ContentItem {
        body: POST_BODY.into(),
        featured_image: Some(IMAGE),
        comment_count: 3,
        ..item(POST, "post", "Hello World", "hello-world")
    });
    host.insert_item(ContentItem {
        body: "<p>About us.</p>".into(),
        ..item(PAGE, "page", "About", "about")
    });
    host.insert_item(ContentItem {
        body: "Long read.".into(),
        ..item(ARTICLE, "article", "Deep Dive", "deep-dive")
    });
    host.insert_item(item(REVISION, "revision", "Draft", "draft"));

    host.insert_author(Author {
        id: AUTHOR,
        name: "Jane Doe".into(),
        url: "https://example.com/author/jane/".into(),
    });
    host.insert_attachment(Attachment {
        id: IMAGE,
        url: "https://example.com/uploads/hello.jpg".into(),
        width: Some(1200),
        height: Some(630),
    });

    host.set_actor(Actor {
        manage_options: true,
        edit_all: true,
        editable: Vec::new(),
    });

    host
}

pub fn config() -> SiteConfig {
    SiteConfig {
        site: SiteInfoConfig {
            title: "Example Site".into(),
            description: "Just another site".into(),
            url: "https://example.com".into(),
            language: "en-US".into(),
            logo: None,
        },
        ..Default::default()
    }
}
