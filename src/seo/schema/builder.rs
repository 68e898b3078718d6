//! Graph assembly for a single content item.

use super::node::{Article, Graph, IdRef, ImageObject, Node, Organization, Person, WebPage, WebSite};
use crate::config::SiteInfoConfig;
use crate::host::{ContentId, ContentItem, ContentSource, MetaStore};
use crate::seo::resolve::{MetaResolver, ResolvedMeta};

/// Content types that additionally get an `Article` node.
const ARTICLE_TYPES: &[&str] = &["post", "article"];

/// Stable node identifiers derived from the site and canonical URLs.
struct NodeIds {
    webpage: String,
    website: String,
    organization: String,
    article: String,
    primary_image: String,
    logo: String,
}

impl NodeIds {
    fn new(home: &str, canonical: &str) -> Self {
        Self {
            webpage: format!("{canonical}#webpage"),
            website: format!("{home}#website"),
            organization: format!("{home}#organization"),
            article: format!("{canonical}#article"),
            primary_image: format!("{canonical}#primaryimage"),
            logo: format!("{home}#logo"),
        }
    }
}

/// Builds the JSON-LD graph of a content item.
///
/// Nothing is cached: each [`build`](Self::build) re-reads the host.
pub struct SchemaBuilder<'a, H: ?Sized> {
    host: &'a H,
    site: &'a SiteInfoConfig,
    resolver: MetaResolver<'a, H>,
}

impl<'a, H: ContentSource + MetaStore + ?Sized> SchemaBuilder<'a, H> {
    pub fn new(host: &'a H, site: &'a SiteInfoConfig) -> Self {
        Self {
            host,
            site,
            resolver: MetaResolver::new(host),
        }
    }

    /// Graph for `id`, or `None` when the host does not know the item.
    pub fn build(&self, id: ContentId) -> Option<Graph> {
        let item = self.host.content(id)?;
        let home = self.site.home_url();
        let ids = NodeIds::new(&home, &item.url);
        let meta = self.resolver.resolve(&item);
        let image = self.primary_image(&item, &ids);

        let mut nodes = vec![
            Node::WebPage(self.web_page(&item, &meta, &ids, image.clone())),
            Node::WebSite(self.web_site(&home, &ids)),
            Node::Organization(self.organization(&home, &ids)),
        ];
        if ARTICLE_TYPES.contains(&item.kind.as_str()) {
            nodes.push(Node::Article(self.article(&item, meta, &ids, image)));
        }

        Some(Graph::new(nodes))
    }

    fn web_page(
        &self,
        item: &ContentItem,
        meta: &ResolvedMeta,
        ids: &NodeIds,
        image: Option<ImageObject>,
    ) -> WebPage {
        WebPage {
            id: ids.webpage.clone(),
            url: item.url.clone(),
            name: meta.title.clone(),
            description: meta.description.clone(),
            in_language: self.site.language.clone(),
            is_part_of: IdRef::new(&ids.website),
            date_published: item.published.to_iso8601(),
            date_modified: item.modified.to_iso8601(),
            primary_image_of_page: image.as_ref().map(|img| IdRef::new(&img.id)),
            image,
        }
    }

    fn web_site(&self, home: &str, ids: &NodeIds) -> WebSite {
        WebSite {
            id: ids.website.clone(),
            url: home.to_owned(),
            name: self.site.title.clone(),
            description: self.site.description.clone(),
            in_language: self.site.language.clone(),
            publisher: IdRef::new(&ids.organization),
        }
    }

    fn organization(&self, home: &str, ids: &NodeIds) -> Organization {
        let logo = self
            .site
            .logo
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(|url| ImageObject {
                id: ids.logo.clone(),
                url: url.to_owned(),
                content_url: url.to_owned(),
                width: None,
                height: None,
            });

        Organization {
            id: ids.organization.clone(),
            name: self.site.title.clone(),
            url: home.to_owned(),
            image: logo.as_ref().map(|_| IdRef::new(&ids.logo)),
            logo,
        }
    }

    fn article(
        &self,
        item: &ContentItem,
        meta: ResolvedMeta,
        ids: &NodeIds,
        image: Option<ImageObject>,
    ) -> Article {
        Article {
            id: ids.article.clone(),
            is_part_of: IdRef::new(&ids.webpage),
            author: self.author(item),
            headline: meta.title,
            date_published: item.published.to_iso8601(),
            date_modified: item.modified.to_iso8601(),
            comment_count: item.comment_count,
            publisher: IdRef::new(&ids.organization),
            description: meta.description,
            in_language: self.site.language.clone(),
            main_entity_of_page: IdRef::new(&ids.webpage),
            image,
        }
    }

    fn author(&self, item: &ContentItem) -> Option<Person> {
        let author = self.host.author(item.author?)?;
        Some(Person {
            id: format!("{}#person", author.url),
            name: author.name,
            url: author.url,
        })
    }

    /// Featured image, when set and resolvable to a non-empty URL.
    fn primary_image(&self, item: &ContentItem, ids: &NodeIds) -> Option<ImageObject> {
        let attachment = self.host.attachment(item.featured_image?)?;
        if attachment.url.is_empty() {
            return None;
        }
        let (width, height) = match (attachment.width, attachment.height) {
            (Some(w), Some(h)) => (Some(w), Some(h)),
            _ => (None, None),
        };
        Some(ImageObject {
            id: ids.primary_image.clone(),
            content_url: attachment.url.clone(),
            url: attachment.url,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fixtures::{self, ARTICLE, IMAGE, PAGE, POST};
    use crate::host::{Attachment, ContentId, MemoryHost, MetaStore};
    use crate::seo::meta::TITLE_KEY;
    use serde_json::Value;

    fn graph_json(host: &MemoryHost, site: &SiteInfoConfig, id: ContentId) -> Value {
        let graph = SchemaBuilder::new(host, site).build(id).unwrap();
        serde_json::to_value(graph).unwrap()
    }

    fn types(value: &Value) -> Vec<String> {
        value["@graph"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["@type"].as_str().unwrap().to_owned())
            .collect()
    }

    #[test]
    fn test_missing_item_builds_nothing() {
        let host = fixtures::host();
        let config = fixtures::config();
        assert!(SchemaBuilder::new(&host, &config.site).build(ContentId(999)).is_none());
    }

    #[test]
    fn test_node_order_for_post() {
        let host = fixtures::host();
        let config = fixtures::config();
        let value = graph_json(&host, &config.site, POST);
        assert_eq!(value["@context"], "https://schema.org");
        assert_eq!(types(&value), ["WebPage", "WebSite", "Organization", "Article"]);
    }

    #[test]
    fn test_page_has_no_article() {
        let host = fixtures::host();
        let config = fixtures::config();
        let value = graph_json(&host, &config.site, PAGE);
        assert_eq!(types(&value), ["WebPage", "WebSite", "Organization"]);
    }

    #[test]
    fn test_article_type_gets_article() {
        let host = fixtures::host();
        let config = fixtures::config();
        let value = graph_json(&host, &config.site, ARTICLE);
        assert_eq!(types(&value).last().map(String::as_str), Some("Article"));
    }

    #[test]
    fn test_image_shared_between_page_and_article() {
        let host = fixtures::host();
        let config = fixtures::config();
        let value = graph_json(&host, &config.site, POST);
        let page = &value["@graph"][0];
        let article = &value["@graph"][3];

        let id = "https://example.com/hello-world/#primaryimage";
        assert_eq!(page["primaryImageOfPage"]["@id"], id);
        assert_eq!(page["image"]["@id"], id);
        assert_eq!(article["image"]["@id"], id);
        assert_eq!(page["image"]["width"], 1200);
        assert_eq!(page["image"]["height"], 630);
        assert_eq!(page["image"]["contentUrl"], "https://example.com/uploads/hello.jpg");
    }

    #[test]
    fn test_image_dimensions_need_both() {
        let host = fixtures::host();
        host.insert_attachment(Attachment {
            id: IMAGE,
            url: "https://example.com/uploads/hello.jpg".into(),
            width: Some(800),
            height: None,
        });
        let config = fixtures::config();
        let image = &graph_json(&host, &config.site, POST)["@graph"][0]["image"];
        assert!(image.get("width").is_none());
        assert!(image.get("height").is_none());
    }

    #[test]
    fn test_no_image_without_featured() {
        let host = fixtures::host();
        let config = fixtures::config();
        let page = &graph_json(&host, &config.site, PAGE)["@graph"][0];
        assert!(page.get("image").is_none());
        assert!(page.get("primaryImageOfPage").is_none());
    }

    #[test]
    fn test_cross_references() {
        let host = fixtures::host();
        let config = fixtures::config();
        let value = graph_json(&host, &config.site, POST);
        let graph = &value["@graph"];

        assert_eq!(graph[0]["@id"], "https://example.com/hello-world/#webpage");
        assert_eq!(graph[0]["isPartOf"]["@id"], "https://example.com/#website");
        assert_eq!(graph[1]["@id"], "https://example.com/#website");
        assert_eq!(graph[1]["url"], "https://example.com/");
        assert_eq!(graph[1]["publisher"]["@id"], "https://example.com/#organization");
        assert_eq!(graph[2]["@id"], "https://example.com/#organization");
        assert_eq!(graph[3]["isPartOf"]["@id"], graph[0]["@id"]);
        assert_eq!(graph[3]["mainEntityOfPage"]["@id"], graph[0]["@id"]);
        assert_eq!(graph[3]["publisher"]["@id"], graph[2]["@id"]);
    }

    #[test]
    fn test_article_fields() {
        let host = fixtures::host();
        host.set_meta(POST, TITLE_KEY, "Custom Headline").unwrap();
        let config = fixtures::config();
        let article = graph_json(&host, &config.site, POST)["@graph"][3].clone();

        assert_eq!(article["headline"], "Custom Headline");
        assert_eq!(article["description"], "Hello world! Extra text...");
        assert_eq!(article["commentCount"], 3);
        assert_eq!(article["datePublished"], "2024-06-15T10:00:00+00:00");
        assert_eq!(article["dateModified"], "2024-06-16T12:30:00+00:00");
        assert_eq!(article["inLanguage"], "en-US");
        assert_eq!(article["author"]["@type"], "Person");
        assert_eq!(article["author"]["@id"], "https://example.com/author/jane/#person");
        assert_eq!(article["author"]["name"], "Jane Doe");
    }

    #[test]
    fn test_article_without_author() {
        let host = fixtures::host();
        let mut item = host.content(ARTICLE).unwrap();
        item.author = None;
        host.insert_item(item);
        let config = fixtures::config();
        let article = &graph_json(&host, &config.site, ARTICLE)["@graph"][3];
        assert!(article.get("author").is_none());
    }

    #[test]
    fn test_logo() {
        let host = fixtures::host();
        let mut config = fixtures::config();
        let org = &graph_json(&host, &config.site, PAGE)["@graph"][2];
        assert!(org.get("logo").is_none());
        assert!(org.get("image").is_none());

        config.site.logo = Some("https://example.com/logo.png".into());
        let org = &graph_json(&host, &config.site, PAGE)["@graph"][2];
        assert_eq!(org["logo"]["@type"], "ImageObject");
        assert_eq!(org["logo"]["@id"], "https://example.com/#logo");
        assert_eq!(org["logo"]["contentUrl"], "https://example.com/logo.png");
        assert_eq!(org["image"]["@id"], "https://example.com/#logo");
    }

    #[test]
    fn test_site_url_normalized() {
        let host = fixtures::host();
        let mut config = fixtures::config();
        config.site.url = "https://example.com///".into();
        let value = graph_json(&host, &config.site, PAGE);
        assert_eq!(value["@graph"][1]["@id"], "https://example.com/#website");
    }

    #[test]
    fn test_rebuild_is_identical() {
        let host = fixtures::host();
        let config = fixtures::config();
        let builder = SchemaBuilder::new(&host, &config.site);
        assert_eq!(builder.build(POST), builder.build(POST));
    }
}
