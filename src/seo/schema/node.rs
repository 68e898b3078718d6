//! schema.org node types.
//!
//! Every node serializes its struct name as `@type` followed by `@id`, then
//! its fields in declaration order. Optional fields are omitted when absent,
//! never written as `null`.

use serde::Serialize;

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Reference to another node of the same graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdRef {
    #[serde(rename = "@id")]
    pub id: String,
}

impl IdRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct WebPage {
    #[serde(rename = "@id")]
    pub id: String,
    pub url: String,
    pub name: String,
    pub description: String,
    pub in_language: String,
    pub is_part_of: IdRef,
    pub date_published: String,
    pub date_modified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_image_of_page: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct WebSite {
    #[serde(rename = "@id")]
    pub id: String,
    pub url: String,
    pub name: String,
    pub description: String,
    pub in_language: String,
    pub publisher: IdRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct Organization {
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<ImageObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<IdRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "@id")]
    pub id: String,
    pub is_part_of: IdRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Person>,
    pub headline: String,
    pub date_published: String,
    pub date_modified: String,
    pub comment_count: u32,
    pub publisher: IdRef,
    pub description: String,
    pub in_language: String,
    pub main_entity_of_page: IdRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type")]
pub struct Person {
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct ImageObject {
    #[serde(rename = "@id")]
    pub id: String,
    pub url: String,
    pub content_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Top-level member of `@graph`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    WebPage(WebPage),
    WebSite(WebSite),
    Organization(Organization),
    Article(Article),
}

/// A complete JSON-LD document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@graph")]
    pub nodes: Vec<Node>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            context: SCHEMA_CONTEXT,
            nodes,
        }
    }

    /// Pretty-print with four-space indentation.
    ///
    /// Slashes and non-ASCII characters are written as-is.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut buf = Vec::with_capacity(1024);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
