//! `[site]` configuration.
//!
//! Site-wide values used by structured data: the WebSite and Organization
//! nodes, `inLanguage` on every node, and the `#website`/`#organization`
//! identifiers derived from the site URL.

use super::ConfigDiagnostics;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site name.
    pub title: String,

    /// Site tagline.
    pub description: String,

    /// Home URL (e.g., "https://example.com").
    pub url: String,

    /// Language tag (e.g., "en-US").
    pub language: String,

    /// Logo image URL for the Organization node.
    pub logo: Option<String>,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            url: String::new(),
            language: "en-US".into(),
            logo: None,
        }
    }
}

impl SiteInfoConfig {
    /// Home URL with exactly one trailing slash.
    pub fn home_url(&self) -> String {
        format!("{}/", self.url.trim_end_matches('/'))
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `url` is set, parses, uses http(s) and has a host
    /// - `logo`, when set, parses as a URL
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.url.is_empty() {
            diag.error_with_hint(
                "site.url",
                "site.url is not configured",
                "set site.url, e.g.: \"https://example.com\"",
            );
        } else {
            match url::Url::parse(&self.url) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            "site.url",
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            "site.url",
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        "site.url",
                        format!("invalid URL: {e}"),
                        "use format like https://example.com",
                    );
                }
            }
        }

        if let Some(logo) = &self.logo
            && let Err(e) = url::Url::parse(logo)
        {
            diag.error("site.logo", format!("invalid URL: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(url: &str) -> SiteInfoConfig {
        SiteInfoConfig {
            url: url.into(),
            ..Default::default()
        }
    }

    fn errors(config: &SiteInfoConfig) -> usize {
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        diag.errors().len()
    }

    #[test]
    fn test_home_url_single_trailing_slash() {
        assert_eq!(site("https://example.com").home_url(), "https://example.com/");
        assert_eq!(site("https://example.com//").home_url(), "https://example.com/");
        assert_eq!(
            site("https://example.com/blog").home_url(),
            "https://example.com/blog/"
        );
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(errors(&site("https://example.com")), 0);
    }

    #[test]
    fn test_validate_missing_url() {
        assert_eq!(errors(&site("")), 1);
    }

    #[test]
    fn test_validate_bad_scheme() {
        assert_eq!(errors(&site("ftp://example.com")), 1);
    }

    #[test]
    fn test_validate_unparseable() {
        assert_eq!(errors(&site("example.com")), 1);
    }

    #[test]
    fn test_validate_logo() {
        let config = SiteInfoConfig {
            logo: Some("not a url".into()),
            ..site("https://example.com")
        };
        assert_eq!(errors(&config), 1);
    }

    #[test]
    fn test_default_language() {
        assert_eq!(SiteInfoConfig::default().language, "en-US");
    }
}
