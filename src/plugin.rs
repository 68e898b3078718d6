//! Composition root.
//!
//! [`Plugin`] owns nothing but borrowed collaborators: the host and the site
//! configuration. [`Plugin::hooks`] wires its components into a dispatch
//! table for one surface.

use crate::config::SiteConfig;
use crate::hooks::{DEFAULT_PRIORITY, Hooks, admin, render};
use crate::host::Host;
use crate::seo::{MetaResolver, SchemaBuilder, SeoMeta, SettingsStore};
use crate::debug;
use serde_json::json;

/// Priority of the description tag: ahead of other head output.
const DESCRIPTION_PRIORITY: i32 = 1;

/// Which side of the host is rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Frontend,
    Admin,
}

pub struct Plugin<'h, H: ?Sized> {
    host: &'h H,
    meta: SeoMeta<'h, H>,
    resolver: MetaResolver<'h, H>,
    schema: SchemaBuilder<'h, H>,
    settings: SettingsStore<'h, H>,
}

impl<'h, H: Host + ?Sized> Plugin<'h, H> {
    pub fn new(host: &'h H, config: &'h SiteConfig) -> Self {
        Self {
            host,
            meta: SeoMeta::new(host),
            resolver: MetaResolver::new(host),
            schema: SchemaBuilder::new(host, &config.site),
            settings: SettingsStore::new(host),
        }
    }

    pub fn host(&self) -> &'h H {
        self.host
    }

    pub fn meta(&self) -> &SeoMeta<'h, H> {
        &self.meta
    }

    pub fn resolver(&self) -> &MetaResolver<'h, H> {
        &self.resolver
    }

    pub fn schema(&self) -> &SchemaBuilder<'h, H> {
        &self.schema
    }

    pub fn settings(&self) -> &SettingsStore<'h, H> {
        &self.settings
    }

    /// Dispatch table for `surface`.
    ///
    /// Title filters and the description tag are registered on both
    /// surfaces; the schema block only on the frontend; menu, settings,
    /// meta boxes and the save action only in the admin.
    pub fn hooks(&self, surface: Surface) -> Hooks<'_> {
        let mut hooks = Hooks::new();

        hooks.add_title_filter(DEFAULT_PRIORITY, move |ctx, title| {
            render::filter_title(&self.meta, ctx, title)
        });
        hooks.add_title_parts_filter(DEFAULT_PRIORITY, move |ctx, parts| {
            render::filter_title_parts(&self.meta, ctx, parts)
        });
        hooks.add_head_action(DESCRIPTION_PRIORITY, move |ctx, out| {
            render::write_description_tag(self.host, &self.resolver, ctx, out)
        });

        match surface {
            Surface::Frontend => {
                hooks.add_head_action(DEFAULT_PRIORITY, move |ctx, out| {
                    render::write_schema(&self.schema, ctx, out)
                });
            }
            Surface::Admin => self.register_admin(&mut hooks),
        }

        hooks
    }

    fn register_admin<'a>(&'a self, hooks: &mut Hooks<'a>) {
        for page in admin::menu_pages(move || admin::render_settings_page(self.host)) {
            hooks.add_menu_page(page);
        }

        hooks.register_setting(admin::settings_registration(move |raw| {
            json!({ "post_types": self.settings.sanitize(raw).post_types })
        }));

        let enabled = self.settings.load().post_types;
        debug!("settings"; "meta box on: {}", enabled.join(", "));
        for tag in enabled {
            hooks.add_meta_box(admin::meta_box(tag, move |id| {
                admin::render_meta_box(self.host, id)
            }));
        }

        hooks.add_save_action(DEFAULT_PRIORITY, move |request| {
            admin::save_meta_box(self.host, request)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{RenderContext, SaveOutcome, SaveRequest, Stage, TitleParts};
    use crate::host::fixtures::{self, PAGE, POST};
    use crate::host::{Access, ContentId, MetaStore, OptionStore};
    use crate::seo::meta::TITLE_KEY;
    use crate::seo::settings::OPTION_NAME;
    use serde_json::json;

    #[test]
    fn test_frontend_registrations() {
        let host = fixtures::host();
        let config = fixtures::config();
        let plugin = Plugin::new(&host, &config);
        let hooks = plugin.hooks(Surface::Frontend);

        assert_eq!(hooks.count(Stage::Title), 1);
        assert_eq!(hooks.count(Stage::DocumentTitleParts), 1);
        assert_eq!(hooks.count(Stage::Head), 2);
        assert_eq!(hooks.count(Stage::AdminMenu), 0);
        assert_eq!(hooks.count(Stage::AddMetaBoxes), 0);
        assert_eq!(hooks.count(Stage::SaveItem), 0);
    }

    #[test]
    fn test_admin_registrations() {
        let host = fixtures::host();
        let config = fixtures::config();
        let plugin = Plugin::new(&host, &config);
        let hooks = plugin.hooks(Surface::Admin);

        assert_eq!(hooks.count(Stage::Head), 1);
        assert_eq!(hooks.count(Stage::AdminMenu), 2);
        assert_eq!(hooks.count(Stage::AdminInit), 1);
        assert_eq!(hooks.count(Stage::SaveItem), 1);
        let screens: Vec<_> = hooks.meta_boxes().iter().map(|b| b.screen.as_str()).collect();
        assert_eq!(screens, ["post", "page"]);
    }

    #[test]
    fn test_frontend_head_order() {
        let host = fixtures::host();
        let config = fixtures::config();
        let plugin = Plugin::new(&host, &config);
        let head = plugin
            .hooks(Surface::Frontend)
            .render_head(&RenderContext::singular(POST));

        assert!(head.starts_with("<meta name=\"description\" content=\"Hello world! Extra text...\" />\n"));
        let schema_at = head.find("<!-- Octo SEO Schema -->").unwrap();
        assert!(schema_at > head.find("<meta").unwrap());
        assert!(head.contains("\"@type\": \"Article\""));
    }

    #[test]
    fn test_admin_head_has_no_schema() {
        let host = fixtures::host();
        let config = fixtures::config();
        let plugin = Plugin::new(&host, &config);
        let head = plugin
            .hooks(Surface::Admin)
            .render_head(&RenderContext::singular(POST));
        assert!(head.starts_with("<meta name=\"description\""));
        assert!(!head.contains("application/ld+json"));
    }

    #[test]
    fn test_title_hooks() {
        let host = fixtures::host();
        host.set_meta(PAGE, TITLE_KEY, "About Us | SEO").unwrap();
        let config = fixtures::config();
        let plugin = Plugin::new(&host, &config);
        let hooks = plugin.hooks(Surface::Frontend);
        let ctx = RenderContext::singular(PAGE);

        assert_eq!(hooks.filter_title(&ctx, "About".into()), "About Us | SEO");
        let parts = hooks.filter_title_parts(
            &ctx,
            TitleParts {
                title: "About".into(),
                ..TitleParts::default()
            },
        );
        assert_eq!(parts.title, "About Us | SEO");
    }

    #[test]
    fn test_admin_round_trip() {
        let host = fixtures::host();
        let config = fixtures::config();
        let plugin = Plugin::new(&host, &config);
        let hooks = plugin.hooks(Surface::Admin);

        let html = (hooks.meta_box_for("post").unwrap().render)(POST);
        assert!(html.contains("octo_seo_meta_box_nonce"));

        let request = SaveRequest {
            token: Some(host.issue_token(admin::NONCE_ACTION)),
            title: Some("Saved Title".into()),
            ..SaveRequest::new(POST)
        };
        let outcomes = hooks.save_item(&request);
        assert!(matches!(outcomes.as_slice(), [SaveOutcome::Saved(_)]));
        assert_eq!(plugin.meta().title_override(POST), "Saved Title");
    }

    #[test]
    fn test_settings_registration_sanitizes() {
        let host = fixtures::host();
        let config = fixtures::config();
        let plugin = Plugin::new(&host, &config);
        let hooks = plugin.hooks(Surface::Admin);

        let setting = hooks.setting(OPTION_NAME).unwrap();
        let clean = (setting.sanitize)(&json!({"post_types": ["page", "nope"]}));
        assert_eq!(clean, json!({"post_types": ["page"]}));
        assert_eq!(host.get_option(OPTION_NAME), None);
    }

    #[test]
    fn test_menu_renders_settings_page() {
        let host = fixtures::host();
        let config = fixtures::config();
        let plugin = Plugin::new(&host, &config);
        let hooks = plugin.hooks(Surface::Admin);
        let page = hooks.menu_page(admin::MENU_SLUG).unwrap();
        assert!((page.render)().contains("Enable SEO for:"));
    }

    #[test]
    fn test_meta_boxes_follow_settings() {
        let host = fixtures::host();
        host.set_option(OPTION_NAME, json!({"post_types": ["article"]}))
            .unwrap();
        let config = fixtures::config();
        let plugin = Plugin::new(&host, &config);
        let hooks = plugin.hooks(Surface::Admin);
        assert!(hooks.meta_box_for("post").is_none());
        assert!(hooks.meta_box_for("article").is_some());
    }

    #[test]
    fn test_unknown_item_renders_nothing() {
        let host = fixtures::host();
        let config = fixtures::config();
        let plugin = Plugin::new(&host, &config);
        let hooks = plugin.hooks(Surface::Frontend);
        assert_eq!(hooks.render_head(&RenderContext::singular(ContentId(99))), "");
    }
}
