//! Admin surface: menu and settings registration, the per-item meta box and
//! the item-save pipeline.
//!
//! Every rejection is silent towards the user. [`SaveOutcome`] and
//! [`SettingsOutcome`] exist so callers can log what happened.

use crate::host::{Capability, ContentId, Host, HostError};
use crate::seo::description;
use crate::seo::settings::OPTION_NAME;
use crate::seo::{PluginSettings, SeoMeta, SettingsStore};
use crate::utils::html::{escape, escape_attr};
use crate::debug;
use serde_json::Value;
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

pub const MENU_SLUG: &str = "octo-seo-settings";
pub const MENU_TITLE: &str = "Octo SEO";
pub const SUBMENU_TITLE: &str = "Settings";
pub const MENU_ICON: &str = "dashicons-search";
pub const MENU_POSITION: u32 = 90;

pub const SETTINGS_SECTION: &str = "octo_seo_post_types_section";
pub const SETTINGS_FIELD: &str = "octo_seo_post_types";
/// Token action of the settings form.
pub const SETTINGS_NONCE_ACTION: &str = "octo-seo-settings-options";

pub const META_BOX_ID: &str = "octo_seo_meta_box";
pub const META_BOX_TITLE: &str = "Octo SEO";
pub const NONCE_ACTION: &str = "octo_seo_meta_box";
pub const NONCE_FIELD: &str = "octo_seo_meta_box_nonce";
pub const TITLE_FIELD: &str = "octo_seo_title";
pub const DESCRIPTION_FIELD: &str = "octo_seo_description";

// ============================================================================
// Registration records
// ============================================================================

/// Admin menu entry.
pub struct MenuPage<'a> {
    pub page_title: &'static str,
    pub menu_title: &'static str,
    pub capability: Capability,
    pub slug: &'static str,
    /// Parent slug of a submenu entry.
    pub parent: Option<&'static str>,
    pub icon: Option<&'static str>,
    pub position: Option<u32>,
    pub render: Box<dyn Fn() -> String + 'a>,
}

pub struct SettingsSection {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub struct SettingsField {
    pub id: &'static str,
    pub title: &'static str,
    pub section: &'static str,
}

/// Registered option with its sanitize callback and default value.
pub struct SettingsRegistration<'a> {
    pub group: &'static str,
    pub option: &'static str,
    /// Declared value type.
    pub kind: &'static str,
    pub default: Value,
    pub sanitize: Box<dyn Fn(&Value) -> Value + 'a>,
    pub section: SettingsSection,
    pub field: SettingsField,
}

/// Edit-screen box for one content type.
pub struct MetaBox<'a> {
    pub id: &'static str,
    pub title: &'static str,
    /// Content type whose edit screen shows the box.
    pub screen: String,
    pub context: &'static str,
    pub priority: &'static str,
    pub render: Box<dyn Fn(ContentId) -> String + 'a>,
}

pub fn menu_pages<'a>(render: impl Fn() -> String + Clone + 'a) -> [MenuPage<'a>; 2] {
    [
        MenuPage {
            page_title: MENU_TITLE,
            menu_title: MENU_TITLE,
            capability: Capability::ManageOptions,
            slug: MENU_SLUG,
            parent: None,
            icon: Some(MENU_ICON),
            position: Some(MENU_POSITION),
            render: Box::new(render.clone()),
        },
        // same slug as the parent, so the top entry is not listed twice
        MenuPage {
            page_title: SUBMENU_TITLE,
            menu_title: SUBMENU_TITLE,
            capability: Capability::ManageOptions,
            slug: MENU_SLUG,
            parent: Some(MENU_SLUG),
            icon: None,
            position: None,
            render: Box::new(render),
        },
    ]
}

pub fn settings_registration<'a>(
    sanitize: impl Fn(&Value) -> Value + 'a,
) -> SettingsRegistration<'a> {
    SettingsRegistration {
        group: MENU_SLUG,
        option: OPTION_NAME,
        kind: "array",
        default: serde_json::json!({ "post_types": PluginSettings::default().post_types }),
        sanitize: Box::new(sanitize),
        section: SettingsSection {
            id: SETTINGS_SECTION,
            title: "Post Types",
            description: "Select which post types should have SEO options.",
        },
        field: SettingsField {
            id: SETTINGS_FIELD,
            title: "Enable SEO for:",
            section: SETTINGS_SECTION,
        },
    }
}

pub fn meta_box<'a>(
    screen: impl Into<String>,
    render: impl Fn(ContentId) -> String + 'a,
) -> MetaBox<'a> {
    MetaBox {
        id: META_BOX_ID,
        title: META_BOX_TITLE,
        screen: screen.into(),
        context: "normal",
        priority: "high",
        render: Box::new(render),
    }
}

// ============================================================================
// Save pipeline
// ============================================================================

/// Form submission of the meta box, as received on item save.
///
/// `None` fields were not part of the submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub item: ContentId,
    pub token: Option<String>,
    pub autosave: bool,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl SaveRequest {
    pub fn new(item: ContentId) -> Self {
        Self {
            item,
            token: None,
            autosave: false,
            title: None,
            description: None,
        }
    }
}

/// Why a submission wrote nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingToken,
    InvalidToken,
    Autosave,
    TypeNotEnabled,
    PermissionDenied,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingToken => "no anti-forgery token",
            Self::InvalidToken => "invalid anti-forgery token",
            Self::Autosave => "autosave",
            Self::TypeNotEnabled => "content type not enabled",
            Self::PermissionDenied => "permission denied",
        })
    }
}

/// Fields actually written by an accepted submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SavedFields {
    pub title: bool,
    pub description: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Rejected(Rejection),
    Saved(SavedFields),
}

impl fmt::Display for SaveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(reason) => write!(f, "rejected ({reason})"),
            Self::Saved(SavedFields { title, description }) => {
                write!(f, "saved (title: {title}, description: {description})")
            }
        }
    }
}

/// Store the submitted overrides of one item.
///
/// Guards run in order and the first failing one rejects the whole
/// submission. Fields are then written one at a time; a failed write is
/// logged and does not undo the other field.
pub fn save_meta_box<H: Host + ?Sized>(host: &H, request: &SaveRequest) -> SaveOutcome {
    if let Err(reason) = check_save(host, request) {
        return SaveOutcome::Rejected(reason);
    }

    let meta = SeoMeta::new(host);
    let mut saved = SavedFields::default();

    if let Some(title) = &request.title {
        match meta.set_title_override(request.item, title) {
            Ok(()) => saved.title = true,
            Err(e) => debug!("save"; "title of item {} not written: {}", request.item, e),
        }
    }
    if let Some(description) = &request.description {
        match meta.set_description_override(request.item, description) {
            Ok(()) => saved.description = true,
            Err(e) => debug!("save"; "description of item {} not written: {}", request.item, e),
        }
    }

    SaveOutcome::Saved(saved)
}

fn check_save<H: Host + ?Sized>(host: &H, request: &SaveRequest) -> Result<(), Rejection> {
    let token = request.token.as_deref().ok_or(Rejection::MissingToken)?;
    if !host.verify_token(NONCE_ACTION, token) {
        return Err(Rejection::InvalidToken);
    }
    if request.autosave {
        return Err(Rejection::Autosave);
    }

    let settings = SettingsStore::new(host).load();
    let enabled = host
        .content(request.item)
        .is_some_and(|item| settings.is_enabled(&item.kind));
    if !enabled {
        return Err(Rejection::TypeNotEnabled);
    }

    if !host.current_user_can(Capability::EditItem(request.item)) {
        return Err(Rejection::PermissionDenied);
    }
    Ok(())
}

// ============================================================================
// Settings form
// ============================================================================

/// Submission of the settings form.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsSubmission {
    pub token: Option<String>,
    /// Raw `octo_seo_settings` value, e.g. `{"post_types": [...]}`.
    pub input: Value,
}

#[derive(Debug)]
pub enum SettingsOutcome {
    Rejected(Rejection),
    Saved(PluginSettings),
    WriteFailed(HostError),
}

impl fmt::Display for SettingsOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(reason) => write!(f, "rejected ({reason})"),
            Self::Saved(settings) => write!(f, "saved ({})", settings.post_types.join(", ")),
            Self::WriteFailed(e) => write!(f, "not written ({e})"),
        }
    }
}

/// Sanitize and store a settings form submission.
pub fn submit_settings<H: Host + ?Sized>(
    host: &H,
    submission: &SettingsSubmission,
) -> SettingsOutcome {
    let Some(token) = submission.token.as_deref() else {
        return SettingsOutcome::Rejected(Rejection::MissingToken);
    };
    if !host.verify_token(SETTINGS_NONCE_ACTION, token) {
        return SettingsOutcome::Rejected(Rejection::InvalidToken);
    }
    if !host.current_user_can(Capability::ManageOptions) {
        return SettingsOutcome::Rejected(Rejection::PermissionDenied);
    }
    match SettingsStore::new(host).save(&submission.input) {
        Ok(settings) => SettingsOutcome::Saved(settings),
        Err(e) => SettingsOutcome::WriteFailed(e),
    }
}

// ============================================================================
// Markup
// ============================================================================

/// Settings page; empty for actors without `manage_options`.
pub fn render_settings_page<H: Host + ?Sized>(host: &H) -> String {
    if !host.current_user_can(Capability::ManageOptions) {
        return String::new();
    }

    let store = SettingsStore::new(host);
    let settings = store.load();
    let token = host.issue_token(SETTINGS_NONCE_ACTION);

    let mut html = String::with_capacity(2048);
    html.push_str("<div class=\"wrap\">\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape(MENU_TITLE)));
    html.push_str("<form action=\"options.php\" method=\"post\">\n");
    html.push_str(&format!(
        "<input type=\"hidden\" name=\"option_page\" value=\"{MENU_SLUG}\" />\n"
    ));
    html.push_str("<input type=\"hidden\" name=\"action\" value=\"update\" />\n");
    html.push_str(&format!(
        "<input type=\"hidden\" id=\"_wpnonce\" name=\"_wpnonce\" value=\"{}\" />\n",
        escape_attr(&token)
    ));
    html.push_str("<h2>Post Types</h2>\n");
    html.push_str("<p>Select which post types should have SEO options.</p>\n");
    html.push_str("<table class=\"form-table\" role=\"presentation\">\n");
    html.push_str("<tr><th scope=\"row\">Enable SEO for:</th><td>\n");
    for content_type in store.available_content_types() {
        let checked = if settings.is_enabled(&content_type.tag) {
            " checked='checked'"
        } else {
            ""
        };
        html.push_str(&format!(
            "<label style=\"display: block; margin-bottom: 5px;\">\
             <input type=\"checkbox\" name=\"{OPTION_NAME}[post_types][]\" value=\"{}\"{checked}> {}\
             </label>\n",
            escape_attr(&content_type.tag),
            escape(&content_type.label),
        ));
    }
    html.push_str("</td></tr>\n</table>\n");
    html.push_str(
        "<p class=\"submit\"><input type=\"submit\" name=\"submit\" id=\"submit\" \
         class=\"button button-primary\" value=\"Save Changes\" /></p>\n",
    );
    html.push_str("</form>\n</div>\n");
    html
}

/// Meta box of one item: token field, both override inputs and the
/// defaults they fall back to. Empty when the item does not exist.
pub fn render_meta_box<H: Host + ?Sized>(host: &H, id: ContentId) -> String {
    let Some(item) = host.content(id) else {
        return String::new();
    };
    let meta = SeoMeta::new(host);
    let token = host.issue_token(NONCE_ACTION);
    let default_description = description::derive(&item.body);

    format!(
        r#"<input type="hidden" id="{NONCE_FIELD}" name="{NONCE_FIELD}" value="{token}" />
<div class="octo-seo-meta-box">
    <div class="octo-seo-field">
        <label for="{TITLE_FIELD}">SEO Title</label>
        <input type="text" id="{TITLE_FIELD}" name="{TITLE_FIELD}" value="{title}" class="large-text" />
        <p class="description">
            Enter a custom SEO title. Leave blank to use the default post title.
            <br>
            <strong>Default:</strong> {default_title}
        </p>
    </div>
    <div class="octo-seo-field">
        <label for="{DESCRIPTION_FIELD}">Meta Description</label>
        <textarea id="{DESCRIPTION_FIELD}" name="{DESCRIPTION_FIELD}" rows="3" class="large-text">{description}</textarea>
        <p class="description">
            Enter a meta description. Leave blank to use an excerpt from the content.
            <br>
            <strong>Default:</strong> {default_description}
        </p>
    </div>
</div>
"#,
        token = escape_attr(&token),
        title = escape_attr(&meta.title_override(id)),
        default_title = escape(&item.title),
        description = escape(&meta.description_override(id)),
        default_description = escape(&default_description),
    )
}
