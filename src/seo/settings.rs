//! Add-on settings: which content types get SEO support.

use crate::debug;
use crate::host::{ContentType, HostError, OptionStore, TypeRegistry};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Option name the settings record is persisted under.
pub const OPTION_NAME: &str = "octo_seo_settings";

/// Persisted settings record.
///
/// Keys missing from storage fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    /// Enabled content-type tags, in the order they were submitted.
    pub post_types: Vec<String>,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            post_types: vec!["post".into(), "page".into()],
        }
    }
}

impl PluginSettings {
    pub fn is_enabled(&self, tag: &str) -> bool {
        self.post_types.iter().any(|t| t == tag)
    }
}

/// Loads, sanitizes and persists [`PluginSettings`].
pub struct SettingsStore<'h, H: ?Sized> {
    host: &'h H,
}

impl<'h, H: OptionStore + TypeRegistry + ?Sized> SettingsStore<'h, H> {
    pub fn new(host: &'h H) -> Self {
        Self { host }
    }

    /// Persisted settings merged over the defaults.
    pub fn load(&self) -> PluginSettings {
        let Some(value) = self.host.get_option(OPTION_NAME) else {
            return PluginSettings::default();
        };
        serde_json::from_value(value).unwrap_or_else(|e| {
            debug!("settings"; "stored settings unreadable, using defaults: {}", e);
            PluginSettings::default()
        })
    }

    /// Keep only submitted tags the host currently registers as public.
    ///
    /// Input order is preserved; a missing or non-array `post_types`
    /// yields an empty list.
    pub fn sanitize(&self, raw: &Value) -> PluginSettings {
        let available = self.available_content_types();
        let post_types = raw
            .get("post_types")
            .and_then(Value::as_array)
            .map(|submitted| {
                submitted
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|tag| available.iter().any(|t| t.tag == *tag))
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        PluginSettings { post_types }
    }

    /// Sanitize `raw` and persist the result.
    pub fn save(&self, raw: &Value) -> Result<PluginSettings, HostError> {
        let settings = self.sanitize(raw);
        self.host
            .set_option(OPTION_NAME, serde_json::to_value(&settings)?)?;
        debug!("settings"; "enabled types: {}", settings.post_types.join(", "));
        Ok(settings)
    }

    /// Public content types, read from the host on every call.
    pub fn available_content_types(&self) -> Vec<ContentType> {
        self.host.public_types()
    }
}
