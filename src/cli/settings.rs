//! `settings` and `types` commands.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;

use crate::hooks::admin::{self, SettingsOutcome, SettingsSubmission};
use crate::host::Host;
use crate::log;
use crate::plugin::Plugin;

pub fn run_show<H: Host + ?Sized>(plugin: &Plugin<'_, H>) -> Result<()> {
    for tag in plugin.settings().load().post_types {
        println!("{tag}");
    }
    Ok(())
}

/// Submit `tags` through the settings form. Returns whether settings were
/// written.
pub fn run_set<H: Host + ?Sized>(plugin: &Plugin<'_, H>, tags: Vec<String>) -> Result<bool> {
    let submitted = tags.len();
    let submission = SettingsSubmission {
        token: Some(plugin.host().issue_token(admin::SETTINGS_NONCE_ACTION)),
        input: json!({ "post_types": tags }),
    };
    match admin::submit_settings(plugin.host(), &submission) {
        SettingsOutcome::Saved(settings) => {
            let dropped = submitted - settings.post_types.len();
            if dropped > 0 {
                log!("settings"; "dropped {} unknown or non-public type(s)", dropped);
            }
            log!("settings"; "enabled: {}", settings.post_types.join(", "));
            Ok(true)
        }
        SettingsOutcome::Rejected(reason) => {
            log!("warning"; "settings not saved: {}", reason);
            Ok(false)
        }
        SettingsOutcome::WriteFailed(e) => Err(e.into()),
    }
}

/// List public content types, marking enabled ones.
pub fn run_types<H: Host + ?Sized>(plugin: &Plugin<'_, H>) -> Result<()> {
    let settings = plugin.settings().load();
    for content_type in plugin.settings().available_content_types() {
        if settings.is_enabled(&content_type.tag) {
            println!("{} {:<16} {}", "✓".green(), content_type.tag, content_type.label);
        } else {
            println!("  {:<16} {}", content_type.tag, content_type.label.dimmed());
        }
    }
    Ok(())
}
