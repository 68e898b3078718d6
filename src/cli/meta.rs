//! `meta` command: inspect and save per-item overrides.

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::hooks::{SaveOutcome, SaveRequest, admin};
use crate::host::{ContentId, Host};
use crate::log;
use crate::plugin::{Plugin, Surface};

/// Stored and effective values of one item.
#[derive(Debug, Serialize)]
struct MetaReport<'a> {
    id: ContentId,
    #[serde(rename = "type")]
    kind: &'a str,
    enabled: bool,
    title: String,
    description: String,
    title_override: String,
    description_override: String,
}

pub fn run_show<H: Host + ?Sized>(plugin: &Plugin<'_, H>, id: ContentId) -> Result<()> {
    let item = plugin
        .host()
        .content(id)
        .ok_or_else(|| anyhow!("content item {id} not found"))?;
    let resolved = plugin.resolver().resolve(&item);
    let report = MetaReport {
        id,
        kind: &item.kind,
        enabled: plugin.settings().load().is_enabled(&item.kind),
        title: resolved.title,
        description: resolved.description,
        title_override: plugin.meta().title_override(id),
        description_override: plugin.meta().description_override(id),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Submit overrides as the edit screen would. Returns whether anything was
/// written.
pub fn run_set<H: Host + ?Sized>(
    plugin: &Plugin<'_, H>,
    id: ContentId,
    title: Option<String>,
    description: Option<String>,
    autosave: bool,
) -> Result<bool> {
    if title.is_none() && description.is_none() {
        log!("warning"; "nothing to save, pass --title and/or --description");
        return Ok(false);
    }

    let request = SaveRequest {
        token: Some(plugin.host().issue_token(admin::NONCE_ACTION)),
        autosave,
        title,
        description,
        ..SaveRequest::new(id)
    };

    let mut changed = false;
    for outcome in plugin.hooks(Surface::Admin).save_item(&request) {
        log!("save"; "item {}: {}", id, outcome);
        if let SaveOutcome::Saved(fields) = outcome {
            changed |= fields.title || fields.description;
        }
    }
    Ok(changed)
}
