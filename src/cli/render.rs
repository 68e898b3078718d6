//! `head`, `title` and `schema` commands: what a frontend render emits.

use anyhow::{Result, anyhow};
use std::io::Write;

use crate::hooks::RenderContext;
use crate::host::{ContentId, Host};
use crate::log;
use crate::plugin::{Plugin, Surface};

/// Print the head markup of a singular view of `id`.
pub fn run_head<H: Host + ?Sized>(plugin: &Plugin<'_, H>, id: ContentId) -> Result<()> {
    let head = plugin
        .hooks(Surface::Frontend)
        .render_head(&RenderContext::singular(id));
    if head.is_empty() {
        log!("head"; "nothing to emit for item {}", id);
        return Ok(());
    }
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(head.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Print the filtered title of `id`.
///
/// Without `current`, the item's own title is filtered.
pub fn run_title<H: Host + ?Sized>(
    plugin: &Plugin<'_, H>,
    id: ContentId,
    current: Option<&str>,
) -> Result<()> {
    let current = match current {
        Some(title) => title.to_owned(),
        None => {
            plugin
                .host()
                .content(id)
                .ok_or_else(|| anyhow!("content item {id} not found"))?
                .title
        }
    };
    let title = plugin
        .hooks(Surface::Frontend)
        .filter_title(&RenderContext::singular(id), current);
    println!("{title}");
    Ok(())
}

/// Print the JSON-LD graph of `id`.
pub fn run_schema<H: Host + ?Sized>(plugin: &Plugin<'_, H>, id: ContentId) -> Result<()> {
    match plugin.schema().build(id) {
        Some(graph) => println!("{}", graph.to_json_pretty()?),
        None => log!("schema"; "content item {} not found, no graph", id),
    }
    Ok(())
}
