//! `admin` command: print admin screens.

use anyhow::{Result, anyhow, bail};

use crate::hooks::admin::MENU_SLUG;
use crate::host::{ContentId, Host};
use crate::plugin::{Plugin, Surface};

pub fn run_meta_box<H: Host + ?Sized>(plugin: &Plugin<'_, H>, id: ContentId) -> Result<()> {
    let item = plugin
        .host()
        .content(id)
        .ok_or_else(|| anyhow!("content item {id} not found"))?;
    let hooks = plugin.hooks(Surface::Admin);
    let Some(meta_box) = hooks.meta_box_for(&item.kind) else {
        bail!("SEO is not enabled for content type `{}`", item.kind);
    };
    print!("{}", (meta_box.render)(id));
    Ok(())
}

pub fn run_settings_page<H: Host + ?Sized>(plugin: &Plugin<'_, H>) -> Result<()> {
    let hooks = plugin.hooks(Surface::Admin);
    let page = hooks
        .menu_page(MENU_SLUG)
        .ok_or_else(|| anyhow!("settings page not registered"))?;
    let html = (page.render)();
    if html.is_empty() {
        bail!("current user lacks `{}`", page.capability.as_str());
    }
    print!("{html}");
    Ok(())
}
