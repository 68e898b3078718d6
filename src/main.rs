//! Octo SEO - title overrides, meta descriptions and JSON-LD structured data.

#![allow(dead_code)]

mod cli;
mod config;
mod hooks;
mod host;
mod logger;
mod plugin;
mod seo;
mod utils;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::SiteConfig;
use host::SiteFile;
use plugin::Plugin;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli.config, cli.data.as_deref())?;
    let site = SiteFile::new(&config.store.path);
    let host = site
        .load()
        .with_context(|| format!("Failed to load site data from {}", site.path().display()))?;
    debug!("store"; "loaded {}", site.path().display());

    let plugin = Plugin::new(&host, &config);
    let changed = cli::run(&cli.command, &plugin)?;

    if changed {
        site.save(&host)
            .with_context(|| format!("Failed to write {}", site.path().display()))?;
        debug!("store"; "wrote {}", site.path().display());
    } else if cli.is_mutating() {
        debug!("store"; "nothing changed, {} left as is", site.path().display());
    }

    Ok(())
}
