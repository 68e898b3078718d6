//! Command-line interface module.

pub mod admin;
mod args;
pub mod meta;
pub mod render;
pub mod settings;

pub use args::{AdminCommand, Cli, Commands, MetaCommand, SettingsCommand};

use crate::host::{ContentId, Host};
use crate::plugin::Plugin;
use anyhow::Result;

/// Dispatch `command`. Returns whether host state changed.
pub fn run<H: Host + ?Sized>(command: &Commands, plugin: &Plugin<'_, H>) -> Result<bool> {
    match command {
        Commands::Head { id } => render::run_head(plugin, ContentId(*id)).map(|_| false),
        Commands::Title { id, current } => {
            render::run_title(plugin, ContentId(*id), current.as_deref()).map(|_| false)
        }
        Commands::Schema { id } => render::run_schema(plugin, ContentId(*id)).map(|_| false),
        Commands::Meta { command } => match command {
            MetaCommand::Show { id } => meta::run_show(plugin, ContentId(*id)).map(|_| false),
            MetaCommand::Set {
                id,
                title,
                description,
                autosave,
            } => meta::run_set(
                plugin,
                ContentId(*id),
                title.clone(),
                description.clone(),
                *autosave,
            ),
        },
        Commands::Settings { command } => match command {
            SettingsCommand::Show => settings::run_show(plugin).map(|_| false),
            SettingsCommand::Set { tags } => settings::run_set(plugin, tags.clone()),
        },
        Commands::Types => settings::run_types(plugin).map(|_| false),
        Commands::Admin { command } => match command {
            AdminCommand::MetaBox { id } => admin::run_meta_box(plugin, ContentId(*id)).map(|_| false),
            AdminCommand::SettingsPage => admin::run_settings_page(plugin).map(|_| false),
        },
    }
}
