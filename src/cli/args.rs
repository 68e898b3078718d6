//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Octo SEO: titles, meta descriptions and JSON-LD for a host site
#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: octo-seo.toml)
    #[arg(short = 'C', long, global = true, default_value = "octo-seo.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Host snapshot to operate on, overriding `store.path`
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the head markup a frontend render of an item emits
    Head {
        /// Content item id
        id: u64,
    },

    /// Run the title filter for an item
    Title {
        /// Content item id
        id: u64,

        /// Title the host would render (default: the item's own title)
        #[arg(long)]
        current: Option<String>,
    },

    /// Print the JSON-LD graph of an item
    Schema {
        /// Content item id
        id: u64,
    },

    /// Show or edit per-item overrides
    #[command(visible_alias = "m")]
    Meta {
        #[command(subcommand)]
        command: MetaCommand,
    },

    /// Show or change which content types get SEO support
    #[command(visible_alias = "s")]
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// List public content types and whether they are enabled
    #[command(visible_alias = "t")]
    Types,

    /// Print admin screens
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum MetaCommand {
    /// Show stored overrides and resolved values
    Show {
        /// Content item id
        id: u64,
    },

    /// Save overrides through the edit-screen save pipeline
    Set {
        /// Content item id
        id: u64,

        /// Title override (empty string clears it)
        #[arg(long)]
        title: Option<String>,

        /// Description override (empty string clears it)
        #[arg(long)]
        description: Option<String>,

        /// Submit as an autosave (the save is skipped)
        #[arg(long)]
        autosave: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    /// Show enabled content types
    Show,

    /// Replace enabled content types; unknown tags are dropped
    Set {
        /// Content type tags, in order
        #[arg(value_name = "TAG")]
        tags: Vec<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AdminCommand {
    /// Edit-screen meta box of an item
    MetaBox {
        /// Content item id
        id: u64,
    },

    /// Settings page
    SettingsPage,
}

#[allow(unused)]
impl Cli {
    /// Whether the command may change the host snapshot.
    pub const fn is_mutating(&self) -> bool {
        matches!(
            self.command,
            Commands::Meta {
                command: MetaCommand::Set { .. }
            } | Commands::Settings {
                command: SettingsCommand::Set { .. }
            }
        )
    }
}
