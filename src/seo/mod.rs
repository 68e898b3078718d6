//! SEO core: overrides, default descriptions, resolution, structured data
//! and settings.
//!
//! # Module Structure
//!
//! ```text
//! seo/
//! ├── description.rs  # default description from raw body markup
//! ├── meta.rs         # per-item title/description overrides
//! ├── resolve.rs      # override-or-default resolution
//! ├── schema/         # JSON-LD graph
//! └── settings.rs     # enabled content types
//! ```

pub mod description;
pub mod meta;
pub mod resolve;
pub mod schema;
pub mod settings;

pub use meta::SeoMeta;
pub use resolve::MetaResolver;
pub use schema::SchemaBuilder;
pub use settings::{PluginSettings, SettingsStore};
