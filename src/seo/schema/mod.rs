//! JSON-LD structured data.
//!
//! A [`node::Graph`] is rebuilt on every render from host data and the site
//! configuration; nodes reference each other through `@id` values derived
//! from the canonical and site URLs.

mod builder;
pub mod node;

pub use builder::SchemaBuilder;
