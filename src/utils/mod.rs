//! Shared helpers for markup handling and timestamps.

pub mod date;
pub mod html;
