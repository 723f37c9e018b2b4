//! Configuration loader and schema types.
//!
//! This module exposes the settings that name the catalog file, the media
//! directory to scan and where reports are written, plus helpers to load
//! them from disk.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
