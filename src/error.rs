//! Error type shared by every stage of a relink run.

use std::path::PathBuf;

use thiserror::Error;

use crate::library::TrackId;

#[derive(Error, Debug)]
pub enum Error {
    /// Required command-line input was not supplied.
    #[error("{0}")]
    Usage(String),

    #[error("cannot read catalog {}: {reason}", path.display())]
    CatalogUnreadable { path: PathBuf, reason: String },

    #[error("track record {record} is malformed: {reason}")]
    MalformedRecord { record: String, reason: String },

    #[error("no candidate files to match against")]
    NoCandidates,

    /// The live library did not hold exactly one track for an identifier.
    #[error("expected exactly one library track for {id}, found {found}")]
    ExternalLookupMismatch { id: String, found: usize },

    /// The track cannot be looked up in the live library without guessing.
    #[error("track {0} has no persistent ID to look it up by")]
    NoExternalId(TrackId),

    #[error("automation call failed: {0}")]
    Automation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
