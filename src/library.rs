//! Track model, missing-track detection and the media directory scanner.

mod missing;
mod model;
mod scan;

pub use missing::{build_tracks, filter_missing, sort_canonical};
pub use model::*;
pub use scan::{CandidateSet, scan};
