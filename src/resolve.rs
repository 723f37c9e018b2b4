//! Location resolution: for a track whose file went missing, pick the scanned
//! candidate whose path is closest to the recorded location.

mod distance;

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::library::{CandidateSet, Track};

pub use distance::edit_distance;

/// Outcome of resolving a batch of missing tracks, in input order.
#[derive(Debug, Default)]
pub struct Resolutions {
    pub resolved: Vec<(Track, PathBuf)>,
    pub unresolved: Vec<Track>,
}

/// A candidate's path as compared against catalog locations: `/`-separated.
fn posix_form(path: &Path) -> String {
    let s = path.to_string_lossy();
    if MAIN_SEPARATOR == '/' {
        s.into_owned()
    } else {
        s.replace(MAIN_SEPARATOR, "/")
    }
}

/// Find the most plausible current file for `track`.
///
/// Returns `None` when the track has no recorded location, and the recorded
/// path itself when a file still exists there. Otherwise every candidate is
/// scored by edit distance to the recorded location and the cheapest wins;
/// equal costs go to the lexicographically smallest path.
pub fn resolve(track: &Track, candidates: &CandidateSet) -> Result<Option<PathBuf>> {
    if track.location.is_empty() {
        return Ok(None);
    }
    if track.file_exists() {
        return Ok(Some(PathBuf::from(&track.location)));
    }

    let mut best: Option<(usize, String, &PathBuf)> = None;
    for candidate in candidates {
        let form = posix_form(candidate);
        let cost = edit_distance(&track.location, &form);
        let better = match &best {
            None => true,
            Some((best_cost, best_form, _)) => (cost, &form) < (*best_cost, best_form),
        };
        if better {
            best = Some((cost, form, candidate));
        }
    }

    let (cost, _, path) = best.ok_or(Error::NoCandidates)?;
    debug!(
        track = %track.track_id,
        from = %track.location,
        to = %path.display(),
        cost,
        "matched candidate"
    );
    Ok(Some(path.clone()))
}

/// Resolve every track in `missing`.
///
/// An empty candidate set means nothing can be resolved; every track is
/// reported unresolved instead of failing the batch.
pub fn resolve_all(missing: &[Track], candidates: &CandidateSet) -> Resolutions {
    let mut out = Resolutions::default();

    if candidates.is_empty() {
        warn!(tracks = missing.len(), "no candidate files, nothing can be resolved");
        out.unresolved = missing.to_vec();
        return out;
    }

    for track in missing {
        match resolve(track, candidates) {
            Ok(Some(path)) => out.resolved.push((track.clone(), path)),
            Ok(None) => out.unresolved.push(track.clone()),
            Err(e) => {
                warn!(track = %track.track_id, error = %e, "could not resolve");
                out.unresolved.push(track.clone());
            }
        }
    }

    out
}

#[cfg(test)]
mod tests;
