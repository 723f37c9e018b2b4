use std::fmt::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::library::Track;

/// A track's persistent ID, the only identifier the live library is asked
/// about.
///
/// The export's `Track ID` is not used as a fallback: it need not match the
/// player's own database IDs, so a lookup by it could hit an unrelated track.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalId(pub String);

impl ExternalId {
    pub fn for_track(track: &Track) -> Result<Self> {
        match &track.persistent_id {
            Some(pid) if !pid.trim().is_empty() => Ok(ExternalId(pid.trim().to_string())),
            _ => Err(Error::NoExternalId(track.track_id)),
        }
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "persistent ID {}", self.0)
    }
}

/// The media player's live library, as far as relinking needs it.
pub trait LibraryPort {
    /// Number of live tracks matching `id`.
    fn count_tracks(&mut self, id: &ExternalId) -> Result<usize>;

    /// Point the single track matching `id` at `location`.
    fn set_location(&mut self, id: &ExternalId, location: &Path) -> Result<()>;
}

#[derive(Debug)]
pub struct ApplyFailure {
    pub track: Track,
    pub location: PathBuf,
    pub error: Error,
}

#[derive(Debug, Default)]
pub struct ApplySummary {
    /// Tracks updated, in the order they were applied.
    pub succeeded: Vec<(Track, PathBuf)>,
    pub failures: Vec<ApplyFailure>,
}

impl ApplySummary {
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failures.len()
    }
}

fn apply_one(port: &mut dyn LibraryPort, track: &Track, location: &Path) -> Result<()> {
    let id = ExternalId::for_track(track)?;
    let found = port.count_tracks(&id)?;
    if found != 1 {
        return Err(Error::ExternalLookupMismatch {
            id: id.to_string(),
            found,
        });
    }
    port.set_location(&id, location)
}

/// Push every resolved location into the live library.
///
/// Each track either succeeds or is recorded as a failure; one bad lookup
/// never stops the rest of the batch.
pub fn apply(resolved: &[(Track, PathBuf)], port: &mut dyn LibraryPort) -> ApplySummary {
    let mut summary = ApplySummary::default();

    for (track, location) in resolved {
        match apply_one(port, track, location) {
            Ok(()) => {
                info!(track = %track.track_id, to = %location.display(), "relinked");
                summary.succeeded.push((track.clone(), location.clone()));
            }
            Err(error) => {
                warn!(track = %track.track_id, error = %error, "relink failed");
                summary.failures.push(ApplyFailure {
                    track: track.clone(),
                    location: location.clone(),
                    error,
                });
            }
        }
    }

    summary
}

pub fn render_apply_summary(summary: &ApplySummary) -> String {
    let mut out = String::new();

    for (track, location) in &summary.succeeded {
        let _ = writeln!(out, "ok: {} -> {}", track.location, location.display());
    }
    for failure in &summary.failures {
        let _ = writeln!(
            out,
            "failed: {} -> {} ({})",
            failure.track.location,
            failure.location.display(),
            failure.error
        );
    }

    let _ = writeln!(
        out,
        "Updated {} of {} tracks",
        summary.succeeded.len(),
        summary.attempted()
    );

    if !summary.failures.is_empty() {
        let _ = writeln!(out, "Failures:");
        for failure in &summary.failures {
            let _ = writeln!(out, "  {}", failure.track.display_line());
        }
    }

    out
}
