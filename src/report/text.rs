use std::fmt::Write;
use std::path::PathBuf;

use crate::library::Track;

/// One display line per track, then the total.
pub fn render_missing(tracks: &[Track]) -> String {
    let mut out = String::new();
    for track in tracks {
        let _ = writeln!(out, "{}", track.display_line());
    }
    let _ = writeln!(out, "Total: {}", tracks.len());
    out
}

/// `"<old location> -> <new location>"` per resolved track.
pub fn render_resolutions(resolved: &[(Track, PathBuf)]) -> String {
    let mut out = String::new();
    for (track, new) in resolved {
        let _ = writeln!(out, "{} -> {}", track.location, new.display());
    }
    out
}
