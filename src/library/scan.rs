use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::ScanSettings;

/// Files that may be the new home of a missing track.
pub type CandidateSet = BTreeSet<PathBuf>;

/// Configured extensions, lowercased and without leading dots.
fn normalized_extensions(settings: &ScanSettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn is_media_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|e| *e == ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Recursively collect media files beneath `dir`.
///
/// An absent directory is not an error; it simply has no candidates.
pub fn scan(dir: &Path, settings: &ScanSettings) -> CandidateSet {
    let mut candidates = CandidateSet::new();

    if !dir.is_dir() {
        warn!(dir = %dir.display(), "media directory not found, no candidates");
        return candidates;
    }

    let extensions = normalized_extensions(settings);
    let walker = WalkDir::new(dir).follow_links(settings.follow_links);

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && is_media_file(path, &extensions) {
            candidates.insert(path.to_path_buf());
        }
    }

    debug!(dir = %dir.display(), candidates = candidates.len(), "scanned media directory");
    candidates
}
