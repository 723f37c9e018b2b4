use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::config::CatalogSettings;
use crate::error::{Error, Result};
use crate::library::TrackId;

use super::plist::{self, Value};

/// One catalog track entry, untouched: field name to property-list value.
pub type RawRecord = BTreeMap<String, Value>;

/// Read `<library_root>/<file_name>` and return its `Tracks` records.
pub fn load(
    library_root: &Path,
    settings: &CatalogSettings,
) -> Result<BTreeMap<TrackId, RawRecord>> {
    let path = library_root.join(&settings.file_name);
    let unreadable = |reason: String| Error::CatalogUnreadable {
        path: path.clone(),
        reason,
    };

    let text = fs::read_to_string(&path).map_err(|e| unreadable(e.to_string()))?;
    debug!(path = %path.display(), bytes = text.len(), "read catalog");

    let root = plist::parse(&text).map_err(unreadable)?;
    let root = root
        .as_dict()
        .ok_or_else(|| unreadable(format!("top-level value is a {}, not a dict", root.kind())))?;
    let tracks = root
        .get("Tracks")
        .ok_or_else(|| unreadable("no `Tracks` entry".to_string()))?;
    let tracks = tracks
        .as_dict()
        .ok_or_else(|| unreadable(format!("`Tracks` is a {}, not a dict", tracks.kind())))?;

    let mut records = BTreeMap::new();
    for (key, value) in tracks {
        let id: i64 = key
            .trim()
            .parse()
            .map_err(|_| unreadable(format!("track key `{key}` is not numeric")))?;
        let record = value.as_dict().ok_or_else(|| {
            unreadable(format!("track {key} is a {}, not a dict", value.kind()))
        })?;
        if records.insert(TrackId(id), record.clone()).is_some() {
            return Err(unreadable(format!("track id {id} appears more than once")));
        }
    }

    info!(path = %path.display(), tracks = records.len(), "loaded catalog");
    Ok(records)
}
