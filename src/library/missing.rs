use std::collections::BTreeMap;

use crate::catalog::RawRecord;
use crate::error::{Error, Result};

use super::model::{Track, TrackId};

/// Build every track of a loaded catalog.
///
/// A single malformed record aborts the whole load rather than silently
/// dropping a library entry. Each record's `Track ID` must equal the key it
/// is filed under, which keeps track ids unique across the catalog.
pub fn build_tracks(records: &BTreeMap<TrackId, RawRecord>) -> Result<Vec<Track>> {
    records
        .iter()
        .map(|(key, record)| {
            let track = Track::from_record(record)?;
            if track.track_id != *key {
                return Err(Error::MalformedRecord {
                    record: key.to_string(),
                    reason: format!(
                        "`Track ID` {} does not match its catalog key",
                        track.track_id
                    ),
                });
            }
            Ok(track)
        })
        .collect()
}

/// Tracks whose file is not on disk right now, in their original order.
pub fn filter_missing(tracks: &[Track]) -> Vec<Track> {
    tracks.iter().filter(|t| !t.file_exists()).cloned().collect()
}

/// Order tracks by their comparison key, ascending.
pub fn sort_canonical(mut tracks: Vec<Track>) -> Vec<Track> {
    tracks.sort();
    tracks
}
