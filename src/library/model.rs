use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

use crate::catalog::{RawRecord, Value};
use crate::error::{Error, Result};

/// Album artist used when the catalog entry has none.
pub const UNKNOWN_ALBUM_ARTIST: &str = "???";

/// Track number used when the catalog entry has none.
pub const UNKNOWN_TRACK_NUMBER: i64 = -1;

/// Catalog-assigned track identifier, unique within one loaded catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackId(pub i64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One catalog entry, normalized at load time and read-only afterwards.
///
/// Equality and ordering only look at the comparison key
/// `(album_artist, album, track_number, name, track_id)`.
#[derive(Debug, Clone)]
pub struct Track {
    pub track_id: TrackId,
    pub album: String,
    pub name: String,
    pub album_artist: String,
    pub track_number: i64,
    /// Decoded filesystem path; empty when the catalog recorded none.
    pub location: String,
    pub persistent_id: Option<String>,
}

impl Track {
    /// Build a track from a raw catalog record.
    ///
    /// `Track ID`, `Album` and `Name` are required; the optional fields are
    /// resolved to their defaults here, never at access time.
    pub fn from_record(record: &RawRecord) -> Result<Self> {
        let label = record
            .get("Track ID")
            .and_then(Value::as_integer)
            .map(|id| id.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        let malformed = |reason: String| Error::MalformedRecord {
            record: label.clone(),
            reason,
        };

        let required = |key: &str| {
            record
                .get(key)
                .ok_or_else(|| malformed(format!("missing required field `{key}`")))
        };
        let wrong_type = |key: &str, want: &str, got: &Value| {
            malformed(format!("field `{key}` is a {}, expected {want}", got.kind()))
        };

        let id = required("Track ID")?;
        let track_id = id
            .as_integer()
            .map(TrackId)
            .ok_or_else(|| wrong_type("Track ID", "integer", id))?;

        let album = required("Album")?;
        let album = album
            .as_str()
            .ok_or_else(|| wrong_type("Album", "string", album))?
            .to_string();

        let name = required("Name")?;
        let name = name
            .as_str()
            .ok_or_else(|| wrong_type("Name", "string", name))?
            .to_string();

        let album_artist = match record.get("Album Artist") {
            None => UNKNOWN_ALBUM_ARTIST.to_string(),
            Some(v) => v
                .as_str()
                .ok_or_else(|| wrong_type("Album Artist", "string", v))?
                .to_string(),
        };

        let track_number = match record.get("Track Number") {
            None => UNKNOWN_TRACK_NUMBER,
            Some(v) => v
                .as_integer()
                .ok_or_else(|| wrong_type("Track Number", "integer", v))?,
        };

        let location = match record.get("Location") {
            None => String::new(),
            Some(v) => decode_location(
                v.as_str()
                    .ok_or_else(|| wrong_type("Location", "string", v))?,
            ),
        };

        let persistent_id = record
            .get("Persistent ID")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            track_id,
            album,
            name,
            album_artist,
            track_number,
            location,
            persistent_id,
        })
    }

    pub fn comparison_key(&self) -> (&str, &str, i64, &str, TrackId) {
        (
            self.album_artist.as_str(),
            self.album.as_str(),
            self.track_number,
            self.name.as_str(),
            self.track_id,
        )
    }

    /// Live check: the recorded location is set and something exists there now.
    pub fn file_exists(&self) -> bool {
        !self.location.is_empty() && Path::new(&self.location).exists()
    }

    /// `"<artist> / <album> / (<track#>) <title>"`
    pub fn display_line(&self) -> String {
        format!(
            "{} / {} / ({}) {}",
            self.album_artist, self.album, self.track_number, self.name
        )
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.comparison_key() == other.comparison_key()
    }
}

impl Eq for Track {}

impl PartialOrd for Track {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Track {
    // `str` ordering is byte-wise over UTF-8, which is code point order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.comparison_key().cmp(&other.comparison_key())
    }
}

/// Reduce a catalog location (a percent-encoded file URI) to a plain path.
///
/// `file://localhost/Music/My%20Song.mp3` becomes `/Music/My Song.mp3`. The
/// scheme and authority are dropped along with any query or fragment; a value
/// without a scheme is taken as a path. Invalid UTF-8 escapes are replaced.
pub fn decode_location(raw: &str) -> String {
    let rest = strip_scheme(raw);
    let rest = match rest.strip_prefix("//") {
        Some(after) => after.find('/').map_or("", |i| &after[i..]),
        None => rest,
    };
    let path = rest.split(['?', '#']).next().unwrap_or("");

    String::from_utf8_lossy(&urlencoding::decode_binary(path.as_bytes())).into_owned()
}

fn strip_scheme(raw: &str) -> &str {
    let Some((scheme, rest)) = raw.split_once(':') else {
        return raw;
    };
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if valid { rest } else { raw }
}
