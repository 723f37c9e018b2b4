use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/relink/config.toml` or `~/.config/relink/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `RELINK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub scan: ScanSettings,
    pub report: ReportSettings,
    pub apply: ApplySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// File name of the catalog export inside the library root.
    pub file_name: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            file_name: "iTunes Library.xml".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Directory under the library root holding the media files.
    pub media_dir: String,
    /// File extensions to treat as candidates (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            media_dir: "iTunes Media/Music".to_string(),
            extensions: vec!["mp3".into()],
            follow_links: true,
            include_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Where diff mode writes the recorded locations, one per line.
    pub old_locations_file: String,
    /// Where diff mode writes the matched locations, aligned with the old ones.
    pub new_locations_file: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            old_locations_file: "old_locations.txt".to_string(),
            new_locations_file: "new_locations.txt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApplySettings {
    /// Program used to run automation scripts.
    pub osascript: String,
    /// Name of the media player application that owns the live library.
    pub application: String,
}

impl Default for ApplySettings {
    fn default() -> Self {
        Self {
            osascript: "osascript".to_string(),
            application: "Music".to_string(),
        }
    }
}
