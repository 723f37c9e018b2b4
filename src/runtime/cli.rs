use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser};

use crate::error::{Error, Result};

pub const USAGE: &str = "usage: relink <LIBRARY_ROOT> [--resolve | --diff [--out-dir DIR] | --apply]";

#[derive(Parser, Debug)]
#[command(
    name = "relink",
    version,
    about = "Find catalog tracks whose files went missing and relink them"
)]
#[command(group(ArgGroup::new("mode").args(["resolve", "diff", "apply"])))]
pub struct Cli {
    /// Library root holding the catalog export and the media directory
    pub library_root: Option<PathBuf>,

    /// Print `old -> new` for every missing track that found a match
    #[arg(long)]
    pub resolve: bool,

    /// Write old and new locations to two files for diffing
    #[arg(long)]
    pub diff: bool,

    /// Push matched locations into the media player's live library
    #[arg(long)]
    pub apply: bool,

    /// Directory for the diff files (defaults to the configured paths)
    #[arg(long, value_name = "DIR", requires = "diff")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// List missing tracks and their count.
    Report,
    Resolve,
    Diff,
    Apply,
}

/// A validated invocation.
#[derive(Debug, Clone)]
pub struct Request {
    pub library_root: PathBuf,
    pub mode: Mode,
    pub out_dir: Option<PathBuf>,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.resolve {
            Mode::Resolve
        } else if self.diff {
            Mode::Diff
        } else if self.apply {
            Mode::Apply
        } else {
            Mode::Report
        }
    }

    pub fn request(&self) -> Result<Request> {
        let root = self
            .library_root
            .as_deref()
            .ok_or_else(|| Error::Usage(USAGE.to_string()))?;

        Ok(Request {
            library_root: normalize_root(root),
            mode: self.mode(),
            out_dir: self.out_dir.clone(),
        })
    }
}

/// Expand a leading `~` and make the path absolute when it exists.
fn normalize_root(root: &Path) -> PathBuf {
    let expanded = match root.strip_prefix("~") {
        Ok(rest) => match env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(rest),
            None => root.to_path_buf(),
        },
        Err(_) => root.to_path_buf(),
    };
    fs::canonicalize(&expanded).unwrap_or(expanded)
}
