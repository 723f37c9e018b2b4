use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use crate::catalog;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::library;
use crate::report::{self, AppleScriptLibrary, LibraryPort};
use crate::resolve;

mod cli;
mod logging;
mod settings;

pub use cli::{Cli, Mode, Request};

pub fn run() -> std::result::Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let cli = Cli::parse();
    let request = match cli.request() {
        Ok(r) => r,
        Err(Error::Usage(msg)) => {
            println!("{msg}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let settings = settings::load_settings();
    let mut port = AppleScriptLibrary::new(&settings.apply);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&request, &settings, &mut port, &mut out)?;
    Ok(())
}

/// Diff file destinations: the configured names, under `out_dir` if given.
fn diff_paths(request: &Request, settings: &Settings) -> (PathBuf, PathBuf) {
    let place = |name: &str| match &request.out_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    };
    (
        place(&settings.report.old_locations_file),
        place(&settings.report.new_locations_file),
    )
}

/// Run one reconciliation: load, find missing tracks, then report or resolve.
///
/// Every resolution is computed before anything is written to the live
/// library.
pub fn execute(
    request: &Request,
    settings: &Settings,
    port: &mut dyn LibraryPort,
    out: &mut dyn Write,
) -> Result<()> {
    let records = catalog::load(&request.library_root, &settings.catalog)?;
    let tracks = library::build_tracks(&records)?;
    let missing = library::sort_canonical(library::filter_missing(&tracks));
    info!(tracks = tracks.len(), missing = missing.len(), "checked track locations");

    if request.mode == Mode::Report {
        write!(out, "{}", report::render_missing(&missing))?;
        return Ok(());
    }

    let media_dir = request.library_root.join(&settings.scan.media_dir);
    let candidates = library::scan(&media_dir, &settings.scan);
    let resolutions = resolve::resolve_all(&missing, &candidates);
    info!(
        candidates = candidates.len(),
        resolved = resolutions.resolved.len(),
        unresolved = resolutions.unresolved.len(),
        "resolved missing tracks"
    );
    for track in &resolutions.unresolved {
        debug!(track = %track.track_id, "{}", track.display_line());
    }

    match request.mode {
        Mode::Report => {}
        Mode::Resolve => {
            write!(out, "{}", report::render_resolutions(&resolutions.resolved))?;
        }
        Mode::Diff => {
            let (old_path, new_path) = diff_paths(request, settings);
            report::write_location_lists(&resolutions.resolved, &old_path, &new_path)?;
            writeln!(
                out,
                "Wrote old locations to {} and new locations to {}",
                old_path.display(),
                new_path.display()
            )?;
        }
        Mode::Apply => {
            let summary = report::apply(&resolutions.resolved, port);
            write!(out, "{}", report::render_apply_summary(&summary))?;
        }
    }

    Ok(())
}
