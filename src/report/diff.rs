use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::library::Track;

/// Write old and new locations to two files, one per line, aligned by index.
pub fn write_location_lists(
    resolved: &[(Track, PathBuf)],
    old_path: &Path,
    new_path: &Path,
) -> std::io::Result<()> {
    let mut old = BufWriter::new(File::create(old_path)?);
    let mut new = BufWriter::new(File::create(new_path)?);

    for (track, location) in resolved {
        writeln!(old, "{}", track.location)?;
        writeln!(new, "{}", location.display())?;
    }

    old.flush()?;
    new.flush()?;

    info!(
        old = %old_path.display(),
        new = %new_path.display(),
        lines = resolved.len(),
        "wrote location lists"
    );
    Ok(())
}
