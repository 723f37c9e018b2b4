use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::config::ApplySettings;
use crate::error::{Error, Result};

use super::apply::{ExternalId, LibraryPort};

/// Live library driven through AppleScript (`osascript`).
///
/// Identifiers and paths travel as script arguments, never spliced into the
/// script text.
#[derive(Debug, Clone)]
pub struct AppleScriptLibrary {
    program: String,
    application: String,
}

impl AppleScriptLibrary {
    pub fn new(settings: &ApplySettings) -> Self {
        Self {
            program: settings.osascript.clone(),
            application: settings.application.clone(),
        }
    }

    fn tell(&self, body: &[&str]) -> Vec<String> {
        let app = self.application.replace('\\', "\\\\").replace('"', "\\\"");
        let mut lines = vec![
            "on run argv".to_string(),
            format!("tell application \"{app}\""),
        ];
        lines.extend(body.iter().map(|l| l.to_string()));
        lines.push("end tell".to_string());
        lines.push("end run".to_string());
        lines
    }

    fn count_script(&self) -> Vec<String> {
        self.tell(&[
            "return count of (every track of library playlist 1 whose persistent ID is (item 1 of argv))",
        ])
    }

    fn set_location_script(&self) -> Vec<String> {
        self.tell(&[
            "set theTrack to first track of library playlist 1 whose persistent ID is (item 1 of argv)",
            "set location of theTrack to (POSIX file (item 2 of argv))",
        ])
    }

    fn run(&self, script: &[String], args: &[&str]) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        for line in script {
            cmd.arg("-e").arg(line);
        }
        cmd.args(args);

        debug!(program = %self.program, ?args, "running automation script");
        let output = cmd
            .output()
            .map_err(|e| Error::Automation(format!("cannot run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Automation(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl LibraryPort for AppleScriptLibrary {
    fn count_tracks(&mut self, id: &ExternalId) -> Result<usize> {
        let out = self.run(&self.count_script(), &[id.0.as_str()])?;
        out.parse()
            .map_err(|_| Error::Automation(format!("unexpected track count `{out}`")))
    }

    fn set_location(&mut self, id: &ExternalId, location: &Path) -> Result<()> {
        let location = location.to_string_lossy();
        self.run(&self.set_location_script(), &[id.0.as_str(), &*location])?;
        Ok(())
    }
}
