//! Output side of a run: text reports, diff files and pushing corrected
//! locations back into the media player's live library.

mod apply;
mod diff;
mod osascript;
mod text;

pub use apply::{ExternalId, LibraryPort, apply, render_apply_summary};
pub use diff::write_location_lists;
pub use osascript::AppleScriptLibrary;
pub use text::{render_missing, render_resolutions};
