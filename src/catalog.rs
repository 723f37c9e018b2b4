//! Catalog loading: reads the library's XML property-list export and hands
//! back the raw per-track records keyed by track id.

mod load;
mod plist;

pub use load::{RawRecord, load};
pub use plist::Value;
