//! Asset transfer collaborators.
//!
//! Direct media files and PDFs are copied with libcurl into a `.part` file
//! and renamed into place on success. Segmented streams are handed to an
//! external program that knows how to reassemble them.

mod direct;
mod stream;

pub use direct::{CurlDownloader, DirectDownloader};
pub use stream::{ExternalStreamDownloader, StreamDownloader};

use std::path::{Path, PathBuf};

/// Suffix of in-progress transfers.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `104.mp4` → `104.mp4.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}
