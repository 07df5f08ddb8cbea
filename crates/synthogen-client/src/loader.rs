//! Native engine resolution and one-time loading.
//!
//! Resolution order, short-circuiting on the first success:
//! 1. an explicit filesystem path (anything containing a separator) is
//!    loaded as that exact file;
//! 2. the platform-mapped file name of the logical library name is handed to
//!    the system dynamic-library search;
//! 3. a bundled engine image (behind the `bundled-engine` feature) is
//!    written to a fresh temporary file and loaded from there.
//!
//! The loaded engine is process-wide and write-once. A failed attempt is
//! not cached: the next caller retries from the top.

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::Path;
use std::sync::Arc;

use libloading::Library;
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ffi::NativeEngine;

/// Logical name of the engine library; mapped to a platform file name
/// before hitting the system search path.
pub const LIBRARY_NAME: &str = "synthogen_engine";

static ENGINE: OnceCell<Arc<NativeEngine>> = OnceCell::new();

/// Loads the native engine at most once per process. Concurrent first
/// callers race safely; exactly one load attempt runs at a time and later
/// calls are lock-free reads. The explicit path only matters for the call
/// that performs the load.
pub fn load(explicit: Option<&Path>) -> Result<Arc<NativeEngine>> {
    ENGINE
        .get_or_try_init(|| resolve(explicit).map(Arc::new))
        .cloned()
}

fn resolve(explicit: Option<&Path>) -> Result<NativeEngine> {
    if let Some(path) = explicit {
        let raw = path.to_string_lossy();
        if raw.contains(std::path::MAIN_SEPARATOR) || raw.contains('/') {
            debug!(path = %path.display(), "loading native engine from explicit path");
            let library = unsafe { Library::new(path) }.map_err(|err| {
                Error::LibraryUnavailable(format!("failed to load '{}': {err}", path.display()))
            })?;
            return Ok(NativeEngine::new(library, None));
        }
    }

    // No separator means a logical name, default or caller-supplied.
    let logical = explicit
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| LIBRARY_NAME.to_string());
    let file_name = mapped_library_name(&logical);

    match unsafe { Library::new(&file_name) } {
        Ok(library) => {
            debug!(%file_name, "loaded native engine from system search path");
            Ok(NativeEngine::new(library, None))
        }
        Err(err) => {
            warn!(%file_name, error = %err, "engine not on system search path; trying bundled image");
            extract_bundled(&file_name)
        }
    }
}

/// Maps a logical library name to its platform file name, e.g.
/// `synthogen_engine` to `libsynthogen_engine.so` on Linux. Names that
/// already carry the platform suffix pass through unchanged.
fn mapped_library_name(logical: &str) -> String {
    if logical.ends_with(DLL_SUFFIX) {
        logical.to_string()
    } else {
        format!("{DLL_PREFIX}{logical}{DLL_SUFFIX}")
    }
}

#[cfg(feature = "bundled-engine")]
fn extract_bundled(file_name: &str) -> Result<NativeEngine> {
    use std::io::Write;

    static BUNDLED_ENGINE: &[u8] = include_bytes!(env!("SYNTHOGEN_BUNDLED_ENGINE"));

    let unavailable =
        |err: &dyn std::fmt::Display| Error::LibraryUnavailable(format!(
            "failed to extract bundled engine '{file_name}': {err}"
        ));

    let mut file = tempfile::Builder::new()
        .prefix("synthogen-")
        .suffix(DLL_SUFFIX)
        .tempfile()
        .map_err(|err| unavailable(&err))?;
    file.write_all(BUNDLED_ENGINE)
        .and_then(|_| file.flush())
        .map_err(|err| unavailable(&err))?;

    // Keep the path alive for as long as the library; deletion is
    // best-effort at teardown.
    let path = file.into_temp_path();
    let library = unsafe { Library::new(&*path) }.map_err(|err| unavailable(&err))?;
    debug!(path = %path.display(), "loaded bundled native engine");
    Ok(NativeEngine::new(library, Some(path)))
}

#[cfg(not(feature = "bundled-engine"))]
fn extract_bundled(file_name: &str) -> Result<NativeEngine> {
    Err(Error::LibraryUnavailable(format!(
        "'{file_name}' was not found on the system library search path \
         and this build carries no bundled engine"
    )))
}
