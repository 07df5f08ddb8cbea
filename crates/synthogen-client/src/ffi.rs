//! The foreign call surface of the native engine.
//!
//! The engine is a C-ABI dynamic library. Every returned string is owned by
//! the engine and released through its free function; a null return plus a
//! populated error pointer signals a native failure.

use std::ffi::{CStr, CString, c_char, c_void};
use std::panic::{AssertUnwindSafe, catch_unwind};

use libloading::{Library, Symbol};
use tracing::error;

use crate::error::{Error, Result};

pub(crate) const SYM_GENERATE: &[u8] = b"synthogen_generate_random_data\0";
pub(crate) const SYM_GET_SCHEMA: &[u8] = b"synthogen_get_schema\0";
pub(crate) const SYM_FREE_STRING: &[u8] = b"synthogen_free_string\0";

/// Raw progress notification: `(current, total, user_data)`. Invoked by the
/// engine on the calling thread, zero or more times per request, with
/// strictly increasing `current` up to `total`.
pub type RawProgressFn = unsafe extern "C" fn(u64, u64, *mut c_void);

type GenerateFn = unsafe extern "C" fn(
    *const c_char,
    Option<RawProgressFn>,
    *mut c_void,
    *mut *mut c_char,
) -> *mut c_char;
type GetSchemaFn = unsafe extern "C" fn(*mut *mut c_char) -> *mut c_char;
type FreeStringFn = unsafe extern "C" fn(*mut c_char);

/// Caller-side progress receiver, bridged across the foreign boundary.
/// Delivered strictly in order on the invoking call path, never concurrently
/// with itself.
pub type ProgressSink<'a> = &'a mut dyn FnMut(u64, u64);

/// Seam between the facade and the loaded library, so facade behavior is
/// testable without a native binary.
pub trait Engine: Send + Sync {
    /// One synchronous generation request; blocks until the engine returns
    /// the final document or an error.
    fn generate_random_data(
        &self,
        schema: &str,
        progress: Option<ProgressSink<'_>>,
    ) -> Result<String>;

    /// The engine's self-describing schema document.
    fn schema_document(&self) -> Result<String>;
}

/// A loaded native engine. Lives for the rest of the process once resolved.
pub struct NativeEngine {
    library: Library,
    // Keeps a bundled extraction alive (and deletable) as long as the
    // library is.
    _extracted: Option<tempfile::TempPath>,
}

impl NativeEngine {
    pub(crate) fn new(library: Library, extracted: Option<tempfile::TempPath>) -> Self {
        Self {
            library,
            _extracted: extracted,
        }
    }

    fn symbol<T>(&self, name: &[u8]) -> Result<Symbol<'_, T>> {
        unsafe { self.library.get(name) }.map_err(|err| {
            Error::LibraryUnavailable(format!(
                "engine symbol '{}' missing: {err}",
                String::from_utf8_lossy(&name[..name.len() - 1])
            ))
        })
    }

    /// Takes ownership of an engine-allocated string and frees it.
    fn consume(&self, text: *mut c_char, err: *mut c_char) -> Result<String> {
        let free: Symbol<'_, FreeStringFn> = self.symbol(SYM_FREE_STRING)?;

        if text.is_null() {
            let message = if err.is_null() {
                "engine reported a failure without a message".to_string()
            } else {
                let message = unsafe { CStr::from_ptr(err) }
                    .to_string_lossy()
                    .into_owned();
                unsafe { free(err) };
                message
            };
            return Err(Error::Generation(message));
        }

        let result = unsafe { CStr::from_ptr(text) }
            .to_string_lossy()
            .into_owned();
        unsafe { free(text) };
        if !err.is_null() {
            unsafe { free(err) };
        }
        Ok(result)
    }
}

impl Engine for NativeEngine {
    fn generate_random_data(
        &self,
        schema: &str,
        progress: Option<ProgressSink<'_>>,
    ) -> Result<String> {
        let generate: Symbol<'_, GenerateFn> = self.symbol(SYM_GENERATE)?;
        let schema = CString::new(schema)
            .map_err(|_| Error::Generation("schema text contains an interior NUL byte".into()))?;

        let mut err: *mut c_char = std::ptr::null_mut();
        let text = match progress {
            Some(sink) => {
                let mut bridge = ProgressBridge { sink };
                let user_data = (&mut bridge as *mut ProgressBridge<'_>).cast::<c_void>();
                unsafe {
                    generate(
                        schema.as_ptr(),
                        Some(progress_trampoline),
                        user_data,
                        &mut err,
                    )
                }
            }
            None => unsafe {
                generate(schema.as_ptr(), None, std::ptr::null_mut(), &mut err)
            },
        };

        self.consume(text, err)
    }

    fn schema_document(&self) -> Result<String> {
        let get_schema: Symbol<'_, GetSchemaFn> = self.symbol(SYM_GET_SCHEMA)?;
        let mut err: *mut c_char = std::ptr::null_mut();
        let text = unsafe { get_schema(&mut err) };
        self.consume(text, err)
    }
}

// Thin wrapper so the fat sink reference travels behind one thin pointer.
struct ProgressBridge<'a> {
    sink: ProgressSink<'a>,
}

unsafe extern "C" fn progress_trampoline(current: u64, total: u64, user_data: *mut c_void) {
    let bridge: &mut ProgressBridge<'_> = unsafe { &mut *user_data.cast() };
    // A panic must not unwind into native frames.
    if catch_unwind(AssertUnwindSafe(|| (bridge.sink)(current, total))).is_err() {
        error!(current, total, "progress callback panicked; notification dropped");
    }
}
