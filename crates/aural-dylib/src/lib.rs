//! Uniform handle abstraction over the platform dynamic loader.
//!
//! This crate wraps [`libloading`] behind the small surface the Aural
//! binding layers need: open a shared library by name, resolve raw symbol
//! addresses, release the library. Symbol lookups return a null sentinel
//! rather than an error, because callers routinely probe for optional entry
//! points and a miss is not exceptional. A failed open, on the other hand,
//! is always fatal to the caller that requested it and carries the platform
//! loader's diagnostic.

use std::ffi::{c_void, OsStr, OsString};
use std::fmt;

use libloading::Library;
use thiserror::Error;
use tracing::debug;

/// Error raised when a shared library cannot be opened.
#[derive(Debug, Error)]
#[error("failed to load shared library `{name}`: {source}")]
pub struct LoadError {
    name: String,
    source: libloading::Error,
}

impl LoadError {
    /// Name the caller asked for, before platform decoration.
    pub fn library_name(&self) -> &str {
        &self.name
    }
}

/// Address of a symbol resolved from a loaded shared library.
///
/// The value is only valid while the owning [`SharedLibrary`] remains
/// loaded. [`FunctionAddress::NULL`] means the symbol was absent; callers
/// must check before casting to a function pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionAddress(*mut c_void);

impl FunctionAddress {
    /// Sentinel for "symbol not found".
    pub const NULL: FunctionAddress = FunctionAddress(std::ptr::null_mut());

    pub fn new(ptr: *mut c_void) -> Self {
        Self(ptr)
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0
    }
}

// Addresses of immutable code, not aliased data.
unsafe impl Send for FunctionAddress {}
unsafe impl Sync for FunctionAddress {}

/// A dynamically loaded shared library.
///
/// The inner handle stays live for the lifetime of the value and is
/// released exactly once, by [`SharedLibrary::close`] or by `Drop`.
pub struct SharedLibrary {
    name: String,
    library: Library,
}

impl SharedLibrary {
    /// Load the named library using the platform's standard search rules.
    ///
    /// A bare base name (no path separator, no extension) is decorated with
    /// the platform's shared-library convention, so `"openal"` becomes
    /// `libopenal.so`, `OpenAL.dll` or `libopenal.dylib`. Names carrying a
    /// separator or an extension are passed to the loader untouched.
    pub fn open(name: &str) -> Result<Self, LoadError> {
        let filename: OsString = if is_bare_name(name) {
            libloading::library_filename(name)
        } else {
            OsString::from(name)
        };

        let library = open_native(&filename).map_err(|source| LoadError {
            name: name.to_owned(),
            source,
        })?;
        debug!(library = name, "loaded native library");

        Ok(Self {
            name: name.to_owned(),
            library,
        })
    }

    /// Resolve a symbol, returning [`FunctionAddress::NULL`] when absent.
    pub fn address(&self, symbol: &str) -> FunctionAddress {
        match unsafe { self.library.get::<*mut c_void>(symbol.as_bytes()) } {
            Ok(sym) => FunctionAddress::new(*sym),
            Err(_) => FunctionAddress::NULL,
        }
    }

    /// Name the library was opened under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Release the library.
    ///
    /// Dropping the value does the same; `close` only makes the point of
    /// release explicit. Consuming `self` means no resolve can follow a
    /// close on the same handle.
    pub fn close(self) {
        drop(self);
    }
}

impl fmt::Debug for SharedLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedLibrary")
            .field("name", &self.name)
            .finish()
    }
}

fn is_bare_name(name: &str) -> bool {
    !name.contains(['/', '\\', '.'])
}

// OpenAL expects lazy binding with global symbol visibility, which is not
// libloading's default on POSIX platforms.
#[cfg(unix)]
fn open_native(filename: &OsStr) -> Result<Library, libloading::Error> {
    use libloading::os::unix::{Library as PosixLibrary, RTLD_GLOBAL, RTLD_LAZY};

    unsafe { PosixLibrary::open(Some(filename), RTLD_LAZY | RTLD_GLOBAL) }.map(Library::from)
}

#[cfg(not(unix))]
fn open_native(filename: &OsStr) -> Result<Library, libloading::Error> {
    unsafe { Library::new(filename) }
}
