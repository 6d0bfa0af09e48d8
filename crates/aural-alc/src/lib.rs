//! Dynamic binding to the OpenAL library's ALC surface.
//!
//! This crate loads the native OpenAL library at runtime, resolves the ALC
//! entry points through a [`FunctionProvider`], and negotiates per-device
//! [`AlcCapabilities`]. Initialization is explicit: build an [`Alc`] with
//! [`Alc::create`] (default loading) or [`Alc::with_provider`] (custom
//! loading), then negotiate capability sets for the devices you open.
//! Negotiation is expensive, so callers are expected to cache the returned
//! set per device.
//!
//! Only one live [`Alc`] is permitted per process; a second `create` while
//! one exists is reported as an error. Once negotiation completes, the
//! binding and its capability sets are read-only and safe to share across
//! threads.

mod capabilities;
mod error;
pub mod ffi;
mod provider;

use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

pub use aural_dylib::{FunctionAddress, LoadError, SharedLibrary};

pub use crate::capabilities::{check_extension, AlcCapabilities, AlcFunctions};
pub use crate::error::AlcError;
pub use crate::provider::{DeviceHandle, DynamicProvider, FunctionProvider};

use crate::ffi::AlcGetProcAddressFn;

/// Symbol resolved first; everything else can be reached through it.
const BOOTSTRAP_SYMBOL: &str = "alcGetProcAddress";

/// One live binding is permitted per process.
static ALC_LIVE: AtomicBool = AtomicBool::new(false);

/// Configuration for [`Alc::create`].
#[derive(Debug, Clone, Default)]
pub struct AlcConfig {
    /// Overrides the on-disk name of the OpenAL library. Fallback names or
    /// alternate search paths are the caller's responsibility, through
    /// this override.
    pub library_name: Option<String>,
}

/// Default OpenAL library name for the host platform. 32-bit processes
/// carry a `32` suffix by convention.
pub fn default_library_name() -> String {
    let base = if cfg!(target_os = "windows") {
        "OpenAL"
    } else {
        "openal"
    };
    if cfg!(target_pointer_width = "64") {
        base.to_owned()
    } else {
        format!("{base}32")
    }
}

/// Live binding to the OpenAL library.
///
/// Owns the loaded library (through its provider) and the cached
/// library-level capability set. [`Alc::destroy`] releases everything and
/// is idempotent; `Drop` calls it as well.
#[derive(Debug)]
pub struct Alc {
    state: Option<AlcState>,
}

#[derive(Debug)]
struct AlcState {
    provider: Arc<dyn FunctionProvider>,
    library_capabilities: AlcCapabilities,
}

impl Alc {
    /// Load the OpenAL library and initialize the binding.
    ///
    /// Picks the platform default library name unless overridden, then
    /// resolves the `alcGetProcAddress` bootstrap. If the bootstrap is
    /// missing the partially opened library is released before the error
    /// returns, so no handle leaks.
    pub fn create(config: &AlcConfig) -> Result<Self, AlcError> {
        let name = config
            .library_name
            .clone()
            .unwrap_or_else(default_library_name);
        let library = SharedLibrary::open(&name)?;

        let bootstrap = library.address(BOOTSTRAP_SYMBOL);
        if bootstrap.is_null() {
            library.close();
            return Err(AlcError::MissingEntryPoint {
                symbol: BOOTSTRAP_SYMBOL,
            });
        }
        let get_proc_address: AlcGetProcAddressFn =
            unsafe { mem::transmute(bootstrap.as_ptr()) };

        Self::with_provider(Arc::new(DynamicProvider::new(library, get_proc_address)))
    }

    /// Initialize the binding with a caller-supplied provider.
    ///
    /// This is the custom-loading escape hatch: anything that can resolve
    /// ALC function addresses can stand in for the default dynamic
    /// loader. Fails with [`AlcError::AlreadyInitialized`] while another
    /// instance is live, leaving that instance untouched.
    pub fn with_provider(provider: Arc<dyn FunctionProvider>) -> Result<Self, AlcError> {
        if ALC_LIVE
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AlcError::AlreadyInitialized);
        }

        let library_capabilities = AlcCapabilities::library_level(provider.clone());
        Ok(Self {
            state: Some(AlcState {
                provider,
                library_capabilities,
            }),
        })
    }

    /// Capability set resolved directly from the library, for no
    /// particular device. Lets callers reach `alcOpenDevice` before any
    /// device exists.
    pub fn capabilities(&self) -> Result<&AlcCapabilities, AlcError> {
        self.state
            .as_ref()
            .map(|state| &state.library_capabilities)
            .ok_or(AlcError::NoCapabilities)
    }

    /// Negotiate the capability set of the given device.
    pub fn create_capabilities(&self, device: DeviceHandle) -> Result<AlcCapabilities, AlcError> {
        let state = self.state.as_ref().ok_or(AlcError::NoCapabilities)?;
        capabilities::negotiate(state.provider.clone(), device)
    }

    /// Provider used to resolve ALC function addresses.
    pub fn provider(&self) -> Result<&Arc<dyn FunctionProvider>, AlcError> {
        self.state
            .as_ref()
            .map(|state| &state.provider)
            .ok_or(AlcError::NoCapabilities)
    }

    /// Release the cached capabilities and the loaded library.
    ///
    /// A second call is a no-op.
    pub fn destroy(&mut self) {
        if let Some(state) = self.state.take() {
            drop(state);
            ALC_LIVE.store(false, Ordering::SeqCst);
            debug!("destroyed ALC binding");
        }
    }
}

impl Drop for Alc {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_library_name_matches_platform() {
        let name = default_library_name();
        #[cfg(all(target_os = "windows", target_pointer_width = "64"))]
        assert_eq!(name, "OpenAL");
        #[cfg(all(target_os = "windows", target_pointer_width = "32"))]
        assert_eq!(name, "OpenAL32");
        #[cfg(all(not(target_os = "windows"), target_pointer_width = "64"))]
        assert_eq!(name, "openal");
        #[cfg(all(not(target_os = "windows"), target_pointer_width = "32"))]
        assert_eq!(name, "openal32");
    }
}
