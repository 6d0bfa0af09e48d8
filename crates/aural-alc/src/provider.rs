use std::ffi::CString;
use std::fmt;

use aural_dylib::{FunctionAddress, SharedLibrary};
use tracing::warn;

use crate::ffi::{ALCdevice, AlcGetProcAddressFn};

/// Handle of an OpenAL device, or [`DeviceHandle::NULL`] for queries that
/// apply to the library itself rather than any particular device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct DeviceHandle(*mut ALCdevice);

impl DeviceHandle {
    /// Sentinel for "no device".
    pub const NULL: DeviceHandle = DeviceHandle(std::ptr::null_mut());

    pub fn new(raw: *mut ALCdevice) -> Self {
        Self(raw)
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    pub fn as_ptr(self) -> *mut ALCdevice {
        self.0
    }
}

unsafe impl Send for DeviceHandle {}
unsafe impl Sync for DeviceHandle {}

/// Source of ALC function addresses.
///
/// Lookups never fail; a missing function is the [`FunctionAddress::NULL`]
/// sentinel and callers decide whether that is fatal.
pub trait FunctionProvider: Send + Sync + fmt::Debug {
    /// Resolve a function exported by the library itself.
    fn function_address(&self, name: &str) -> FunctionAddress;

    /// Resolve a function through `alcGetProcAddress` for a specific device.
    fn device_function_address(&self, device: DeviceHandle, name: &str) -> FunctionAddress;
}

/// Provider backed by the dynamically loaded OpenAL library.
///
/// Owns the library handle and the `alcGetProcAddress` bootstrap pointer
/// captured at load time; dropping the provider releases the library.
pub struct DynamicProvider {
    library: SharedLibrary,
    get_proc_address: AlcGetProcAddressFn,
}

impl DynamicProvider {
    /// Wrap an already loaded library and its resolved bootstrap pointer.
    pub fn new(library: SharedLibrary, get_proc_address: AlcGetProcAddressFn) -> Self {
        Self {
            library,
            get_proc_address,
        }
    }
}

impl FunctionProvider for DynamicProvider {
    fn function_address(&self, name: &str) -> FunctionAddress {
        let address = self.library.address(name);
        if address.is_null() {
            warn!(function = name, "failed to locate address for ALC function");
        }
        address
    }

    fn device_function_address(&self, device: DeviceHandle, name: &str) -> FunctionAddress {
        let Ok(symbol) = CString::new(name) else {
            return FunctionAddress::NULL;
        };
        let address = unsafe { (self.get_proc_address)(device.as_ptr(), symbol.as_ptr()) };
        if address.is_null() && !device.is_null() {
            warn!(
                function = name,
                "failed to locate address for ALC extension function"
            );
        }
        FunctionAddress::new(address)
    }
}

impl fmt::Debug for DynamicProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicProvider")
            .field("library", &self.library)
            .finish()
    }
}
