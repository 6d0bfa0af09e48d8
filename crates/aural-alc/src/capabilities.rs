use std::collections::HashSet;
use std::ffi::{CStr, CString};
use std::fmt;
use std::mem;
use std::sync::Arc;

use aural_dylib::FunctionAddress;
use tracing::{debug, warn};

use crate::error::AlcError;
use crate::ffi::{
    ALCint, AlcGetIntegervFn, AlcGetStringFn, AlcIsExtensionPresentFn, ALC_EXTENSIONS,
    ALC_FALSE, ALC_MAJOR_VERSION, ALC_MINOR_VERSION,
};
use crate::provider::{DeviceHandle, FunctionProvider};

/// Known ALC version milestones, in release order. Reaching a milestone
/// adds an `OpenALC{major}{minor}` token to the supported set.
const ALC_VERSIONS: &[(ALCint, ALCint)] = &[(1, 0), (1, 1)];

const VERSION_TOKEN_PREFIX: &str = "OpenALC";

/// Cached addresses of the ALC 1.0 and 1.1 entry points.
///
/// Only `alcGetIntegerv`, `alcGetString`, `alcIsExtensionPresent` and the
/// `alcGetProcAddress` bootstrap are guaranteed by a correctly loaded
/// library; every other field may hold the null sentinel.
#[derive(Debug, Clone, Copy)]
pub struct AlcFunctions {
    pub create_context: FunctionAddress,
    pub make_context_current: FunctionAddress,
    pub process_context: FunctionAddress,
    pub suspend_context: FunctionAddress,
    pub destroy_context: FunctionAddress,
    pub get_current_context: FunctionAddress,
    pub get_contexts_device: FunctionAddress,
    pub open_device: FunctionAddress,
    pub close_device: FunctionAddress,
    pub get_error: FunctionAddress,
    pub is_extension_present: FunctionAddress,
    pub get_proc_address: FunctionAddress,
    pub get_enum_value: FunctionAddress,
    pub get_string: FunctionAddress,
    pub get_integerv: FunctionAddress,
    pub capture_open_device: FunctionAddress,
    pub capture_close_device: FunctionAddress,
    pub capture_start: FunctionAddress,
    pub capture_stop: FunctionAddress,
    pub capture_samples: FunctionAddress,
}

impl AlcFunctions {
    fn resolve(provider: &dyn FunctionProvider) -> Self {
        Self {
            create_context: provider.function_address("alcCreateContext"),
            make_context_current: provider.function_address("alcMakeContextCurrent"),
            process_context: provider.function_address("alcProcessContext"),
            suspend_context: provider.function_address("alcSuspendContext"),
            destroy_context: provider.function_address("alcDestroyContext"),
            get_current_context: provider.function_address("alcGetCurrentContext"),
            get_contexts_device: provider.function_address("alcGetContextsDevice"),
            open_device: provider.function_address("alcOpenDevice"),
            close_device: provider.function_address("alcCloseDevice"),
            get_error: provider.function_address("alcGetError"),
            is_extension_present: provider.function_address("alcIsExtensionPresent"),
            get_proc_address: provider.function_address("alcGetProcAddress"),
            get_enum_value: provider.function_address("alcGetEnumValue"),
            get_string: provider.function_address("alcGetString"),
            get_integerv: provider.function_address("alcGetIntegerv"),
            capture_open_device: provider.function_address("alcCaptureOpenDevice"),
            capture_close_device: provider.function_address("alcCaptureCloseDevice"),
            capture_start: provider.function_address("alcCaptureStart"),
            capture_stop: provider.function_address("alcCaptureStop"),
            capture_samples: provider.function_address("alcCaptureSamples"),
        }
    }
}

/// Immutable capability set for one OpenAL device.
///
/// Bundles the provider used to resolve further symbols, the device the
/// set applies to ([`DeviceHandle::NULL`] for the library-level set), the
/// supported extension/version tokens and the cached [`AlcFunctions`]
/// table. Built once per device and shared read-only afterwards.
pub struct AlcCapabilities {
    provider: Arc<dyn FunctionProvider>,
    device: DeviceHandle,
    extensions: HashSet<String>,
    functions: AlcFunctions,
}

impl AlcCapabilities {
    /// Capability set resolved directly from the library, for no particular
    /// device. No extension negotiation happens here; the token set is
    /// empty until a device is available to probe.
    pub(crate) fn library_level(provider: Arc<dyn FunctionProvider>) -> Self {
        let functions = AlcFunctions::resolve(provider.as_ref());
        Self {
            provider,
            device: DeviceHandle::NULL,
            extensions: HashSet::new(),
            functions,
        }
    }

    /// Device this set was negotiated for.
    pub fn device(&self) -> DeviceHandle {
        self.device
    }

    /// Whether the named extension or version token is supported.
    pub fn supports(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    /// Iterate the supported extension/version tokens.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Cached ALC entry-point table.
    pub fn functions(&self) -> &AlcFunctions {
        &self.functions
    }

    /// Provider for resolving symbols beyond the cached table.
    pub fn provider(&self) -> &Arc<dyn FunctionProvider> {
        &self.provider
    }
}

impl fmt::Debug for AlcCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlcCapabilities")
            .field("device", &self.device)
            .field("extensions", &self.extensions)
            .finish()
    }
}

/// Negotiate the capability set of `device`.
///
/// Queries the `(major, minor)` ALC version, synthesizes version tokens
/// for every reached milestone, then keeps only those advertised
/// extensions that `alcIsExtensionPresent` confirms for the device.
pub(crate) fn negotiate(
    provider: Arc<dyn FunctionProvider>,
    device: DeviceHandle,
) -> Result<AlcCapabilities, AlcError> {
    let get_integerv = require(provider.as_ref(), "alcGetIntegerv")?;
    let get_string = require(provider.as_ref(), "alcGetString")?;
    let is_extension_present = require(provider.as_ref(), "alcIsExtensionPresent")?;

    let get_integerv: AlcGetIntegervFn = unsafe { mem::transmute(get_integerv.as_ptr()) };
    let get_string: AlcGetStringFn = unsafe { mem::transmute(get_string.as_ptr()) };
    let is_extension_present: AlcIsExtensionPresentFn =
        unsafe { mem::transmute(is_extension_present.as_ptr()) };

    let mut major: ALCint = 0;
    let mut minor: ALCint = 0;
    unsafe {
        get_integerv(device.as_ptr(), ALC_MAJOR_VERSION, 1, &mut major);
        get_integerv(device.as_ptr(), ALC_MINOR_VERSION, 1, &mut minor);
    }

    let mut extensions = HashSet::with_capacity(16);

    // Version tokens come from the numeric query, not the extension
    // string, and are trusted without probing.
    for &(milestone_major, milestone_minor) in ALC_VERSIONS {
        if version_reaches(major, minor, milestone_major, milestone_minor) {
            extensions.insert(format!(
                "{VERSION_TOKEN_PREFIX}{milestone_major}{milestone_minor}"
            ));
        }
    }

    let raw = unsafe { get_string(device.as_ptr(), ALC_EXTENSIONS) };
    if raw.is_null() {
        return Err(AlcError::NullPointer {
            what: "the ALC_EXTENSIONS string",
        });
    }
    let advertised = unsafe { CStr::from_ptr(raw) }.to_string_lossy();

    for token in advertised.split_whitespace() {
        let Ok(name) = CString::new(token) else {
            continue;
        };
        let confirmed =
            unsafe { is_extension_present(device.as_ptr(), name.as_ptr()) } != ALC_FALSE;
        if confirmed {
            extensions.insert(token.to_owned());
        }
    }

    debug!(
        device = ?device,
        major,
        minor,
        supported = extensions.len(),
        "negotiated ALC capabilities"
    );

    let functions = AlcFunctions::resolve(provider.as_ref());
    Ok(AlcCapabilities {
        provider,
        device,
        extensions,
        functions,
    })
}

fn require(
    provider: &dyn FunctionProvider,
    symbol: &'static str,
) -> Result<FunctionAddress, AlcError> {
    let address = provider.function_address(symbol);
    if address.is_null() {
        return Err(AlcError::MissingEntryPoint { symbol });
    }
    Ok(address)
}

/// True when the queried `(major, minor)` version reaches the milestone.
fn version_reaches(
    major: ALCint,
    minor: ALCint,
    milestone_major: ALCint,
    milestone_minor: ALCint,
) -> bool {
    major > milestone_major || (major == milestone_major && minor >= milestone_minor)
}

/// Gate an extension's function table on whether every entry point
/// resolved.
///
/// A library may advertise an extension in its name string while missing
/// individual entry points; callers then receive `None` rather than a
/// half-populated table. The degraded case is logged once per call.
pub fn check_extension<T>(extension: &str, functions: T, supported: bool) -> Option<T> {
    if supported {
        Some(functions)
    } else {
        warn!(
            extension,
            "extension was reported as available but an entry point is missing"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn milestone_inclusion_is_monotonic() {
        assert!(!version_reaches(0, 9, 1, 0));
        assert!(version_reaches(1, 0, 1, 0));
        assert!(!version_reaches(1, 0, 1, 1));
        assert!(version_reaches(1, 1, 1, 1));
        assert!(version_reaches(3, 2, 1, 0));
        assert!(version_reaches(4, 0, 1, 1));
    }

    #[test]
    fn check_extension_gates_on_flag() {
        assert_eq!(check_extension("ALC_EXT_EFX", 7, true), Some(7));
        assert_eq!(check_extension("ALC_EXT_EFX", 7, false), None);
    }
}
