//! Lifecycle and negotiation tests driven by a fake function provider.
//!
//! The shims below stand in for the native ALC entry points, so the full
//! negotiation path runs without an OpenAL library installed. The binding
//! allows one live instance per process, so every test serializes on a
//! shared lock and tears its instance down before releasing it.

use std::ffi::{c_void, CStr};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use aural_alc::ffi::{
    ALCboolean, ALCchar, ALCdevice, ALCenum, ALCint, ALCsizei, AlcGetIntegervFn,
    AlcGetStringFn, AlcIsExtensionPresentFn, ALC_EXTENSIONS, ALC_FALSE, ALC_MAJOR_VERSION,
    ALC_MINOR_VERSION, ALC_TRUE,
};
use aural_alc::{Alc, AlcError, DeviceHandle, FunctionAddress, FunctionProvider};

static LOCK: Mutex<()> = Mutex::new(());

static REPORTED_MINOR: AtomicI32 = AtomicI32::new(1);
static NULL_EXTENSIONS: AtomicBool = AtomicBool::new(false);

const EXTENSIONS: &[u8] = b"ALC_EXT_CAPTURE ALC_ENUMERATE_ALL_EXT ALC_EXT_phantom\0";

unsafe extern "C" fn fake_get_integerv(
    _device: *mut ALCdevice,
    param: ALCenum,
    _size: ALCsizei,
    values: *mut ALCint,
) {
    let value = match param {
        ALC_MAJOR_VERSION => 1,
        ALC_MINOR_VERSION => REPORTED_MINOR.load(Ordering::SeqCst),
        _ => 0,
    };
    *values = value;
}

unsafe extern "C" fn fake_get_string(
    _device: *mut ALCdevice,
    param: ALCenum,
) -> *const ALCchar {
    if param == ALC_EXTENSIONS && !NULL_EXTENSIONS.load(Ordering::SeqCst) {
        EXTENSIONS.as_ptr() as *const ALCchar
    } else {
        std::ptr::null()
    }
}

unsafe extern "C" fn fake_is_extension_present(
    _device: *mut ALCdevice,
    name: *const ALCchar,
) -> ALCboolean {
    let name = CStr::from_ptr(name);
    if name.to_bytes() == b"ALC_EXT_phantom" {
        ALC_FALSE
    } else {
        ALC_TRUE
    }
}

#[derive(Default, Debug)]
struct FakeProvider {
    omit: Option<&'static str>,
}

impl FunctionProvider for FakeProvider {
    fn function_address(&self, name: &str) -> FunctionAddress {
        if Some(name) == self.omit {
            return FunctionAddress::NULL;
        }
        match name {
            "alcGetIntegerv" => {
                FunctionAddress::new(fake_get_integerv as AlcGetIntegervFn as *mut c_void)
            }
            "alcGetString" => {
                FunctionAddress::new(fake_get_string as AlcGetStringFn as *mut c_void)
            }
            "alcIsExtensionPresent" => FunctionAddress::new(
                fake_is_extension_present as AlcIsExtensionPresentFn as *mut c_void,
            ),
            _ => FunctionAddress::NULL,
        }
    }

    fn device_function_address(&self, _device: DeviceHandle, _name: &str) -> FunctionAddress {
        FunctionAddress::NULL
    }
}

fn fake_device() -> DeviceHandle {
    DeviceHandle::new(0x7e57 as *mut ALCdevice)
}

fn reset_shims() {
    REPORTED_MINOR.store(1, Ordering::SeqCst);
    NULL_EXTENSIONS.store(false, Ordering::SeqCst);
}

#[test]
fn negotiates_device_capabilities() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    reset_shims();

    let alc = Alc::with_provider(Arc::new(FakeProvider::default())).unwrap();

    let library_caps = alc.capabilities().unwrap();
    assert!(library_caps.device().is_null());
    assert_eq!(library_caps.extensions().count(), 0);
    assert!(!library_caps.functions().get_integerv.is_null());
    assert!(library_caps.functions().open_device.is_null());

    let caps = alc.create_capabilities(fake_device()).unwrap();
    assert_eq!(caps.device(), fake_device());
    assert!(caps.supports("OpenALC10"));
    assert!(caps.supports("OpenALC11"));
    assert!(caps.supports("ALC_EXT_CAPTURE"));
    assert!(caps.supports("ALC_ENUMERATE_ALL_EXT"));
    assert!(!caps.supports("ALC_EXT_phantom"));
}

#[test]
fn older_versions_skip_newer_milestones() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    reset_shims();
    REPORTED_MINOR.store(0, Ordering::SeqCst);

    let alc = Alc::with_provider(Arc::new(FakeProvider::default())).unwrap();
    let caps = alc.create_capabilities(fake_device()).unwrap();
    assert!(caps.supports("OpenALC10"));
    assert!(!caps.supports("OpenALC11"));
}

#[test]
fn null_extensions_string_is_reported() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    reset_shims();
    NULL_EXTENSIONS.store(true, Ordering::SeqCst);

    let alc = Alc::with_provider(Arc::new(FakeProvider::default())).unwrap();
    let err = alc.create_capabilities(fake_device()).unwrap_err();
    assert!(matches!(err, AlcError::NullPointer { .. }));
}

#[test]
fn missing_core_function_fails_fast() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    reset_shims();

    let alc = Alc::with_provider(Arc::new(FakeProvider {
        omit: Some("alcGetIntegerv"),
    }))
    .unwrap();
    let err = alc.create_capabilities(fake_device()).unwrap_err();
    assert!(matches!(
        err,
        AlcError::MissingEntryPoint {
            symbol: "alcGetIntegerv"
        }
    ));
}

#[test]
fn second_create_reports_already_initialized() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    reset_shims();

    let first = Alc::with_provider(Arc::new(FakeProvider::default())).unwrap();
    let second = Alc::with_provider(Arc::new(FakeProvider::default()));
    assert!(matches!(second.unwrap_err(), AlcError::AlreadyInitialized));

    // The first instance is untouched by the failed attempt.
    assert!(first.capabilities().is_ok());
    assert!(first.create_capabilities(fake_device()).is_ok());
}

#[test]
fn destroy_is_idempotent_and_frees_the_slot() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    reset_shims();

    let mut alc = Alc::with_provider(Arc::new(FakeProvider::default())).unwrap();
    alc.destroy();
    alc.destroy();

    assert!(matches!(
        alc.capabilities().unwrap_err(),
        AlcError::NoCapabilities
    ));
    assert!(matches!(
        alc.create_capabilities(fake_device()).unwrap_err(),
        AlcError::NoCapabilities
    ));
    assert!(matches!(
        alc.provider().unwrap_err(),
        AlcError::NoCapabilities
    ));

    // The process-wide slot is free again.
    let again = Alc::with_provider(Arc::new(FakeProvider::default())).unwrap();
    drop(again);
}
