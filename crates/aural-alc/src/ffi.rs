//! C-faithful ALC types, enum constants and entry-point signatures.
//!
//! Mirrors `AL/alc.h`. Everything here is data for the dynamic binding;
//! no function in this module calls into the native library.

#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_int, c_short, c_uchar, c_uint, c_ushort, c_void};

pub type ALCboolean = c_char;
pub type ALCchar = c_char;
pub type ALCbyte = c_char;
pub type ALCubyte = c_uchar;
pub type ALCshort = c_short;
pub type ALCushort = c_ushort;
pub type ALCint = c_int;
pub type ALCuint = c_uint;
pub type ALCsizei = c_int;
pub type ALCenum = c_int;

/// Opaque device handle owned by the native library.
#[repr(C)]
pub struct ALCdevice {
    _unused: [u8; 0],
}

/// Opaque context handle owned by the native library.
#[repr(C)]
pub struct ALCcontext {
    _unused: [u8; 0],
}

pub const ALC_FALSE: ALCboolean = 0;
pub const ALC_TRUE: ALCboolean = 1;

pub const ALC_FREQUENCY: ALCenum = 0x1007;
pub const ALC_REFRESH: ALCenum = 0x1008;
pub const ALC_SYNC: ALCenum = 0x1009;
pub const ALC_MONO_SOURCES: ALCenum = 0x1010;
pub const ALC_STEREO_SOURCES: ALCenum = 0x1011;

pub const ALC_NO_ERROR: ALCenum = 0;
pub const ALC_INVALID_DEVICE: ALCenum = 0xA001;
pub const ALC_INVALID_CONTEXT: ALCenum = 0xA002;
pub const ALC_INVALID_ENUM: ALCenum = 0xA003;
pub const ALC_INVALID_VALUE: ALCenum = 0xA004;
pub const ALC_OUT_OF_MEMORY: ALCenum = 0xA005;

pub const ALC_MAJOR_VERSION: ALCenum = 0x1000;
pub const ALC_MINOR_VERSION: ALCenum = 0x1001;
pub const ALC_ATTRIBUTES_SIZE: ALCenum = 0x1002;
pub const ALC_ALL_ATTRIBUTES: ALCenum = 0x1003;
pub const ALC_DEFAULT_DEVICE_SPECIFIER: ALCenum = 0x1004;
pub const ALC_DEVICE_SPECIFIER: ALCenum = 0x1005;
pub const ALC_EXTENSIONS: ALCenum = 0x1006;

pub const ALC_CAPTURE_DEVICE_SPECIFIER: ALCenum = 0x310;
pub const ALC_CAPTURE_DEFAULT_DEVICE_SPECIFIER: ALCenum = 0x311;
pub const ALC_CAPTURE_SAMPLES: ALCenum = 0x312;

// ALC_ENUMERATE_ALL_EXT
pub const ALC_DEFAULT_ALL_DEVICES_SPECIFIER: ALCenum = 0x1012;
pub const ALC_ALL_DEVICES_SPECIFIER: ALCenum = 0x1013;

pub type AlcCreateContextFn =
    unsafe extern "C" fn(*mut ALCdevice, *const ALCint) -> *mut ALCcontext;
pub type AlcMakeContextCurrentFn = unsafe extern "C" fn(*mut ALCcontext) -> ALCboolean;
pub type AlcProcessContextFn = unsafe extern "C" fn(*mut ALCcontext);
pub type AlcSuspendContextFn = unsafe extern "C" fn(*mut ALCcontext);
pub type AlcDestroyContextFn = unsafe extern "C" fn(*mut ALCcontext);
pub type AlcGetCurrentContextFn = unsafe extern "C" fn() -> *mut ALCcontext;
pub type AlcGetContextsDeviceFn = unsafe extern "C" fn(*mut ALCcontext) -> *mut ALCdevice;
pub type AlcOpenDeviceFn = unsafe extern "C" fn(*const ALCchar) -> *mut ALCdevice;
pub type AlcCloseDeviceFn = unsafe extern "C" fn(*mut ALCdevice) -> ALCboolean;
pub type AlcGetErrorFn = unsafe extern "C" fn(*mut ALCdevice) -> ALCenum;
pub type AlcIsExtensionPresentFn =
    unsafe extern "C" fn(*mut ALCdevice, *const ALCchar) -> ALCboolean;
pub type AlcGetProcAddressFn =
    unsafe extern "C" fn(*mut ALCdevice, *const ALCchar) -> *mut c_void;
pub type AlcGetEnumValueFn = unsafe extern "C" fn(*mut ALCdevice, *const ALCchar) -> ALCenum;
pub type AlcGetStringFn = unsafe extern "C" fn(*mut ALCdevice, ALCenum) -> *const ALCchar;
pub type AlcGetIntegervFn =
    unsafe extern "C" fn(*mut ALCdevice, ALCenum, ALCsizei, *mut ALCint);
pub type AlcCaptureOpenDeviceFn =
    unsafe extern "C" fn(*const ALCchar, ALCuint, ALCenum, ALCsizei) -> *mut ALCdevice;
pub type AlcCaptureCloseDeviceFn = unsafe extern "C" fn(*mut ALCdevice) -> ALCboolean;
pub type AlcCaptureStartFn = unsafe extern "C" fn(*mut ALCdevice);
pub type AlcCaptureStopFn = unsafe extern "C" fn(*mut ALCdevice);
pub type AlcCaptureSamplesFn = unsafe extern "C" fn(*mut ALCdevice, *mut c_void, ALCsizei);
