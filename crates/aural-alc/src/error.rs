use thiserror::Error;

use aural_dylib::LoadError;

/// Errors that can occur while loading OpenAL or negotiating capabilities.
#[derive(Debug, Error)]
pub enum AlcError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("core ALC function `{symbol}` is missing; make sure the OpenAL library has been loaded correctly")]
    MissingEntryPoint { symbol: &'static str },
    #[error("ALC has already been created")]
    AlreadyInitialized,
    #[error("no ALC capabilities available; make sure OpenAL has been created")]
    NoCapabilities,
    #[error("native call returned an unexpected null pointer for {what}")]
    NullPointer { what: &'static str },
}
