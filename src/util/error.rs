//! Error types for dmtx.

use thiserror::Error;

/// Result alias for dmtx operations.
pub type DmtxResult<T> = std::result::Result<T, DmtxError>;

/// Errors raised by the decode and encode entry points.
///
/// Validation variants (`BufferSizeMismatch`, `UnsupportedBitsPerPixel`,
/// `InvalidMaxCount`, `InvalidShrink`, `UnknownScheme`, `UnknownSymbolSize`)
/// are checked before any engine resource is created, so a failed call never
/// leaks a native handle. `ResourceCreation` and `EngineUnavailable` report
/// that the engine could not supply a handle; `Encoding` reports that the
/// engine ran but rejected the payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DmtxError {
    /// The pixel buffer length is not a whole multiple of the pixel count.
    #[error("pixel buffer of {len} bytes does not divide evenly across {area} pixels")]
    BufferSizeMismatch { len: usize, area: usize },
    /// The buffer implies a color depth the engine cannot ingest.
    #[error("unsupported bits-per-pixel [{bpp}]: expected one of {{8, 16, 24, 32}}")]
    UnsupportedBitsPerPixel { bpp: usize },
    /// `max_count` must admit at least one result.
    #[error("invalid max_count [{value}]: must be at least 1")]
    InvalidMaxCount { value: usize },
    /// The shrink factor is a downsampling divisor and must be at least 1.
    #[error("invalid shrink [{value}]: must be at least 1")]
    InvalidShrink { value: usize },
    /// The scheme name matched none of the enumerated encodation schemes.
    #[error("unknown scheme [{name}]: expected one of {}", crate::encode::Scheme::NAMES.join(", "))]
    UnknownScheme { name: String },
    /// The size name matched none of the enumerated symbol sizes.
    #[error("unknown size [{name}]: expected one of {}", crate::encode::SymbolSize::NAMES.join(", "))]
    UnknownSymbolSize { name: String },
    /// An engine constructor returned a null handle.
    #[error("could not create {kind}")]
    ResourceCreation { kind: &'static str },
    /// The engine shared library could not be loaded or is missing symbols.
    #[error("data matrix engine unavailable: {reason}")]
    EngineUnavailable { reason: String },
    /// The engine ran but could not fit the payload into the requested symbol.
    #[error("could not encode {len} byte payload: it does not fit the requested size and scheme")]
    Encoding { len: usize },
}
