//! dmtx reads and writes Data Matrix symbols by driving the native libdmtx
//! engine through its C interface.
//!
//! The engine owns image analysis and error correction; this crate owns the
//! calling protocol: normalizing pixel input, keeping every engine handle on
//! a guarded create/use/destroy path, running the find-region/decode loop
//! under an optional deadline and result cap, and mapping the engine's
//! fitted-square coordinates back to pixel rectangles.
//!
//! The shared library is located at runtime (`DMTX_LIBRARY` overrides the
//! platform default names), so the crate builds without the engine present;
//! [`library_version`] probes whether it can actually be loaded.

pub mod encode;
mod engine;
pub mod pixel;
pub mod scan;
mod trace;
pub mod util;

pub use encode::{encode, EncodeOptions, EncodedImage, Scheme, SymbolSize};
pub use engine::library_version;
pub use pixel::{PixelBuffer, PixelSource};
pub use scan::{decode, DecodeOptions, DecodedSymbol, Rect};
pub use util::{DmtxError, DmtxResult};
