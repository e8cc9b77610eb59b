//! The decode entry point and the region scan loop.
//!
//! Decoding is an iterative protocol against the engine: create an image and
//! a decoder, apply the optional tuning properties, then repeatedly ask for
//! the next candidate region and attempt a full matrix decode on it. The
//! loop ends when the engine stops returning regions — image exhausted or
//! deadline passed, indistinguishable by design — or when the result cap is
//! reached.

pub(crate) mod geometry;

use std::os::raw::c_int;

use crate::encode::SymbolSize;
use crate::engine::ffi::{self, DmtxTime};
use crate::engine::{deadline_after, engine, DecoderHandle, ImageHandle};
use crate::pixel::PixelSource;
use crate::trace::{trace_event, trace_span};
use crate::util::{DmtxError, DmtxResult};

pub use geometry::Rect;

/// Optional tuning for [`decode`]. Unset fields leave the engine defaults in
/// place.
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    /// Wall-clock budget for region search, in milliseconds. The deadline is
    /// checked by the engine between region searches, never during an
    /// in-flight decode of a single region.
    pub timeout_ms: Option<u32>,
    /// Gap between scan lines, in pixels.
    pub gap_size: Option<i32>,
    /// Integer downsampling factor applied before decoding. Result
    /// rectangles are mapped back to original-resolution coordinates.
    pub shrink: usize,
    /// Expected symbol size class.
    pub shape: Option<SymbolSize>,
    /// Maximum deviation from squareness, in degrees.
    pub deviation: Option<i32>,
    /// Edge detection threshold.
    pub threshold: Option<i32>,
    /// Minimum expected edge length, in pixels.
    pub min_edge: Option<i32>,
    /// Maximum expected edge length, in pixels.
    pub max_edge: Option<i32>,
    /// Error-correction budget; non-positive values fall back to the
    /// engine's automatic setting.
    pub corrections: Option<i32>,
    /// Stop after this many symbols; unbounded when unset.
    pub max_count: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            gap_size: None,
            shrink: 1,
            shape: None,
            deviation: None,
            threshold: None,
            min_edge: None,
            max_edge: None,
            corrections: None,
            max_count: None,
        }
    }
}

/// One symbol read out of an image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedSymbol {
    /// Decoded payload bytes.
    pub data: Vec<u8>,
    /// Bounding rectangle in original (pre-shrink) pixel coordinates.
    pub rect: Rect,
}

/// Decoder tuning properties in declared application order. Entries whose
/// value is unset are skipped.
fn property_table(options: &DecodeOptions) -> [(c_int, Option<c_int>); 6] {
    [
        (ffi::DMTX_PROP_SCAN_GAP, options.gap_size),
        (
            ffi::DMTX_PROP_SYMBOL_SIZE,
            options.shape.map(|shape| shape as c_int),
        ),
        (ffi::DMTX_PROP_SQUARE_DEVN, options.deviation),
        (ffi::DMTX_PROP_EDGE_THRESH, options.threshold),
        (ffi::DMTX_PROP_EDGE_MIN, options.min_edge),
        (ffi::DMTX_PROP_EDGE_MAX, options.max_edge),
    ]
}

/// Bounded iterator over the symbols the engine finds in one image.
///
/// Each `next` call runs one find-region/decode round trip. The region and
/// message handles it creates are dropped before the call returns, so no
/// engine handle survives an iteration. A fresh `RegionScan` is built per
/// decode call; it cannot be restarted.
struct RegionScan<'d, 'i> {
    decoder: &'d DecoderHandle<'i>,
    deadline: Option<DmtxTime>,
    corrections: c_int,
    shrink: usize,
    remaining: Option<usize>,
    done: bool,
}

impl Iterator for RegionScan<'_, '_> {
    type Item = DecodedSymbol;

    fn next(&mut self) -> Option<DecodedSymbol> {
        if self.done {
            return None;
        }
        loop {
            let region = match self.decoder.find_next_region(self.deadline) {
                Some(region) => region,
                // No more regions, or the deadline passed first; the engine
                // does not say which, and neither ends the scan in error.
                None => {
                    self.done = true;
                    return None;
                }
            };
            let decoded = self
                .decoder
                .decode_region(&region, self.corrections)
                .map(|message| DecodedSymbol {
                    data: message.payload(),
                    rect: geometry::region_rect(&region.fit_to_raw(), self.shrink),
                });
            // Region (and message) handles are released here, whatever the
            // decode outcome.
            drop(region);
            if let Some(symbol) = decoded {
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                    if *remaining == 0 {
                        self.done = true;
                    }
                }
                return Some(symbol);
            }
        }
    }
}

/// Decodes every Data Matrix symbol the engine can find in `source`.
///
/// Results are materialized eagerly, in the engine's discovery order; an
/// image without symbols yields an empty vector. Validation runs before any
/// engine resource is created, and every engine handle is released on every
/// exit path.
pub fn decode<S: PixelSource + ?Sized>(
    source: &S,
    options: &DecodeOptions,
) -> DmtxResult<Vec<DecodedSymbol>> {
    if let Some(max_count) = options.max_count {
        if max_count < 1 {
            return Err(DmtxError::InvalidMaxCount { value: max_count });
        }
    }
    if options.shrink < 1 {
        return Err(DmtxError::InvalidShrink {
            value: options.shrink,
        });
    }
    let buffer = source.to_pixel_buffer()?;

    let engine = engine()?;
    let _span = trace_span!(
        "decode",
        width = buffer.width(),
        height = buffer.height(),
        bits_per_pixel = buffer.bits_per_pixel()
    )
    .entered();

    let deadline = options
        .timeout_ms
        .map(|timeout_ms| deadline_after(engine, timeout_ms));

    let image = ImageHandle::new(
        engine,
        buffer.pixels(),
        buffer.width(),
        buffer.height(),
        buffer.pack_order(),
    )?;
    let decoder = DecoderHandle::new(engine, &image, options.shrink)?;

    for (prop, value) in property_table(options) {
        if let Some(value) = value {
            decoder.set_property(prop, value);
        }
    }

    let corrections = match options.corrections {
        Some(corrections) if corrections > 0 => corrections,
        _ => ffi::DMTX_UNDEFINED,
    };

    let results: Vec<DecodedSymbol> = RegionScan {
        decoder: &decoder,
        deadline,
        corrections,
        shrink: options.shrink,
        remaining: options.max_count,
        done: false,
    }
    .collect();

    trace_event!("decode_done", count = results.len());
    Ok(results)
}
