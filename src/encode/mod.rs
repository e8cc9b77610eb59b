//! The encode entry point and the scheme/size enumerations.
//!
//! Encoding is a short engine session: acquire an encoder, request a symbol
//! size and an encodation scheme, run the native encode, then copy the
//! produced pixel buffer out. The scheme and size enumerations carry the
//! engine's discriminants and the canonical names external collaborators
//! (CLIs) present to users.

use std::fmt;
use std::str::FromStr;

use crate::engine::ffi;
use crate::engine::{engine, EncoderHandle};
use crate::trace::{trace_event, trace_span};
use crate::util::{DmtxError, DmtxResult};

/// Data encodation scheme of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum Scheme {
    AutoFast = -2,
    AutoBest = -1,
    Ascii = 0,
    C40 = 1,
    Text = 2,
    X12 = 3,
    Edifact = 4,
    Base256 = 5,
}

impl Scheme {
    /// Canonical scheme names, in engine declaration order.
    pub const NAMES: [&'static str; 8] = [
        "AutoFast", "AutoBest", "Ascii", "C40", "Text", "X12", "Edifact", "Base256",
    ];

    const ALL: [Scheme; 8] = [
        Scheme::AutoFast,
        Scheme::AutoBest,
        Scheme::Ascii,
        Scheme::C40,
        Scheme::Text,
        Scheme::X12,
        Scheme::Edifact,
        Scheme::Base256,
    ];

    fn name(self) -> &'static str {
        Self::NAMES[(self as i32 + 2) as usize]
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = DmtxError;

    /// Parses a canonical scheme name, ignoring ASCII case.
    fn from_str(s: &str) -> DmtxResult<Self> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DmtxError::UnknownScheme {
                name: s.to_owned(),
            })
    }
}

/// Module-grid dimension class of a symbol, or one of the automatic
/// selection modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum SymbolSize {
    RectAuto = -3,
    SquareAuto = -2,
    ShapeAuto = -1,
    S10x10 = 0,
    S12x12 = 1,
    S14x14 = 2,
    S16x16 = 3,
    S18x18 = 4,
    S20x20 = 5,
    S22x22 = 6,
    S24x24 = 7,
    S26x26 = 8,
    S32x32 = 9,
    S36x36 = 10,
    S40x40 = 11,
    S44x44 = 12,
    S48x48 = 13,
    S52x52 = 14,
    S64x64 = 15,
    S72x72 = 16,
    S80x80 = 17,
    S88x88 = 18,
    S96x96 = 19,
    S104x104 = 20,
    S120x120 = 21,
    S132x132 = 22,
    S144x144 = 23,
    S8x18 = 24,
    S8x32 = 25,
    S12x26 = 26,
    S12x36 = 27,
    S16x36 = 28,
    S16x48 = 29,
}

impl SymbolSize {
    /// Canonical size names, in engine declaration order.
    pub const NAMES: [&'static str; 33] = [
        "RectAuto",
        "SquareAuto",
        "ShapeAuto",
        "10x10",
        "12x12",
        "14x14",
        "16x16",
        "18x18",
        "20x20",
        "22x22",
        "24x24",
        "26x26",
        "32x32",
        "36x36",
        "40x40",
        "44x44",
        "48x48",
        "52x52",
        "64x64",
        "72x72",
        "80x80",
        "88x88",
        "96x96",
        "104x104",
        "120x120",
        "132x132",
        "144x144",
        "8x18",
        "8x32",
        "12x26",
        "12x36",
        "16x36",
        "16x48",
    ];

    const ALL: [SymbolSize; 33] = [
        SymbolSize::RectAuto,
        SymbolSize::SquareAuto,
        SymbolSize::ShapeAuto,
        SymbolSize::S10x10,
        SymbolSize::S12x12,
        SymbolSize::S14x14,
        SymbolSize::S16x16,
        SymbolSize::S18x18,
        SymbolSize::S20x20,
        SymbolSize::S22x22,
        SymbolSize::S24x24,
        SymbolSize::S26x26,
        SymbolSize::S32x32,
        SymbolSize::S36x36,
        SymbolSize::S40x40,
        SymbolSize::S44x44,
        SymbolSize::S48x48,
        SymbolSize::S52x52,
        SymbolSize::S64x64,
        SymbolSize::S72x72,
        SymbolSize::S80x80,
        SymbolSize::S88x88,
        SymbolSize::S96x96,
        SymbolSize::S104x104,
        SymbolSize::S120x120,
        SymbolSize::S132x132,
        SymbolSize::S144x144,
        SymbolSize::S8x18,
        SymbolSize::S8x32,
        SymbolSize::S12x26,
        SymbolSize::S12x36,
        SymbolSize::S16x36,
        SymbolSize::S16x48,
    ];

    fn name(self) -> &'static str {
        Self::NAMES[(self as i32 + 3) as usize]
    }
}

impl fmt::Display for SymbolSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymbolSize {
    type Err = DmtxError;

    /// Parses a canonical size name, ignoring ASCII case.
    fn from_str(s: &str) -> DmtxResult<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DmtxError::UnknownSymbolSize {
                name: s.to_owned(),
            })
    }
}

/// Options for [`encode`]. Unset fields use the engine defaults: `Ascii`
/// encodation and automatic shape selection.
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeOptions {
    pub scheme: Option<Scheme>,
    pub size: Option<SymbolSize>,
}

/// Rendered symbol as a flat pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub width: usize,
    pub height: usize,
    pub bits_per_pixel: usize,
    pub pixels: Vec<u8>,
}

/// Encodes `payload` into a Data Matrix symbol image.
///
/// Fails with [`DmtxError::Encoding`] when the payload does not fit the
/// requested size and scheme. The encoder handle is released on every exit
/// path.
pub fn encode(payload: &[u8], options: &EncodeOptions) -> DmtxResult<EncodedImage> {
    let scheme = options.scheme.unwrap_or(Scheme::Ascii);
    let size = options.size.unwrap_or(SymbolSize::ShapeAuto);

    let engine = engine()?;
    let _span = trace_span!(
        "encode",
        payload_len = payload.len(),
        scheme = scheme.name(),
        size = size.name()
    )
    .entered();

    let encoder = EncoderHandle::new(engine)?;
    encoder.set_property(ffi::DMTX_PROP_SIZE_REQUEST, size as i32);
    encoder.set_property(ffi::DMTX_PROP_SCHEME, scheme as i32);

    if !encoder.encode(payload) {
        return Err(DmtxError::Encoding { len: payload.len() });
    }

    let width = encoder.image_property(ffi::DMTX_PROP_WIDTH);
    let height = encoder.image_property(ffi::DMTX_PROP_HEIGHT);
    let bits_per_pixel = encoder.image_property(ffi::DMTX_PROP_BITS_PER_PIXEL);
    let (width, height, bits_per_pixel) = match (width, height, bits_per_pixel) {
        (Some(w), Some(h), Some(bpp)) if w > 0 && h > 0 && bpp > 0 => {
            (w as usize, h as usize, bpp as usize)
        }
        // The engine reported success but produced no readable image.
        _ => return Err(DmtxError::Encoding { len: payload.len() }),
    };

    let len = width * height * bits_per_pixel / 8;
    let pixels = encoder
        .image_pixels(len)
        .ok_or(DmtxError::Encoding { len: payload.len() })?;

    trace_event!("encode_done", width = width, height = height);
    Ok(EncodedImage {
        width,
        height,
        bits_per_pixel,
        pixels,
    })
}
