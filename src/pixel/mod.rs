//! Pixel buffers and input normalization.
//!
//! `PixelBuffer` is the canonical flat form the engine ingests: contiguous
//! unpadded pixels plus width, height and a derived color depth. Anything a
//! caller can hand to [`decode`](crate::decode) implements [`PixelSource`],
//! which normalizes it into a `PixelBuffer` — borrowing where the input is
//! already 8-bit and contiguous, converting otherwise.

use std::borrow::Cow;
use std::os::raw::c_int;

use crate::engine::ffi;
use crate::util::{DmtxError, DmtxResult};

#[cfg(feature = "image-io")]
mod io;

/// Color depths the engine accepts, in bits per pixel.
pub const SUPPORTED_DEPTHS: [usize; 4] = [8, 16, 24, 32];

/// Contiguous pixel data with explicit dimensions and derived color depth.
///
/// Invariants, enforced at construction: the depth is one of
/// [`SUPPORTED_DEPTHS`] and `pixels.len() == width * height * depth / 8`
/// exactly, with no row padding.
#[derive(Clone, Debug)]
pub struct PixelBuffer<'a> {
    pixels: Cow<'a, [u8]>,
    width: usize,
    height: usize,
    bits_per_pixel: usize,
}

impl<'a> PixelBuffer<'a> {
    /// Builds a buffer from raw bytes, deriving bits-per-pixel from the byte
    /// count and the dimensions.
    pub fn from_raw(
        pixels: impl Into<Cow<'a, [u8]>>,
        width: usize,
        height: usize,
    ) -> DmtxResult<Self> {
        let pixels = pixels.into();
        let area = width.checked_mul(height).unwrap_or(0);
        if area == 0 || pixels.len() % area != 0 {
            return Err(DmtxError::BufferSizeMismatch {
                len: pixels.len(),
                area,
            });
        }
        let bits_per_pixel = 8 * pixels.len() / area;
        if !SUPPORTED_DEPTHS.contains(&bits_per_pixel) {
            return Err(DmtxError::UnsupportedBitsPerPixel {
                bpp: bits_per_pixel,
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            bits_per_pixel,
        })
    }

    /// Returns the pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the derived color depth in bits per pixel.
    pub fn bits_per_pixel(&self) -> usize {
        self.bits_per_pixel
    }

    /// Reborrows the buffer without copying the pixel data.
    fn reborrow(&self) -> PixelBuffer<'_> {
        PixelBuffer {
            pixels: Cow::Borrowed(self.pixels.as_ref()),
            width: self.width,
            height: self.height,
            bits_per_pixel: self.bits_per_pixel,
        }
    }

    /// Maps the depth onto the engine's pixel packing constant.
    pub(crate) fn pack_order(&self) -> c_int {
        match self.bits_per_pixel {
            8 => ffi::DMTX_PACK_8BPP_K,
            16 => ffi::DMTX_PACK_16BPP_RGB,
            24 => ffi::DMTX_PACK_24BPP_RGB,
            // Construction admits no other depth.
            _ => ffi::DMTX_PACK_32BPP_RGBX,
        }
    }
}

/// An image representation that can be normalized into a [`PixelBuffer`].
///
/// Implemented for `(pixels, width, height)` tuples, for `PixelBuffer`
/// itself, and — behind the `image-io` feature — for the `image` crate's
/// buffer types.
pub trait PixelSource {
    /// Normalizes this source into the engine's canonical flat form.
    fn to_pixel_buffer(&self) -> DmtxResult<PixelBuffer<'_>>;
}

impl PixelSource for PixelBuffer<'_> {
    fn to_pixel_buffer(&self) -> DmtxResult<PixelBuffer<'_>> {
        Ok(self.reborrow())
    }
}

impl<'a> PixelSource for (&'a [u8], usize, usize) {
    fn to_pixel_buffer(&self) -> DmtxResult<PixelBuffer<'_>> {
        let (pixels, width, height) = *self;
        PixelBuffer::from_raw(pixels, width, height)
    }
}

impl PixelSource for (Vec<u8>, usize, usize) {
    fn to_pixel_buffer(&self) -> DmtxResult<PixelBuffer<'_>> {
        PixelBuffer::from_raw(self.0.as_slice(), self.1, self.2)
    }
}

#[cfg(test)]
mod tests {
    use super::{PixelBuffer, PixelSource};
    use crate::util::DmtxError;

    #[test]
    fn derives_depth_for_supported_formats() {
        for (bytes_per_pixel, expected_bpp) in [(1, 8), (2, 16), (3, 24), (4, 32)] {
            let buffer = PixelBuffer::from_raw(vec![0u8; 6 * bytes_per_pixel], 3, 2).unwrap();
            assert_eq!(buffer.bits_per_pixel(), expected_bpp);
            assert_eq!(buffer.width(), 3);
            assert_eq!(buffer.height(), 2);
        }
    }

    #[test]
    fn rejects_indivisible_buffer_length() {
        let err = PixelBuffer::from_raw(vec![0u8; 10], 3, 3).err().unwrap();
        assert_eq!(err, DmtxError::BufferSizeMismatch { len: 10, area: 9 });
        let message = err.to_string();
        assert!(message.contains("10"));
        assert!(message.contains('9'));
    }

    #[test]
    fn rejects_unsupported_depth() {
        // 5 bytes per pixel: 40 bits.
        let err = PixelBuffer::from_raw(vec![0u8; 10], 2, 1).err().unwrap();
        assert_eq!(err, DmtxError::UnsupportedBitsPerPixel { bpp: 40 });
        let message = err.to_string();
        assert!(message.contains("40"));
        assert!(message.contains("{8, 16, 24, 32}"));
    }

    #[test]
    fn rejects_zero_area() {
        let err = PixelBuffer::from_raw(vec![0u8; 4], 0, 4).err().unwrap();
        assert_eq!(err, DmtxError::BufferSizeMismatch { len: 4, area: 0 });
    }

    #[test]
    fn tuple_sources_normalize_identically() {
        let bytes = vec![7u8; 12];
        let borrowed_src = (bytes.as_slice(), 4usize, 3usize);
        let borrowed = borrowed_src.to_pixel_buffer().unwrap();
        let owned_src = (bytes.clone(), 4usize, 3usize);
        let owned = owned_src.to_pixel_buffer().unwrap();
        assert_eq!(borrowed.pixels(), owned.pixels());
        assert_eq!(borrowed.bits_per_pixel(), 8);
        assert_eq!(owned.bits_per_pixel(), 8);
    }
}
