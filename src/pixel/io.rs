//! `PixelSource` implementations for the `image` crate's buffer types.
//!
//! Available when the `image-io` feature is enabled. The 8-bit buffer types
//! are already in the engine's flat form and borrow their data; deeper or
//! exotic `DynamicImage` variants are converted to 8-bit RGB first.

use super::{PixelBuffer, PixelSource};
use crate::util::DmtxResult;

impl PixelSource for image::GrayImage {
    fn to_pixel_buffer(&self) -> DmtxResult<PixelBuffer<'_>> {
        PixelBuffer::from_raw(
            self.as_raw().as_slice(),
            self.width() as usize,
            self.height() as usize,
        )
    }
}

impl PixelSource for image::RgbImage {
    fn to_pixel_buffer(&self) -> DmtxResult<PixelBuffer<'_>> {
        PixelBuffer::from_raw(
            self.as_raw().as_slice(),
            self.width() as usize,
            self.height() as usize,
        )
    }
}

impl PixelSource for image::RgbaImage {
    fn to_pixel_buffer(&self) -> DmtxResult<PixelBuffer<'_>> {
        PixelBuffer::from_raw(
            self.as_raw().as_slice(),
            self.width() as usize,
            self.height() as usize,
        )
    }
}

impl PixelSource for image::DynamicImage {
    fn to_pixel_buffer(&self) -> DmtxResult<PixelBuffer<'_>> {
        let width = self.width() as usize;
        let height = self.height() as usize;
        match self {
            image::DynamicImage::ImageLuma8(buf) => {
                PixelBuffer::from_raw(buf.as_raw().as_slice(), width, height)
            }
            image::DynamicImage::ImageLumaA8(buf) => {
                PixelBuffer::from_raw(buf.as_raw().as_slice(), width, height)
            }
            image::DynamicImage::ImageRgb8(buf) => {
                PixelBuffer::from_raw(buf.as_raw().as_slice(), width, height)
            }
            image::DynamicImage::ImageRgba8(buf) => {
                PixelBuffer::from_raw(buf.as_raw().as_slice(), width, height)
            }
            // 16-bit and float variants are normalized to 8-bit RGB.
            other => PixelBuffer::from_raw(other.to_rgb8().into_raw(), width, height),
        }
    }
}
