//! Input validation at the decode entry point.
//!
//! Everything here fails before any engine resource is created, so these
//! tests run without the shared library installed.

use dmtx::{decode, DecodeOptions, DmtxError, PixelBuffer, PixelSource};

#[test]
fn buffer_length_must_divide_across_pixels() {
    let err = decode(&(vec![0u8; 10], 3, 3), &DecodeOptions::default())
        .err()
        .unwrap();
    assert_eq!(err, DmtxError::BufferSizeMismatch { len: 10, area: 9 });
    let message = err.to_string();
    assert!(message.contains("10"), "byte count missing: {message}");
    assert!(message.contains('9'), "pixel count missing: {message}");
}

#[test]
fn forty_bits_per_pixel_is_rejected() {
    // 2x1 pixels backed by 10 bytes: 40 bits per pixel.
    let err = decode(&(vec![0u8; 10], 2, 1), &DecodeOptions::default())
        .err()
        .unwrap();
    assert_eq!(err, DmtxError::UnsupportedBitsPerPixel { bpp: 40 });
    let message = err.to_string();
    assert!(message.contains("40"));
    assert!(message.contains("{8, 16, 24, 32}"));
}

#[test]
fn zero_max_count_is_rejected() {
    let options = DecodeOptions {
        max_count: Some(0),
        ..DecodeOptions::default()
    };
    let err = decode(&(vec![0u8; 9], 3, 3), &options).err().unwrap();
    assert_eq!(err, DmtxError::InvalidMaxCount { value: 0 });
}

#[test]
fn zero_shrink_is_rejected() {
    let options = DecodeOptions {
        shrink: 0,
        ..DecodeOptions::default()
    };
    let err = decode(&(vec![0u8; 9], 3, 3), &options).err().unwrap();
    assert_eq!(err, DmtxError::InvalidShrink { value: 0 });
}

#[test]
fn validation_runs_before_pixel_conversion() {
    // max_count is checked first even when the buffer is also bad.
    let options = DecodeOptions {
        max_count: Some(0),
        ..DecodeOptions::default()
    };
    let err = decode(&(vec![0u8; 10], 3, 3), &options).err().unwrap();
    assert_eq!(err, DmtxError::InvalidMaxCount { value: 0 });
}

#[test]
fn pixel_buffer_source_reborrows_without_copying() {
    let buffer = PixelBuffer::from_raw(vec![1u8; 24], 4, 2).unwrap();
    assert_eq!(buffer.bits_per_pixel(), 24);
    let view = buffer.to_pixel_buffer().unwrap();
    assert_eq!(view.pixels().as_ptr(), buffer.pixels().as_ptr());
    assert_eq!(view.bits_per_pixel(), 24);
}

#[test]
fn every_supported_depth_is_accepted() {
    for bytes_per_pixel in [1usize, 2, 3, 4] {
        let buffer = PixelBuffer::from_raw(vec![0u8; 12 * bytes_per_pixel], 4, 3).unwrap();
        assert_eq!(buffer.bits_per_pixel(), 8 * bytes_per_pixel);
    }
}
