//! Raw libdmtx types, constants and function signatures.
//!
//! Struct layouts mirror libdmtx 0.7.5 (the release that inserted the `fnc1`
//! fields). Most structs exist only to fix field offsets for pointers handed
//! back by the engine; Rust code reads just `DmtxMessage.{output, output_idx}`,
//! `DmtxRegion.fit2raw` and `DmtxEncode.image`.

#![allow(dead_code)]

use std::os::raw::{c_char, c_int, c_long, c_uint, c_ulong, c_ulonglong};

/// Engine sentinel for "value not set" / "auto".
pub(crate) const DMTX_UNDEFINED: c_int = -1;

// DmtxProperty — encoder properties.
pub(crate) const DMTX_PROP_SCHEME: c_int = 100;
pub(crate) const DMTX_PROP_SIZE_REQUEST: c_int = 101;

// DmtxProperty — decoder properties.
pub(crate) const DMTX_PROP_EDGE_MIN: c_int = 200;
pub(crate) const DMTX_PROP_EDGE_MAX: c_int = 201;
pub(crate) const DMTX_PROP_SCAN_GAP: c_int = 202;
pub(crate) const DMTX_PROP_SQUARE_DEVN: c_int = 203;
pub(crate) const DMTX_PROP_SYMBOL_SIZE: c_int = 204;
pub(crate) const DMTX_PROP_EDGE_THRESH: c_int = 205;

// DmtxProperty — image properties.
pub(crate) const DMTX_PROP_WIDTH: c_int = 300;
pub(crate) const DMTX_PROP_HEIGHT: c_int = 301;
pub(crate) const DMTX_PROP_BITS_PER_PIXEL: c_int = 303;

// DmtxPackOrder values for the supported color depths.
pub(crate) const DMTX_PACK_8BPP_K: c_int = 300;
pub(crate) const DMTX_PACK_16BPP_RGB: c_int = 400;
pub(crate) const DMTX_PACK_24BPP_RGB: c_int = 500;
pub(crate) const DMTX_PACK_32BPP_RGBX: c_int = 600;

pub(crate) type DmtxPassFail = c_uint;
pub(crate) type DmtxMatrix3 = [[f64; 3]; 3];

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct DmtxTime {
    pub(crate) sec: c_ulonglong,
    pub(crate) usec: c_ulong,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct DmtxPixelLoc {
    pub(crate) x: c_int,
    pub(crate) y: c_int,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct DmtxPointFlow {
    pub(crate) plane: c_int,
    pub(crate) arrive: c_int,
    pub(crate) depart: c_int,
    pub(crate) mag: c_int,
    pub(crate) loc: DmtxPixelLoc,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct DmtxBestLine {
    pub(crate) angle: c_int,
    pub(crate) h_offset: c_int,
    pub(crate) mag: c_int,
    pub(crate) step_beg: c_int,
    pub(crate) step_pos: c_int,
    pub(crate) step_neg: c_int,
    pub(crate) dist_sq: c_int,
    pub(crate) devn: f64,
    pub(crate) loc_beg: DmtxPixelLoc,
    pub(crate) loc_pos: DmtxPixelLoc,
    pub(crate) loc_neg: DmtxPixelLoc,
}

#[repr(C)]
pub(crate) struct DmtxImage {
    pub(crate) width: c_int,
    pub(crate) height: c_int,
    pub(crate) pixel_packing: c_int,
    pub(crate) bits_per_pixel: c_int,
    pub(crate) bytes_per_pixel: c_int,
    pub(crate) row_pad_bytes: c_int,
    pub(crate) row_size_bytes: c_int,
    pub(crate) image_flip: c_int,
    pub(crate) channel_count: c_int,
    pub(crate) channel_start: [c_int; 4],
    pub(crate) bits_per_channel: [c_int; 4],
    pub(crate) pxl: *mut u8,
}

#[repr(C)]
pub(crate) struct DmtxMessage {
    pub(crate) array_size: usize,
    pub(crate) code_size: usize,
    pub(crate) output_size: usize,
    pub(crate) output_idx: c_int,
    pub(crate) pad_count: c_int,
    pub(crate) fnc1: c_int,
    pub(crate) array: *mut u8,
    pub(crate) code: *mut u8,
    pub(crate) output: *mut u8,
}

/// Decoder state is opaque to this layer; it is only ever passed back in.
#[repr(C)]
pub(crate) struct DmtxDecode {
    _private: [u8; 0],
}

#[repr(C)]
pub(crate) struct DmtxRegion {
    pub(crate) jump_to_pos: c_int,
    pub(crate) jump_to_neg: c_int,
    pub(crate) steps_total: c_int,
    pub(crate) final_pos: DmtxPixelLoc,
    pub(crate) final_neg: DmtxPixelLoc,
    pub(crate) bound_min: DmtxPixelLoc,
    pub(crate) bound_max: DmtxPixelLoc,
    pub(crate) flow_begin: DmtxPointFlow,

    pub(crate) polarity: c_int,
    pub(crate) step_r: c_int,
    pub(crate) step_t: c_int,
    pub(crate) loc_r: DmtxPixelLoc,
    pub(crate) loc_t: DmtxPixelLoc,

    pub(crate) left_known: c_int,
    pub(crate) left_angle: c_int,
    pub(crate) left_loc: DmtxPixelLoc,
    pub(crate) left_line: DmtxBestLine,
    pub(crate) bottom_known: c_int,
    pub(crate) bottom_angle: c_int,
    pub(crate) bottom_loc: DmtxPixelLoc,
    pub(crate) bottom_line: DmtxBestLine,
    pub(crate) top_known: c_int,
    pub(crate) top_angle: c_int,
    pub(crate) top_loc: DmtxPixelLoc,
    pub(crate) right_known: c_int,
    pub(crate) right_angle: c_int,
    pub(crate) right_loc: DmtxPixelLoc,

    pub(crate) on_color: c_int,
    pub(crate) off_color: c_int,
    pub(crate) size_idx: c_int,
    pub(crate) symbol_rows: c_int,
    pub(crate) symbol_cols: c_int,
    pub(crate) mapping_rows: c_int,
    pub(crate) mapping_cols: c_int,

    pub(crate) raw2fit: DmtxMatrix3,
    pub(crate) fit2raw: DmtxMatrix3,
}

#[repr(C)]
pub(crate) struct DmtxEncode {
    pub(crate) method: c_int,
    pub(crate) scheme: c_int,
    pub(crate) size_idx_request: c_int,
    pub(crate) margin_size: c_int,
    pub(crate) module_size: c_int,
    pub(crate) pixel_packing: c_int,
    pub(crate) image_flip: c_int,
    pub(crate) row_pad_bytes: c_int,
    pub(crate) fnc1: c_int,
    pub(crate) message: *mut DmtxMessage,
    pub(crate) image: *mut DmtxImage,
    pub(crate) region: DmtxRegion,
    pub(crate) xfrm: DmtxMatrix3,
    pub(crate) rxfrm: DmtxMatrix3,
}

pub(crate) type DmtxVersionFn = unsafe extern "C" fn() -> *const c_char;
pub(crate) type DmtxTimeNowFn = unsafe extern "C" fn() -> DmtxTime;
pub(crate) type DmtxTimeAddFn = unsafe extern "C" fn(DmtxTime, c_long) -> DmtxTime;

pub(crate) type DmtxImageCreateFn =
    unsafe extern "C" fn(*mut u8, c_int, c_int, c_int) -> *mut DmtxImage;
pub(crate) type DmtxImageDestroyFn = unsafe extern "C" fn(*mut *mut DmtxImage) -> DmtxPassFail;
pub(crate) type DmtxImageGetPropFn = unsafe extern "C" fn(*mut DmtxImage, c_int) -> c_int;

pub(crate) type DmtxDecodeCreateFn = unsafe extern "C" fn(*mut DmtxImage, c_int) -> *mut DmtxDecode;
pub(crate) type DmtxDecodeDestroyFn = unsafe extern "C" fn(*mut *mut DmtxDecode) -> DmtxPassFail;
pub(crate) type DmtxDecodeSetPropFn =
    unsafe extern "C" fn(*mut DmtxDecode, c_int, c_int) -> DmtxPassFail;
pub(crate) type DmtxDecodeMatrixRegionFn =
    unsafe extern "C" fn(*mut DmtxDecode, *mut DmtxRegion, c_int) -> *mut DmtxMessage;

pub(crate) type DmtxRegionFindNextFn =
    unsafe extern "C" fn(*mut DmtxDecode, *mut DmtxTime) -> *mut DmtxRegion;
pub(crate) type DmtxRegionDestroyFn = unsafe extern "C" fn(*mut *mut DmtxRegion) -> DmtxPassFail;
pub(crate) type DmtxMessageDestroyFn = unsafe extern "C" fn(*mut *mut DmtxMessage) -> DmtxPassFail;

pub(crate) type DmtxEncodeCreateFn = unsafe extern "C" fn() -> *mut DmtxEncode;
pub(crate) type DmtxEncodeDestroyFn = unsafe extern "C" fn(*mut *mut DmtxEncode) -> DmtxPassFail;
pub(crate) type DmtxEncodeSetPropFn =
    unsafe extern "C" fn(*mut DmtxEncode, c_int, c_int) -> DmtxPassFail;
pub(crate) type DmtxEncodeDataMatrixFn =
    unsafe extern "C" fn(*mut DmtxEncode, c_int, *mut u8) -> DmtxPassFail;
