//! Owning guards for engine-allocated handles.
//!
//! Each guard is created by exactly one engine constructor and releases its
//! handle in `Drop`, so every exit path — success, early return or propagated
//! error — runs the matching destroy call. Lifetime parameters tie a decoder
//! to its image and an image to the pixel buffer the engine keeps a pointer
//! into, which makes Rust's reverse-declaration drop order release decoder
//! before image. Region and message guards live inside a single scan
//! iteration and never cross into the next one.

use std::marker::PhantomData;
use std::os::raw::c_int;
use std::ptr::{self, NonNull};
use std::slice;

use super::ffi::{DmtxDecode, DmtxEncode, DmtxImage, DmtxMatrix3, DmtxMessage, DmtxRegion, DmtxTime};
use super::Engine;
use crate::util::{DmtxError, DmtxResult};

/// Engine image wrapping a caller-owned pixel buffer.
///
/// The engine stores the pixel pointer rather than copying, so the guard
/// borrows the buffer for its whole lifetime.
pub(crate) struct ImageHandle<'p> {
    engine: &'static Engine,
    ptr: NonNull<DmtxImage>,
    _pixels: PhantomData<&'p [u8]>,
}

impl<'p> ImageHandle<'p> {
    pub(crate) fn new(
        engine: &'static Engine,
        pixels: &'p [u8],
        width: usize,
        height: usize,
        pack: c_int,
    ) -> DmtxResult<Self> {
        let raw = unsafe {
            (engine.image_create)(
                pixels.as_ptr() as *mut u8,
                width as c_int,
                height as c_int,
                pack,
            )
        };
        match NonNull::new(raw) {
            Some(ptr) => Ok(Self {
                engine,
                ptr,
                _pixels: PhantomData,
            }),
            None => Err(DmtxError::ResourceCreation { kind: "image" }),
        }
    }

    pub(crate) fn as_ptr(&self) -> *mut DmtxImage {
        self.ptr.as_ptr()
    }
}

impl Drop for ImageHandle<'_> {
    fn drop(&mut self) {
        let mut raw = self.ptr.as_ptr();
        let _ = unsafe { (self.engine.image_destroy)(&mut raw) };
    }
}

/// Engine decoder bound to one image.
pub(crate) struct DecoderHandle<'i> {
    engine: &'static Engine,
    ptr: NonNull<DmtxDecode>,
    _image: PhantomData<&'i DmtxImage>,
}

impl<'i> DecoderHandle<'i> {
    pub(crate) fn new<'p>(
        engine: &'static Engine,
        image: &'i ImageHandle<'p>,
        shrink: usize,
    ) -> DmtxResult<Self> {
        let raw = unsafe { (engine.decode_create)(image.as_ptr(), shrink as c_int) };
        match NonNull::new(raw) {
            Some(ptr) => Ok(Self {
                engine,
                ptr,
                _image: PhantomData,
            }),
            None => Err(DmtxError::ResourceCreation { kind: "decoder" }),
        }
    }

    /// Applies one tuning property. The engine validates the value and keeps
    /// its default when the value is out of range.
    pub(crate) fn set_property(&self, prop: c_int, value: c_int) {
        let _ = unsafe { (self.engine.decode_set_prop)(self.ptr.as_ptr(), prop, value) };
    }

    /// Asks the engine for the next candidate region, or `None` once the
    /// image is exhausted or the deadline has passed — the engine does not
    /// distinguish the two.
    pub(crate) fn find_next_region(&self, deadline: Option<DmtxTime>) -> Option<RegionHandle<'_>> {
        let mut deadline = deadline;
        let deadline_ptr = deadline
            .as_mut()
            .map_or(ptr::null_mut(), |t| t as *mut DmtxTime);
        let raw = unsafe { (self.engine.region_find_next)(self.ptr.as_ptr(), deadline_ptr) };
        NonNull::new(raw).map(|ptr| RegionHandle {
            engine: self.engine,
            ptr,
            _decoder: PhantomData,
        })
    }

    /// Runs a full matrix decode on `region`, or `None` when the region does
    /// not contain a readable symbol.
    pub(crate) fn decode_region(
        &self,
        region: &RegionHandle<'_>,
        corrections: c_int,
    ) -> Option<MessageHandle<'_>> {
        let raw = unsafe {
            (self.engine.decode_matrix_region)(self.ptr.as_ptr(), region.as_ptr(), corrections)
        };
        NonNull::new(raw).map(|ptr| MessageHandle {
            engine: self.engine,
            ptr,
            _decoder: PhantomData,
        })
    }
}

impl Drop for DecoderHandle<'_> {
    fn drop(&mut self) {
        let mut raw = self.ptr.as_ptr();
        let _ = unsafe { (self.engine.decode_destroy)(&mut raw) };
    }
}

/// Candidate region located by the engine, owned by one scan iteration.
pub(crate) struct RegionHandle<'d> {
    engine: &'static Engine,
    ptr: NonNull<DmtxRegion>,
    _decoder: PhantomData<&'d DmtxDecode>,
}

impl RegionHandle<'_> {
    pub(crate) fn as_ptr(&self) -> *mut DmtxRegion {
        self.ptr.as_ptr()
    }

    /// Copies the region's fitted-square→raw-pixel homography out.
    pub(crate) fn fit_to_raw(&self) -> DmtxMatrix3 {
        unsafe { (*self.ptr.as_ptr()).fit2raw }
    }
}

impl Drop for RegionHandle<'_> {
    fn drop(&mut self) {
        let mut raw = self.ptr.as_ptr();
        let _ = unsafe { (self.engine.region_destroy)(&mut raw) };
    }
}

/// Decoded message, owned by one scan iteration.
pub(crate) struct MessageHandle<'d> {
    engine: &'static Engine,
    ptr: NonNull<DmtxMessage>,
    _decoder: PhantomData<&'d DmtxDecode>,
}

impl MessageHandle<'_> {
    /// Copies the decoded payload out of the engine-owned output buffer.
    ///
    /// Reads `output_idx` bytes — the engine's count of decoded bytes — so
    /// payloads containing NUL bytes come back intact.
    pub(crate) fn payload(&self) -> Vec<u8> {
        let msg = unsafe { &*self.ptr.as_ptr() };
        let len = msg.output_idx.max(0) as usize;
        if msg.output.is_null() || len == 0 {
            return Vec::new();
        }
        unsafe { slice::from_raw_parts(msg.output, len) }.to_vec()
    }
}

impl Drop for MessageHandle<'_> {
    fn drop(&mut self) {
        let mut raw = self.ptr.as_ptr();
        let _ = unsafe { (self.engine.message_destroy)(&mut raw) };
    }
}

/// Engine encoder; independent of any image or decoder session.
pub(crate) struct EncoderHandle {
    engine: &'static Engine,
    ptr: NonNull<DmtxEncode>,
}

impl EncoderHandle {
    pub(crate) fn new(engine: &'static Engine) -> DmtxResult<Self> {
        let raw = unsafe { (engine.encode_create)() };
        match NonNull::new(raw) {
            Some(ptr) => Ok(Self { engine, ptr }),
            None => Err(DmtxError::ResourceCreation { kind: "encoder" }),
        }
    }

    pub(crate) fn set_property(&self, prop: c_int, value: c_int) {
        let _ = unsafe { (self.engine.encode_set_prop)(self.ptr.as_ptr(), prop, value) };
    }

    /// Runs the native encode; `false` means the payload did not fit.
    pub(crate) fn encode(&self, payload: &[u8]) -> bool {
        let status = unsafe {
            (self.engine.encode_data_matrix)(
                self.ptr.as_ptr(),
                payload.len() as c_int,
                payload.as_ptr() as *mut u8,
            )
        };
        status != 0
    }

    /// Reads one property of the encoder's output image.
    pub(crate) fn image_property(&self, prop: c_int) -> Option<c_int> {
        let image = unsafe { (*self.ptr.as_ptr()).image };
        if image.is_null() {
            return None;
        }
        Some(unsafe { (self.engine.image_get_prop)(image, prop) })
    }

    /// Copies `len` bytes of the encoder's output pixel buffer.
    pub(crate) fn image_pixels(&self, len: usize) -> Option<Vec<u8>> {
        let image = unsafe { (*self.ptr.as_ptr()).image };
        if image.is_null() {
            return None;
        }
        let pxl = unsafe { (*image).pxl };
        if pxl.is_null() {
            return None;
        }
        Some(unsafe { slice::from_raw_parts(pxl, len) }.to_vec())
    }
}

impl Drop for EncoderHandle {
    fn drop(&mut self) {
        let mut raw = self.ptr.as_ptr();
        let _ = unsafe { (self.engine.encode_destroy)(&mut raw) };
    }
}
