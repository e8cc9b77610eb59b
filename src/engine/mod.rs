//! Binding to the native libdmtx engine.
//!
//! The engine is resolved at first use: the shared library is opened with
//! `libloading`, every required symbol is looked up once, and the resulting
//! function table is stored in a process-wide `OnceLock`. Later calls reuse
//! the table; a failed load is cached too, so every caller sees the same
//! `EngineUnavailable` error instead of retrying the filesystem.
//!
//! `handles` wraps the raw constructors in owning guards that release their
//! handle on drop, in strict reverse-acquisition order.

pub(crate) mod ffi;
mod handles;

pub(crate) use handles::{DecoderHandle, EncoderHandle, ImageHandle};

use std::ffi::{CStr, OsString};
use std::sync::OnceLock;

use libloading::Library;

use crate::util::{DmtxError, DmtxResult};
use ffi::{
    DmtxDecodeCreateFn, DmtxDecodeDestroyFn, DmtxDecodeMatrixRegionFn, DmtxDecodeSetPropFn,
    DmtxEncodeCreateFn, DmtxEncodeDataMatrixFn, DmtxEncodeDestroyFn, DmtxEncodeSetPropFn,
    DmtxImageCreateFn, DmtxImageDestroyFn, DmtxImageGetPropFn, DmtxMessageDestroyFn,
    DmtxRegionDestroyFn, DmtxRegionFindNextFn, DmtxTime, DmtxTimeAddFn, DmtxTimeNowFn,
    DmtxVersionFn,
};

/// Resolved engine function table. The library stays loaded for the life of
/// the process, which keeps the raw function pointers valid.
pub(crate) struct Engine {
    _lib: Library,
    pub(crate) version: DmtxVersionFn,
    pub(crate) time_now: DmtxTimeNowFn,
    pub(crate) time_add: DmtxTimeAddFn,
    pub(crate) image_create: DmtxImageCreateFn,
    pub(crate) image_destroy: DmtxImageDestroyFn,
    pub(crate) image_get_prop: DmtxImageGetPropFn,
    pub(crate) decode_create: DmtxDecodeCreateFn,
    pub(crate) decode_destroy: DmtxDecodeDestroyFn,
    pub(crate) decode_set_prop: DmtxDecodeSetPropFn,
    pub(crate) decode_matrix_region: DmtxDecodeMatrixRegionFn,
    pub(crate) region_find_next: DmtxRegionFindNextFn,
    pub(crate) region_destroy: DmtxRegionDestroyFn,
    pub(crate) message_destroy: DmtxMessageDestroyFn,
    pub(crate) encode_create: DmtxEncodeCreateFn,
    pub(crate) encode_destroy: DmtxEncodeDestroyFn,
    pub(crate) encode_set_prop: DmtxEncodeSetPropFn,
    pub(crate) encode_data_matrix: DmtxEncodeDataMatrixFn,
}

static ENGINE: OnceLock<Result<Engine, String>> = OnceLock::new();

/// Returns the process-wide engine table, loading it on first call.
pub(crate) fn engine() -> DmtxResult<&'static Engine> {
    match ENGINE.get_or_init(load) {
        Ok(engine) => Ok(engine),
        Err(reason) => Err(DmtxError::EngineUnavailable {
            reason: reason.clone(),
        }),
    }
}

/// Returns the version string reported by the engine.
///
/// Also serves as a cheap availability probe: it fails with
/// [`DmtxError::EngineUnavailable`] when the shared library cannot be loaded.
pub fn library_version() -> DmtxResult<String> {
    let engine = engine()?;
    let ptr = unsafe { (engine.version)() };
    if ptr.is_null() {
        return Err(DmtxError::EngineUnavailable {
            reason: "engine returned no version string".into(),
        });
    }
    Ok(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

/// Computes the absolute engine-clock deadline `timeout_ms` from now.
pub(crate) fn deadline_after(engine: &Engine, timeout_ms: u32) -> DmtxTime {
    let now = unsafe { (engine.time_now)() };
    unsafe { (engine.time_add)(now, timeout_ms as std::os::raw::c_long) }
}

fn load() -> Result<Engine, String> {
    let mut attempts = Vec::new();
    for name in candidate_names() {
        match unsafe { Library::new(&name) } {
            Ok(lib) => return Engine::from_library(lib),
            Err(err) => attempts.push(format!("{}: {err}", name.to_string_lossy())),
        }
    }
    Err(format!("no loadable engine library ({})", attempts.join("; ")))
}

/// Library names to try, most specific first. `DMTX_LIBRARY` overrides the
/// platform defaults with an explicit path.
fn candidate_names() -> Vec<OsString> {
    if let Some(path) = std::env::var_os("DMTX_LIBRARY") {
        return vec![path];
    }
    let names: &[&str] = if cfg!(target_os = "windows") {
        &["libdmtx-64.dll", "libdmtx.dll"]
    } else if cfg!(target_os = "macos") {
        &["libdmtx.0.dylib", "libdmtx.dylib"]
    } else {
        &["libdmtx.so.0", "libdmtx.so"]
    };
    names.iter().map(OsString::from).collect()
}

impl Engine {
    fn from_library(lib: Library) -> Result<Self, String> {
        unsafe {
            Ok(Engine {
                version: sym(&lib, "dmtxVersion")?,
                time_now: sym(&lib, "dmtxTimeNow")?,
                time_add: sym(&lib, "dmtxTimeAdd")?,
                image_create: sym(&lib, "dmtxImageCreate")?,
                image_destroy: sym(&lib, "dmtxImageDestroy")?,
                image_get_prop: sym(&lib, "dmtxImageGetProp")?,
                decode_create: sym(&lib, "dmtxDecodeCreate")?,
                decode_destroy: sym(&lib, "dmtxDecodeDestroy")?,
                decode_set_prop: sym(&lib, "dmtxDecodeSetProp")?,
                decode_matrix_region: sym(&lib, "dmtxDecodeMatrixRegion")?,
                region_find_next: sym(&lib, "dmtxRegionFindNext")?,
                region_destroy: sym(&lib, "dmtxRegionDestroy")?,
                message_destroy: sym(&lib, "dmtxMessageDestroy")?,
                encode_create: sym(&lib, "dmtxEncodeCreate")?,
                encode_destroy: sym(&lib, "dmtxEncodeDestroy")?,
                encode_set_prop: sym(&lib, "dmtxEncodeSetProp")?,
                encode_data_matrix: sym(&lib, "dmtxEncodeDataMatrix")?,
                _lib: lib,
            })
        }
    }
}

/// Looks up one exported function and copies the raw pointer out of the
/// borrowed `Symbol`.
///
/// # Safety
///
/// `T` must match the C signature of the exported symbol.
unsafe fn sym<T: Copy>(lib: &Library, name: &'static str) -> Result<T, String> {
    match unsafe { lib.get::<T>(name.as_bytes()) } {
        Ok(symbol) => Ok(*symbol),
        Err(err) => Err(format!("missing engine symbol {name}: {err}")),
    }
}
