//! NVTX ranges for Nsight Systems
//!
//! The NVTX library is loaded at run time with `libloading`, so binaries run
//! unchanged on machines without the CUDA tools installed.

use libloading::{Library, Symbol};
use std::ffi::{c_char, CString};
use tcgs_shared::Color;
use tracing::{debug, info};

use crate::backend::{SpanBackend, SpanHandle};

const NVTX_VERSION: u16 = 2;
const NVTX_COLOR_ARGB: i32 = 1;
const NVTX_MESSAGE_TYPE_ASCII: i32 = 1;

/// `nvtxEventAttributes_t` (version 2)
#[repr(C)]
struct EventAttributes {
    version: u16,
    size: u16,
    category: u32,
    color_type: i32,
    color: u32,
    payload_type: i32,
    reserved0: i32,
    payload: u64,
    message_type: i32,
    message: *const c_char,
}

type FnRangeStartEx = unsafe extern "C" fn(attributes: *const EventAttributes) -> u64;
type FnRangeEnd = unsafe extern "C" fn(id: u64);

#[cfg(target_os = "windows")]
const LIBRARY_NAMES: &[&str] = &["nvToolsExt64_1.dll"];

#[cfg(not(target_os = "windows"))]
const LIBRARY_NAMES: &[&str] = &["libnvToolsExt.so.1", "libnvToolsExt.so"];

/// Colored start/end ranges through the NVTX C API
pub struct NvtxBackend {
    range_start_ex: FnRangeStartEx,
    range_end: FnRangeEnd,
    _lib: Library,
}

impl NvtxBackend {
    /// Load the NVTX library, or `None` when it is not installed
    pub fn load() -> Option<Self> {
        for name in LIBRARY_NAMES {
            match unsafe { Library::new(name) } {
                Ok(lib) => match unsafe { Self::from_library(lib) } {
                    Some(backend) => {
                        info!("NVTX loaded from {}", name);
                        return Some(backend);
                    }
                    None => debug!("{} lacks the NVTX range entry points", name),
                },
                Err(e) => debug!("failed to load {}: {}", name, e),
            }
        }
        None
    }

    unsafe fn from_library(lib: Library) -> Option<Self> {
        let range_start_ex = Self::load_fn::<FnRangeStartEx>(&lib, b"nvtxRangeStartEx\0")?;
        let range_end = Self::load_fn::<FnRangeEnd>(&lib, b"nvtxRangeEnd\0")?;
        Some(Self {
            range_start_ex,
            range_end,
            _lib: lib,
        })
    }

    unsafe fn load_fn<F: Copy>(lib: &Library, symbol: &[u8]) -> Option<F> {
        lib.get(symbol).ok().map(|s: Symbol<F>| *s)
    }
}

impl SpanBackend for NvtxBackend {
    fn name(&self) -> &'static str {
        "nvtx"
    }

    fn start(&self, name: &str, color: Color) -> Option<SpanHandle> {
        // NVTX messages are C strings; interior NULs are dropped.
        let message = CString::new(name.replace('\0', "")).ok()?;
        let attributes = EventAttributes {
            version: NVTX_VERSION,
            size: std::mem::size_of::<EventAttributes>() as u16,
            category: 0,
            color_type: NVTX_COLOR_ARGB,
            color: color.argb(),
            payload_type: 0,
            reserved0: 0,
            payload: 0,
            message_type: NVTX_MESSAGE_TYPE_ASCII,
            message: message.as_ptr(),
        };

        // The message is copied by NVTX before the call returns.
        let id = unsafe { (self.range_start_ex)(&attributes) };
        Some(SpanHandle::Range(id))
    }

    fn end(&self, handle: SpanHandle) {
        match handle {
            SpanHandle::Range(id) => unsafe { (self.range_end)(id) },
            SpanHandle::Region(_) => debug!("nvtx backend got a foreign region handle"),
        }
    }
}
