//! C Foreign Function Interface for the metadata side-channel
//!
//! Mirrors the classic C metadata surface: raw `u32` attribute kinds and
//! untyped value pointers. Value buffers use the wire layout of the slot they
//! target (see [`crate::layout::slots`]); the caller must uphold the size
//! contract for the kind being passed, the protocol does not runtime-check it
//! beyond the slot descriptor's size.
//!
//! Unknown raw kinds follow the protocol's forward-compatibility policy:
//! logged and treated as a successful no-op for set/clear, rejected for get.

use std::ffi::{c_char, c_void, CStr};
use std::os::fd::{FromRawFd, OwnedFd, RawFd};
use std::ptr::null_mut;
use std::slice;

use crate::error::MetadataError;
use crate::handle::{BufferHandle, MetadataHandle};
use crate::layout::{self, MetadataKind};
use crate::ops;

/// Opaque handle pointer for the C API
pub type BufmetaHandle = *mut BufferHandle;

/// Status codes for C API calls
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufmetaStatus {
    Success = 0,
    InvalidHandle = 1,
    NoMetadataDescriptor = 2,
    MapFailed = 3,
    AttributeNotPresent = 4,
    InvalidParameter = 5,
    PlatformError = 6,
}

impl From<MetadataError> for BufmetaStatus {
    fn from(error: MetadataError) -> Self {
        match error {
            MetadataError::InvalidHandle { .. } => BufmetaStatus::InvalidHandle,
            MetadataError::NoMetadataDescriptor => BufmetaStatus::NoMetadataDescriptor,
            MetadataError::MapFailed { .. } => BufmetaStatus::MapFailed,
            MetadataError::AttributeNotPresent { .. } => BufmetaStatus::AttributeNotPresent,
            MetadataError::InvalidParameter { .. } => BufmetaStatus::InvalidParameter,
            MetadataError::Platform { .. } => BufmetaStatus::PlatformError,
        }
    }
}

fn status_from(result: crate::Result<()>) -> BufmetaStatus {
    match result {
        Ok(()) => BufmetaStatus::Success,
        Err(error) => {
            log::error!("metadata operation failed: {}", error);
            error.into()
        }
    }
}

/// Handle structure and descriptor presence are checked before any
/// kind-specific handling, so a bad handle surfaces its own failure even
/// when the kind is unknown.
fn precheck(handle: &BufferHandle, op: &str) -> Option<BufmetaStatus> {
    if let Err(error) = handle.validate() {
        log::error!("{}: {}", op, error);
        return Some(error.into());
    }
    if handle.metadata_fd().is_none() {
        log::error!("{}: {}", op, MetadataError::NoMetadataDescriptor);
        return Some(BufmetaStatus::NoMetadataDescriptor);
    }
    None
}

/// Allocate a handle with a fresh memfd-backed metadata region.
///
/// Returns null on allocation failure.
///
/// # Safety
/// `name` must be a valid null-terminated string or null (a default name is
/// used then). The returned handle must be released with
/// [`bufmeta_handle_destroy`].
#[no_mangle]
pub unsafe extern "C" fn bufmeta_handle_allocate(name: *const c_char) -> BufmetaHandle {
    let name = if name.is_null() {
        "bufmeta"
    } else {
        match CStr::from_ptr(name).to_str() {
            Ok(name) => name,
            Err(_) => {
                log::error!("handle name is not valid UTF-8");
                return null_mut();
            }
        }
    };

    match BufferHandle::allocate(name) {
        Ok(handle) => Box::into_raw(Box::new(handle)),
        Err(error) => {
            log::error!("failed to allocate metadata region: {}", error);
            null_mut()
        }
    }
}

/// Wrap a descriptor supplied by an external allocator in a handle.
///
/// # Safety
/// `fd` must be a valid, open descriptor identifying a metadata region of at
/// least the mapped record size. Ownership of `fd` transfers to the handle.
#[no_mangle]
pub unsafe extern "C" fn bufmeta_handle_adopt_fd(fd: RawFd) -> BufmetaHandle {
    if fd < 0 {
        log::error!("cannot adopt negative descriptor {}", fd);
        return null_mut();
    }
    let descriptor = OwnedFd::from_raw_fd(fd);
    Box::into_raw(Box::new(BufferHandle::from_descriptor(descriptor)))
}

/// Duplicate a handle; the clone references the same metadata region.
///
/// # Safety
/// `handle` must be null or a pointer returned by one of the handle
/// constructors.
#[no_mangle]
pub unsafe extern "C" fn bufmeta_handle_clone(handle: *const BufferHandle) -> BufmetaHandle {
    if handle.is_null() {
        return null_mut();
    }
    match (*handle).try_clone() {
        Ok(clone) => Box::into_raw(Box::new(clone)),
        Err(error) => {
            log::error!("failed to clone handle: {}", error);
            null_mut()
        }
    }
}

/// Release a handle and close its descriptor.
///
/// # Safety
/// `handle` must be null or a pointer returned by one of the handle
/// constructors, and must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn bufmeta_handle_destroy(handle: BufmetaHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// Store an attribute value, or drop its presence bit when `value` is null.
///
/// # Safety
/// `handle` must be null or a valid handle pointer. A non-null `value` must
/// point to at least the slot size of `kind` in wire layout.
#[no_mangle]
pub unsafe extern "C" fn bufmeta_set(
    handle: *const BufferHandle,
    kind: u32,
    value: *const c_void,
) -> BufmetaStatus {
    if handle.is_null() {
        log::error!("bufmeta_set: handle is null");
        return BufmetaStatus::InvalidHandle;
    }
    let handle = &*handle;
    if let Some(status) = precheck(handle, "bufmeta_set") {
        return status;
    }

    let kind = match MetadataKind::from_raw(kind) {
        Some(kind) => kind,
        None => {
            // Forward compatibility: newer callers may know kinds this
            // build does not. No-op, not a failure.
            log::error!("bufmeta_set: unknown attribute kind {}", kind);
            return BufmetaStatus::Success;
        }
    };

    if value.is_null() {
        return status_from(ops::unset(handle, kind));
    }

    let desc = layout::descriptor(kind);
    let raw = slice::from_raw_parts(value as *const u8, desc.size);
    let value = layout::slots::decode_slot(kind, raw);

    status_from(ops::set(handle, &value))
}

/// Clear an attribute: drop its presence bit and apply the kind's sentinel
/// reset if it defines one.
///
/// # Safety
/// `handle` must be null or a valid handle pointer.
#[no_mangle]
pub unsafe extern "C" fn bufmeta_clear(handle: *const BufferHandle, kind: u32) -> BufmetaStatus {
    if handle.is_null() {
        log::error!("bufmeta_clear: handle is null");
        return BufmetaStatus::InvalidHandle;
    }
    let handle = &*handle;
    if let Some(status) = precheck(handle, "bufmeta_clear") {
        return status;
    }

    let kind = match MetadataKind::from_raw(kind) {
        Some(kind) => kind,
        None => {
            log::error!("bufmeta_clear: unknown attribute kind {}", kind);
            return BufmetaStatus::Success;
        }
    };

    status_from(ops::clear(handle, kind))
}

/// Fetch an attribute value into `out`, in wire layout.
///
/// `out` is written only on success; an absent attribute leaves it untouched.
///
/// # Safety
/// `handle` must be null or a valid handle pointer. `out` must be null or
/// point to at least the slot size of `kind`.
#[no_mangle]
pub unsafe extern "C" fn bufmeta_get(
    handle: *const BufferHandle,
    kind: u32,
    out: *mut c_void,
) -> BufmetaStatus {
    if handle.is_null() {
        log::error!("bufmeta_get: handle is null");
        return BufmetaStatus::InvalidHandle;
    }
    if out.is_null() {
        log::error!("bufmeta_get: output pointer is null");
        return BufmetaStatus::InvalidParameter;
    }
    let handle = &*handle;
    if let Some(status) = precheck(handle, "bufmeta_get") {
        return status;
    }

    let kind = match MetadataKind::from_raw(kind) {
        Some(kind) => kind,
        None => {
            log::error!("bufmeta_get: unknown attribute kind {}", kind);
            return BufmetaStatus::InvalidParameter;
        }
    };

    match ops::get(handle, kind) {
        Ok(value) => {
            let desc = layout::descriptor(kind);
            let out = slice::from_raw_parts_mut(out as *mut u8, desc.size);
            layout::slots::encode_slot(&value, out);
            BufmetaStatus::Success
        }
        Err(error) => {
            log::error!("bufmeta_get: {}", error);
            error.into()
        }
    }
}

/// Copy the whole record from `source` to `destination`.
///
/// # Safety
/// Both pointers must be null or valid handle pointers.
#[no_mangle]
pub unsafe extern "C" fn bufmeta_copy(
    source: *const BufferHandle,
    destination: *const BufferHandle,
) -> BufmetaStatus {
    if source.is_null() || destination.is_null() {
        log::error!("bufmeta_copy: handle is null");
        return BufmetaStatus::InvalidHandle;
    }

    status_from(ops::copy(&*source, &*destination))
}
