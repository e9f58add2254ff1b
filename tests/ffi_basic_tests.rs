//! Basic tests for the C API surface
#![cfg(feature = "c-api")]

use std::ffi::c_void;
use std::ptr;

use bufmeta::ffi::{
    bufmeta_clear, bufmeta_copy, bufmeta_get, bufmeta_handle_allocate, bufmeta_handle_clone,
    bufmeta_handle_destroy, bufmeta_set, BufmetaStatus,
};
use bufmeta::{BufferHandle, MetadataKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        unsafe {
            let handle = bufmeta_handle_allocate(ptr::null());
            assert!(!handle.is_null());

            let rate: f32 = 59.94;
            let status = bufmeta_set(
                handle,
                MetadataKind::RefreshRate.raw(),
                &rate as *const f32 as *const c_void,
            );
            assert_eq!(status, BufmetaStatus::Success);

            let mut out: f32 = 0.0;
            let status = bufmeta_get(
                handle,
                MetadataKind::RefreshRate.raw(),
                &mut out as *mut f32 as *mut c_void,
            );
            assert_eq!(status, BufmetaStatus::Success);
            assert_eq!(out, rate);

            bufmeta_handle_destroy(handle);
        }
    }

    #[test]
    fn test_null_value_clears_presence_only() {
        unsafe {
            let handle = bufmeta_handle_allocate(ptr::null());

            let flag: i32 = 1;
            bufmeta_set(
                handle,
                MetadataKind::Interlaced.raw(),
                &flag as *const i32 as *const c_void,
            );
            let status = bufmeta_set(handle, MetadataKind::Interlaced.raw(), ptr::null());
            assert_eq!(status, BufmetaStatus::Success);

            let mut out: i32 = -7;
            let status = bufmeta_get(
                handle,
                MetadataKind::Interlaced.raw(),
                &mut out as *mut i32 as *mut c_void,
            );
            assert_eq!(status, BufmetaStatus::AttributeNotPresent);
            // Destination untouched on failure.
            assert_eq!(out, -7);

            bufmeta_handle_destroy(handle);
        }
    }

    #[test]
    fn test_unknown_kind_policy() {
        unsafe {
            let handle = bufmeta_handle_allocate(ptr::null());

            let value: u32 = 1;
            // Unknown kinds are a logged no-op for set and clear.
            assert_eq!(
                bufmeta_set(handle, 999, &value as *const u32 as *const c_void),
                BufmetaStatus::Success
            );
            assert_eq!(bufmeta_clear(handle, 999), BufmetaStatus::Success);

            // But a failure for get, which has nothing to fetch.
            let mut out: u32 = 0;
            assert_eq!(
                bufmeta_get(handle, 999, &mut out as *mut u32 as *mut c_void),
                BufmetaStatus::InvalidParameter
            );

            bufmeta_handle_destroy(handle);
        }
    }

    #[test]
    fn test_handle_validation_precedes_unknown_kind_policy() {
        unsafe {
            // A descriptor-less handle must surface its own failure even for
            // a kind this build does not know.
            let handle = Box::into_raw(Box::new(BufferHandle::without_descriptor()));

            assert_eq!(
                bufmeta_set(handle, 999, ptr::null()),
                BufmetaStatus::NoMetadataDescriptor
            );
            assert_eq!(
                bufmeta_clear(handle, 999),
                BufmetaStatus::NoMetadataDescriptor
            );

            let mut out: u32 = 0;
            assert_eq!(
                bufmeta_get(handle, 999, &mut out as *mut u32 as *mut c_void),
                BufmetaStatus::NoMetadataDescriptor
            );

            bufmeta_handle_destroy(handle);
        }
    }

    #[test]
    fn test_null_handles_rejected() {
        unsafe {
            let value: i32 = 1;
            assert_eq!(
                bufmeta_set(
                    ptr::null(),
                    MetadataKind::Interlaced.raw(),
                    &value as *const i32 as *const c_void,
                ),
                BufmetaStatus::InvalidHandle
            );
            assert_eq!(
                bufmeta_clear(ptr::null(), MetadataKind::Interlaced.raw()),
                BufmetaStatus::InvalidHandle
            );
            assert_eq!(
                bufmeta_copy(ptr::null(), ptr::null()),
                BufmetaStatus::InvalidHandle
            );
        }
    }

    #[test]
    fn test_clone_and_copy() {
        unsafe {
            let source = bufmeta_handle_allocate(ptr::null());
            let duplicate = bufmeta_handle_clone(source);
            assert!(!duplicate.is_null());

            let timestamp: u64 = 777;
            bufmeta_set(
                source,
                MetadataKind::VideoTimestamp.raw(),
                &timestamp as *const u64 as *const c_void,
            );

            // The clone references the same region.
            let mut out: u64 = 0;
            assert_eq!(
                bufmeta_get(
                    duplicate,
                    MetadataKind::VideoTimestamp.raw(),
                    &mut out as *mut u64 as *mut c_void,
                ),
                BufmetaStatus::Success
            );
            assert_eq!(out, timestamp);

            // A separate region receives the whole record through copy.
            let destination = bufmeta_handle_allocate(ptr::null());
            assert_eq!(bufmeta_copy(source, destination), BufmetaStatus::Success);

            let mut copied: u64 = 0;
            assert_eq!(
                bufmeta_get(
                    destination,
                    MetadataKind::VideoTimestamp.raw(),
                    &mut copied as *mut u64 as *mut c_void,
                ),
                BufmetaStatus::Success
            );
            assert_eq!(copied, timestamp);

            bufmeta_handle_destroy(source);
            bufmeta_handle_destroy(duplicate);
            bufmeta_handle_destroy(destination);
        }
    }
}
