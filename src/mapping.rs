//! Scoped shared mapping of a metadata record
//!
//! Every operation maps the region, works against the fixed record layout,
//! and unmaps before returning. No mapping outlives the call that created it,
//! so mapping leaks across calls are impossible by construction; an unmap
//! failure within a call is logged as a non-fatal anomaly and never alters
//! the operation's outcome, since the semantic effect has already landed in
//! the shared pages.

use std::num::NonZeroUsize;
use std::os::fd::BorrowedFd;
use std::slice;

use nix::sys::mman::{mmap, munmap, MapFlags, ProtFlags};

use crate::error::{MetadataError, Result};
use crate::layout;

/// A live, call-scoped mapping of one metadata record.
///
/// The mapping is shared (`MAP_SHARED`), so stores are visible to every other
/// mapper of the same descriptor. It is released on drop, on every exit path.
#[derive(Debug)]
pub struct RecordMapping {
    base: *mut libc::c_void,
    len: usize,
}

impl RecordMapping {
    /// Map the record identified by `fd` for the page-rounded record size,
    /// readable and writable.
    pub fn map(fd: BorrowedFd<'_>) -> Result<Self> {
        let len = layout::mapped_size();
        let length = NonZeroUsize::new(len)
            .ok_or_else(|| MetadataError::platform("page-rounded record size is zero"))?;

        let base = unsafe {
            mmap(
                None,
                length,
                ProtFlags::PROT_READ | ProtFlags::PROT_WRITE,
                MapFlags::MAP_SHARED,
                Some(fd),
                0,
            )
        }
        .map_err(MetadataError::map_failed)?;

        Ok(Self { base, len })
    }

    /// The record bytes (presence mask plus every slot)
    pub fn record(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.base as *const u8, layout::RECORD_SIZE) }
    }

    /// The record bytes, mutable
    pub fn record_mut(&mut self) -> &mut [u8] {
        unsafe { slice::from_raw_parts_mut(self.base as *mut u8, layout::RECORD_SIZE) }
    }

    /// Total mapped length in bytes
    pub fn mapped_len(&self) -> usize {
        self.len
    }
}

impl Drop for RecordMapping {
    fn drop(&mut self) {
        if let Err(err) = unsafe { munmap(self.base, self.len) } {
            log::warn!(
                "failed to unmap metadata record at {:p} ({} bytes): {}",
                self.base,
                self.len,
                err
            );
        }
    }
}
