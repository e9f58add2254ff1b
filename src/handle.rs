//! Buffer handles and the descriptor seam to the surrounding buffer stack

use std::ffi::CString;
use std::os::fd::{AsFd, BorrowedFd, OwnedFd};

use nix::sys::memfd::{memfd_create, MemFdCreateFlag};
use nix::unistd::ftruncate;

use crate::error::{MetadataError, Result};
use crate::layout;

/// Magic tag stamped into every [`BufferHandle`] ("META")
const HANDLE_MAGIC: u32 = 0x4d45_5441;

/// The seam between the metadata protocol and whatever buffer stack owns the
/// handles.
///
/// The protocol only needs two capabilities from a handle: structural
/// validation, and access to the shared-memory descriptor that identifies the
/// handle's metadata region. Buffer stacks with their own handle types
/// implement this trait instead of funneling through [`BufferHandle`].
pub trait MetadataHandle {
    /// Check the handle's structural integrity
    fn validate(&self) -> Result<()>;

    /// Borrow the descriptor identifying the handle's metadata region, if the
    /// handle carries one
    fn metadata_fd(&self) -> Option<BorrowedFd<'_>>;
}

/// A buffer handle carrying a descriptor to one shared metadata region.
///
/// Multiple handles, possibly in different processes, may reference the same
/// region through duplicated descriptors; the protocol never creates or
/// destroys the region itself, only maps it for the duration of a call.
#[derive(Debug)]
pub struct BufferHandle {
    magic: u32,
    descriptor: Option<OwnedFd>,
}

impl BufferHandle {
    /// Adopt a descriptor produced by an external allocator. The caller is
    /// responsible for the descriptor identifying a region of at least
    /// [`layout::mapped_size`] bytes for the handle's lifetime.
    pub fn from_descriptor(descriptor: OwnedFd) -> Self {
        Self {
            magic: HANDLE_MAGIC,
            descriptor: Some(descriptor),
        }
    }

    /// A structurally valid handle with no metadata descriptor. Operations
    /// against it fail with `NoMetadataDescriptor`.
    pub fn without_descriptor() -> Self {
        Self {
            magic: HANDLE_MAGIC,
            descriptor: None,
        }
    }

    /// Allocate a fresh zero-filled metadata region backed by an anonymous
    /// memory file descriptor (Linux memfd).
    ///
    /// A freshly allocated region has an empty presence mask, so every
    /// attribute starts out absent. This is a convenience for single-process
    /// stacks and tests; production buffer allocators typically create the
    /// descriptor themselves and hand it to [`BufferHandle::from_descriptor`].
    #[cfg(target_os = "linux")]
    pub fn allocate(name: &str) -> Result<Self> {
        let name_cstr = CString::new(name)
            .map_err(|_| MetadataError::invalid_parameter("name", "name contains null bytes"))?;

        let descriptor = memfd_create(&name_cstr, MemFdCreateFlag::MFD_CLOEXEC)
            .map_err(|e| MetadataError::platform(format!("failed to create memfd: {}", e)))?;

        ftruncate(&descriptor, layout::mapped_size() as i64)
            .map_err(|e| MetadataError::platform(format!("failed to size metadata region: {}", e)))?;

        Ok(Self::from_descriptor(descriptor))
    }

    /// Duplicate this handle. The clone references the same metadata region
    /// through a duplicated descriptor, the cross-process re-export pattern.
    pub fn try_clone(&self) -> Result<Self> {
        let descriptor = match &self.descriptor {
            Some(fd) => Some(fd.try_clone().map_err(|e| {
                MetadataError::platform(format!("failed to duplicate descriptor: {}", e))
            })?),
            None => None,
        };

        Ok(Self {
            magic: self.magic,
            descriptor,
        })
    }

    /// Whether the handle carries a metadata descriptor
    pub fn has_descriptor(&self) -> bool {
        self.descriptor.is_some()
    }
}

impl MetadataHandle for BufferHandle {
    fn validate(&self) -> Result<()> {
        if self.magic != HANDLE_MAGIC {
            return Err(MetadataError::invalid_handle("magic tag mismatch"));
        }
        Ok(())
    }

    fn metadata_fd(&self) -> Option<BorrowedFd<'_>> {
        self.descriptor.as_ref().map(|fd| fd.as_fd())
    }
}
