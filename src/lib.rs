//! # bufmeta - Shared-Memory Buffer Metadata Side-Channel
//!
//! bufmeta attaches a small, fixed set of typed attributes to an opaque
//! graphics buffer handle through a shared-memory region, without touching
//! the buffer's pixel storage or the handle's own fields. Any process holding
//! a duplicate descriptor to the same region sees every other process's
//! writes, and a presence bitmask records which attributes currently hold
//! caller-supplied data.
//!
//! ## Features
//!
//! - **Fixed ABI record layout**: append-only slot table with explicit
//!   little-endian encoding, safe to map from independently compiled processes
//! - **Call-scoped mappings**: every operation maps, mutates, and unmaps; no
//!   mapping or pointer into one outlives the call
//! - **Presence tracking**: per-attribute bits distinguish valid data from
//!   stale slot contents
//! - **Whole-record copy**: O(1) re-export of metadata to another buffer
//! - **C API**: optional `c-api` feature exposing the classic raw-kind,
//!   untyped-pointer surface
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                 Operation Set                    │
//! │        set / unset / clear / get / copy          │
//! ├──────────────────────────────────────────────────┤
//! │  Transactional Accessor  │   Record Layout       │
//! │  - map -> body -> unmap  │   - presence mask     │
//! │  - scoped to one call    │   - fixed-offset slots│
//! └──────────────────────────────────────────────────┘
//!             │                        │
//!             ▼                        ▼
//! ┌─────────────────┐     ┌────────────────────────┐
//! │  shared mapping │     │  little-endian codec   │
//! │  (MAP_SHARED)   │     │  (append-only ABI)     │
//! └─────────────────┘     └────────────────────────┘
//! ```
//!
//! ## Concurrency contract
//!
//! The protocol provides **no locking**. Concurrent operations against the
//! same region from different threads or processes are not serialized; in
//! particular, a reader racing a writer can observe the presence bit of an
//! attribute before the paired slot write has settled, and concurrent
//! writers can lose presence-mask updates to each other. This is a protocol
//! property, not an implementation gap: callers needing stronger consistency
//! serialize access externally, one writer at a time per region.
//!
//! ## Example
//!
//! ```no_run
//! use bufmeta::{BufferHandle, MetadataKind, MetadataValue};
//!
//! # fn main() -> bufmeta::Result<()> {
//! let handle = BufferHandle::allocate("video-plane")?;
//!
//! bufmeta::set(&handle, &MetadataValue::RefreshRate(59.94))?;
//! assert_eq!(
//!     bufmeta::get(&handle, MetadataKind::RefreshRate)?,
//!     MetadataValue::RefreshRate(59.94),
//! );
//!
//! bufmeta::clear(&handle, MetadataKind::RefreshRate)?;
//! assert!(bufmeta::get(&handle, MetadataKind::RefreshRate).is_err());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handle;
pub mod layout;
pub mod mapping;
pub mod ops;

#[cfg(feature = "c-api")]
pub mod ffi;

pub use error::{MetadataError, Result};
pub use handle::{BufferHandle, MetadataHandle};
pub use layout::{
    BufferGeometry, ColorMetadata, ColorSpace, ContentLightLevel, IgcMode, MasteringDisplay,
    MetadataKind, MetadataValue, S3dComposition,
};
pub use mapping::RecordMapping;
pub use ops::{clear, copy, get, set, unset};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
