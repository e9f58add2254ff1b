//! The metadata operation set: set, unset, clear, get, copy
//!
//! Every operation follows the same transactional shape: validate the handle,
//! resolve its descriptor, map the record, perform one bounded read or write
//! against the fixed layout, and unmap on return. Failures are detected before
//! any mutation, so a failing call never leaves partial side effects in the
//! shared record.
//!
//! The protocol provides no locking. A concurrent reader can observe a
//! writer's presence bit before the paired slot write settles; callers that
//! need stronger consistency must serialize access externally (see the
//! crate-level documentation).

use std::os::fd::BorrowedFd;

use crate::error::{MetadataError, Result};
use crate::handle::MetadataHandle;
use crate::layout::{self, MetadataKind, MetadataValue};
use crate::mapping::RecordMapping;

fn validated_fd<H: MetadataHandle + ?Sized>(handle: &H) -> Result<BorrowedFd<'_>> {
    handle.validate()?;
    handle
        .metadata_fd()
        .ok_or(MetadataError::NoMetadataDescriptor)
}

/// Store an attribute value and mark it present.
///
/// The value's variant determines which slot is written; nothing else in the
/// record is touched. The presence bit is raised before the slot body is
/// encoded, matching the protocol's documented write order.
pub fn set<H: MetadataHandle + ?Sized>(handle: &H, value: &MetadataValue) -> Result<()> {
    let fd = validated_fd(handle)?;
    let mut mapping = RecordMapping::map(fd)?;
    let record = mapping.record_mut();

    let kind = value.kind();
    let mask = layout::presence_mask(record) | kind.presence_bit();
    layout::set_presence_mask(record, mask);
    layout::encode_attribute(record, value);

    Ok(())
}

/// Drop an attribute's presence bit without touching its slot contents.
///
/// This is the "set with no value" form of the wire protocol: the slot keeps
/// whatever bytes it held, and readers are told not to trust them.
pub fn unset<H: MetadataHandle + ?Sized>(handle: &H, kind: MetadataKind) -> Result<()> {
    let fd = validated_fd(handle)?;
    let mut mapping = RecordMapping::map(fd)?;
    let record = mapping.record_mut();

    let mask = layout::presence_mask(record) & !kind.presence_bit();
    layout::set_presence_mask(record, mask);

    Ok(())
}

/// Clear an attribute: drop its presence bit unconditionally, then reset the
/// slot to its documented sentinel for kinds that define one (currently
/// [`MetadataKind::S3dComposition`]).
///
/// Idempotent. Clearing a kind that was never set still succeeds and leaves
/// the record in the same state as a single clear.
pub fn clear<H: MetadataHandle + ?Sized>(handle: &H, kind: MetadataKind) -> Result<()> {
    let fd = validated_fd(handle)?;
    let mut mapping = RecordMapping::map(fd)?;
    let record = mapping.record_mut();

    let mask = layout::presence_mask(record) & !kind.presence_bit();
    layout::set_presence_mask(record, mask);

    let desc = layout::descriptor(kind);
    if let Some(sentinel) = desc.sentinel {
        record[desc.offset..desc.offset + desc.size].copy_from_slice(sentinel);
    }

    Ok(())
}

/// Fetch an attribute value.
///
/// Fails with [`MetadataError::AttributeNotPresent`] when the kind's presence
/// bit is clear; the slot contents are never decoded in that case.
pub fn get<H: MetadataHandle + ?Sized>(handle: &H, kind: MetadataKind) -> Result<MetadataValue> {
    let fd = validated_fd(handle)?;
    let mapping = RecordMapping::map(fd)?;
    let record = mapping.record();

    if !layout::is_present(record, kind) {
        return Err(MetadataError::not_present(kind));
    }

    Ok(layout::decode_attribute(record, kind))
}

/// Copy the entire record, presence mask and every slot, from `source` to
/// `destination` in one bulk transfer, erasing the destination's prior state.
///
/// Both regions are mapped before any bytes move; both mappings are released
/// on return regardless of the outcome of either unmap.
pub fn copy<S, D>(source: &S, destination: &D) -> Result<()>
where
    S: MetadataHandle + ?Sized,
    D: MetadataHandle + ?Sized,
{
    let source_fd = validated_fd(source)?;
    let destination_fd = validated_fd(destination)?;

    let source_mapping = RecordMapping::map(source_fd)?;
    let mut destination_mapping = RecordMapping::map(destination_fd)?;

    destination_mapping
        .record_mut()
        .copy_from_slice(source_mapping.record());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::BufferHandle;

    #[test]
    fn test_set_get_scenario() {
        let handle = BufferHandle::allocate("ops-scenario").unwrap();

        set(&handle, &MetadataValue::RefreshRate(59.94)).unwrap();
        assert_eq!(
            get(&handle, MetadataKind::RefreshRate).unwrap(),
            MetadataValue::RefreshRate(59.94)
        );

        clear(&handle, MetadataKind::RefreshRate).unwrap();
        assert!(matches!(
            get(&handle, MetadataKind::RefreshRate),
            Err(MetadataError::AttributeNotPresent {
                kind: MetadataKind::RefreshRate
            })
        ));
    }

    #[test]
    fn test_no_descriptor_fails_before_map() {
        let handle = BufferHandle::without_descriptor();
        assert!(matches!(
            set(&handle, &MetadataValue::Interlaced(1)),
            Err(MetadataError::NoMetadataDescriptor)
        ));
        assert!(matches!(
            get(&handle, MetadataKind::Interlaced),
            Err(MetadataError::NoMetadataDescriptor)
        ));
    }
}
