//! Record-level layout: presence mask plus all attribute slots

use super::attributes::{MetadataKind, MetadataValue};
use super::slots::{self, SLOT_TABLE};

/// Byte offset of the presence mask within the record
pub const PRESENCE_MASK_OFFSET: usize = 0;

/// Byte size of the presence mask
pub const PRESENCE_MASK_SIZE: usize = 8;

/// Total record size: presence mask followed by every slot, in bit order.
/// This is ABI; it only ever grows when new slots are appended.
pub const RECORD_SIZE: usize = {
    let last = SLOT_TABLE[SLOT_TABLE.len() - 1];
    last.offset + last.size
};

/// Host page size, with a conventional fallback if sysconf cannot report one
pub fn page_size() -> usize {
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 {
        size as usize
    } else {
        4096
    }
}

/// Size of the shared mapping established for every operation: the record
/// size rounded up to the host page size
pub fn mapped_size() -> usize {
    let page = page_size();
    RECORD_SIZE.div_ceil(page) * page
}

/// Read the presence mask
pub fn presence_mask(record: &[u8]) -> u64 {
    let mut bytes = [0u8; PRESENCE_MASK_SIZE];
    bytes.copy_from_slice(&record[PRESENCE_MASK_OFFSET..PRESENCE_MASK_OFFSET + PRESENCE_MASK_SIZE]);
    u64::from_le_bytes(bytes)
}

/// Write the presence mask
pub fn set_presence_mask(record: &mut [u8], mask: u64) {
    record[PRESENCE_MASK_OFFSET..PRESENCE_MASK_OFFSET + PRESENCE_MASK_SIZE]
        .copy_from_slice(&mask.to_le_bytes());
}

/// Whether the presence bit for `kind` is set
pub fn is_present(record: &[u8], kind: MetadataKind) -> bool {
    presence_mask(record) & kind.presence_bit() != 0
}

/// Encode a value into its slot within the record. Does not touch the
/// presence mask.
pub fn encode_attribute(record: &mut [u8], value: &MetadataValue) {
    let desc = slots::descriptor(value.kind());
    slots::encode_slot(value, &mut record[desc.offset..desc.offset + desc.size]);
}

/// Decode the slot for `kind` from the record. Does not consult the presence
/// mask; callers decide whether stale contents are trustworthy.
pub fn decode_attribute(record: &[u8], kind: MetadataKind) -> MetadataValue {
    let desc = slots::descriptor(kind);
    slots::decode_slot(kind, &record[desc.offset..desc.offset + desc.size])
}
