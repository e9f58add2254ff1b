//! Slot descriptor table and the per-slot binary codec
//!
//! Every attribute kind owns one fixed-offset, fixed-size slot in the shared
//! record. Slot contents are encoded little-endian through an explicit codec
//! rather than by reinterpreting host memory, so independently compiled
//! processes agree on the bytes regardless of struct layout decisions.

use super::attributes::{
    BufferGeometry, ColorMetadata, ColorSpace, ContentLightLevel, IgcMode, MasteringDisplay,
    MetadataKind, MetadataValue, S3dComposition,
};

/// Wire description of one attribute slot
#[derive(Debug, Clone, Copy)]
pub struct SlotDescriptor {
    /// Kind stored in this slot
    pub kind: MetadataKind,
    /// Byte offset of the slot within the record
    pub offset: usize,
    /// Byte size of the slot
    pub size: usize,
    /// Sentinel bytes written into the slot by `clear`, if the kind defines
    /// reset semantics beyond dropping the presence bit
    pub sentinel: Option<&'static [u8]>,
}

/// Encoded form of [`S3dComposition::CLEARED`]
pub const S3D_COMPOSITION_SENTINEL: [u8; 8] = [0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00];

/// Slot table, ordered by presence-bit position. Offsets and sizes are ABI:
/// append new slots at the tail, never move or resize existing ones.
pub const SLOT_TABLE: [SlotDescriptor; 12] = [
    SlotDescriptor {
        kind: MetadataKind::Interlaced,
        offset: 8,
        size: 4,
        sentinel: None,
    },
    SlotDescriptor {
        kind: MetadataKind::BufferGeometry,
        offset: 12,
        size: 12,
        sentinel: None,
    },
    SlotDescriptor {
        kind: MetadataKind::RefreshRate,
        offset: 24,
        size: 4,
        sentinel: None,
    },
    SlotDescriptor {
        kind: MetadataKind::ColorSpace,
        offset: 28,
        size: 4,
        sentinel: None,
    },
    SlotDescriptor {
        kind: MetadataKind::MapSecureBuffer,
        offset: 32,
        size: 4,
        sentinel: None,
    },
    SlotDescriptor {
        kind: MetadataKind::S3dFormat,
        offset: 36,
        size: 4,
        sentinel: None,
    },
    SlotDescriptor {
        kind: MetadataKind::LinearFormat,
        offset: 40,
        size: 4,
        sentinel: None,
    },
    SlotDescriptor {
        kind: MetadataKind::Igc,
        offset: 44,
        size: 4,
        sentinel: None,
    },
    SlotDescriptor {
        kind: MetadataKind::SingleBufferMode,
        offset: 48,
        size: 4,
        sentinel: None,
    },
    SlotDescriptor {
        kind: MetadataKind::S3dComposition,
        offset: 52,
        size: 8,
        sentinel: Some(&S3D_COMPOSITION_SENTINEL),
    },
    SlotDescriptor {
        kind: MetadataKind::VideoTimestamp,
        offset: 60,
        size: 8,
        sentinel: None,
    },
    SlotDescriptor {
        kind: MetadataKind::ColorMetadata,
        offset: 68,
        size: 48,
        sentinel: None,
    },
];

/// Look up the slot descriptor for a kind
pub fn descriptor(kind: MetadataKind) -> &'static SlotDescriptor {
    &SLOT_TABLE[kind as u32 as usize]
}

fn put_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_i32(buf: &mut [u8], offset: usize, value: i32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_u64(buf: &mut [u8], offset: usize, value: u64) {
    buf[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
}

fn get_u16(buf: &[u8], offset: usize) -> u16 {
    let mut bytes = [0u8; 2];
    bytes.copy_from_slice(&buf[offset..offset + 2]);
    u16::from_le_bytes(bytes)
}

fn get_u32(buf: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

fn get_i32(buf: &[u8], offset: usize) -> i32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    i32::from_le_bytes(bytes)
}

fn get_u64(buf: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}

/// Encode a value into its slot. `slot` must be exactly the descriptor's size.
pub fn encode_slot(value: &MetadataValue, slot: &mut [u8]) {
    debug_assert_eq!(slot.len(), descriptor(value.kind()).size);

    match value {
        MetadataValue::Interlaced(v) | MetadataValue::MapSecureBuffer(v) => put_i32(slot, 0, *v),
        MetadataValue::BufferGeometry(geometry) => {
            put_i32(slot, 0, geometry.width);
            put_i32(slot, 4, geometry.height);
            put_i32(slot, 8, geometry.format);
        }
        MetadataValue::RefreshRate(hz) => put_u32(slot, 0, hz.to_bits()),
        MetadataValue::ColorSpace(space) => put_i32(slot, 0, space.0),
        MetadataValue::S3dFormat(v)
        | MetadataValue::LinearFormat(v)
        | MetadataValue::SingleBufferMode(v) => put_u32(slot, 0, *v),
        MetadataValue::Igc(mode) => put_u32(slot, 0, mode.0),
        MetadataValue::S3dComposition(comp) => {
            put_i32(slot, 0, comp.display_id);
            put_u32(slot, 4, comp.mode);
        }
        MetadataValue::VideoTimestamp(ns) => put_u64(slot, 0, *ns),
        MetadataValue::ColorMetadata(color) => {
            put_u32(slot, 0, color.primaries);
            put_u32(slot, 4, color.transfer);
            put_u32(slot, 8, color.range);
            put_u32(slot, 12, color.matrix);
            for (i, primary) in color.mastering.rgb_primaries.iter().enumerate() {
                put_u16(slot, 16 + i * 4, primary[0]);
                put_u16(slot, 18 + i * 4, primary[1]);
            }
            put_u16(slot, 28, color.mastering.white_point[0]);
            put_u16(slot, 30, color.mastering.white_point[1]);
            put_u32(slot, 32, color.mastering.max_luminance);
            put_u32(slot, 36, color.mastering.min_luminance);
            put_u32(slot, 40, color.light_level.max_content_light);
            put_u32(slot, 44, color.light_level.max_frame_average_light);
        }
    }
}

/// Decode a slot into a typed value. `slot` must be exactly the descriptor's
/// size. Slot contents are transported, never interpreted: every bit pattern
/// decodes, including code points this build has no constant for.
pub fn decode_slot(kind: MetadataKind, slot: &[u8]) -> MetadataValue {
    debug_assert_eq!(slot.len(), descriptor(kind).size);

    match kind {
        MetadataKind::Interlaced => MetadataValue::Interlaced(get_i32(slot, 0)),
        MetadataKind::BufferGeometry => MetadataValue::BufferGeometry(BufferGeometry {
            width: get_i32(slot, 0),
            height: get_i32(slot, 4),
            format: get_i32(slot, 8),
        }),
        MetadataKind::RefreshRate => MetadataValue::RefreshRate(f32::from_bits(get_u32(slot, 0))),
        MetadataKind::ColorSpace => MetadataValue::ColorSpace(ColorSpace(get_i32(slot, 0))),
        MetadataKind::MapSecureBuffer => MetadataValue::MapSecureBuffer(get_i32(slot, 0)),
        MetadataKind::S3dFormat => MetadataValue::S3dFormat(get_u32(slot, 0)),
        MetadataKind::LinearFormat => MetadataValue::LinearFormat(get_u32(slot, 0)),
        MetadataKind::Igc => MetadataValue::Igc(IgcMode(get_u32(slot, 0))),
        MetadataKind::SingleBufferMode => MetadataValue::SingleBufferMode(get_u32(slot, 0)),
        MetadataKind::S3dComposition => MetadataValue::S3dComposition(S3dComposition {
            display_id: get_i32(slot, 0),
            mode: get_u32(slot, 4),
        }),
        MetadataKind::VideoTimestamp => MetadataValue::VideoTimestamp(get_u64(slot, 0)),
        MetadataKind::ColorMetadata => {
            let mut rgb_primaries = [[0u16; 2]; 3];
            for (i, primary) in rgb_primaries.iter_mut().enumerate() {
                primary[0] = get_u16(slot, 16 + i * 4);
                primary[1] = get_u16(slot, 18 + i * 4);
            }
            MetadataValue::ColorMetadata(ColorMetadata {
                primaries: get_u32(slot, 0),
                transfer: get_u32(slot, 4),
                range: get_u32(slot, 8),
                matrix: get_u32(slot, 12),
                mastering: MasteringDisplay {
                    rgb_primaries,
                    white_point: [get_u16(slot, 28), get_u16(slot, 30)],
                    max_luminance: get_u32(slot, 32),
                    min_luminance: get_u32(slot, 36),
                },
                light_level: ContentLightLevel {
                    max_content_light: get_u32(slot, 40),
                    max_frame_average_light: get_u32(slot, 44),
                },
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_bit_order() {
        for (index, entry) in SLOT_TABLE.iter().enumerate() {
            assert_eq!(entry.kind as u32 as usize, index);
            assert_eq!(descriptor(entry.kind).offset, entry.offset);
        }
    }

    #[test]
    fn test_slots_do_not_overlap() {
        let mut end = 8; // presence mask occupies bytes 0..8
        for entry in SLOT_TABLE.iter() {
            assert!(entry.offset >= end, "slot {:?} overlaps", entry.kind);
            end = entry.offset + entry.size;
        }
    }

    #[test]
    fn test_sentinel_decodes_to_cleared() {
        let value = decode_slot(MetadataKind::S3dComposition, &S3D_COMPOSITION_SENTINEL);
        assert_eq!(
            value,
            MetadataValue::S3dComposition(S3dComposition::CLEARED)
        );
    }

    #[test]
    fn test_geometry_codec() {
        let geometry = BufferGeometry {
            width: 1920,
            height: 1080,
            format: 17,
        };
        let mut slot = [0u8; 12];
        encode_slot(&MetadataValue::BufferGeometry(geometry), &mut slot);
        assert_eq!(
            decode_slot(MetadataKind::BufferGeometry, &slot),
            MetadataValue::BufferGeometry(geometry)
        );
    }

    #[test]
    fn test_refresh_rate_preserves_bits() {
        let mut slot = [0u8; 4];
        encode_slot(&MetadataValue::RefreshRate(59.94), &mut slot);
        assert_eq!(
            decode_slot(MetadataKind::RefreshRate, &slot),
            MetadataValue::RefreshRate(59.94)
        );
    }

    #[test]
    fn test_out_of_catalog_code_points_pass_through() {
        let slot = 5i32.to_le_bytes();
        assert_eq!(
            decode_slot(MetadataKind::ColorSpace, &slot),
            MetadataValue::ColorSpace(ColorSpace(5))
        );

        let slot = 7u32.to_le_bytes();
        assert_eq!(
            decode_slot(MetadataKind::Igc, &slot),
            MetadataValue::Igc(IgcMode(7))
        );
    }
}
