//! Fixed, ABI-stable layout of the shared metadata record

pub mod attributes;
pub mod record;
pub mod slots;

pub use attributes::{
    BufferGeometry, ColorMetadata, ColorSpace, ContentLightLevel, IgcMode, MasteringDisplay,
    MetadataKind, MetadataValue, S3dComposition,
};
pub use record::{
    decode_attribute, encode_attribute, is_present, mapped_size, page_size, presence_mask,
    set_presence_mask, PRESENCE_MASK_OFFSET, PRESENCE_MASK_SIZE, RECORD_SIZE,
};
pub use slots::{descriptor, SlotDescriptor, SLOT_TABLE, S3D_COMPOSITION_SENTINEL};
