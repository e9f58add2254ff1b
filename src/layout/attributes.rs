//! Attribute kinds and their typed values

use serde::{Deserialize, Serialize};

/// The fixed, append-only enumeration of metadata attribute kinds.
///
/// The discriminant of each kind is its presence-bit position in the region's
/// presence mask. Assignments are part of the cross-process ABI: new kinds may
/// be appended, existing kinds must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum MetadataKind {
    /// Interlaced scan flag for video buffers
    Interlaced = 0,
    /// Updated buffer geometry (width, height, pixel format)
    BufferGeometry = 1,
    /// Display refresh rate hint in Hz
    RefreshRate = 2,
    /// Color space of the buffer contents
    ColorSpace = 3,
    /// Secure-buffer mapping flag
    MapSecureBuffer = 4,
    /// Stereoscopic (side-by-side/top-bottom) frame packing format
    S3dFormat = 5,
    /// Linear (unaligned) pixel format override
    LinearFormat = 6,
    /// Inverse gamma correction mode
    Igc = 7,
    /// Single-buffer rendering mode flag
    SingleBufferMode = 8,
    /// Stereoscopic composition performed by the GPU
    S3dComposition = 9,
    /// Video timestamp in nanoseconds
    VideoTimestamp = 10,
    /// HDR color metadata (primaries, transfer, mastering display, light levels)
    ColorMetadata = 11,
}

impl MetadataKind {
    /// Every kind, in bit order
    pub const ALL: [MetadataKind; 12] = [
        MetadataKind::Interlaced,
        MetadataKind::BufferGeometry,
        MetadataKind::RefreshRate,
        MetadataKind::ColorSpace,
        MetadataKind::MapSecureBuffer,
        MetadataKind::S3dFormat,
        MetadataKind::LinearFormat,
        MetadataKind::Igc,
        MetadataKind::SingleBufferMode,
        MetadataKind::S3dComposition,
        MetadataKind::VideoTimestamp,
        MetadataKind::ColorMetadata,
    ];

    /// Look up a kind from its raw wire value
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| *kind as u32 == raw)
    }

    /// Raw wire value of this kind
    pub fn raw(self) -> u32 {
        self as u32
    }

    /// Bit in the region's presence mask reserved for this kind
    pub fn presence_bit(self) -> u64 {
        1u64 << (self as u32)
    }

    /// Human-readable name of the kind
    pub fn name(self) -> &'static str {
        match self {
            MetadataKind::Interlaced => "interlaced",
            MetadataKind::BufferGeometry => "buffer-geometry",
            MetadataKind::RefreshRate => "refresh-rate",
            MetadataKind::ColorSpace => "color-space",
            MetadataKind::MapSecureBuffer => "map-secure-buffer",
            MetadataKind::S3dFormat => "s3d-format",
            MetadataKind::LinearFormat => "linear-format",
            MetadataKind::Igc => "igc",
            MetadataKind::SingleBufferMode => "single-buffer-mode",
            MetadataKind::S3dComposition => "s3d-composition",
            MetadataKind::VideoTimestamp => "video-timestamp",
            MetadataKind::ColorMetadata => "color-metadata",
        }
    }
}

/// Buffer geometry attribute payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferGeometry {
    pub width: i32,
    pub height: i32,
    pub format: i32,
}

/// Color space of buffer contents.
///
/// A transparent code-point wrapper, not a closed enumeration: the protocol
/// transports the value without interpreting it, so code points appended by
/// newer stacks round-trip through older readers unchanged. The named
/// constants cover the deployed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSpace(pub i32);

impl ColorSpace {
    pub const ITU_R_601: ColorSpace = ColorSpace(0);
    pub const ITU_R_601_FR: ColorSpace = ColorSpace(1);
    pub const ITU_R_709: ColorSpace = ColorSpace(2);
    pub const ITU_R_2020: ColorSpace = ColorSpace(3);
    pub const ITU_R_2020_FR: ColorSpace = ColorSpace(4);
}

/// Inverse gamma correction mode.
///
/// Transparent code-point wrapper, same forward-compatibility contract as
/// [`ColorSpace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IgcMode(pub u32);

impl IgcMode {
    pub const NOT_SPECIFIED: IgcMode = IgcMode(0);
    pub const SRGB: IgcMode = IgcMode(1);
}

/// Stereoscopic composition state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3dComposition {
    /// Display performing the composition, -1 when none
    pub display_id: i32,
    /// Stereo packing mode, 0 when none
    pub mode: u32,
}

impl S3dComposition {
    /// The documented "no composition" sentinel written by `clear`
    pub const CLEARED: S3dComposition = S3dComposition {
        display_id: -1,
        mode: 0,
    };
}

/// Mastering display metadata (SMPTE ST 2086 style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteringDisplay {
    /// RGB primary chromaticity coordinates, 0.00002-unit fixed point
    pub rgb_primaries: [[u16; 2]; 3],
    /// White point chromaticity coordinates
    pub white_point: [u16; 2],
    /// Maximum display luminance in 0.0001 cd/m2
    pub max_luminance: u32,
    /// Minimum display luminance in 0.0001 cd/m2
    pub min_luminance: u32,
}

/// Content light level metadata (CTA-861.3 style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLightLevel {
    pub max_content_light: u32,
    pub max_frame_average_light: u32,
}

/// HDR color metadata attribute payload.
///
/// The primaries/transfer/range/matrix fields carry raw standard-defined code
/// points; their semantic interpretation belongs to the display stack, not to
/// this protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMetadata {
    pub primaries: u32,
    pub transfer: u32,
    pub range: u32,
    pub matrix: u32,
    pub mastering: MasteringDisplay,
    pub light_level: ContentLightLevel,
}

/// A typed attribute value, one variant per [`MetadataKind`].
///
/// The variant carries both the kind and the payload, replacing the raw
/// kind-plus-untyped-pointer pairing of C-style metadata interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetadataValue {
    Interlaced(i32),
    BufferGeometry(BufferGeometry),
    RefreshRate(f32),
    ColorSpace(ColorSpace),
    MapSecureBuffer(i32),
    S3dFormat(u32),
    LinearFormat(u32),
    Igc(IgcMode),
    SingleBufferMode(u32),
    S3dComposition(S3dComposition),
    VideoTimestamp(u64),
    ColorMetadata(ColorMetadata),
}

impl MetadataValue {
    /// The kind whose slot this value occupies
    pub fn kind(&self) -> MetadataKind {
        match self {
            MetadataValue::Interlaced(_) => MetadataKind::Interlaced,
            MetadataValue::BufferGeometry(_) => MetadataKind::BufferGeometry,
            MetadataValue::RefreshRate(_) => MetadataKind::RefreshRate,
            MetadataValue::ColorSpace(_) => MetadataKind::ColorSpace,
            MetadataValue::MapSecureBuffer(_) => MetadataKind::MapSecureBuffer,
            MetadataValue::S3dFormat(_) => MetadataKind::S3dFormat,
            MetadataValue::LinearFormat(_) => MetadataKind::LinearFormat,
            MetadataValue::Igc(_) => MetadataKind::Igc,
            MetadataValue::SingleBufferMode(_) => MetadataKind::SingleBufferMode,
            MetadataValue::S3dComposition(_) => MetadataKind::S3dComposition,
            MetadataValue::VideoTimestamp(_) => MetadataKind::VideoTimestamp,
            MetadataValue::ColorMetadata(_) => MetadataKind::ColorMetadata,
        }
    }
}
