//! SCTE-35 splice descriptors produced by the translator.
//!
//! Descriptors ride in the descriptor loop of a splice section. All of them
//! except [`GenericDescriptor`] carry the `CUEI` registration identifier.

#[cfg(feature = "serde")]
use serde::Serialize;

/// ASCII "CUEI", the identifier of descriptors defined by SCTE-35.
pub const CUEI_IDENTIFIER: u32 = 0x4355_4549;

/// Maximum number of DTMF characters a DTMF descriptor can carry.
pub const MAX_DTMF_CHARS: usize = 8;

/// Maximum payload of a generic descriptor: 255 length bytes minus the identifier.
pub const MAX_GENERIC_DESCRIPTOR_DATA: usize = 251;

/// Splice descriptor tags defined by SCTE-35.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SpliceDescriptorTag {
    /// avail_descriptor()
    Avail = 0x00,
    /// DTMF_descriptor()
    Dtmf = 0x01,
    /// segmentation_descriptor()
    Segmentation = 0x02,
    /// time_descriptor()
    Time = 0x03,
}

impl From<SpliceDescriptorTag> for u8 {
    fn from(tag: SpliceDescriptorTag) -> Self {
        tag as u8
    }
}

/// A descriptor attached to a splice section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(tag = "type"))]
pub enum SpliceDescriptor {
    /// Avail descriptor, only meaningful on splice_insert sections.
    Avail(AvailDescriptor),
    /// DTMF descriptor.
    Dtmf(DtmfDescriptor),
    /// Segmentation descriptor.
    Segmentation(SegmentationDescriptor),
    /// Time descriptor.
    Time(TimeDescriptor),
    /// Descriptor copied from raw SCTE-104 bytes.
    Generic(GenericDescriptor),
}

impl SpliceDescriptor {
    /// The `splice_descriptor_tag` this descriptor is written with.
    pub fn tag(&self) -> u8 {
        match self {
            SpliceDescriptor::Avail(_) => SpliceDescriptorTag::Avail.into(),
            SpliceDescriptor::Dtmf(_) => SpliceDescriptorTag::Dtmf.into(),
            SpliceDescriptor::Segmentation(_) => SpliceDescriptorTag::Segmentation.into(),
            SpliceDescriptor::Time(_) => SpliceDescriptorTag::Time.into(),
            SpliceDescriptor::Generic(generic) => generic.tag,
        }
    }

    /// The 32-bit registration identifier.
    pub fn identifier(&self) -> u32 {
        match self {
            SpliceDescriptor::Avail(d) => d.identifier,
            SpliceDescriptor::Dtmf(d) => d.identifier,
            SpliceDescriptor::Segmentation(d) => d.identifier,
            SpliceDescriptor::Time(d) => d.identifier,
            SpliceDescriptor::Generic(d) => d.identifier,
        }
    }
}

/// avail_descriptor(): one provider avail id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AvailDescriptor {
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "crate::serde::serialize_identifier")
    )]
    pub identifier: u32,
    pub provider_avail_id: u32,
}

impl AvailDescriptor {
    pub fn new(provider_avail_id: u32) -> Self {
        Self {
            identifier: CUEI_IDENTIFIER,
            provider_avail_id,
        }
    }
}

/// DTMF_descriptor(): tone sequence announced ahead of a splice.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DtmfDescriptor {
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "crate::serde::serialize_identifier")
    )]
    pub identifier: u32,
    /// Tenths of a second between the tones and the splice.
    pub preroll: u8,
    /// At most [`MAX_DTMF_CHARS`] ASCII characters.
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "crate::serde::serialize_ascii")
    )]
    pub dtmf_chars: Vec<u8>,
}

impl DtmfDescriptor {
    /// Builds a DTMF descriptor, dropping characters beyond [`MAX_DTMF_CHARS`].
    pub fn new(preroll: u8, dtmf_chars: &[u8]) -> Self {
        let count = dtmf_chars.len().min(MAX_DTMF_CHARS);
        Self {
            identifier: CUEI_IDENTIFIER,
            preroll,
            dtmf_chars: dtmf_chars[..count].to_vec(),
        }
    }
}

/// segmentation_descriptor() in program segmentation mode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SegmentationDescriptor {
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "crate::serde::serialize_identifier")
    )]
    pub identifier: u32,
    pub segmentation_event_id: u32,
    pub segmentation_event_cancel_indicator: bool,
    /// Always true: component segmentation is not produced.
    pub program_segmentation_flag: bool,
    pub delivery_not_restricted_flag: bool,
    pub web_delivery_allowed_flag: bool,
    pub no_regional_blackout_flag: bool,
    pub archive_allowed_flag: bool,
    /// 2-bit device restriction group.
    pub device_restrictions: u8,
    /// Segment length in 90 kHz ticks (40 bits).
    pub segmentation_duration: Option<u64>,
    pub segmentation_upid_type: u8,
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "crate::serde::serialize_hex")
    )]
    pub segmentation_upid: Vec<u8>,
    pub segmentation_type_id: u8,
    pub segment_num: u8,
    pub segments_expected: u8,
    pub sub_segment_num: u8,
    pub sub_segments_expected: u8,
}

impl SegmentationDescriptor {
    /// Mirrors `segmentation_duration_flag`.
    pub fn segmentation_duration_flag(&self) -> bool {
        self.segmentation_duration.is_some()
    }

    /// Segmentation types whose syntax includes the sub-segment fields.
    pub fn has_sub_segment_fields(&self) -> bool {
        matches!(self.segmentation_type_id, 0x34 | 0x36 | 0x38 | 0x3A)
    }
}

/// time_descriptor(): TAI wall-clock time of the splice.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TimeDescriptor {
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "crate::serde::serialize_identifier")
    )]
    pub identifier: u32,
    /// 48-bit TAI seconds.
    pub tai_seconds: u64,
    pub tai_ns: u32,
    pub utc_offset: u16,
}

/// A descriptor whose tag and identifier come straight from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GenericDescriptor {
    pub tag: u8,
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "crate::serde::serialize_identifier")
    )]
    pub identifier: u32,
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "crate::serde::serialize_hex")
    )]
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtmf_truncates_characters() {
        let dtmf = DtmfDescriptor::new(5, b"0123456789");
        assert_eq!(dtmf.dtmf_chars, b"01234567".to_vec());
        assert_eq!(dtmf.identifier, CUEI_IDENTIFIER);

        let dtmf = DtmfDescriptor::new(5, b"12#");
        assert_eq!(dtmf.dtmf_chars, b"12#".to_vec());
    }

    #[test]
    fn test_tags_and_identifiers() {
        let avail = SpliceDescriptor::Avail(AvailDescriptor::new(1));
        assert_eq!(avail.tag(), 0x00);
        assert_eq!(avail.identifier(), CUEI_IDENTIFIER);

        let generic = SpliceDescriptor::Generic(GenericDescriptor {
            tag: 0xF0,
            identifier: 0x5445_5354,
            data: vec![],
        });
        assert_eq!(generic.tag(), 0xF0);
        assert_eq!(generic.identifier(), 0x5445_5354);
    }
}
