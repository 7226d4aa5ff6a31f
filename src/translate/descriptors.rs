//! Attaching descriptors and tier values to already built sections.
//!
//! Every attachment targets the most recently built section that accepts the
//! descriptor kind. A section whose descriptor loop is full rejects further
//! descriptors with `CapacityExceeded`, and a descriptor whose fields do not
//! fit their wire fields is rejected with `DescriptorOutOfRange` before it
//! reaches the section.

use super::error::{TranslateError, TranslateResult};
use super::sections::SpliceSectionList;
use crate::descriptors::{
    AvailDescriptor, CUEI_IDENTIFIER, DtmfDescriptor, GenericDescriptor,
    MAX_GENERIC_DESCRIPTOR_DATA, SegmentationDescriptor, SpliceDescriptor, TimeDescriptor,
};
use crate::encoding::Encodable;
use crate::scte104::{
    AvailDescriptorRequestData, DtmfDescriptorRequestData, InsertDescriptorRequestData,
    SegmentationDescriptorRequestData, TierData, TimeDescriptorData,
};
use crate::time::segmentation_duration_to_ticks;
use crate::types::{MAX_DESCRIPTORS, SpliceCommandType, SpliceInfoSection};
use std::fmt;

/// What a descriptor operation attaches, and which sections accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachKind {
    Generic,
    Dtmf,
    Avail,
    Segmentation,
    Time,
    Tier,
}

impl AttachKind {
    /// Returns true when a section carrying `command_type` may receive this kind.
    pub fn accepts(self, command_type: SpliceCommandType) -> bool {
        use SpliceCommandType::*;
        match self {
            AttachKind::Generic | AttachKind::Dtmf | AttachKind::Tier => true,
            AttachKind::Avail => command_type == SpliceInsert,
            AttachKind::Segmentation | AttachKind::Time => {
                matches!(command_type, TimeSignal | SpliceInsert | SpliceNull)
            }
        }
    }
}

impl fmt::Display for AttachKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttachKind::Generic => "generic descriptor",
            AttachKind::Dtmf => "DTMF descriptor",
            AttachKind::Avail => "avail descriptor",
            AttachKind::Segmentation => "segmentation descriptor",
            AttachKind::Time => "time descriptor",
            AttachKind::Tier => "tier data",
        })
    }
}

fn find_target(
    sections: &mut SpliceSectionList,
    kind: AttachKind,
) -> TranslateResult<&mut SpliceInfoSection> {
    sections
        .find_last_eligible(|command_type| kind.accepts(command_type))
        .ok_or(TranslateError::NoEligibleTarget { kind })
}

fn push_descriptor(
    section: &mut SpliceInfoSection,
    descriptor: SpliceDescriptor,
) -> TranslateResult<()> {
    descriptor
        .encode_to_vec()
        .map_err(TranslateError::DescriptorOutOfRange)?;
    section
        .splice_descriptors
        .try_push(descriptor)
        .map_err(|_| TranslateError::CapacityExceeded {
            limit: MAX_DESCRIPTORS,
        })
}

/// Parses raw descriptor bytes: tag, descriptor_length, 4-byte identifier,
/// then `descriptor_length - 4` payload bytes (as many as are present, at most
/// [`MAX_GENERIC_DESCRIPTOR_DATA`]).
pub fn parse_generic_descriptor(bytes: &[u8]) -> TranslateResult<GenericDescriptor> {
    let invalid = TranslateError::InvalidDescriptorBytes {
        length: bytes.len(),
    };
    let (header, payload) = bytes.split_at_checked(6).ok_or(invalid.clone())?;
    let payload_length = (header[1] as usize).checked_sub(4).ok_or(invalid)?;
    let payload_length = payload_length
        .min(payload.len())
        .min(MAX_GENERIC_DESCRIPTOR_DATA);

    Ok(GenericDescriptor {
        tag: header[0],
        identifier: u32::from_be_bytes([header[2], header[3], header[4], header[5]]),
        data: payload[..payload_length].to_vec(),
    })
}

/// Attaches a descriptor given as raw bytes to the most recent section.
pub fn attach_generic(
    sections: &mut SpliceSectionList,
    request: &InsertDescriptorRequestData,
) -> TranslateResult<()> {
    let target = find_target(sections, AttachKind::Generic)?;
    let descriptor = parse_generic_descriptor(&request.descriptor_bytes)?;
    push_descriptor(target, SpliceDescriptor::Generic(descriptor))
}

/// Attaches a DTMF descriptor to the most recent section.
pub fn attach_dtmf(
    sections: &mut SpliceSectionList,
    request: &DtmfDescriptorRequestData,
) -> TranslateResult<()> {
    let target = find_target(sections, AttachKind::Dtmf)?;
    let descriptor = DtmfDescriptor::new(request.pre_roll_time, &request.dtmf_chars);
    push_descriptor(target, SpliceDescriptor::Dtmf(descriptor))
}

/// Attaches one avail descriptor per provider avail id to the most recent
/// splice_insert section. Stops at the first full descriptor loop, keeping the
/// descriptors attached before it.
pub fn attach_avail(
    sections: &mut SpliceSectionList,
    request: &AvailDescriptorRequestData,
) -> TranslateResult<()> {
    let target = find_target(sections, AttachKind::Avail)?;
    for &provider_avail_id in &request.provider_avail_ids {
        push_descriptor(
            target,
            SpliceDescriptor::Avail(AvailDescriptor::new(provider_avail_id)),
        )?;
    }
    Ok(())
}

/// Attaches a program segmentation descriptor to the most recent
/// time_signal, splice_insert or splice_null section.
pub fn attach_segmentation(
    sections: &mut SpliceSectionList,
    request: &SegmentationDescriptorRequestData,
) -> TranslateResult<()> {
    let target = find_target(sections, AttachKind::Segmentation)?;
    let segmentation_duration =
        (request.duration > 0).then(|| segmentation_duration_to_ticks(request.duration));

    let descriptor = SegmentationDescriptor {
        identifier: CUEI_IDENTIFIER,
        segmentation_event_id: request.event_id,
        segmentation_event_cancel_indicator: request.event_cancel_indicator,
        program_segmentation_flag: true,
        delivery_not_restricted_flag: request.delivery_not_restricted_flag,
        web_delivery_allowed_flag: request.web_delivery_allowed_flag,
        no_regional_blackout_flag: request.no_regional_blackout_flag,
        archive_allowed_flag: request.archive_allowed_flag,
        device_restrictions: request.device_restrictions & 0x3,
        segmentation_duration,
        segmentation_upid_type: request.upid_type,
        segmentation_upid: request.upid.clone(),
        segmentation_type_id: request.type_id,
        segment_num: request.segment_num,
        segments_expected: request.segments_expected,
        sub_segment_num: 0,
        sub_segments_expected: 0,
    };
    push_descriptor(target, SpliceDescriptor::Segmentation(descriptor))
}

/// Attaches a time descriptor to the most recent time_signal, splice_insert
/// or splice_null section.
pub fn attach_time(
    sections: &mut SpliceSectionList,
    request: &TimeDescriptorData,
) -> TranslateResult<()> {
    let target = find_target(sections, AttachKind::Time)?;
    let descriptor = TimeDescriptor {
        identifier: CUEI_IDENTIFIER,
        tai_seconds: request.tai_seconds,
        tai_ns: request.tai_ns,
        utc_offset: request.utc_offset,
    };
    push_descriptor(target, SpliceDescriptor::Time(descriptor))
}

/// Overwrites the tier of the most recent section with the low 12 bits of
/// the request.
pub fn apply_tier(sections: &mut SpliceSectionList, request: &TierData) -> TranslateResult<()> {
    let target = find_target(sections, AttachKind::Tier)?;
    target.tier = request.tier & 0x0FFF;
    Ok(())
}
