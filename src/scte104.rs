//! SCTE-104 input model.
//!
//! These types describe an already decoded SCTE-104 message: a single
//! operation message, or a multiple operation message carrying an ordered list
//! of [`Operation`]s with their request payloads. Unpacking VANC packets into
//! this form happens upstream.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// SCTE-104 opID values handled by the translator.
pub mod op_id {
    pub const SPLICE_REQUEST: u16 = 0x0101;
    pub const SPLICE_NULL: u16 = 0x0102;
    pub const TIME_SIGNAL_REQUEST: u16 = 0x0104;
    pub const INSERT_DESCRIPTOR: u16 = 0x0108;
    pub const INSERT_DTMF_DESCRIPTOR: u16 = 0x0109;
    pub const INSERT_AVAIL_DESCRIPTOR: u16 = 0x010A;
    pub const INSERT_SEGMENTATION_DESCRIPTOR: u16 = 0x010B;
    pub const PROPRIETARY_COMMAND: u16 = 0x010C;
    pub const INSERT_TIER: u16 = 0x010F;
    pub const INSERT_TIME_DESCRIPTOR: u16 = 0x0110;
}

/// A decoded SCTE-104 message.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Scte104Message {
    /// Single operation message. Not translatable.
    SingleOperation(SingleOperationMessage),
    /// Multiple operation message.
    MultipleOperation(MultipleOperationMessage),
}

impl Scte104Message {
    /// Wraps a list of operations into a multiple operation message.
    pub fn multiple(operations: Vec<Operation>) -> Self {
        Scte104Message::MultipleOperation(MultipleOperationMessage { operations })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SingleOperationMessage {
    pub op_id: u16,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::serde::deserialize_hex")
    )]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct MultipleOperationMessage {
    pub operations: Vec<Operation>,
}

/// One operation of a multiple operation message.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Operation {
    SpliceRequest(SpliceRequestData),
    SpliceNullRequest,
    TimeSignalRequest(TimeSignalRequestData),
    InsertDescriptorRequest(InsertDescriptorRequestData),
    InsertDtmfRequest(DtmfDescriptorRequestData),
    InsertAvailDescriptorRequest(AvailDescriptorRequestData),
    InsertSegmentationRequest(SegmentationDescriptorRequestData),
    ProprietaryCommandRequest(ProprietaryCommandRequestData),
    InsertTierData(TierData),
    InsertTimeDescriptor(TimeDescriptorData),
    /// Any opID without a translation rule.
    Unknown {
        op_id: u16,
        #[cfg_attr(
            feature = "serde",
            serde(default, deserialize_with = "crate::serde::deserialize_hex")
        )]
        data: Vec<u8>,
    },
}

impl Operation {
    /// The SCTE-104 opID of this operation.
    pub fn op_id(&self) -> u16 {
        match self {
            Operation::SpliceRequest(_) => op_id::SPLICE_REQUEST,
            Operation::SpliceNullRequest => op_id::SPLICE_NULL,
            Operation::TimeSignalRequest(_) => op_id::TIME_SIGNAL_REQUEST,
            Operation::InsertDescriptorRequest(_) => op_id::INSERT_DESCRIPTOR,
            Operation::InsertDtmfRequest(_) => op_id::INSERT_DTMF_DESCRIPTOR,
            Operation::InsertAvailDescriptorRequest(_) => op_id::INSERT_AVAIL_DESCRIPTOR,
            Operation::InsertSegmentationRequest(_) => op_id::INSERT_SEGMENTATION_DESCRIPTOR,
            Operation::ProprietaryCommandRequest(_) => op_id::PROPRIETARY_COMMAND,
            Operation::InsertTierData(_) => op_id::INSERT_TIER,
            Operation::InsertTimeDescriptor(_) => op_id::INSERT_TIME_DESCRIPTOR,
            Operation::Unknown { op_id, .. } => *op_id,
        }
    }
}

/// splice_insert_type values of a splice request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SpliceInsertType {
    StartNormal = 1,
    StartImmediate = 2,
    EndNormal = 3,
    EndImmediate = 4,
    Cancel = 5,
}

impl SpliceInsertType {
    /// Start types take the splice out of the network and may carry a break duration.
    pub fn is_start(self) -> bool {
        matches!(
            self,
            SpliceInsertType::StartNormal | SpliceInsertType::StartImmediate
        )
    }

    /// Immediate types never carry a splice time.
    pub fn is_immediate(self) -> bool {
        matches!(
            self,
            SpliceInsertType::StartImmediate | SpliceInsertType::EndImmediate
        )
    }
}

impl TryFrom<u8> for SpliceInsertType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SpliceInsertType::StartNormal),
            2 => Ok(SpliceInsertType::StartImmediate),
            3 => Ok(SpliceInsertType::EndNormal),
            4 => Ok(SpliceInsertType::EndImmediate),
            5 => Ok(SpliceInsertType::Cancel),
            other => Err(other),
        }
    }
}

/// splice_request_data().
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SpliceRequestData {
    /// Raw splice_insert_type, see [`SpliceInsertType`].
    pub splice_insert_type: u8,
    pub splice_event_id: u32,
    pub unique_program_id: u16,
    /// Milliseconds.
    pub pre_roll_time: u16,
    /// Tenths of a second.
    pub break_duration: u16,
    pub avail_num: u8,
    pub avails_expected: u8,
    pub auto_return_flag: bool,
}

/// time_signal_request_data().
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TimeSignalRequestData {
    /// Milliseconds.
    pub pre_roll_time: u16,
}

/// insert_descriptor_request_data(): one raw SCTE-35 descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct InsertDescriptorRequestData {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::serde::deserialize_hex")
    )]
    pub descriptor_bytes: Vec<u8>,
}

/// insert_DTMF_descriptor_request_data().
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct DtmfDescriptorRequestData {
    /// Tenths of a second.
    pub pre_roll_time: u8,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::serde::deserialize_ascii")
    )]
    pub dtmf_chars: Vec<u8>,
}

/// insert_avail_descriptor_request_data().
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct AvailDescriptorRequestData {
    pub provider_avail_ids: Vec<u32>,
}

/// insert_segmentation_descriptor_request_data().
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SegmentationDescriptorRequestData {
    pub event_id: u32,
    pub event_cancel_indicator: bool,
    /// Whole seconds.
    pub duration: u16,
    pub upid_type: u8,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::serde::deserialize_hex")
    )]
    pub upid: Vec<u8>,
    pub type_id: u8,
    pub segment_num: u8,
    pub segments_expected: u8,
    pub delivery_not_restricted_flag: bool,
    pub web_delivery_allowed_flag: bool,
    pub no_regional_blackout_flag: bool,
    pub archive_allowed_flag: bool,
    pub device_restrictions: u8,
}

/// proprietary_command_request_data().
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ProprietaryCommandRequestData {
    pub proprietary_id: u32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::serde::deserialize_hex")
    )]
    pub data: Vec<u8>,
}

/// tier_data().
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TierData {
    /// Only the low 12 bits are used.
    pub tier: u16,
}

/// time_descriptor_data().
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TimeDescriptorData {
    /// 48-bit TAI seconds.
    pub tai_seconds: u64,
    pub tai_ns: u32,
    pub utc_offset: u16,
}
