//! Core SCTE-35 data structures produced by the translator.
//!
//! A [`SpliceInfoSection`] holds one splice command plus its descriptor loop.
//! Header fields that are constant for unencrypted sections (table_id,
//! section_syntax_indicator, encryption fields, cw_index) and the derived
//! length fields are not stored; the encoder writes them.

use crate::bounded::BoundedVec;
use crate::descriptors::SpliceDescriptor;
use crate::time::{BreakDuration, SpliceTime};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Table identifier of every SCTE-35 section.
pub const TABLE_ID: u8 = 0xFC;

/// Maximum number of descriptors in one section's descriptor loop.
pub const MAX_DESCRIPTORS: usize = 16;

/// Tier value meaning "no authorization tier".
pub const DEFAULT_TIER: u16 = 0x0FFF;

/// SAP type 3: not specified.
pub const SAP_TYPE_NOT_SPECIFIED: u8 = 0x3;

/// Descriptor loop of a section.
pub type DescriptorList = BoundedVec<SpliceDescriptor, MAX_DESCRIPTORS>;

/// Represents a complete SCTE-35 splice information section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpliceInfoSection {
    /// SAP (Stream Access Point) type
    pub sap_type: u8,
    /// SCTE-35 protocol version
    pub protocol_version: u8,
    /// PTS adjustment value in 90kHz ticks
    pub pts_adjustment: u64,
    /// Authorization tier (12 bits)
    pub tier: u16,
    /// The splice command carried by this section
    pub splice_command: SpliceCommand,
    /// Descriptor loop, at most [`MAX_DESCRIPTORS`] entries
    pub splice_descriptors: DescriptorList,
}

impl SpliceInfoSection {
    /// Creates a section around `splice_command` with default header values.
    pub fn new(splice_command: SpliceCommand) -> Self {
        Self {
            sap_type: SAP_TYPE_NOT_SPECIFIED,
            protocol_version: 0,
            pts_adjustment: 0,
            tier: DEFAULT_TIER,
            splice_command,
            splice_descriptors: DescriptorList::new(),
        }
    }

    /// Type of the carried command.
    pub fn splice_command_type(&self) -> SpliceCommandType {
        self.splice_command.command_type()
    }
}

/// Represents the different types of splice commands the translator produces.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(tag = "type"))]
pub enum SpliceCommand {
    /// Null command (0x00) - No operation
    SpliceNull,
    /// Splice insert command (0x05) - Ad insertion points
    SpliceInsert(SpliceInsert),
    /// Time signal command (0x06) - Time synchronization
    TimeSignal(TimeSignal),
    /// Private command (0xFF) - Custom/proprietary commands
    PrivateCommand(PrivateCommand),
}

impl SpliceCommand {
    pub fn command_type(&self) -> SpliceCommandType {
        match self {
            SpliceCommand::SpliceNull => SpliceCommandType::SpliceNull,
            SpliceCommand::SpliceInsert(_) => SpliceCommandType::SpliceInsert,
            SpliceCommand::TimeSignal(_) => SpliceCommandType::TimeSignal,
            SpliceCommand::PrivateCommand(_) => SpliceCommandType::PrivateCommand,
        }
    }
}

/// `splice_command_type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SpliceCommandType {
    SpliceNull = 0x00,
    SpliceInsert = 0x05,
    TimeSignal = 0x06,
    PrivateCommand = 0xFF,
}

impl From<SpliceCommandType> for u8 {
    fn from(command_type: SpliceCommandType) -> Self {
        command_type as u8
    }
}

/// Represents a splice insert command (0x05) in program splice mode.
///
/// This is the most commonly used splice command for ad insertion.
/// It signals the start and end of commercial breaks or other content substitutions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpliceInsert {
    /// Unique identifier for this splice event
    pub splice_event_id: u32,
    /// Indicates if the splice event is being cancelled (1 = cancel, 0 = proceed)
    pub splice_event_cancel_indicator: u8,
    /// Indicates whether the splice is going out of or returning to the network (1 = out, 0 = in)
    pub out_of_network_indicator: u8,
    /// Always 1: component mode splices are not produced
    pub program_splice_flag: u8,
    /// Indicates whether a break duration is specified (1 = duration present, 0 = no duration)
    pub duration_flag: u8,
    /// Indicates if the splice should happen immediately (1 = immediate, 0 = at specified time)
    pub splice_immediate_flag: u8,
    /// Presentation timestamp when the splice should occur (written when splice_immediate_flag = 0)
    pub splice_time: Option<SpliceTime>,
    /// Break length and auto_return; the break_duration() structure is only
    /// written when duration_flag = 1
    pub break_duration: Option<BreakDuration>,
    /// Unique identifier for the program
    pub unique_program_id: u16,
    /// Avail number for this splice event
    pub avail_num: u8,
    /// Expected number of avails in this break
    pub avails_expected: u8,
}

impl SpliceInsert {
    /// An insert with every flag cleared and no timing.
    pub fn new(splice_event_id: u32) -> Self {
        Self {
            splice_event_id,
            splice_event_cancel_indicator: 0,
            out_of_network_indicator: 0,
            program_splice_flag: 1,
            duration_flag: 0,
            splice_immediate_flag: 0,
            splice_time: None,
            break_duration: None,
            unique_program_id: 0,
            avail_num: 0,
            avails_expected: 0,
        }
    }

    /// `time_specified_flag` of the carried splice time, 0 when there is none.
    pub fn time_specified_flag(&self) -> u8 {
        self.splice_time
            .map(|time| time.time_specified_flag)
            .unwrap_or(0)
    }
}

/// Represents a time signal command (0x06).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TimeSignal {
    /// The presentation timestamp for this time signal
    pub splice_time: SpliceTime,
}

/// Represents a private command (0xFF).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PrivateCommand {
    /// 32-bit registered identifier of the command's owner
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "crate::serde::serialize_identifier")
    )]
    pub identifier: u32,
    /// Raw command payload
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "crate::serde::serialize_hex")
    )]
    pub private_bytes: Vec<u8>,
}
