//! # SCTE-104 to SCTE-35 translation
//!
//! Converts SCTE-104 multiple operation messages, as carried in the ancillary
//! data of a video feed, into SCTE-35 `splice_info_section` messages ready to
//! be multiplexed into a transport stream.
//!
//! Each splice, splice_null, time_signal or proprietary command operation
//! produces one section. Descriptor operations (avail, DTMF, segmentation,
//! time, raw descriptors) and tier data decorate the most recent section that
//! is allowed to carry them. Timing values given in milliseconds are converted
//! to the 90 kHz clock relative to the caller's current PTS.
//!
//! ## Features
//!
//! - **Translation engine**: operation dispatch, descriptor attachment and
//!   per-section serialization with partial failure reporting
//! - **Wire encoding**: bit-exact SCTE-35 output including the MPEG-2 CRC-32
//! - **Serde support** (`serde`, default): JSON input messages and JSON views
//!   of the built sections
//! - **Base64** (`base64`): helpers for base64 encoded sections
//! - **CLI** (`cli`): the `scte104to35` command line tool
//!
//! ## Quick Start
//!
//! ```rust
//! use scte104to35::scte104::{Operation, Scte104Message, SpliceRequestData};
//! use scte104to35::{SectionSlot, translate};
//!
//! let message = Scte104Message::multiple(vec![Operation::SpliceRequest(SpliceRequestData {
//!     splice_insert_type: 1,
//!     splice_event_id: 0x1234,
//!     pre_roll_time: 4000,
//!     break_duration: 300,
//!     auto_return_flag: true,
//!     ..Default::default()
//! })]);
//!
//! let output = translate(&message, 0).unwrap();
//! assert_eq!(output.len(), 1);
//! assert!(matches!(output.slots()[0], SectionSlot::Encoded(_)));
//! assert!(!output.has_failures());
//! ```
//!
//! Sections can be inspected before serialization with [`dispatch`]:
//!
//! ```rust
//! use scte104to35::scte104::{Operation, Scte104Message, TimeSignalRequestData};
//! use scte104to35::dispatch;
//!
//! let message = Scte104Message::multiple(vec![Operation::TimeSignalRequest(
//!     TimeSignalRequestData { pre_roll_time: 1000 },
//! )]);
//!
//! let dispatched = dispatch(&message, 0).unwrap();
//! println!("{}", dispatched.sections[0]);
//! ```

pub mod bounded;
pub mod crc;
pub mod descriptors;
pub mod encoding;
pub mod fmt;
pub mod scte104;
pub mod time;
pub mod translate;
pub mod types;

#[cfg(feature = "serde")]
mod serde;

pub use descriptors::SpliceDescriptor;
pub use encoding::{EncodingError, EncodingResult, SectionSerializer, WireSerializer};
pub use scte104::{Operation, Scte104Message};
pub use translate::{
    Dispatched, MAX_SPLICES, OUTPUT_BUFFER_CAPACITY, OperationFailure, OutputResultSet,
    SectionSlot, TranslateError, TranslateResult, Translator, collect, dispatch, translate,
};
pub use types::{SpliceCommand, SpliceCommandType, SpliceInfoSection};
