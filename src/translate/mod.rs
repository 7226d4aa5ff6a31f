//! SCTE-104 to SCTE-35 translation engine.
//!
//! A translation walks the operations of a multiple operation message in
//! order. Splice, splice_null, time_signal and proprietary command requests
//! each build a new splice section; descriptor and tier operations modify the
//! most recently built section that accepts them. The finished sections are
//! then serialized one by one.
//!
//! ```rust
//! use scte104to35::scte104::{Operation, Scte104Message, TimeSignalRequestData};
//! use scte104to35::translate;
//!
//! let message = Scte104Message::multiple(vec![Operation::TimeSignalRequest(
//!     TimeSignalRequestData { pre_roll_time: 0 },
//! )]);
//!
//! let output = translate(&message, 0x423A_35BD).unwrap();
//! assert_eq!(output.len(), 1);
//! assert_eq!(output.encoded().next().map(|bytes| bytes[0]), Some(0xFC));
//! ```

mod collect;
mod descriptors;
mod dispatch;
mod error;
mod sections;


pub use collect::{OutputResultSet, SectionSlot, collect};
pub use descriptors::{AttachKind, parse_generic_descriptor};
pub use dispatch::{Dispatched, Translator, dispatch};
pub use error::{OperationFailure, TranslateError, TranslateResult};
pub use sections::SpliceSectionList;

use crate::scte104::Scte104Message;

/// Maximum number of sections one message can produce.
pub const MAX_SPLICES: usize = 16;

/// Size of the buffer each section is serialized into.
pub const OUTPUT_BUFFER_CAPACITY: usize = 4096;

/// Translates `message` with the default wire serializer.
///
/// `current_pts` is the 90 kHz presentation time that pre-roll values are
/// added to.
pub fn translate(message: &Scte104Message, current_pts: u64) -> TranslateResult<OutputResultSet> {
    Translator::new().translate(message, current_pts)
}
