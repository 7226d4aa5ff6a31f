//! Binary encoding of SCTE-35 splice sections.
//!
//! [`WireSerializer`] is the default [`SectionSerializer`] used by the
//! translator. It packs the section header, command and descriptor loop with
//! [`BitWriter`] and appends the MPEG-2 CRC_32.

/// Error types for encoding operations.
pub mod error;

/// Bit-level writer for encoding binary data.
pub mod writer;

/// Trait definitions for encodable types.
pub mod traits;

mod commands;
mod descriptors;
mod splice_info_section;
mod time;


pub use error::{EncodingError, EncodingResult};
pub use splice_info_section::{MAX_SECTION_LENGTH, WireSerializer};
pub use traits::{Encodable, SectionSerializer};
pub use writer::BitWriter;

#[cfg(feature = "base64")]
pub use traits::Base64Encodable;
