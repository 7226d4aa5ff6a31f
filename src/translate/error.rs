//! Error types for the translation engine.

use super::descriptors::AttachKind;
use crate::encoding::EncodingError;
use std::error::Error;
use std::fmt;

/// Errors that can occur while translating a SCTE-104 message.
///
/// Only [`TranslateError::UnsupportedMessageKind`] aborts a translation. Every
/// other variant drops the operation or section it was raised for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// The message is not a multiple operation message.
    UnsupportedMessageKind {
        /// opID of the rejected single operation message.
        op_id: u16,
    },
    /// A splice request carried an unknown splice_insert_type.
    InvalidSpliceInsertType(u8),
    /// No section accepts the descriptor (or tier) being attached.
    NoEligibleTarget {
        /// What was being attached.
        kind: AttachKind,
    },
    /// A section or descriptor list is already full.
    CapacityExceeded {
        /// The limit that was hit.
        limit: usize,
    },
    /// The output buffer for a section could not be reserved.
    AllocationFailure {
        /// Number of bytes requested.
        requested: usize,
    },
    /// Raw descriptor bytes are too short to hold tag, length and identifier.
    InvalidDescriptorBytes {
        /// Number of bytes received.
        length: usize,
    },
    /// A descriptor field does not fit its SCTE-35 wire field, so the
    /// descriptor was not attached.
    DescriptorOutOfRange(EncodingError),
    /// The serializer rejected a section.
    SerializationFailure(EncodingError),
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslateError::UnsupportedMessageKind { op_id } => write!(
                f,
                "Unsupported message kind: single operation message (opID 0x{:04x})",
                op_id
            ),
            TranslateError::InvalidSpliceInsertType(value) => {
                write!(f, "Invalid splice_insert_type: {}", value)
            }
            TranslateError::NoEligibleTarget { kind } => {
                write!(f, "No eligible splice section for {}", kind)
            }
            TranslateError::CapacityExceeded { limit } => {
                write!(f, "Capacity exceeded: limit is {}", limit)
            }
            TranslateError::AllocationFailure { requested } => {
                write!(f, "Could not allocate {} byte output buffer", requested)
            }
            TranslateError::InvalidDescriptorBytes { length } => {
                write!(f, "Invalid descriptor bytes: {} bytes", length)
            }
            TranslateError::DescriptorOutOfRange(err) => {
                write!(f, "Descriptor out of range: {}", err)
            }
            TranslateError::SerializationFailure(err) => {
                write!(f, "Serialization failed: {}", err)
            }
        }
    }
}

impl Error for TranslateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TranslateError::DescriptorOutOfRange(err)
            | TranslateError::SerializationFailure(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EncodingError> for TranslateError {
    fn from(err: EncodingError) -> Self {
        TranslateError::SerializationFailure(err)
    }
}

/// Result type for translation operations.
pub type TranslateResult<T> = Result<T, TranslateError>;

/// A non-fatal failure recorded while dispatching one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OperationFailure {
    /// Position of the operation in the message.
    pub index: usize,
    /// opID of the failed operation.
    pub op_id: u16,
    /// Why it failed.
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::serde::serialize_display"))]
    pub error: TranslateError,
}

impl fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "operation {} (opID 0x{:04x}): {}",
            self.index, self.op_id, self.error
        )
    }
}
