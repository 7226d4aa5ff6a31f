//! Error types for encoding operations.

use std::error::Error;
use std::fmt;

/// Result type for encoding operations.
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Errors that can occur while serializing a splice section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The destination buffer cannot hold the encoded section.
    BufferOverflow {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Value exceeds the maximum allowed for its field.
    ValueTooLarge {
        /// Name of the field.
        field: &'static str,
        /// Maximum allowed value.
        max_value: u64,
        /// Actual value provided.
        actual_value: u64,
    },

    /// A bit writer was asked for a width outside 1..=64.
    InvalidBitWidth(u8),
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::BufferOverflow { needed, available } => {
                write!(
                    f,
                    "Buffer overflow: needed {} bytes, had {}",
                    needed, available
                )
            }
            EncodingError::ValueTooLarge {
                field,
                max_value,
                actual_value,
            } => {
                write!(
                    f,
                    "Value too large for field {}: {} > {} (max)",
                    field, actual_value, max_value
                )
            }
            EncodingError::InvalidBitWidth(bits) => {
                write!(f, "Invalid bit width: {} (expected 1 to 64)", bits)
            }
        }
    }
}

impl Error for EncodingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = EncodingError::BufferOverflow {
            needed: 20,
            available: 10,
        };
        assert_eq!(err.to_string(), "Buffer overflow: needed 20 bytes, had 10");

        let err = EncodingError::ValueTooLarge {
            field: "descriptor_length",
            max_value: 255,
            actual_value: 300,
        };
        assert_eq!(
            err.to_string(),
            "Value too large for field descriptor_length: 300 > 255 (max)"
        );

        assert_eq!(
            EncodingError::InvalidBitWidth(0).to_string(),
            "Invalid bit width: 0 (expected 1 to 64)"
        );
    }
}
