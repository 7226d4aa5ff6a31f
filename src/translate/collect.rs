//! Serialization of finished sections into the output result set.

use super::OUTPUT_BUFFER_CAPACITY;
use super::error::{OperationFailure, TranslateError, TranslateResult};
use super::sections::SpliceSectionList;
use crate::encoding::{EncodingError, SectionSerializer};
use crate::types::SpliceInfoSection;
use tracing::{trace, warn};

/// Outcome of serializing one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionSlot {
    /// The encoded section.
    Encoded(Vec<u8>),
    /// The section could not be serialized and was dropped.
    Failed(TranslateError),
}

impl SectionSlot {
    /// The encoded bytes, if serialization succeeded.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            SectionSlot::Encoded(bytes) => Some(bytes),
            SectionSlot::Failed(_) => None,
        }
    }

    pub fn is_encoded(&self) -> bool {
        matches!(self, SectionSlot::Encoded(_))
    }
}

/// Serialized sections of one translation, one slot per built section, plus
/// the operations skipped while dispatching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputResultSet {
    slots: Vec<SectionSlot>,
    operation_failures: Vec<OperationFailure>,
}

impl OutputResultSet {
    /// Number of slots, which equals the number of built sections.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[SectionSlot] {
        &self.slots
    }

    /// Successfully encoded sections, in order.
    pub fn encoded(&self) -> impl Iterator<Item = &[u8]> {
        self.slots.iter().filter_map(SectionSlot::as_bytes)
    }

    /// Operations that failed during dispatch.
    pub fn operation_failures(&self) -> &[OperationFailure] {
        &self.operation_failures
    }

    /// Returns true when any operation or section failed.
    pub fn has_failures(&self) -> bool {
        !self.operation_failures.is_empty() || self.slots.iter().any(|slot| !slot.is_encoded())
    }

    pub fn into_slots(self) -> Vec<SectionSlot> {
        self.slots
    }

    pub(crate) fn with_operation_failures(mut self, failures: Vec<OperationFailure>) -> Self {
        self.operation_failures = failures;
        self
    }
}

/// Serializes every section in order. A section that fails leaves a
/// [`SectionSlot::Failed`] marker and the remaining sections are still
/// serialized. Each section is dropped right after its attempt.
pub fn collect<S>(sections: SpliceSectionList, serializer: &S) -> OutputResultSet
where
    S: SectionSerializer + ?Sized,
{
    let mut slots = Vec::with_capacity(sections.len());
    for (index, section) in sections.into_iter().enumerate() {
        let slot = match serialize_section(&section, serializer) {
            Ok(bytes) => {
                trace!(index, length = bytes.len(), "serialized splice section");
                SectionSlot::Encoded(bytes)
            }
            Err(error) => {
                warn!(index, %error, "dropping splice section");
                SectionSlot::Failed(error)
            }
        };
        slots.push(slot);
    }

    OutputResultSet {
        slots,
        operation_failures: Vec::new(),
    }
}

fn serialize_section<S>(section: &SpliceInfoSection, serializer: &S) -> TranslateResult<Vec<u8>>
where
    S: SectionSerializer + ?Sized,
{
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(OUTPUT_BUFFER_CAPACITY)
        .map_err(|_| TranslateError::AllocationFailure {
            requested: OUTPUT_BUFFER_CAPACITY,
        })?;
    buffer.resize(OUTPUT_BUFFER_CAPACITY, 0);

    let length = serializer.serialize(section, &mut buffer)?;
    if length > buffer.len() {
        return Err(EncodingError::BufferOverflow {
            needed: length,
            available: buffer.len(),
        }
        .into());
    }
    buffer.truncate(length);
    Ok(buffer)
}
