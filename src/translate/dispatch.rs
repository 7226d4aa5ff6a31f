//! Operation dispatch: routes each SCTE-104 operation to its builder or
//! attacher and drives a whole translation.

use super::MAX_SPLICES;
use super::collect::{OutputResultSet, collect};
use super::descriptors::{
    apply_tier, attach_avail, attach_dtmf, attach_generic, attach_segmentation, attach_time,
};
use super::error::{OperationFailure, TranslateError, TranslateResult};
use super::sections::{
    SpliceSectionList, build_private_command, build_splice_insert, build_splice_null,
    build_time_signal,
};
use crate::encoding::{SectionSerializer, WireSerializer};
use crate::scte104::{Operation, Scte104Message};
use crate::types::SpliceInfoSection;
use tracing::{debug, warn};

/// Sections built from a message, before serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dispatched {
    /// Built sections in operation order.
    pub sections: SpliceSectionList,
    /// Operations that were skipped, in operation order.
    pub failures: Vec<OperationFailure>,
}

/// Builds the splice sections described by `message`.
///
/// `current_pts` is the 90 kHz presentation time pre-roll values are
/// relative to. A failing operation is logged and recorded, and the remaining
/// operations still run. Only a single operation message fails the call.
pub fn dispatch(message: &Scte104Message, current_pts: u64) -> TranslateResult<Dispatched> {
    let operations = match message {
        Scte104Message::MultipleOperation(mom) => &mom.operations,
        Scte104Message::SingleOperation(som) => {
            warn!(op_id = som.op_id, "single operation messages cannot be translated");
            return Err(TranslateError::UnsupportedMessageKind { op_id: som.op_id });
        }
    };

    let mut dispatched = Dispatched::default();
    for (index, operation) in operations.iter().enumerate() {
        let op_id = operation.op_id();
        if let Err(error) = dispatch_operation(&mut dispatched.sections, operation, current_pts) {
            warn!(index, op_id, %error, "skipping SCTE-104 operation");
            dispatched.failures.push(OperationFailure {
                index,
                op_id,
                error,
            });
        }
    }

    debug!(
        operations = operations.len(),
        sections = dispatched.sections.len(),
        failures = dispatched.failures.len(),
        "dispatched multiple operation message"
    );
    Ok(dispatched)
}

fn dispatch_operation(
    sections: &mut SpliceSectionList,
    operation: &Operation,
    current_pts: u64,
) -> TranslateResult<()> {
    match operation {
        Operation::SpliceRequest(request) => append_section(sections, operation, || {
            build_splice_insert(request, current_pts)
        }),
        Operation::SpliceNullRequest => {
            append_section(sections, operation, || Ok(build_splice_null()))
        }
        Operation::TimeSignalRequest(request) => append_section(sections, operation, || {
            Ok(build_time_signal(request, current_pts))
        }),
        Operation::ProprietaryCommandRequest(request) => {
            sections.push(build_private_command(request))
        }
        Operation::InsertDescriptorRequest(request) => attach_generic(sections, request),
        Operation::InsertDtmfRequest(request) => attach_dtmf(sections, request),
        Operation::InsertAvailDescriptorRequest(request) => attach_avail(sections, request),
        Operation::InsertSegmentationRequest(request) => attach_segmentation(sections, request),
        Operation::InsertTierData(request) => apply_tier(sections, request),
        Operation::InsertTimeDescriptor(request) => attach_time(sections, request),
        Operation::Unknown { op_id, .. } => {
            debug!(op_id, "ignoring operation without a translation rule");
            Ok(())
        }
    }
}

/// Appends a section for a splice, splice_null or time_signal request. When
/// the list is full the operation is dropped without an error.
fn append_section<F>(
    sections: &mut SpliceSectionList,
    operation: &Operation,
    build: F,
) -> TranslateResult<()>
where
    F: FnOnce() -> TranslateResult<SpliceInfoSection>,
{
    if sections.is_full() {
        debug!(
            op_id = operation.op_id(),
            limit = MAX_SPLICES,
            "splice section list full, dropping operation"
        );
        return Ok(());
    }

    let section = build()?;
    debug!(
        op_id = operation.op_id(),
        command_type = ?section.splice_command_type(),
        "built splice section"
    );
    sections.push(section)
}

/// Translates SCTE-104 messages into serialized SCTE-35 sections.
///
/// The translator only holds its serializer, so one instance can be shared
/// between threads when the serializer allows it.
#[derive(Debug, Clone, Default)]
pub struct Translator<S = WireSerializer> {
    serializer: S,
}

impl Translator {
    /// A translator producing SCTE-35 wire bytes.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SectionSerializer> Translator<S> {
    /// A translator that hands finished sections to `serializer`.
    pub fn with_serializer(serializer: S) -> Self {
        Self { serializer }
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    /// Dispatches every operation of `message` and serializes the resulting
    /// sections.
    pub fn translate(
        &self,
        message: &Scte104Message,
        current_pts: u64,
    ) -> TranslateResult<OutputResultSet> {
        let Dispatched { sections, failures } = dispatch(message, current_pts)?;
        Ok(collect(sections, &self.serializer).with_operation_failures(failures))
    }
}
