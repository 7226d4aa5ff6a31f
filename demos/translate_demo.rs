//! Example translating a typical ad break cue into SCTE-35

use data_encoding::BASE64;
use scte104to35::scte104::{
    AvailDescriptorRequestData, Operation, Scte104Message, SegmentationDescriptorRequestData,
    SpliceInsertType, SpliceRequestData,
};
use scte104to35::{SectionSlot, dispatch, translate};

fn main() {
    // A 30 second break starting 4 seconds from now, with a provider
    // placement opportunity start and an avail descriptor.
    let message = Scte104Message::multiple(vec![
        Operation::SpliceRequest(SpliceRequestData {
            splice_insert_type: SpliceInsertType::StartNormal as u8,
            splice_event_id: 0x1234,
            unique_program_id: 0x55,
            pre_roll_time: 4000,
            break_duration: 300,
            avail_num: 1,
            avails_expected: 1,
            auto_return_flag: true,
        }),
        Operation::InsertAvailDescriptorRequest(AvailDescriptorRequestData {
            provider_avail_ids: vec![0x0000_0135],
        }),
        Operation::InsertSegmentationRequest(SegmentationDescriptorRequestData {
            event_id: 7,
            duration: 30,
            upid_type: 0x09,
            upid: b"SIGNAL:demo".to_vec(),
            type_id: 0x34,
            segment_num: 1,
            segments_expected: 1,
            delivery_not_restricted_flag: true,
            ..Default::default()
        }),
    ]);

    // Five seconds into the stream
    let current_pts = 5 * 90_000;

    let dispatched = dispatch(&message, current_pts).unwrap();
    for section in dispatched.sections.iter() {
        println!("{section}");
        println!("JSON representation:");
        println!("{}", serde_json::to_string_pretty(section).unwrap());
    }
    for failure in &dispatched.failures {
        println!("Skipped {failure}");
    }

    let output = translate(&message, current_pts).unwrap();
    for (index, slot) in output.slots().iter().enumerate() {
        match slot {
            SectionSlot::Encoded(bytes) => {
                println!("\nSection {index} ({} bytes): {}", bytes.len(), BASE64.encode(bytes))
            }
            SectionSlot::Failed(error) => println!("\nSection {index} failed: {error}"),
        }
    }
}
