//! Integration tests for the command line tool

#[cfg(feature = "cli")]
#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use std::io::Write;

    const SPLICE_NULL_MESSAGE: &str =
        r#"{"multiple_operation":{"operations":[{"type":"splice_null_request"}]}}"#;
    const SPLICE_NULL_BASE64: &str = "/DARAAAAAAAAAP/wAAAAAHpPv/8=";

    const SPLICE_WITH_SEGMENTATION_MESSAGE: &str = r#"{
        "multiple_operation": {
            "operations": [
                {
                    "type": "splice_request",
                    "splice_insert_type": 1,
                    "splice_event_id": 4660,
                    "unique_program_id": 85,
                    "pre_roll_time": 4000,
                    "break_duration": 30000,
                    "avail_num": 1,
                    "avails_expected": 2,
                    "auto_return_flag": true
                },
                {
                    "type": "insert_segmentation_request",
                    "event_id": 7,
                    "duration": 15000,
                    "upid_type": 3,
                    "upid": "414243443031323334353637",
                    "type_id": 48,
                    "segment_num": 1,
                    "segments_expected": 1,
                    "delivery_not_restricted_flag": true
                }
            ]
        }
    }"#;
    const SPLICE_WITH_SEGMENTATION_BASE64: &str = "/DBHAAAAAAAAAP/wFAUAABI0f+/+AAV+QP4QF9+AAFUBAgAiAiBDVUVJAAAAB3//AFB3XYADDEFCQ0QwMTIzNDU2NzABAU56oCM=";

    fn cli() -> Command {
        Command::cargo_bin("scte104to35").unwrap()
    }

    #[test]
    fn test_cli_text_output_from_stdin() {
        cli()
            .write_stdin(SPLICE_NULL_MESSAGE)
            .assert()
            .success()
            .stdout(predicate::str::contains("Translated 1 section(s)"))
            .stdout(predicate::str::contains("Splice Command: SpliceNull"))
            .stdout(predicate::str::contains(format!(
                "Base64: {}",
                SPLICE_NULL_BASE64
            )));
    }

    #[test]
    fn test_cli_base64_output() {
        let output = cli()
            .args(["-o", "base64", "-"])
            .write_stdin(SPLICE_WITH_SEGMENTATION_MESSAGE)
            .output()
            .expect("Failed to execute CLI command");

        assert!(output.status.success(), "CLI command should succeed");
        let stdout = String::from_utf8(output.stdout).expect("Output should be valid UTF-8");
        assert_eq!(stdout.trim(), SPLICE_WITH_SEGMENTATION_BASE64);
    }

    #[test]
    fn test_cli_hex_output() {
        cli()
            .args(["--output", "hex"])
            .write_stdin(SPLICE_NULL_MESSAGE)
            .assert()
            .success()
            .stdout("fc301100000000000000fff0000000007a4fbfff\n");
    }

    #[test]
    fn test_cli_pts_offsets_time_signal() {
        cli()
            .args(["--pts", "1111111101", "-o", "base64"])
            .write_stdin(
                r#"{"multiple_operation":{"operations":[{"type":"time_signal_request","pre_roll_time":0}]}}"#,
            )
            .assert()
            .success()
            .stdout("/DAWAAAAAAAAAP/wBQb+Qjo1vQAAuwxz9A==\n");
    }

    #[test]
    fn test_cli_reads_input_file() {
        let path = std::env::temp_dir().join(format!(
            "scte104to35-cli-{}.json",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SPLICE_NULL_MESSAGE.as_bytes()).unwrap();
        drop(file);

        let assert = cli().args(["-o", "base64"]).arg(&path).assert();
        std::fs::remove_file(&path).ok();
        assert
            .success()
            .stdout(predicate::str::contains(SPLICE_NULL_BASE64));
    }

    #[test]
    fn test_cli_json_output() {
        let output = cli()
            .args(["-o", "json"])
            .write_stdin(SPLICE_WITH_SEGMENTATION_MESSAGE)
            .output()
            .expect("Failed to execute CLI command");

        assert!(output.status.success(), "CLI command should succeed");
        let stdout = String::from_utf8(output.stdout).expect("Output should be valid UTF-8");
        let json: serde_json::Value =
            serde_json::from_str(&stdout).expect("Output should be valid JSON");

        assert_eq!(json["status"], "success");
        assert_eq!(json["sections"].as_array().unwrap().len(), 1);
        let section = &json["sections"][0];
        assert_eq!(section["base64"], SPLICE_WITH_SEGMENTATION_BASE64);
        assert_eq!(section["section"]["splice_command"]["type"], "SpliceInsert");
        assert_eq!(section["section"]["splice_command"]["splice_event_id"], 4660);
        assert_eq!(section["section"]["tier"], 4095);
        assert_eq!(
            section["section"]["splice_descriptors"].as_array().unwrap().len(),
            1
        );
        assert!(json["failures"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_cli_json_reports_skipped_operations() {
        let output = cli()
            .args(["-o", "json"])
            .write_stdin(
                r#"{"multiple_operation":{"operations":[
                    {"type":"splice_null_request"},
                    {"type":"insert_avail_descriptor_request","provider_avail_ids":[1]}
                ]}}"#,
            )
            .output()
            .expect("Failed to execute CLI command");

        assert!(output.status.success(), "partial failures are not fatal");
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["status"], "partial");
        assert_eq!(json["sections"][0]["base64"], SPLICE_NULL_BASE64);
        assert_eq!(json["failures"][0]["index"], 1);
        assert_eq!(json["failures"][0]["op_id"], 0x010A);
        assert_eq!(
            json["failures"][0]["error"],
            "No eligible splice section for avail descriptor"
        );
    }

    #[test]
    fn test_cli_rejects_single_operation_message() {
        cli()
            .write_stdin(r#"{"single_operation":{"op_id":257,"data":"0102"}}"#)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Unsupported message kind"));
    }

    #[test]
    fn test_cli_handles_invalid_json() {
        cli()
            .write_stdin("not json")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error decoding SCTE-104 message"));
    }

    #[test]
    fn test_cli_handles_missing_file() {
        cli()
            .arg("/nonexistent/message.json")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error reading /nonexistent/message.json"));
    }

    #[test]
    fn test_cli_help_contains_expected_text() {
        cli()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Translate a JSON encoded SCTE-104 multiple operation message",
            ))
            .stdout(predicate::str::contains("Output format"))
            .stdout(predicate::str::contains("--pts"));
    }

    #[test]
    fn test_cli_version_works() {
        cli()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("scte104to35"))
            .stderr("");
    }
}
