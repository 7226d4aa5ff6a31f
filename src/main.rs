use clap::{Parser, ValueEnum};
use data_encoding::{BASE64, HEXLOWER};
use scte104to35::scte104::Scte104Message;
use scte104to35::{
    OperationFailure, OutputResultSet, SectionSlot, SpliceInfoSection, WireSerializer, collect,
    dispatch,
};
use serde_json::json;
use std::fs;
use std::io::{self, Read};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human readable sections
    Text,
    /// Sections, encoded bytes and failures as JSON
    Json,
    /// One base64 encoded section per line
    Base64,
    /// One hex encoded section per line
    Hex,
}

#[derive(Parser, Debug)]
#[command(
    name = "scte104to35",
    version,
    about = "Translate a JSON encoded SCTE-104 multiple operation message into SCTE-35 sections",
    after_help = "Example:\n  echo '{\"multiple_operation\":{\"operations\":[{\"type\":\"splice_null_request\"}]}}' | scte104to35 -o base64"
)]
struct Cli {
    /// Path to the JSON message, or "-" to read standard input
    #[arg(default_value = "-")]
    input: String,

    /// Current presentation time in 90 kHz ticks
    #[arg(short, long, default_value_t = 0)]
    pts: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let raw = match read_input(&cli.input) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error reading {}: {}", cli.input, e);
            process::exit(1);
        }
    };

    let message: Scte104Message = match serde_json::from_str(&raw) {
        Ok(message) => message,
        Err(e) => {
            eprintln!("Error decoding SCTE-104 message: {}", e);
            process::exit(1);
        }
    };

    let dispatched = match dispatch(&message, cli.pts) {
        Ok(dispatched) => dispatched,
        Err(e) => {
            eprintln!("Error translating message: {}", e);
            process::exit(1);
        }
    };

    let sections: Vec<SpliceInfoSection> = dispatched.sections.to_vec();
    let output = collect(dispatched.sections, &WireSerializer);
    let failures = dispatched.failures;

    match cli.output {
        OutputFormat::Text => print_text(&sections, &output, &failures),
        OutputFormat::Json => print_json(&sections, &output, &failures),
        OutputFormat::Base64 => {
            for bytes in output.encoded() {
                println!("{}", BASE64.encode(bytes));
            }
        }
        OutputFormat::Hex => {
            for bytes in output.encoded() {
                println!("{}", HEXLOWER.encode(bytes));
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

fn read_input(input: &str) -> io::Result<String> {
    if input == "-" {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw)?;
        Ok(raw)
    } else {
        fs::read_to_string(input)
    }
}

fn print_text(
    sections: &[SpliceInfoSection],
    output: &OutputResultSet,
    failures: &[OperationFailure],
) {
    println!("Translated {} section(s)", output.len());
    for (index, (section, slot)) in sections.iter().zip(output.slots()).enumerate() {
        println!();
        println!("Section {}:", index);
        print!("{}", section);
        match slot {
            SectionSlot::Encoded(bytes) => {
                println!("  Length: {} bytes", bytes.len());
                println!("  Base64: {}", BASE64.encode(bytes));
            }
            SectionSlot::Failed(error) => println!("  Error: {}", error),
        }
    }

    if !failures.is_empty() {
        println!();
        println!("Skipped operations:");
        for failure in failures {
            println!("  {}", failure);
        }
    }
}

fn print_json(
    sections: &[SpliceInfoSection],
    output: &OutputResultSet,
    failures: &[OperationFailure],
) {
    let entries: Vec<serde_json::Value> = sections
        .iter()
        .zip(output.slots())
        .enumerate()
        .map(|(index, (section, slot))| match slot {
            SectionSlot::Encoded(bytes) => json!({
                "index": index,
                "section": section,
                "base64": BASE64.encode(bytes),
                "hex": HEXLOWER.encode(bytes),
            }),
            SectionSlot::Failed(error) => json!({
                "index": index,
                "section": section,
                "error": error.to_string(),
            }),
        })
        .collect();

    let status = if output.has_failures() || !failures.is_empty() {
        "partial"
    } else {
        "success"
    };
    let document = json!({
        "status": status,
        "sections": entries,
        "failures": failures,
    });

    match serde_json::to_string_pretty(&document) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
