use colored::*;
use serde::Serialize;

use crate::probe::{OutcomeKind, ProbeOutcome};
use crate::types::OutputFormat;

pub const CSV_HEADER: &str = "target,url,supported,status,message\n";

/// One probe result ready for formatting
pub struct ProbeRecord<'a> {
    pub label: &'a str,
    pub url: &'a str,
    pub outcome: &'a ProbeOutcome,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    target: &'a str,
    url: &'a str,
    supported: bool,
    status: OutcomeKind,
    message: &'a str,
}

/// Format a record in the requested output format, newline terminated
pub fn format_output(record: &ProbeRecord, format: OutputFormat, colored: bool) -> String {
    match format {
        OutputFormat::Plain => format_plain_output(record, colored),
        OutputFormat::Jsonl => format_jsonl_output(record),
        OutputFormat::Csv => format_csv_output(record),
    }
}

/// Format a record as plain text output
pub fn format_plain_output(record: &ProbeRecord, colored: bool) -> String {
    let label = if colored {
        record.label.cyan().to_string()
    } else {
        record.label.to_string()
    };

    let verdict = match record.outcome {
        ProbeOutcome::Supported { header_value } => {
            if colored {
                format!("{} {}", "HSTS:".green(), header_value)
            } else {
                format!("HSTS: {}", header_value)
            }
        }
        ProbeOutcome::NotSupported => {
            if colored {
                "no HSTS".yellow().to_string()
            } else {
                "no HSTS".to_string()
            }
        }
        ProbeOutcome::Failed { reason } => {
            if colored {
                format!("{} {}", "error:".red(), reason)
            } else {
                format!("error: {}", reason)
            }
        }
    };

    format!("[{}] -> {}\n", label, verdict)
}

fn format_jsonl_output(record: &ProbeRecord) -> String {
    let json_record = JsonRecord {
        target: record.label,
        url: record.url,
        supported: record.outcome.is_supported(),
        status: record.outcome.kind(),
        message: record.outcome.message(),
    };
    serde_json::to_string(&json_record).unwrap_or_default() + "\n"
}

fn format_csv_output(record: &ProbeRecord) -> String {
    format!(
        "{},{},{},{},{}\n",
        csv_field(record.label),
        csv_field(record.url),
        csv_field(&record.outcome.is_supported().to_string()),
        csv_field(record.outcome.kind().as_str()),
        csv_field(record.outcome.message())
    )
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
