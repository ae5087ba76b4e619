//! Row codec: one [`TransferRecord`] per CSV line.

use chrono::{DateTime, SecondsFormat, Utc};

use bucketbrigade_record::{TransferRecord, TransferStatus, ValidationStatus};

use crate::AuditError;

/// Header row naming every record field, in serialization order.
pub const HEADER: &str =
    "fileName,sourcePath,destination,status,startTime,endTime,durationSeconds,fileSizeBytes,validationStatus";

const COLUMNS: usize = 9;

/// Serializes a record as one CSV line (no trailing newline).
pub fn encode_record(record: &TransferRecord) -> String {
    let fields = [
        escape(&record.file_name),
        escape(&record.source_path),
        escape(&record.destination),
        record.status.as_str().to_string(),
        timestamp(record.started_at),
        timestamp(record.finished_at),
        format!("{:.3}", record.duration_seconds()),
        record.file_size_bytes.to_string(),
        record.validation.as_str().to_string(),
    ];
    fields.join(",")
}

/// Parses one CSV line back into a record.
///
/// `line_no` is the 1-based physical line number, used in error messages.
/// The duration column is validated but discarded: duration is always
/// recomputed from the two timestamps.
pub fn parse_record(line: &str, line_no: usize) -> Result<TransferRecord, AuditError> {
    let fields = split_fields(line, line_no)?;
    if fields.len() != COLUMNS {
        return Err(malformed(
            line_no,
            format!("expected {COLUMNS} columns, got {}", fields.len()),
        ));
    }

    let status = TransferStatus::parse(&fields[3])
        .ok_or_else(|| malformed(line_no, format!("unknown status {:?}", fields[3])))?;
    let started_at = parse_timestamp(&fields[4], line_no)?;
    let finished_at = parse_timestamp(&fields[5], line_no)?;
    fields[6]
        .parse::<f64>()
        .map_err(|_| malformed(line_no, format!("invalid duration {:?}", fields[6])))?;
    let file_size_bytes = fields[7]
        .parse::<u64>()
        .map_err(|_| malformed(line_no, format!("invalid file size {:?}", fields[7])))?;
    let validation = ValidationStatus::parse(&fields[8])
        .ok_or_else(|| malformed(line_no, format!("unknown validation {:?}", fields[8])))?;

    let mut fields = fields.into_iter();
    Ok(TransferRecord {
        file_name: fields.next().unwrap(),
        source_path: fields.next().unwrap(),
        destination: fields.next().unwrap(),
        status,
        started_at,
        finished_at,
        file_size_bytes,
        validation,
    })
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(s: &str, line_no: usize) -> Result<DateTime<Utc>, AuditError> {
    DateTime::parse_from_rfc3339(s)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| malformed(line_no, format!("invalid timestamp {s:?}: {e}")))
}

fn malformed(line: usize, reason: String) -> AuditError {
    AuditError::Malformed { line, reason }
}

/// Quotes a field when it contains the delimiter, quote, a line terminator
/// or a backslash. Embedded quotes are doubled; CR, LF and backslash become
/// `\r`, `\n` and `\\` so the row stays on one physical line.
fn escape(field: &str) -> String {
    if !field.contains(['"', ',', '\n', '\r', '\\']) {
        return field.to_string();
    }
    let mut out = String::with_capacity(field.len() + 2);
    out.push('"');
    for c in field.chars() {
        match c {
            '"' => out.push_str("\"\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn split_fields(line: &str, line_no: usize) -> Result<Vec<String>, AuditError> {
    let mut fields = Vec::with_capacity(COLUMNS);
    let mut chars = line.chars().peekable();

    loop {
        let mut field = String::new();
        match chars.peek() {
            Some('"') => {
                chars.next();
                loop {
                    match chars.next() {
                        Some('"') => {
                            // Doubled quote is a literal quote; otherwise the
                            // field is closed.
                            if chars.peek() == Some(&'"') {
                                chars.next();
                                field.push('"');
                            } else {
                                break;
                            }
                        }
                        Some('\\') => match chars.next() {
                            Some('n') => field.push('\n'),
                            Some('r') => field.push('\r'),
                            Some('\\') => field.push('\\'),
                            other => {
                                return Err(malformed(
                                    line_no,
                                    format!("invalid escape sequence \\{}", fmt_char(other)),
                                ));
                            }
                        },
                        Some(c) => field.push(c),
                        None => {
                            return Err(malformed(line_no, "unterminated quoted field".into()));
                        }
                    }
                }
            }
            _ => {
                while let Some(&c) = chars.peek() {
                    if c == ',' {
                        break;
                    }
                    if c == '"' {
                        return Err(malformed(line_no, "stray quote in unquoted field".into()));
                    }
                    field.push(c);
                    chars.next();
                }
            }
        }
        fields.push(field);

        match chars.next() {
            Some(',') => continue,
            None => return Ok(fields),
            Some(c) => {
                return Err(malformed(
                    line_no,
                    format!("unexpected character {c:?} after field"),
                ));
            }
        }
    }
}

fn fmt_char(c: Option<char>) -> String {
    c.map(String::from).unwrap_or_else(|| "<end of line>".into())
}
