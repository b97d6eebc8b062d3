//! JSON-lines codec for message streams.
//!
//! One message per line. A recorded stream may carry an extra `"at"` field
//! (milliseconds since the recording started) on each line; lines without it
//! inherit the previous line's time.

use std::io::{BufRead, Write};

use super::message::SyncMessage;
use crate::model::CodecError;

const TIME_FIELD: &str = "at";

/// A message with the time it was sent.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMessage {
    /// Send time in milliseconds.
    pub at: f64,
    /// The message.
    pub message: SyncMessage,
}

/// Encode one message as a single JSON line (no trailing newline).
pub fn encode_message(message: &SyncMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(message)
}

/// Encode a message with its send time.
pub fn encode_recorded(recorded: &RecordedMessage) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(&recorded.message)?;
    if let serde_json::Value::Object(map) = &mut value {
        map.insert(TIME_FIELD.to_string(), serde_json::json!(recorded.at));
    }
    serde_json::to_string(&value)
}

/// Decode one line.
///
/// # Errors
///
/// Returns `CodecError::InvalidMessage` carrying `line_number` (1-based) if
/// the line is not valid JSON or not a known message.
pub fn decode_message(raw: &str, line_number: usize) -> Result<SyncMessage, CodecError> {
    decode_line(raw, line_number).map(|(_, message)| message)
}

fn decode_line(raw: &str, line_number: usize) -> Result<(Option<f64>, SyncMessage), CodecError> {
    let invalid = |e: serde_json::Error| CodecError::InvalidMessage {
        line: line_number,
        message: e.to_string(),
    };
    let mut value: serde_json::Value = serde_json::from_str(raw).map_err(invalid)?;
    let at = value
        .as_object_mut()
        .and_then(|map| map.remove(TIME_FIELD))
        .and_then(|at| at.as_f64());
    let message = serde_json::from_value(value).map_err(invalid)?;
    Ok((at, message))
}

/// Decode a whole stream, failing on the first bad line. Blank lines are skipped.
pub fn decode_stream(reader: impl BufRead) -> Result<Vec<RecordedMessage>, CodecError> {
    let mut messages = Vec::new();
    let mut last_at = 0.0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let (at, message) = decode_line(&line, index + 1)?;
        last_at = at.unwrap_or(last_at);
        messages.push(RecordedMessage { at: last_at, message });
    }
    Ok(messages)
}

/// Decode a stream, collecting bad lines instead of stopping at them.
pub fn decode_stream_graceful(reader: impl BufRead) -> (Vec<RecordedMessage>, Vec<CodecError>) {
    let mut messages = Vec::new();
    let mut errors = Vec::new();
    let mut last_at = 0.0;
    for (index, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                errors.push(CodecError::from(e));
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match decode_line(&line, index + 1) {
            Ok((at, message)) => {
                last_at = at.unwrap_or(last_at);
                messages.push(RecordedMessage { at: last_at, message });
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping undecodable message");
                errors.push(e);
            }
        }
    }
    (messages, errors)
}

/// Write messages as JSON lines.
pub fn write_stream<'a>(
    mut writer: impl Write,
    messages: impl IntoIterator<Item = &'a RecordedMessage>,
) -> Result<(), CodecError> {
    for recorded in messages {
        let line = encode_recorded(recorded).map_err(std::io::Error::from)?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
