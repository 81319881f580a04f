//! # Wire Framing
//!
//! One event = one UTF-8 JSON object = one line.
//!
//! There is no other framing. The relay forwards raw lines without ever
//! calling into this module; only the bridge encodes and decodes.

use thiserror::Error;

use crate::event::Event;

/// Errors from encoding or decoding a framed line.
#[derive(Error, Debug)]
pub enum WireError {
    /// The event could not be serialized.
    #[error("failed to encode event: {0}")]
    Encode(#[source] serde_json::Error),

    /// The line was not a valid event object.
    #[error("malformed event line: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Result type for wire operations.
pub type WireResult<T> = Result<T, WireError>;

/// Encodes an event as a single newline-terminated line.
pub fn encode_line(event: &Event) -> WireResult<String> {
    let mut line = serde_json::to_string(event).map_err(WireError::Encode)?;
    line.push('\n');
    Ok(line)
}

/// Decodes one line into an event.
///
/// Trailing whitespace (including the line terminator) is tolerated.
pub fn decode_line(line: &str) -> WireResult<Event> {
    serde_json::from_str(line).map_err(WireError::Decode)
}
