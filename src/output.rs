use serde::{Serialize, Serializer};

/// Outcome of a single framing operation, ready for CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    /// Which operation produced the payload (`line`, `bytes`, `chunked`).
    pub operation: &'static str,
    /// Payload length in bytes.
    pub length: usize,
    /// The payload itself.
    #[serde(serialize_with = "serialize_payload")]
    pub payload: Vec<u8>,
}

/// Serialize payload bytes as a UTF-8 string (lossy) for JSON output.
fn serialize_payload<S: Serializer>(payload: &[u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&String::from_utf8_lossy(payload))
}

impl FrameReport {
    /// Build a report from an operation name and its payload.
    pub fn new(operation: &'static str, payload: Vec<u8>) -> Self {
        Self {
            operation,
            length: payload.len(),
            payload,
        }
    }
}

/// Serialize a [`FrameReport`] to a JSON string.
///
/// When `pretty` is `true` the output is indented for readability.
pub fn format_json(report: &FrameReport, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    } else {
        serde_json::to_string(report).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

/// Render a [`FrameReport`] in a human-readable debug format.
pub fn format_debug(report: &FrameReport) -> String {
    let mut out = String::with_capacity(64 + report.payload.len());

    out.push_str("=== Frame ===\n");
    out.push_str(&format!("Operation: {}\n", report.operation));
    out.push_str(&format!("Length:    {} bytes\n", report.length));

    out.push_str("\n--- Payload ---\n");
    match std::str::from_utf8(&report.payload) {
        Ok(s) => out.push_str(s),
        Err(_) => {
            out.push_str(&format!("<binary data: {} bytes>", report.payload.len()));
        }
    }
    out.push_str("\n=============\n");
    out
}
