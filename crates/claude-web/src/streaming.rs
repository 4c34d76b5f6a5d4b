//! Streamed-reply decoder.
//!
//! The claude.ai web API streams replies as newline-delimited lines in an
//! SSE-like framing: payload lines carry a `data: ` prefix and a JSON body
//! with an optional `completion` text field, and the literal payload
//! `[DONE]` marks the end of the reply. This module decodes that framing
//! from any line source and aggregates the fragments, in arrival order,
//! into one string.

use futures_util::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::io::StreamReader;
use tracing::warn;

use crate::ClientError;

/// Decode the body of a streamed `append_message` response.
pub(crate) async fn decode_completion_response(
    response: reqwest::Response,
    on_fragment: impl FnMut(&str),
) -> Result<String, ClientError> {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    decode_completion_stream(reader, on_fragment).await
}

/// Decode a completion stream line by line, calling `on_fragment` for each
/// text fragment and returning the aggregated reply.
///
/// Per line, in arrival order:
/// - empty lines (keep-alive) are skipped;
/// - lines without the `data: ` prefix are ignored;
/// - the `[DONE]` sentinel ends decoding without contributing data;
/// - any other payload is parsed as JSON and its `completion` field, if
///   present, is appended to the aggregate;
/// - a malformed payload is skipped with a diagnostic; decoding continues.
///
/// The stream ends at the sentinel or when the underlying channel closes.
pub async fn decode_completion_stream<R>(
    reader: R,
    mut on_fragment: impl FnMut(&str),
) -> Result<String, ClientError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut full_response = String::new();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| ClientError::MessageSendFailed(e.to_string()))?
    {
        if line.is_empty() {
            continue;
        }
        let Some(payload) = line.strip_prefix("data: ") else {
            continue;
        };
        if payload == "[DONE]" {
            break;
        }
        match serde_json::from_str::<serde_json::Value>(payload) {
            Ok(chunk) => {
                if let Some(fragment) = chunk.get("completion").and_then(|v| v.as_str()) {
                    full_response.push_str(fragment);
                    on_fragment(fragment);
                }
            }
            Err(e) => {
                warn!(error = %e, "skipping malformed stream line");
            }
        }
    }

    Ok(full_response)
}
