//! YouTube helpers: video-ID extraction and transcript retrieval.

pub mod transcript;

pub use transcript::TranscriptClient;

use crate::PipelineError;

/// Extract the video ID from a YouTube URL.
///
/// The contract is marker-based: everything after `?v=`, or failing that
/// everything after `/v/`, is taken as the ID. Trailing query parameters or
/// fragments are not stripped; callers paste plain watch URLs. A marker with
/// nothing after it yields no ID and is rejected rather than forwarded as an
/// empty lookup.
pub fn extract_video_id(url: &str) -> Result<String, PipelineError> {
    if let Some((_, id)) = url.split_once("?v=") {
        if !id.is_empty() {
            return Ok(id.to_string());
        }
    }
    if let Some((_, id)) = url.split_once("/v/") {
        if !id.is_empty() {
            return Ok(id.to_string());
        }
    }
    Err(PipelineError::InvalidUrl(url.to_string()))
}
