use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::PipelineError;

const WATCH_URL: &str = "https://www.youtube.com/watch";

// YouTube serves a different (captionless) page to unknown clients; pin a
// desktop browser agent like the transcript libraries do.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

/// Source of caption text for a video, abstracted for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for `video_id` in `language` as one
    /// space-joined string with no timing metadata.
    async fn fetch(&self, video_id: &str, language: &str) -> Result<String, PipelineError>;
}

/// Caption track entry from the watch page player response.
#[derive(Debug, Clone, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,

    #[serde(rename = "languageCode")]
    language_code: String,

    /// "asr" for auto-generated tracks; absent for uploaded captions.
    #[serde(default)]
    kind: Option<String>,
}

/// Transcript client scraping YouTube's watch page and timedtext endpoint.
pub struct TranscriptClient {
    http: reqwest::Client,
}

impl TranscriptClient {
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Fetch and join the transcript for a video in the requested language.
    pub async fn fetch_transcript(
        &self,
        video_id: &str,
        language: &str,
    ) -> Result<String, PipelineError> {
        tracing::debug!(video_id, language, "fetching watch page");
        let page = self.fetch_watch_page(video_id).await?;

        let tracks = parse_caption_tracks(&page, video_id)?;
        let track = select_track(&tracks, language).ok_or_else(|| {
            PipelineError::TranscriptNotFound {
                video_id: video_id.to_string(),
                language: language.to_string(),
            }
        })?;

        tracing::debug!(track_language = %track.language_code, "downloading timedtext");
        let xml = self.fetch_text(&track.base_url).await?;
        let fragments = parse_timedtext(&xml);
        if fragments.is_empty() {
            return Err(PipelineError::FetchFailed(format!(
                "timedtext for video '{}' contained no caption fragments",
                video_id
            )));
        }

        Ok(fragments.join(" "))
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String, PipelineError> {
        let url = Url::parse_with_params(WATCH_URL, &[("v", video_id)])
            .map_err(|e| PipelineError::FetchFailed(e.to_string()))?;
        self.fetch_text(url.as_str()).await
    }

    async fn fetch_text(&self, url: &str) -> Result<String, PipelineError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| PipelineError::FetchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PipelineError::FetchFailed(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| PipelineError::FetchFailed(e.to_string()))
    }
}

#[async_trait]
impl TranscriptSource for TranscriptClient {
    async fn fetch(&self, video_id: &str, language: &str) -> Result<String, PipelineError> {
        self.fetch_transcript(video_id, language).await
    }
}

/// Pull the `captionTracks` array out of the watch page HTML.
///
/// A page without any caption track list means the uploader disabled
/// subtitles for the video.
fn parse_caption_tracks(page: &str, video_id: &str) -> Result<Vec<CaptionTrack>, PipelineError> {
    let raw = match extract_json_array(page, "\"captionTracks\":") {
        Some(raw) => raw,
        None => {
            return Err(PipelineError::SubtitlesDisabled {
                video_id: video_id.to_string(),
            })
        }
    };

    let tracks: Vec<CaptionTrack> = serde_json::from_str(raw).map_err(|e| {
        PipelineError::FetchFailed(format!("malformed caption track list: {}", e))
    })?;

    if tracks.is_empty() {
        return Err(PipelineError::SubtitlesDisabled {
            video_id: video_id.to_string(),
        });
    }

    Ok(tracks)
}

/// Slice the JSON array that immediately follows `key`, honoring nesting and
/// string escapes so brackets inside URLs do not end the scan early.
fn extract_json_array<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let start = text.find(key)? + key.len();
    let rest = &text[start..];
    if !rest.starts_with('[') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Pick the caption track for the requested language.
///
/// Exact code match wins, with uploaded captions preferred over ASR tracks.
/// Falls back to a primary-subtag match (`ko` matches `ko-KR`).
fn select_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    let exact = tracks
        .iter()
        .filter(|t| t.language_code == language)
        .min_by_key(|t| t.kind.as_deref() == Some("asr"));
    if exact.is_some() {
        return exact;
    }

    tracks
        .iter()
        .filter(|t| {
            t.language_code
                .split('-')
                .next()
                .is_some_and(|primary| primary == language)
        })
        .min_by_key(|t| t.kind.as_deref() == Some("asr"))
}

/// Extract caption fragments from a timedtext XML document.
fn parse_timedtext(xml: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut rest = xml;

    while let Some(open) = rest.find("<text") {
        let after_open = &rest[open..];
        let Some(close_tag) = after_open.find('>') else {
            break;
        };
        // Empty caption events arrive as self-closing elements; they carry
        // no body and no matching close tag, so skip past them.
        if after_open[..close_tag].ends_with('/') {
            rest = &rest[open + close_tag + 1..];
            continue;
        }
        let body_start = open + close_tag + 1;
        let Some(end) = rest[body_start..].find("</text>") else {
            break;
        };
        let body = &rest[body_start..body_start + end];
        let text = unescape_xml(body);
        let text = text.trim();
        if !text.is_empty() {
            fragments.push(text.to_string());
        }
        rest = &rest[body_start + end + "</text>".len()..];
    }

    fragments
}

/// Decode the XML entities YouTube emits in timedtext payloads.
fn unescape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let entity = &rest[pos..];
        let Some(end) = entity.find(';') else {
            out.push_str(entity);
            return out;
        };
        match &entity[1..end] {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            num if num.starts_with('#') => {
                let code = num[1..].parse::<u32>().ok().and_then(char::from_u32);
                match code {
                    Some(c) => out.push(c),
                    None => out.push_str(&entity[..=end]),
                }
            }
            _ => out.push_str(&entity[..=end]),
        }
        rest = &entity[end + 1..];
    }
    out.push_str(rest);
    out
}
