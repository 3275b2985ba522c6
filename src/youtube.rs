use log::debug;
use regex::Regex;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::fetch::{CaptionProvider, CaptionTrack, ProviderError};
use crate::{Segment, VideoId};

type Result<T> = std::result::Result<T, ProviderError>;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

const RECAPTCHA_MARKER: &str = "class=\"g-recaptcha\"";

#[derive(Debug, Deserialize)]
struct InnerTubePlayerResponse {
    #[serde(rename = "playabilityStatus")]
    playability_status: Option<PlayabilityStatus>,
    captions: Option<CaptionsData>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CaptionsData {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    player_captions_tracklist_renderer: Option<CaptionTracklistRenderer>,
}

#[derive(Debug, Deserialize)]
struct CaptionTracklistRenderer {
    #[serde(rename = "captionTracks")]
    caption_tracks: Option<Vec<RawCaptionTrack>>,
}

#[derive(Debug, Deserialize)]
struct RawCaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode")]
    language_code: String,
    kind: Option<String>,
}

/// Captions from YouTube's InnerTube player endpoint
#[derive(Debug, Clone, Default)]
pub struct YouTubeProvider {
    client: reqwest::Client,
}

impl YouTubeProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).header("User-Agent", USER_AGENT).send().await?;
        if resp.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RequestBlocked);
        }
        Ok(resp.error_for_status()?.text().await?)
    }

    async fn player_response(&self, video_id: &VideoId) -> Result<InnerTubePlayerResponse> {
        // Step 1: Fetch the watch page to get the InnerTube API key
        let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
        debug!("Fetching watch page: {watch_url}");

        let page_html = self.get_text(&watch_url).await?;
        if page_html.contains(RECAPTCHA_MARKER) {
            return Err(ProviderError::RequestBlocked);
        }

        let api_key = extract_api_key(&page_html)?;
        debug!("Extracted InnerTube API key: {api_key}");

        // Step 2: Call InnerTube player endpoint
        let player_url = format!("https://www.youtube.com/youtubei/v1/player?key={api_key}&prettyPrint=false");

        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": "ANDROID",
                    "clientVersion": "20.10.38"
                }
            },
            "videoId": video_id
        });

        let resp = self
            .client
            .post(&player_url)
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;
        if resp.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RequestBlocked);
        }

        Ok(resp.error_for_status()?.json().await?)
    }
}

impl CaptionProvider for YouTubeProvider {
    async fn fetch(&self, video_id: &VideoId, languages: &[String]) -> Result<Vec<Segment>> {
        let tracks = self.list(video_id).await?;
        let track = select_track(&tracks, languages)?;
        debug!("Using caption track: lang={} generated={}", track.language_code, track.is_generated);
        self.fetch_track(track).await
    }

    async fn list(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>> {
        let resp = self.player_response(video_id).await?;
        tracks_from_response(resp)
    }

    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<Segment>> {
        let caption_xml = self.get_text(&track.url).await?;
        parse_caption_xml(&caption_xml)
    }
}

fn check_playability(status: Option<&PlayabilityStatus>) -> Result<()> {
    let Some(status) = status else {
        return Ok(());
    };
    let reason = status.reason.as_deref().unwrap_or_default().to_lowercase();

    match status.status.as_str() {
        "OK" => Ok(()),
        "LOGIN_REQUIRED" if reason.contains("not a bot") => Err(ProviderError::RequestBlocked),
        "ERROR" if reason.contains("invalid") => Err(ProviderError::InvalidVideoId),
        other => {
            debug!("Video not playable: status={other} reason={reason}");
            Err(ProviderError::VideoUnavailable)
        }
    }
}

/// Manually created tracks come before auto-generated ones.
fn tracks_from_response(resp: InnerTubePlayerResponse) -> Result<Vec<CaptionTrack>> {
    check_playability(resp.playability_status.as_ref())?;

    let raw = resp
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .and_then(|r| r.caption_tracks)
        .unwrap_or_default();

    if raw.is_empty() {
        return Err(ProviderError::TranscriptsDisabled);
    }

    let mut tracks: Vec<CaptionTrack> = raw
        .into_iter()
        .map(|t| CaptionTrack {
            is_generated: t.kind.as_deref() == Some("asr"),
            url: t.base_url.replace("&fmt=srv3", ""),
            language_code: t.language_code,
        })
        .collect();
    tracks.sort_by_key(|t| t.is_generated);
    Ok(tracks)
}

fn select_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Result<&'a CaptionTrack> {
    languages
        .iter()
        .find_map(|lang| tracks.iter().find(|t| &t.language_code == lang))
        .ok_or_else(|| ProviderError::LanguageNotFound {
            requested: languages.to_vec(),
            available: tracks.iter().map(|t| t.language_code.clone()).collect(),
        })
}

fn extract_api_key(html: &str) -> Result<String> {
    let patterns = [
        r#""INNERTUBE_API_KEY"\s*:\s*"([^"]+)""#,
        // newer pages
        r#"innertubeApiKey\s*[=:]\s*"([^"]+)""#,
    ];

    for pattern in patterns {
        let re = Regex::new(pattern).map_err(|e| ProviderError::Parse(e.to_string()))?;
        if let Some(caps) = re.captures(html) {
            return Ok(caps[1].to_string());
        }
    }

    Err(ProviderError::Parse("could not extract InnerTube API key from watch page".to_string()))
}

fn parse_caption_xml(xml: &str) -> Result<Vec<Segment>> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut reader = Reader::from_str(xml);
    let mut segments = Vec::new();
    let mut current_start: Option<f64> = None;
    let mut current_dur: Option<f64> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"text" => {
                current_start = None;
                current_dur = None;
                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value);
                    match attr.key.as_ref() {
                        b"start" => current_start = value.parse::<f64>().ok(),
                        b"dur" => current_dur = value.parse::<f64>().ok(),
                        _ => {}
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(start) = current_start.take() {
                    let raw_text = e.unescape().unwrap_or_default().to_string();
                    let text = html_escape::decode_html_entities(&raw_text).to_string();
                    segments.push(Segment {
                        text,
                        start,
                        duration: current_dur.take().unwrap_or_default(),
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ProviderError::Parse(format!("error parsing caption XML: {e}"))),
            _ => {}
        }
    }

    Ok(segments)
}
