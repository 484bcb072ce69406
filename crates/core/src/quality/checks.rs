use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::{
    input::ChannelInput,
    quality::{
        ChannelValidation, VideoSummary, WebSummary, WebValidation, YoutubeValidation,
        recommend::{video_recommendations, web_recommendations},
    },
    rules::CredibilityTable,
    types::{
        CredibilityTier, VideoCollection, VideoTranscriptRecord, WebCollection, WebSourceRecord,
    },
};

/// Content longer than this many characters counts as present.
pub const MIN_CONTENT_CHARS: u64 = 100;
pub const SAMPLE_DATA_POINTS: usize = 5;

const WEB_NO_DATA: &str = "Webリサーチデータがありません";
const YOUTUBE_NO_DATA: &str = "YouTube文字起こしデータがありません";

static DATA_POINT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+(?:\.\d+)?%|\d+(?:,\d{3})*(?:\.\d+)?").expect("data point pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceChecks {
    pub url_valid: bool,
    pub has_content: bool,
    pub content_length: u64,
    pub data_points_found: u64,
    pub sample_data: Vec<String>,
    pub source_credibility: CredibilityTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceValidation {
    pub source_number: usize,
    pub url: String,
    pub title: String,
    pub checks: SourceChecks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoChecks {
    pub has_transcript: bool,
    pub word_count: u64,
    pub duration_minutes: f64,
    pub language: String,
    pub data_points_found: u64,
    pub sample_data: Vec<String>,
    pub segment_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoValidation {
    pub video_number: usize,
    pub video_id: String,
    pub url: String,
    pub checks: VideoChecks,
}

/// A URL is valid when it parses with both a scheme and a host.
pub fn check_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            !parsed.scheme().is_empty() && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

pub fn classify_credibility(url: &str, table: &CredibilityTable) -> CredibilityTier {
    if url.is_empty() {
        return CredibilityTier::Unknown;
    }

    table
        .lookup(&url.to_lowercase())
        .unwrap_or(CredibilityTier::Low)
}

/// Percentages and grouped/decimal numbers, in order of appearance.
pub fn find_data_points(text: &str) -> Vec<&str> {
    DATA_POINT_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

fn sample(points: &[&str]) -> Vec<String> {
    points
        .iter()
        .take(SAMPLE_DATA_POINTS)
        .map(|p| p.to_string())
        .collect()
}

pub fn check_web_source(
    source_number: usize,
    source: &WebSourceRecord,
    table: &CredibilityTable,
) -> SourceValidation {
    let content_length = source.content.chars().count() as u64;
    let points = find_data_points(&source.content);

    SourceValidation {
        source_number,
        url: source.url.clone(),
        title: source.title.clone(),
        checks: SourceChecks {
            url_valid: check_url(&source.url),
            has_content: content_length > MIN_CONTENT_CHARS
                || source.character_count > MIN_CONTENT_CHARS,
            content_length,
            data_points_found: points.len() as u64,
            sample_data: sample(&points),
            source_credibility: classify_credibility(&source.url, table),
        },
    }
}

pub fn check_video_transcript(
    video_number: usize,
    record: &VideoTranscriptRecord,
) -> VideoValidation {
    let text_length = record.text.chars().count() as u64;
    let points = find_data_points(&record.text);

    VideoValidation {
        video_number,
        video_id: record.video_id.clone(),
        url: record.source_url.clone(),
        checks: VideoChecks {
            has_transcript: text_length > MIN_CONTENT_CHARS
                || record.word_count > MIN_CONTENT_CHARS,
            word_count: record.word_count,
            duration_minutes: record.total_duration / 60.0,
            language: record.language.clone(),
            data_points_found: points.len() as u64,
            sample_data: sample(&points),
            segment_count: record.segments.len() as u64,
        },
    }
}

pub fn validate_web_sources(
    input: &ChannelInput<WebCollection>,
    table: &CredibilityTable,
) -> WebValidation {
    let sources = match input {
        ChannelInput::Malformed(reason) => {
            warn!(channel = "web", %reason, "malformed collection");
            return ChannelValidation::Error {
                message: reason.clone(),
            };
        }
        ChannelInput::Loaded(collection) if !collection.sources.is_empty() => &collection.sources,
        _ => {
            warn!(channel = "web", "no sources to validate");
            return ChannelValidation::NoData {
                message: WEB_NO_DATA.to_string(),
            };
        }
    };

    let validations: Vec<SourceValidation> = sources
        .iter()
        .enumerate()
        .map(|(i, source)| check_web_source(i + 1, source, table))
        .collect();

    let summary = WebSummary::from_validations(&validations);
    debug!(
        channel = "web",
        total = summary.total_sources,
        credible = summary.credible_sources,
        data_points = summary.total_data_points,
        "validated sources"
    );
    let recommendations = web_recommendations(&summary);

    ChannelValidation::Validated {
        summary,
        validations,
        recommendations,
    }
}

pub fn validate_video_transcripts(input: &ChannelInput<VideoCollection>) -> YoutubeValidation {
    let transcriptions = match input {
        ChannelInput::Malformed(reason) => {
            warn!(channel = "youtube", %reason, "malformed collection");
            return ChannelValidation::Error {
                message: reason.clone(),
            };
        }
        ChannelInput::Loaded(collection) if !collection.transcriptions.is_empty() => {
            &collection.transcriptions
        }
        _ => {
            warn!(channel = "youtube", "no transcriptions to validate");
            return ChannelValidation::NoData {
                message: YOUTUBE_NO_DATA.to_string(),
            };
        }
    };

    let validations: Vec<VideoValidation> = transcriptions
        .iter()
        .enumerate()
        .map(|(i, record)| check_video_transcript(i + 1, record))
        .collect();

    let summary = VideoSummary::from_validations(&validations);
    debug!(
        channel = "youtube",
        total = summary.total_videos,
        words = summary.total_words,
        data_points = summary.total_data_points,
        "validated transcripts"
    );
    let recommendations = video_recommendations(&summary);

    ChannelValidation::Validated {
        summary,
        validations,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(url: &str, content: &str, character_count: u64) -> WebSourceRecord {
        WebSourceRecord {
            url: url.to_string(),
            title: "title".to_string(),
            content: content.to_string(),
            character_count,
        }
    }

    #[test]
    fn test_check_url_requires_scheme_and_host() {
        assert!(check_url("https://ja.wikipedia.org/wiki/ChatGPT"));
        assert!(check_url("http://example.com"));
        assert!(!check_url(""));
        assert!(!check_url("example.com/page"));
        assert!(!check_url("mailto:someone@example.com"));
        assert!(!check_url("/relative/path"));
    }

    #[test]
    fn test_credibility_classification() {
        let table = CredibilityTable::default();
        assert_eq!(
            classify_credibility("https://en.wikipedia.org/wiki/LLM", &table),
            CredibilityTier::High
        );
        assert_eq!(
            classify_credibility("https://QIITA.com/items/1", &table),
            CredibilityTier::Medium
        );
        assert_eq!(
            classify_credibility("https://blog.example.com", &table),
            CredibilityTier::Low
        );
        assert_eq!(classify_credibility("", &table), CredibilityTier::Unknown);
    }

    #[test]
    fn test_find_data_points() {
        let text = "導入企業は45.5%増加し、売上は1,200,000円、社員数は300人。";
        assert_eq!(find_data_points(text), vec!["45.5%", "1,200,000", "300"]);
        assert!(find_data_points("数値なし").is_empty());
    }

    #[test]
    fn test_sample_keeps_first_five() {
        let record = source("https://example.com", "1 2 3 4 5 6 7", 0);
        let validation = check_web_source(1, &record, &CredibilityTable::default());

        assert_eq!(validation.checks.data_points_found, 7);
        assert_eq!(validation.checks.sample_data, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_has_content_uses_either_length() {
        let table = CredibilityTable::default();
        let long = "あ".repeat(101);

        assert!(check_web_source(1, &source("", &long, 0), &table).checks.has_content);
        assert!(check_web_source(1, &source("", "", 101), &table).checks.has_content);
        assert!(
            !check_web_source(1, &source("", &"a".repeat(100), 100), &table)
                .checks
                .has_content
        );
        assert_eq!(
            check_web_source(1, &source("", &long, 0), &table).checks.content_length,
            101
        );
    }

    #[test]
    fn test_video_checks() {
        let record = VideoTranscriptRecord {
            video_id: "abc".to_string(),
            source_url: "https://www.youtube.com/watch?v=abc".to_string(),
            language: "ja".to_string(),
            text: "利用率は80%です".to_string(),
            word_count: 150,
            total_duration: 90.0,
            segments: vec![Default::default(), Default::default()],
        };
        let validation = check_video_transcript(1, &record);

        assert!(validation.checks.has_transcript);
        assert_eq!(validation.checks.duration_minutes, 1.5);
        assert_eq!(validation.checks.data_points_found, 1);
        assert_eq!(validation.checks.segment_count, 2);
        assert_eq!(validation.url, record.source_url);
    }

    #[test]
    fn test_missing_and_empty_collections_are_no_data() {
        let table = CredibilityTable::default();
        let missing = validate_web_sources(&ChannelInput::Missing, &table);
        let empty = validate_web_sources(&ChannelInput::Loaded(WebCollection::default()), &table);

        assert_eq!(missing.status(), "no_data");
        assert_eq!(empty.status(), "no_data");
        assert_eq!(
            validate_video_transcripts(&ChannelInput::Missing).status(),
            "no_data"
        );
    }

    #[test]
    fn test_null_collections_are_no_data() {
        let table = CredibilityTable::default();
        let web = validate_web_sources(&ChannelInput::from_json(r#"{"sources": null}"#), &table);
        let youtube = validate_video_transcripts(&ChannelInput::from_json("null"));

        assert_eq!(web.status(), "no_data");
        assert_eq!(youtube.status(), "no_data");
    }

    #[test]
    fn test_malformed_collection_is_error_status() {
        let result = validate_video_transcripts(&ChannelInput::Malformed("bad json".to_string()));
        match result {
            ChannelValidation::Error { message } => assert_eq!(message, "bad json"),
            other => panic!("expected error status, got {:?}", other),
        }
    }
}
