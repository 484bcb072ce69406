//! Quality Validator: per-record checks, per-channel summaries and the
//! combined quality verdict.

pub mod checks;
pub mod recommend;
pub mod score;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

pub use checks::{
    SourceChecks, SourceValidation, VideoChecks, VideoValidation, check_url, classify_credibility,
    find_data_points, validate_video_transcripts, validate_web_sources,
};
pub use recommend::integrated_recommendations;
pub use score::{ContentVolume, IntegratedSummary, integrate, overall_quality, quality_score};

use crate::types::QualityTier;

/// Outcome of validating one channel. Serialized with a `status` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChannelValidation<S, V> {
    Validated {
        summary: S,
        validations: Vec<V>,
        recommendations: Vec<String>,
    },
    NoData {
        message: String,
    },
    Error {
        message: String,
    },
}

impl<S, V> ChannelValidation<S, V> {
    pub fn status(&self) -> &'static str {
        match self {
            ChannelValidation::Validated { .. } => "validated",
            ChannelValidation::NoData { .. } => "no_data",
            ChannelValidation::Error { .. } => "error",
        }
    }

    pub fn is_validated(&self) -> bool {
        matches!(self, ChannelValidation::Validated { .. })
    }

    pub fn summary(&self) -> Option<&S> {
        match self {
            ChannelValidation::Validated { summary, .. } => Some(summary),
            _ => None,
        }
    }

    pub fn validations(&self) -> &[V] {
        match self {
            ChannelValidation::Validated { validations, .. } => validations,
            _ => &[],
        }
    }

    pub fn recommendations(&self) -> &[String] {
        match self {
            ChannelValidation::Validated {
                recommendations, ..
            } => recommendations,
            _ => &[],
        }
    }
}

/// Sum counts, pinning at `u64::MAX` instead of overflowing.
pub(crate) fn saturating_total(counts: impl IntoIterator<Item = u64>) -> u64 {
    counts.into_iter().fold(0, u64::saturating_add)
}

pub type WebValidation = ChannelValidation<WebSummary, SourceValidation>;
pub type YoutubeValidation = ChannelValidation<VideoSummary, VideoValidation>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebSummary {
    pub total_sources: u64,
    pub valid_urls: u64,
    pub sources_with_content: u64,
    pub total_data_points: u64,
    pub credible_sources: u64,
}

impl WebSummary {
    pub fn from_validations(validations: &[SourceValidation]) -> Self {
        let count = |pred: fn(&SourceValidation) -> bool| {
            validations.iter().filter(|v| pred(v)).count() as u64
        };

        Self {
            total_sources: validations.len() as u64,
            valid_urls: count(|v| v.checks.url_valid),
            sources_with_content: count(|v| v.checks.has_content),
            total_data_points: saturating_total(
                validations.iter().map(|v| v.checks.data_points_found),
            ),
            credible_sources: count(|v| v.checks.source_credibility.is_credible()),
        }
    }

    /// Share of credible sources, 0 when there are none.
    pub fn credible_ratio(&self) -> f64 {
        if self.total_sources == 0 {
            0.0
        } else {
            self.credible_sources as f64 / self.total_sources as f64
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub total_videos: u64,
    pub videos_with_transcripts: u64,
    pub total_words: u64,
    pub total_duration_minutes: f64,
    pub total_data_points: u64,
    pub languages: Vec<String>,
}

impl VideoSummary {
    pub fn from_validations(validations: &[VideoValidation]) -> Self {
        let mut languages: Vec<String> = validations
            .iter()
            .map(|v| v.checks.language.clone())
            .collect();
        languages.sort();
        languages.dedup();

        Self {
            total_videos: validations.len() as u64,
            videos_with_transcripts: validations
                .iter()
                .filter(|v| v.checks.has_transcript)
                .count() as u64,
            total_words: saturating_total(validations.iter().map(|v| v.checks.word_count)),
            total_duration_minutes: validations.iter().map(|v| v.checks.duration_minutes).sum(),
            total_data_points: saturating_total(
                validations.iter().map(|v| v.checks.data_points_found),
            ),
            languages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub validation_date: DateTime<Utc>,
    pub overall_quality: QualityTier,
    pub web_research: WebValidation,
    pub youtube_research: YoutubeValidation,
    pub integrated_summary: IntegratedSummary,
    pub quality_recommendations: Vec<String>,
}

impl QualityReport {
    /// At least one channel produced validated records.
    pub fn has_usable_channel(&self) -> bool {
        self.web_research.is_validated() || self.youtube_research.is_validated()
    }
}

/// Merge both channel results into one report stamped with `validated_at`.
pub fn combine(
    web: WebValidation,
    youtube: YoutubeValidation,
    validated_at: DateTime<Utc>,
) -> QualityReport {
    let integrated_summary = integrate(&web, &youtube);
    let overall_quality = overall_quality(&integrated_summary);
    let quality_recommendations = integrated_recommendations(&web, &youtube, &integrated_summary);

    info!(
        overall_quality = ?overall_quality,
        web = web.status(),
        youtube = youtube.status(),
        "quality report combined"
    );

    QualityReport {
        validation_date: validated_at,
        overall_quality,
        web_research: web,
        youtube_research: youtube,
        integrated_summary,
        quality_recommendations,
    }
}
