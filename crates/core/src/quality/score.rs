use serde::{Deserialize, Serialize};

use crate::{
    quality::{WebValidation, YoutubeValidation, saturating_total},
    types::QualityTier,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentVolume {
    pub web_characters: u64,
    pub youtube_words: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegratedSummary {
    pub total_information_sources: u64,
    pub total_data_points: u64,
    pub credible_sources: u64,
    pub total_content_volume: ContentVolume,
}

/// Thresholds for one scoring factor: `full` earns 2 points, `partial` earns 1.
struct Band {
    full: u64,
    partial: u64,
}

impl Band {
    fn points(&self, value: u64) -> u8 {
        if value >= self.full {
            2
        } else if value >= self.partial {
            1
        } else {
            0
        }
    }
}

const SOURCES: Band = Band { full: 5, partial: 3 };
const DATA_POINTS: Band = Band {
    full: 20,
    partial: 10,
};
const CREDIBLE: Band = Band { full: 3, partial: 1 };
const VIDEO_WORDS: Band = Band {
    full: 10_000,
    partial: 5_000,
};

/// Sum both channels. Channels without validated records contribute nothing.
pub fn integrate(web: &WebValidation, youtube: &YoutubeValidation) -> IntegratedSummary {
    let web_summary = web.summary().cloned().unwrap_or_default();
    let video_summary = youtube.summary().cloned().unwrap_or_default();

    IntegratedSummary {
        total_information_sources: web_summary
            .total_sources
            .saturating_add(video_summary.total_videos),
        total_data_points: web_summary
            .total_data_points
            .saturating_add(video_summary.total_data_points),
        credible_sources: web_summary.credible_sources,
        total_content_volume: ContentVolume {
            web_characters: saturating_total(
                web.validations().iter().map(|v| v.checks.content_length),
            ),
            youtube_words: video_summary.total_words,
        },
    }
}

/// Score in `0..=8` over sources, data points, credibility and video volume.
pub fn quality_score(summary: &IntegratedSummary) -> u8 {
    SOURCES.points(summary.total_information_sources)
        + DATA_POINTS.points(summary.total_data_points)
        + CREDIBLE.points(summary.credible_sources)
        + VIDEO_WORDS.points(summary.total_content_volume.youtube_words)
}

pub fn overall_quality(summary: &IntegratedSummary) -> QualityTier {
    match quality_score(summary) {
        7.. => QualityTier::Excellent,
        5..=6 => QualityTier::Good,
        3..=4 => QualityTier::Acceptable,
        _ => QualityTier::NeedsImprovement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(sources: u64, points: u64, credible: u64, words: u64) -> IntegratedSummary {
        IntegratedSummary {
            total_information_sources: sources,
            total_data_points: points,
            credible_sources: credible,
            total_content_volume: ContentVolume {
                web_characters: 0,
                youtube_words: words,
            },
        }
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(quality_score(&summary(2, 9, 0, 4_999)), 0);
        assert_eq!(quality_score(&summary(3, 10, 1, 5_000)), 4);
        assert_eq!(quality_score(&summary(4, 19, 2, 9_999)), 4);
        assert_eq!(quality_score(&summary(5, 20, 3, 10_000)), 8);
    }

    #[test]
    fn test_tier_mapping() {
        assert_eq!(overall_quality(&summary(5, 20, 3, 10_000)), QualityTier::Excellent);
        assert_eq!(overall_quality(&summary(5, 20, 3, 5_000)), QualityTier::Excellent);
        assert_eq!(overall_quality(&summary(5, 20, 3, 0)), QualityTier::Good);
        assert_eq!(overall_quality(&summary(3, 10, 1, 5_000)), QualityTier::Acceptable);
        assert_eq!(overall_quality(&summary(3, 10, 0, 0)), QualityTier::NeedsImprovement);
        assert_eq!(overall_quality(&summary(0, 0, 0, 0)), QualityTier::NeedsImprovement);
    }

    #[test]
    fn test_huge_counts_saturate() {
        use crate::{
            input::ChannelInput,
            quality::checks::validate_video_transcripts,
            types::{VideoCollection, VideoTranscriptRecord},
        };

        let record = |word_count| VideoTranscriptRecord {
            word_count,
            ..Default::default()
        };
        let videos = VideoCollection {
            transcriptions: vec![record(u64::MAX), record(1)],
            ..Default::default()
        };
        let youtube = validate_video_transcripts(&ChannelInput::Loaded(videos));
        assert_eq!(youtube.summary().unwrap().total_words, u64::MAX);

        let web = WebValidation::NoData {
            message: String::new(),
        };
        let integrated = integrate(&web, &youtube);
        assert_eq!(integrated.total_content_volume.youtube_words, u64::MAX);
        assert_eq!(overall_quality(&integrated), QualityTier::NeedsImprovement);
        assert_eq!(saturating_total([u64::MAX, u64::MAX, 3]), u64::MAX);
    }

    #[test]
    fn test_verdict_is_repeatable() {
        let s = summary(4, 12, 2, 6_000);
        let first = overall_quality(&s);
        for _ in 0..3 {
            assert_eq!(overall_quality(&s), first);
        }
    }
}
