use tracing::debug;

use crate::{
    format::group_thousands,
    quality::{
        IntegratedSummary, VideoSummary, WebSummary, WebValidation, YoutubeValidation,
        overall_quality,
    },
    types::QualityTier,
};

const MIN_WEB_DATA_POINTS: u64 = 10;
const MIN_CREDIBLE_RATIO: f64 = 0.5;
const MIN_VIDEO_WORDS: u64 = 5_000;
const MIN_VIDEO_MINUTES: f64 = 10.0;

pub fn web_recommendations(summary: &WebSummary) -> Vec<String> {
    let mut recommendations = Vec::new();

    if summary.sources_with_content < summary.total_sources {
        let missing = summary.total_sources - summary.sources_with_content;
        recommendations.push(format!(
            "⚠️ {}件の情報源でコンテンツが不足しています。別のURLを検討してください。",
            missing
        ));
    }

    if summary.total_data_points < MIN_WEB_DATA_POINTS {
        recommendations.push(format!(
            "⚠️ 数値データが少ない（{}件）です。統計データを含む情報源を追加することを推奨します。",
            summary.total_data_points
        ));
    }

    if summary.credible_ratio() < MIN_CREDIBLE_RATIO {
        recommendations.push(format!(
            "⚠️ 信頼性の高い情報源が少ない（{}/{}件）です。公的機関や学術機関の情報源を追加することを推奨します。",
            summary.credible_sources, summary.total_sources
        ));
    }

    if recommendations.is_empty() {
        recommendations.push("✓ Webリサーチデータは良好な品質です。".to_string());
    }

    debug!(channel = "web", count = recommendations.len(), "recommendations");
    recommendations
}

pub fn video_recommendations(summary: &VideoSummary) -> Vec<String> {
    let mut recommendations = Vec::new();

    if summary.videos_with_transcripts < summary.total_videos {
        let missing = summary.total_videos - summary.videos_with_transcripts;
        recommendations.push(format!(
            "⚠️ {}件の動画で文字起こしが不足しています。字幕のある動画を選択してください。",
            missing
        ));
    }

    if summary.total_words < MIN_VIDEO_WORDS {
        recommendations.push(format!(
            "⚠️ 総文字数が少ない（{}語）です。より長い動画または追加の動画を検討してください。",
            group_thousands(summary.total_words)
        ));
    }

    if summary.total_duration_minutes < MIN_VIDEO_MINUTES {
        recommendations.push(format!(
            "⚠️ 総動画時間が短い（{:.1}分）です。より詳細な解説動画を追加することを推奨します。",
            summary.total_duration_minutes
        ));
    }

    if recommendations.is_empty() {
        recommendations.push("✓ YouTube文字起こしデータは良好な品質です。".to_string());
    }

    debug!(channel = "youtube", count = recommendations.len(), "recommendations");
    recommendations
}

fn lead_sentence(tier: QualityTier) -> &'static str {
    match tier {
        QualityTier::Excellent => {
            "✓ 優れた品質のリサーチデータです。講座コンテンツ生成に十分な情報があります。"
        }
        QualityTier::Good => "✓ 良好な品質のリサーチデータです。",
        QualityTier::Acceptable => "⚠️ 許容範囲内の品質ですが、以下の改善を推奨します：",
        QualityTier::NeedsImprovement | QualityTier::Unknown => {
            "❌ 品質改善が必要です。以下の対策を実施してください："
        }
    }
}

/// Tier lead, then each validated channel's own list, then a data-point closing line.
pub fn integrated_recommendations(
    web: &WebValidation,
    youtube: &YoutubeValidation,
    summary: &IntegratedSummary,
) -> Vec<String> {
    let mut recommendations = vec![lead_sentence(overall_quality(summary)).to_string()];

    recommendations.extend(web.recommendations().iter().cloned());
    recommendations.extend(youtube.recommendations().iter().cloned());

    if summary.total_data_points > 0 {
        recommendations.push(format!(
            "💡 {}件の数値データが検出されました。これらを講座の具体例として活用できます。",
            summary.total_data_points
        ));
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web_summary(total: u64, with_content: u64, points: u64, credible: u64) -> WebSummary {
        WebSummary {
            total_sources: total,
            valid_urls: total,
            sources_with_content: with_content,
            total_data_points: points,
            credible_sources: credible,
        }
    }

    #[test]
    fn test_web_rules_fire_in_order() {
        let recs = web_recommendations(&web_summary(4, 2, 3, 1));

        assert_eq!(recs.len(), 3);
        assert!(recs[0].starts_with("⚠️ 2件の情報源"));
        assert!(recs[1].contains("（3件）"));
        assert!(recs[2].contains("（1/4件）"));
    }

    #[test]
    fn test_web_positive_confirmation() {
        let recs = web_recommendations(&web_summary(4, 4, 10, 2));
        assert_eq!(recs, vec!["✓ Webリサーチデータは良好な品質です。".to_string()]);
    }

    #[test]
    fn test_video_rules_quote_grouped_words() {
        let summary = VideoSummary {
            total_videos: 2,
            videos_with_transcripts: 2,
            total_words: 4_321,
            total_duration_minutes: 7.4,
            total_data_points: 0,
            languages: vec!["ja".to_string()],
        };
        let recs = video_recommendations(&summary);

        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("（4,321語）"));
        assert!(recs[1].contains("（7.4分）"));
    }

    #[test]
    fn test_integrated_lead_and_closing() {
        let web = WebValidation::Validated {
            summary: web_summary(1, 1, 12, 1),
            validations: Vec::new(),
            recommendations: vec!["web rec".to_string()],
        };
        let youtube = YoutubeValidation::Error {
            message: "bad".to_string(),
        };
        let summary = IntegratedSummary {
            total_information_sources: 1,
            total_data_points: 12,
            credible_sources: 1,
            ..Default::default()
        };

        let recs = integrated_recommendations(&web, &youtube, &summary);

        // score: 0 + 1 + 1 + 0 = 2
        assert_eq!(recs[0], "❌ 品質改善が必要です。以下の対策を実施してください：");
        assert_eq!(recs[1], "web rec");
        assert_eq!(
            recs[2],
            "💡 12件の数値データが検出されました。これらを講座の具体例として活用できます。"
        );
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn test_no_closing_line_without_data_points() {
        let recs = integrated_recommendations(
            &WebValidation::NoData {
                message: String::new(),
            },
            &YoutubeValidation::NoData {
                message: String::new(),
            },
            &IntegratedSummary::default(),
        );
        assert_eq!(recs.len(), 1);
    }
}
