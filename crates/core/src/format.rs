use crate::{quality::QualityReport, terminology::TerminologyReport};

const READABLE_TOP_TERMS: usize = 10;

/// Format an integer with comma thousands separators (`12,345`).
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut output = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            output.push(',');
        }
        output.push(ch);
    }
    output
}

/// Cut `text` to at most `limit` characters, marking the cut with `...`.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Format a quality report as human-readable markdown
pub fn format_quality_readable(report: &QualityReport) -> String {
    let mut output = String::new();
    let tier = report.overall_quality;

    output.push_str("# 講座コンテンツ品質検証レポート\n\n");
    output.push_str(&format!("{} **総合品質評価:** {}\n\n", tier.icon(), tier.label()));

    let summary = &report.integrated_summary;
    output.push_str("## 統合サマリー\n\n");
    output.push_str(&format!(
        "• 総情報源数: {}件\n",
        summary.total_information_sources
    ));
    output.push_str(&format!(
        "• データポイント数: {}件\n",
        summary.total_data_points
    ));
    output.push_str(&format!(
        "• 信頼性の高い情報源: {}件\n",
        summary.credible_sources
    ));
    output.push_str(&format!(
        "• コンテンツ量: Web {}文字 / YouTube {}語\n\n",
        group_thousands(summary.total_content_volume.web_characters),
        group_thousands(summary.total_content_volume.youtube_words)
    ));

    output.push_str(&format!(
        "**Web:** {} | **YouTube:** {}\n\n",
        report.web_research.status(),
        report.youtube_research.status()
    ));

    output.push_str("## 推奨事項\n\n");
    for rec in &report.quality_recommendations {
        output.push_str(&format!("{}\n", rec));
    }

    output
}

/// Format a terminology report as human-readable markdown
pub fn format_terminology_readable(report: &TerminologyReport) -> String {
    let mut output = String::new();
    let summary = &report.terminology_summary;

    output.push_str("# 講座用語分析レポート\n\n");
    if let Some(theme) = &report.course_theme {
        output.push_str(&format!("**講座テーマ:** {}\n\n", theme));
    }

    output.push_str("## 用語サマリー\n\n");
    output.push_str(&format!("• ユニーク用語数: {}個\n", summary.total_unique_terms));
    output.push_str(&format!("• トップ用語数: {}個\n\n", summary.top_terms_count));

    if !summary.categories.is_empty() {
        output.push_str("## カテゴリ分布\n\n");
        for (category, count) in &summary.categories {
            output.push_str(&format!("• {}: {}個\n", category.label(), count));
        }
        output.push('\n');
    }

    if !summary.learning_phases.is_empty() {
        output.push_str("## 学習フェーズ分布\n\n");
        for (phase, count) in &summary.learning_phases {
            output.push_str(&format!("• {}: {}個\n", phase.label(), count));
        }
        output.push('\n');
    }

    if !report.top_terms.is_empty() {
        output.push_str("## 頻出用語トップ10\n\n");
        for (i, term) in report.top_terms.iter().take(READABLE_TOP_TERMS).enumerate() {
            output.push_str(&format!(
                "{:2}. {} (頻度: {}, カテゴリ: {}, フェーズ: {})\n",
                i + 1,
                term.term,
                term.frequency,
                term.category.name(),
                term.learning_phase.name()
            ));
        }
        output.push('\n');
    }

    output.push_str("## 推奨事項\n\n");
    for rec in &report.recommendations {
        output.push_str(&format!("{}\n", rec));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
    }

    #[test]
    fn test_terminology_summary_lists_top_terms() {
        use std::collections::BTreeMap;

        use chrono::{DateTime, Utc};

        use crate::{
            terminology::{Term, TerminologySummary},
            types::{ChannelKind, LearningPhase, TermCategory},
        };

        let report = TerminologyReport {
            analysis_date: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
            course_theme: Some("生成AI".to_string()),
            terminology_summary: TerminologySummary {
                total_unique_terms: 12,
                top_terms_count: 1,
                categories: BTreeMap::from([(TermCategory::Technical, 1)]),
                learning_phases: BTreeMap::from([(LearningPhase::Understanding, 1)]),
            },
            top_terms: vec![Term {
                term: "ChatGPT".to_string(),
                frequency: 12,
                category: TermCategory::Technical,
                learning_phase: LearningPhase::Understanding,
                sources: vec![ChannelKind::Web],
            }],
            recommendations: vec!["✓ 用語のバランスは良好です。".to_string()],
        };

        let text = format_terminology_readable(&report);
        assert!(text.contains("**講座テーマ:** 生成AI"));
        assert!(text.contains("• 技術用語: 1個"));
        assert!(
            text.contains(" 1. ChatGPT (頻度: 12, カテゴリ: technical, フェーズ: understanding)")
        );
        assert!(text.ends_with("✓ 用語のバランスは良好です。\n"));
    }

    #[test]
    fn test_preview_counts_characters() {
        assert_eq!(preview("短い", 500), "短い");
        assert_eq!(preview("あいうえお", 3), "あいう...");
        assert_eq!(preview("abc", 3), "abc");
    }
}
