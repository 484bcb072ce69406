use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    rules::{PhaseMarkers, RuleSet},
    terminology::{MergedTermList, Term, TerminologyReport, TerminologySummary},
    types::{LearningPhase, TermCategory},
};

const DOMINANT_SHARE: f64 = 0.5;
const MIN_PHASE_SHARE: f64 = 0.2;
const HIGHLIGHTED_TERMS: usize = 5;

/// First rule wins: a `learning` category or an introduction marker puts the
/// term in `introduction`, even when it also carries an application marker.
pub fn assign_phase(term: &str, category: TermCategory, markers: &PhaseMarkers) -> LearningPhase {
    let has_marker = |list: &[String]| list.iter().any(|m| term.contains(m.as_str()));

    if category == TermCategory::Learning || has_marker(markers.introduction.as_slice()) {
        LearningPhase::Introduction
    } else if has_marker(markers.application.as_slice()) {
        LearningPhase::Application
    } else {
        LearningPhase::Understanding
    }
}

fn histogram<K: Ord, I: Iterator<Item = K>>(keys: I) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

pub fn terminology_recommendations(terms: &[Term]) -> Vec<String> {
    let mut recommendations = Vec::new();

    let total = terms.len() as f64;
    let categories = histogram(terms.iter().map(|t| t.category));
    let phases = histogram(terms.iter().map(|t| t.learning_phase));
    let share = |count: Option<&usize>| count.copied().unwrap_or(0) as f64;

    if share(categories.get(&TermCategory::Technical)) > total * DOMINANT_SHARE {
        recommendations.push(
            "💡 技術用語が多く検出されました。初学者向けに用語解説を充実させることを推奨します。"
                .to_string(),
        );
    }

    if share(categories.get(&TermCategory::Business)) > total * DOMINANT_SHARE {
        recommendations.push(
            "💡 ビジネス用語が多く検出されました。実務への応用事例を含めることを推奨します。"
                .to_string(),
        );
    }

    if share(phases.get(&LearningPhase::Introduction)) < total * MIN_PHASE_SHARE {
        recommendations.push(
            "⚠️ 導入フェーズの用語が少ないです。基本概念の説明を充実させることを推奨します。"
                .to_string(),
        );
    }

    if share(phases.get(&LearningPhase::Application)) < total * MIN_PHASE_SHARE {
        recommendations.push(
            "⚠️ 実践フェーズの用語が少ないです。具体的な活用方法や事例を追加することを推奨します。"
                .to_string(),
        );
    }

    if recommendations.is_empty() {
        recommendations.push("✓ 用語のバランスは良好です。".to_string());
    }

    let top: Vec<&str> = terms
        .iter()
        .take(HIGHLIGHTED_TERMS)
        .map(|t| t.term.as_str())
        .collect();
    recommendations.push(format!(
        "💡 重要用語トップ5: {}\n  これらの用語を講座の各セクションで適切に解説することを推奨します。",
        top.join(", ")
    ));

    recommendations
}

/// Assign phases to the merged top list and build the report stamped with `analyzed_at`.
pub fn map_phases(
    merged: MergedTermList,
    rules: &RuleSet,
    analyzed_at: DateTime<Utc>,
    course_theme: Option<String>,
) -> TerminologyReport {
    let top_terms: Vec<Term> = merged
        .terms
        .into_iter()
        .map(|t| Term {
            learning_phase: assign_phase(&t.term, t.category, &rules.phases),
            term: t.term,
            frequency: t.frequency,
            category: t.category,
            sources: t.sources,
        })
        .collect();

    let terminology_summary = TerminologySummary {
        total_unique_terms: merged.total_unique_terms,
        top_terms_count: top_terms.len(),
        categories: histogram(top_terms.iter().map(|t| t.category)),
        learning_phases: histogram(top_terms.iter().map(|t| t.learning_phase)),
    };
    let recommendations = terminology_recommendations(&top_terms);

    info!(
        total_unique_terms = terminology_summary.total_unique_terms,
        top_terms = terminology_summary.top_terms_count,
        "terminology report built"
    );

    TerminologyReport {
        analysis_date: analyzed_at,
        course_theme,
        terminology_summary,
        top_terms,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{terminology::MergedTerm, types::ChannelKind};

    fn term(name: &str, category: TermCategory, phase: LearningPhase) -> Term {
        Term {
            term: name.to_string(),
            frequency: 2,
            category,
            learning_phase: phase,
            sources: vec![ChannelKind::Web],
        }
    }

    #[test]
    fn test_phase_precedence() {
        let markers = PhaseMarkers::default();

        assert_eq!(
            assign_phase("活用方法", TermCategory::General, &markers),
            LearningPhase::Application
        );
        assert_eq!(
            assign_phase("活用方法", TermCategory::Learning, &markers),
            LearningPhase::Introduction
        );
        // both an introduction and an application marker
        assert_eq!(
            assign_phase("基本的な使い方", TermCategory::General, &markers),
            LearningPhase::Introduction
        );
        assert_eq!(
            assign_phase("ChatGPT", TermCategory::Technical, &markers),
            LearningPhase::Understanding
        );
    }

    #[test]
    fn test_balanced_list_gets_confirmation() {
        let terms = vec![
            term("基本", TermCategory::General, LearningPhase::Introduction),
            term("活用", TermCategory::General, LearningPhase::Application),
            term("仕組み", TermCategory::General, LearningPhase::Understanding),
        ];
        let recs = terminology_recommendations(&terms);

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0], "✓ 用語のバランスは良好です。");
        assert!(recs[1].starts_with("💡 重要用語トップ5: 基本, 活用, 仕組み\n"));
    }

    #[test]
    fn test_technical_heavy_list() {
        let terms = vec![
            term("AI", TermCategory::Technical, LearningPhase::Understanding),
            term("API", TermCategory::Technical, LearningPhase::Understanding),
            term("活用", TermCategory::General, LearningPhase::Application),
        ];
        let recs = terminology_recommendations(&terms);

        assert!(recs[0].starts_with("💡 技術用語が多く"));
        assert!(recs[1].starts_with("⚠️ 導入フェーズ"));
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn test_empty_list_still_names_top_terms() {
        let recs = terminology_recommendations(&[]);
        assert_eq!(recs[0], "✓ 用語のバランスは良好です。");
        assert!(recs[1].starts_with("💡 重要用語トップ5: \n"));
    }

    #[test]
    fn test_map_phases_builds_histograms() {
        let merged = MergedTermList {
            total_unique_terms: 45,
            terms: vec![
                MergedTerm {
                    term: "ChatGPT".to_string(),
                    frequency: 12,
                    category: TermCategory::Technical,
                    sources: vec![ChannelKind::Web, ChannelKind::Youtube],
                },
                MergedTerm {
                    term: "活用方法".to_string(),
                    frequency: 5,
                    category: TermCategory::General,
                    sources: vec![ChannelKind::Youtube],
                },
            ],
        };
        let at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let report = map_phases(merged, &RuleSet::default(), at, Some("生成AI".to_string()));

        assert_eq!(report.analysis_date, at);
        assert_eq!(report.terminology_summary.total_unique_terms, 45);
        assert_eq!(report.terminology_summary.top_terms_count, 2);
        assert_eq!(
            report.terminology_summary.categories.get(&TermCategory::Technical),
            Some(&1)
        );
        assert_eq!(
            report.terminology_summary.learning_phases.get(&LearningPhase::Application),
            Some(&1)
        );
        assert_eq!(report.top_terms[1].learning_phase, LearningPhase::Application);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["terminology_summary"]["categories"]["technical"], 1);
        assert_eq!(json["top_terms"][0]["learning_phase"], "understanding");
    }
}
