//! Pattern tables driving credibility, categorization, phase assignment and
//! stopword filtering.
//!
//! Every table is ordered: the first matching entry wins, so the order of the
//! entries is part of the contract. The `Default` impls hold the built-in
//! tables; any subset can be swapped by deserializing a `RuleSet`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{CredibilityTier, TermCategory};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub credibility: CredibilityTable,
    pub categories: CategoryTable,
    pub phases: PhaseMarkers,
    pub stopwords: Stopwords,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityRule {
    pub tier: CredibilityTier,
    pub domains: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredibilityTable {
    pub rules: Vec<CredibilityRule>,
}

impl CredibilityTable {
    /// First tier whose domain list has an entry contained in `url_lower`.
    pub fn lookup(&self, url_lower: &str) -> Option<CredibilityTier> {
        self.rules
            .iter()
            .find(|rule| rule.domains.iter().any(|d| url_lower.contains(d.as_str())))
            .map(|rule| rule.tier)
    }
}

impl Default for CredibilityTable {
    fn default() -> Self {
        Self {
            rules: vec![
                CredibilityRule {
                    tier: CredibilityTier::High,
                    domains: strings(&[
                        "wikipedia.org",
                        ".gov",
                        ".edu",
                        ".go.jp",
                        ".ac.jp",
                        "scholar.google",
                        "researchgate.net",
                        "arxiv.org",
                    ]),
                },
                CredibilityRule {
                    tier: CredibilityTier::Medium,
                    domains: strings(&[
                        "itmedia.co.jp",
                        "nikkei.com",
                        "diamond.jp",
                        "forbes.com",
                        "techcrunch.com",
                        "qiita.com",
                        "zenn.dev",
                        "github.com",
                    ]),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: TermCategory,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    pub rules: Vec<CategoryRule>,
}

impl CategoryTable {
    /// Case-insensitive substring match, first rule wins, `general` otherwise.
    pub fn categorize(&self, term: &str) -> TermCategory {
        let lower = term.to_lowercase();
        self.rules
            .iter()
            .find(|rule| {
                rule.patterns
                    .iter()
                    .any(|p| lower.contains(p.to_lowercase().as_str()))
            })
            .map(|rule| rule.category)
            .unwrap_or(TermCategory::General)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self {
            rules: vec![
                CategoryRule {
                    category: TermCategory::Technical,
                    patterns: strings(&[
                        "AI",
                        "API",
                        "ChatGPT",
                        "GPT",
                        "LLM",
                        "DX",
                        "IT",
                        "システム",
                        "プログラム",
                        "アルゴリズム",
                        "データ",
                        "ネットワーク",
                        "セキュリティ",
                        "クラウド",
                    ]),
                },
                CategoryRule {
                    category: TermCategory::Business,
                    patterns: strings(&[
                        "業務",
                        "効率",
                        "生産性",
                        "コスト",
                        "売上",
                        "利益",
                        "マーケティング",
                        "営業",
                        "管理",
                        "戦略",
                        "経営",
                    ]),
                },
                CategoryRule {
                    category: TermCategory::Learning,
                    patterns: strings(&[
                        "学習",
                        "教育",
                        "研修",
                        "トレーニング",
                        "スキル",
                        "知識",
                        "理解",
                        "習得",
                        "実践",
                    ]),
                },
            ],
        }
    }
}

/// Substring markers for learning-phase assignment. Matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseMarkers {
    pub introduction: Vec<String>,
    pub application: Vec<String>,
}

impl Default for PhaseMarkers {
    fn default() -> Self {
        Self {
            introduction: strings(&["基本", "概要", "入門"]),
            application: strings(&["方法", "使い方", "活用", "実践", "事例"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stopwords(pub HashSet<String>);

impl Stopwords {
    /// Terms are compared by their lowercase form.
    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(&term.to_lowercase())
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        let words = [
            "これ", "それ", "あれ", "この", "その", "あの", "こと", "もの", "ため", "など", "ここ",
            "そこ", "あそこ", "the", "a", "an", "is", "are", "was", "were", "be", "been", "have",
            "has", "had", "do", "does", "did", "will", "would", "can", "could", "may", "might",
            "must", "shall", "should", "this", "that", "these", "those", "and", "or", "but",
            "not",
        ];
        Self(words.iter().map(|w| w.to_string()).collect())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credibility_order_high_before_medium() {
        let table = CredibilityTable::default();
        // github.com (medium) and .edu (high) both present: the high list is walked first
        assert_eq!(
            table.lookup("https://github.com/some.edu/repo"),
            Some(CredibilityTier::High)
        );
        assert_eq!(table.lookup("https://qiita.com/x"), Some(CredibilityTier::Medium));
        assert_eq!(table.lookup("https://example.com"), None);
    }

    #[test]
    fn test_categorize_priority() {
        let table = CategoryTable::default();
        assert_eq!(table.categorize("ChatGPT"), TermCategory::Technical);
        assert_eq!(table.categorize("chatgpt"), TermCategory::Technical);
        // データ (technical) beats 管理 (business)
        assert_eq!(table.categorize("データ管理"), TermCategory::Technical);
        assert_eq!(table.categorize("業務効率"), TermCategory::Business);
        assert_eq!(table.categorize("学習"), TermCategory::Learning);
        assert_eq!(table.categorize("活用方法"), TermCategory::General);
    }

    #[test]
    fn test_stopwords_match_lowercase_form() {
        let stopwords = Stopwords::default();
        assert!(stopwords.contains("The"));
        assert!(stopwords.contains("これ"));
        assert!(!stopwords.contains("ChatGPT"));
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let rules: RuleSet =
            serde_json::from_str(r#"{"phases": {"introduction": ["basics"]}}"#).unwrap();

        assert_eq!(rules.phases.introduction, vec!["basics".to_string()]);
        assert_eq!(rules.phases.application, PhaseMarkers::default().application);
        assert_eq!(rules.credibility, CredibilityTable::default());
        assert_eq!(rules.categories, CategoryTable::default());
    }

    #[test]
    fn test_custom_table_order_is_respected() {
        let rules: RuleSet = serde_json::from_str(
            r#"{"categories": [
                {"category": "business", "patterns": ["データ"]},
                {"category": "technical", "patterns": ["データ"]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(rules.categories.categorize("データ分析"), TermCategory::Business);
    }
}
