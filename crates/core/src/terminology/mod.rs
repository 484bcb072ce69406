//! Terminology Extractor: per-channel term counting, cross-channel merge and
//! learning-phase mapping.

pub mod extract;
pub mod merge;
pub mod phase;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use extract::{extract_terms, extract_video_terms, extract_web_terms};
pub use merge::{fold_terms, merge};
pub use phase::{assign_phase, map_phases, terminology_recommendations};

use crate::types::{ChannelKind, LearningPhase, TermCategory};

/// Terms below this frequency never reach a ranked list.
pub const MIN_TERM_FREQUENCY: u64 = 2;
pub const MAX_CHANNEL_TERMS: usize = 50;
pub const MAX_TOP_TERMS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub frequency: u64,
    pub category: TermCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TermExtraction {
    Extracted {
        source_type: ChannelKind,
        terms: Vec<TermCount>,
        total_unique_terms: usize,
    },
    NoData,
    Error {
        message: String,
    },
}

impl TermExtraction {
    pub fn status(&self) -> &'static str {
        match self {
            TermExtraction::Extracted { .. } => "extracted",
            TermExtraction::NoData => "no_data",
            TermExtraction::Error { .. } => "error",
        }
    }

    pub fn channel_terms(&self) -> Option<(ChannelKind, &[TermCount])> {
        match self {
            TermExtraction::Extracted {
                source_type, terms, ..
            } => Some((*source_type, terms.as_slice())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedTerm {
    pub term: String,
    pub frequency: u64,
    pub category: TermCategory,
    pub sources: Vec<ChannelKind>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedTermList {
    /// Unique terms across all channels, before the top-list cap.
    pub total_unique_terms: usize,
    pub terms: Vec<MergedTerm>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub term: String,
    pub frequency: u64,
    pub category: TermCategory,
    pub learning_phase: LearningPhase,
    pub sources: Vec<ChannelKind>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminologySummary {
    pub total_unique_terms: usize,
    pub top_terms_count: usize,
    pub categories: BTreeMap<TermCategory, usize>,
    pub learning_phases: BTreeMap<LearningPhase, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminologyReport {
    pub analysis_date: DateTime<Utc>,
    pub course_theme: Option<String>,
    pub terminology_summary: TerminologySummary,
    pub top_terms: Vec<Term>,
    pub recommendations: Vec<String>,
}
