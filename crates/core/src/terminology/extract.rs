use std::{cmp::Reverse, collections::HashMap, sync::LazyLock};

use regex::Regex;
use tracing::{debug, warn};

use crate::{
    input::ChannelInput,
    rules::RuleSet,
    terminology::{MAX_CHANNEL_TERMS, MIN_TERM_FREQUENCY, TermCount, TermExtraction},
    types::{ChannelKind, VideoCollection, WebCollection},
};

// Latin/digit/katakana runs bounded by word breaks, or runs of CJK ideographs.
static TERM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9ァ-ヴー]{2,}\b|[一-龯]{2,}").expect("term pattern compiles")
});

/// Count candidate terms in `text`, drop stopwords and rare terms, keep the
/// top `MAX_CHANNEL_TERMS` by frequency. Ties keep first-seen order.
pub fn extract_terms(text: &str, rules: &RuleSet) -> Vec<TermCount> {
    let mut counts: Vec<(&str, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for m in TERM_PATTERN.find_iter(text) {
        let word = m.as_str();
        match index.get(word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word, counts.len());
                counts.push((word, 1));
            }
        }
    }

    let mut kept: Vec<(&str, u64)> = counts
        .into_iter()
        .filter(|(word, freq)| *freq >= MIN_TERM_FREQUENCY && !rules.stopwords.contains(word))
        .collect();
    kept.sort_by_key(|&(_, freq)| Reverse(freq));
    kept.truncate(MAX_CHANNEL_TERMS);

    kept.into_iter()
        .map(|(word, frequency)| TermCount {
            term: word.to_string(),
            frequency,
            category: rules.categories.categorize(word),
        })
        .collect()
}

fn extraction(channel: ChannelKind, text: &str, rules: &RuleSet) -> TermExtraction {
    let terms = extract_terms(text, rules);
    debug!(channel = channel.name(), terms = terms.len(), "extracted terms");

    TermExtraction::Extracted {
        source_type: channel,
        total_unique_terms: terms.len(),
        terms,
    }
}

pub fn extract_web_terms(input: &ChannelInput<WebCollection>, rules: &RuleSet) -> TermExtraction {
    match input {
        ChannelInput::Malformed(reason) => {
            warn!(channel = "web", %reason, "skipping term extraction");
            TermExtraction::Error {
                message: reason.clone(),
            }
        }
        ChannelInput::Loaded(collection) if !collection.sources.is_empty() => {
            let text = collection
                .sources
                .iter()
                .map(|s| format!("{} {}", s.title, s.content))
                .collect::<Vec<_>>()
                .join(" ");
            extraction(ChannelKind::Web, &text, rules)
        }
        _ => TermExtraction::NoData,
    }
}

pub fn extract_video_terms(
    input: &ChannelInput<VideoCollection>,
    rules: &RuleSet,
) -> TermExtraction {
    match input {
        ChannelInput::Malformed(reason) => {
            warn!(channel = "youtube", %reason, "skipping term extraction");
            TermExtraction::Error {
                message: reason.clone(),
            }
        }
        ChannelInput::Loaded(collection) if !collection.transcriptions.is_empty() => {
            let text = collection
                .transcriptions
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            extraction(ChannelKind::Youtube, &text, rules)
        }
        _ => TermExtraction::NoData,
    }
}
