use std::{cmp::Reverse, collections::HashMap};

use tracing::debug;

use crate::{
    terminology::{MAX_TOP_TERMS, MergedTerm, MergedTermList, TermCount, TermExtraction},
    types::ChannelKind,
};

/// Fold one channel's terms into `acc`: exact-string union, frequencies summed,
/// the channel tag appended to `sources`. New terms go to the end.
pub fn fold_terms(
    acc: Vec<MergedTerm>,
    terms: &[TermCount],
    channel: ChannelKind,
) -> Vec<MergedTerm> {
    let mut merged = acc;
    let mut index: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, t)| (t.term.clone(), i))
        .collect();

    for term in terms {
        match index.get(&term.term) {
            Some(&i) => {
                merged[i].frequency = merged[i].frequency.saturating_add(term.frequency);
                merged[i].sources.push(channel);
            }
            None => {
                index.insert(term.term.clone(), merged.len());
                merged.push(MergedTerm {
                    term: term.term.clone(),
                    frequency: term.frequency,
                    category: term.category,
                    sources: vec![channel],
                });
            }
        }
    }

    merged
}

/// Merge every extracted channel into one ranked list capped at `MAX_TOP_TERMS`.
///
/// Channels are folded in `ChannelKind` order whatever order they are passed
/// in, so the result (including tie order and `sources`) does not depend on
/// argument order. Channels that were not extracted are skipped.
pub fn merge(extractions: &[&TermExtraction]) -> MergedTermList {
    let mut channels: Vec<(ChannelKind, &[TermCount])> = extractions
        .iter()
        .filter_map(|e| e.channel_terms())
        .collect();
    channels.sort_by_key(|(kind, _)| *kind);

    let mut terms = channels
        .into_iter()
        .fold(Vec::new(), |acc, (kind, terms)| fold_terms(acc, terms, kind));
    terms.sort_by_key(|t| Reverse(t.frequency));

    let total_unique_terms = terms.len();
    terms.truncate(MAX_TOP_TERMS);
    debug!(total_unique_terms, kept = terms.len(), "merged terms");

    MergedTermList {
        total_unique_terms,
        terms,
    }
}
