//! Keyword ranking used by the local stores in place of semantic search.

use crate::error::MemoryError;
use crate::model::MemoryRecord;
use crate::store::SearchRequest;
use regex::Regex;
use std::collections::HashSet;

const STOP_WORDS: &[&str] = &[
    "a", "all", "am", "an", "and", "any", "are", "at", "be", "by", "can", "do", "does", "for",
    "from", "has", "have", "how", "i", "i'm", "in", "is", "it", "me", "my", "of", "on", "or",
    "our", "so", "that", "the", "this", "to", "we", "what", "who", "will", "with", "you",
];

/// Rank the records matching `request` by keyword overlap with the query.
///
/// Every matching record is returned (up to the limit) even when it shares no
/// term with the query, in which case it scores `0.0`. Ties keep the newest
/// record first.
pub fn rank(
    records: impl IntoIterator<Item = MemoryRecord>,
    request: &SearchRequest,
) -> Result<Vec<MemoryRecord>, MemoryError> {
    let word = Regex::new(r"[a-z0-9']+").map_err(|err| MemoryError::Regex(err.to_string()))?;
    let query_terms = terms(&word, &request.query);

    let mut ranked: Vec<MemoryRecord> = records
        .into_iter()
        .filter(|record| request.matches(record))
        .map(|mut record| {
            record.score = Some(overlap(&query_terms, &terms(&word, &record.memory)));
            record
        })
        .collect();
    ranked.reverse();
    ranked.sort_by(|left, right| {
        right
            .score
            .unwrap_or(0.0)
            .total_cmp(&left.score.unwrap_or(0.0))
    });
    ranked.truncate(request.limit);
    Ok(ranked)
}

fn terms(word: &Regex, text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    word.find_iter(&lowered)
        .map(|m| m.as_str().trim_matches('\'').to_string())
        .filter(|term| !term.is_empty() && !STOP_WORDS.contains(&term.as_str()))
        .collect()
}

/// Fraction of distinct query terms present in the record.
fn overlap(query_terms: &HashSet<String>, record_terms: &HashSet<String>) -> f32 {
    if query_terms.is_empty() {
        return 0.0;
    }
    let hits = query_terms.intersection(record_terms).count();
    hits as f32 / query_terms.len() as f32
}
