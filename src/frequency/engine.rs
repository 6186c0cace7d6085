use super::tokenizer::count_words;
use super::types::{FrequencyRequest, RankedEntry, WordCounts};
use crate::cache::fingerprint::fingerprint;
use crate::cache::ranking::RankingCache;

/// Orders words by count descending, breaking ties by first appearance, and keeps
/// at most `top` of them.
pub fn rank(counts: WordCounts, top: usize) -> Vec<RankedEntry> {
    let mut tallies: Vec<_> = counts.into_tallies().collect();
    tallies.sort_by(|a, b| {
        b.1.count
            .cmp(&a.1.count)
            .then(a.1.first_seen.cmp(&b.1.first_seen))
    });

    tallies
        .into_iter()
        .take(top)
        .map(|(word, tally)| RankedEntry {
            word,
            count: tally.count,
        })
        .collect()
}

/// Computes the ranking for a request without touching the cache.
pub fn word_frequencies(request: &FrequencyRequest) -> Vec<RankedEntry> {
    rank(count_words(&request.text, &request.exclude), request.top)
}

/// Returns the cached ranking for this request, computing and storing it on a miss.
pub async fn cached_word_frequencies(
    request: &FrequencyRequest,
    cache: &RankingCache,
) -> Vec<RankedEntry> {
    let key = fingerprint(&request.text, request.top, &request.exclude);

    if let Some(ranked) = cache.get(&key).await {
        tracing::debug!("Cache hit for {}", key);
        return ranked;
    }

    tracing::debug!("Cache miss for {}, computing frequencies", key);
    let ranked = word_frequencies(request);
    cache.put(&key, &ranked).await;
    ranked
}
