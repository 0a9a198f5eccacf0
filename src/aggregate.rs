//! Frequency aggregation.
//!
//! Generic over any hashable item (word tokens, emoji scalars, sentiment
//! category labels). Top-N ordering is descending by count; equal counts fall
//! back to first-seen order, which is the documented tie-break contract.

use std::collections::HashMap;
use std::hash::Hash;

/// Counts occurrences and returns the `n` most frequent items.
///
/// The result has length `min(n, distinct items)` and the sum of its counts
/// never exceeds the input length.
pub fn top_n<I, T>(items: I, n: usize) -> Vec<(T, usize)>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (idx, item) in items.into_iter().enumerate() {
        let entry = counts.entry(item).or_insert((0, idx));
        entry.0 += 1;
    }

    let mut ranked: Vec<(T, usize, usize)> = counts
        .into_iter()
        .map(|(item, (count, first_seen))| (item, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(n);
    ranked.into_iter().map(|(item, count, _)| (item, count)).collect()
}

/// Full frequency table, descending by count, first-seen tie-break.
pub fn count_all<I, T>(items: I) -> Vec<(T, usize)>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    top_n(items, usize::MAX)
}
