//! Closest-key suggestions based on longest-common-subsequence similarity.

use super::types::ClassifiedEntry;

/// Scores at or below this are not worth suggesting.
pub const SIMILARITY_THRESHOLD: f64 = 0.5;

/// Length of the longest common subsequence of `a` and `b`, in chars.
pub fn lcs_length(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];
    for ca in &a {
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Normalised LCS similarity: `2 * lcs / (len(a) + len(b))`, in `[0, 1]`.
///
/// ```
/// use i18n_audit::core::similarity::similarity;
///
/// assert_eq!(similarity("user.name", "user.name"), 1.0);
/// assert_eq!(similarity("abc", "xyz"), 0.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    (2 * lcs_length(a, b)) as f64 / total as f64
}

/// The reference most similar to `key`, if any scores above the threshold.
///
/// Only a strictly greater score replaces the current best, so on ties the
/// earliest reference wins. A reference equal to `key` is never returned.
pub fn best_match<'r>(key: &str, references: &[&'r str]) -> Option<&'r str> {
    let mut best: Option<(&'r str, f64)> = None;

    for &reference in references {
        if reference == key {
            continue;
        }
        let score = similarity(key, reference);
        if score > SIMILARITY_THRESHOLD && best.is_none_or(|(_, top)| score > top) {
            best = Some((reference, score));
        }
    }

    best.map(|(reference, _)| reference)
}

/// Fill the `similar` field of each candidate with its best reference.
pub fn attach_similar<'a>(
    candidates: impl IntoIterator<Item = &'a mut ClassifiedEntry>,
    references: &[&str],
) {
    for entry in candidates {
        entry.similar = best_match(&entry.key, references).map(str::to_string);
    }
}
