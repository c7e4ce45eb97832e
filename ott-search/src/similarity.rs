//! Normalised edit-distance similarity between a query and a candidate title.
//!
//! Formula: `score = 1 - levenshtein(a, b) / max(len(a), len(b))`
//! computed over lowercased Unicode scalar values.

/// Similarity of `query` to `candidate` in `[0, 1]`, case-insensitive.
///
/// - Identical strings (ignoring case) score 1.0
/// - Two empty strings score 1.0
/// - Exactly one empty string scores 0.0
pub fn score(query: &str, candidate: &str) -> f64 {
    let a: Vec<char> = query.to_lowercase().chars().collect();
    let b: Vec<char> = candidate.to_lowercase().chars().collect();

    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }

    1.0 - levenshtein(&a, &b) as f64 / longest as f64
}

/// Classic two-row Levenshtein distance (insert, delete, substitute all cost 1).
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
