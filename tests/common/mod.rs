//! Brute-force reference for the longest shared trimmed substrings.
//! Enumerates every substring, so only use it on small inputs.

use std::collections::{BTreeSet, HashMap, HashSet};

/// Returns (max trimmed length, all keys of that length) over substrings that
/// at least `min_group_size` texts contain, considering only keys of at least
/// `min_key_len` chars.
pub fn longest_shared_keys(texts: &[String], min_key_len: usize, min_group_size: usize) -> (usize, BTreeSet<String>) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        let chars: Vec<char> = text.chars().collect();
        let mut seen = HashSet::new();
        for start in 0..chars.len() {
            for end in start + 1..=chars.len() {
                let key: String = chars[start..end].iter().collect::<String>().trim().to_string();
                if key.chars().count() >= min_key_len && seen.insert(key.clone()) {
                    *counts.entry(key).or_insert(0) += 1;
                }
            }
        }
    }
    let valid: Vec<(usize, String)> = counts
        .into_iter()
        .filter(|(_, c)| *c >= min_group_size)
        .map(|(k, _)| (k.chars().count(), k))
        .collect();
    let best = valid.iter().map(|(len, _)| *len).max().unwrap_or(0);
    let keys = valid.into_iter().filter(|(len, _)| *len == best).map(|(_, k)| k).collect();
    (best, keys)
}
