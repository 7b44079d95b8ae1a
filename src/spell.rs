//! Vocabulary-driven spelling correction.
//!
//! A token already in the original-variant vocabulary never gets corrected.
//! Otherwise every vocabulary word is scored by Levenshtein edit distance
//! and the closest one wins, provided it is strictly under the configured
//! maximum distance. Ties prefer the lexicographically smaller word, so
//! corrections are stable across runs.

use crate::corpus::VectorSpace;
use crate::variant::Variant;

/// Levenshtein edit distance via the classic two-row dynamic program.
pub fn levenshtein(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len() as u32;
    }
    if b.is_empty() {
        return a.len() as u32;
    }

    let mut prev: Vec<u32> = (0..=b.len() as u32).collect();
    let mut curr = vec![0u32; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i as u32 + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + u32::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Suggests in-vocabulary replacements for misspelled query tokens.
pub struct SpellChecker<'a> {
    space: &'a VectorSpace,
    max_distance: u32,
}

impl<'a> SpellChecker<'a> {
    pub fn new(space: &'a VectorSpace, max_distance: u32) -> Self {
        SpellChecker {
            space,
            max_distance,
        }
    }

    /// The closest vocabulary word, or `None` when the token is already
    /// known or nothing lies within the distance ceiling.
    pub fn correct(&self, token: &str) -> Option<String> {
        if self.space.contains(Variant::Original, token) {
            return None;
        }

        let mut best: Option<(u32, &String)> = None;
        for word in self.space.vocabulary(Variant::Original) {
            let distance = levenshtein(token, word);
            if distance >= self.max_distance {
                continue;
            }
            match best {
                Some((d, w)) if (distance, word) >= (d, w) => {}
                _ => best = Some((distance, word)),
            }
        }
        best.map(|(_, word)| word.clone())
    }

    /// Correct a token list in place, keeping tokens with no viable fix.
    pub fn correct_all(&self, tokens: &[&str]) -> Vec<String> {
        tokens
            .iter()
            .map(|token| {
                self.correct(token)
                    .unwrap_or_else(|| (*token).to_string())
            })
            .collect()
    }
}
