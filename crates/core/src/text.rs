//! Text statistics over extracted page copy.
//!
//! Word and token counting, case-insensitive keyword occurrence counting,
//! and the Flesch reading-ease estimate used by the content pillar. All
//! functions here are pure and deterministic.

use regex::Regex;

/// Pattern matching a single word.
const WORD_PATTERN: &str = r"\b\w+\b";

/// Pattern matching one alphanumeric token of a slug or keyword phrase.
const TOKEN_PATTERN: &str = r"[a-z0-9]+";

/// Pattern matching a run of vowels, used as the syllable estimate.
const VOWEL_GROUP_PATTERN: &str = r"[aeiouy]+";

/// Counts the words in a piece of text.
pub fn count_words(text: &str) -> usize {
    let word_re = Regex::new(WORD_PATTERN).unwrap();
    word_re.find_iter(text).count()
}

/// Splits a string into lowercase alphanumeric tokens.
///
/// Used for comparing URL slug segments against keyword phrases:
/// `"/best-garden-tools/"` and `"Garden Tools"` both tokenize to
/// overlapping sets.
pub fn tokens(s: &str) -> Vec<String> {
    let token_re = Regex::new(TOKEN_PATTERN).unwrap();
    token_re
        .find_iter(&s.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Counts case-insensitive, non-overlapping occurrences of a literal phrase.
///
/// The phrase is matched as plain text, never as a regular expression, so
/// keywords containing `.` or `+` behave as typed.
pub fn keyword_occurrences(text: &str, keyword: &str) -> usize {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return 0;
    }
    text.to_lowercase().matches(&keyword.to_lowercase()).count()
}

/// Computes an approximate Flesch reading-ease score.
///
/// Syllables are estimated by counting vowel groups per word (minimum one),
/// then combined with average sentence length and average syllables per
/// word using the standard linear formula
/// `206.835 − 1.015·(words/sentences) − 84.6·(syllables/words)`.
/// The result is rounded to two decimals; empty text scores 0.0.
pub fn flesch_reading_ease(text: &str) -> f64 {
    let sentence_re = Regex::new(r"[.!?]+").unwrap();
    let word_re = Regex::new(WORD_PATTERN).unwrap();
    let vowel_re = Regex::new(VOWEL_GROUP_PATTERN).unwrap();

    let sentences = sentence_re
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count();
    let words: Vec<&str> = word_re.find_iter(text).map(|m| m.as_str()).collect();

    if words.is_empty() || sentences == 0 {
        return 0.0;
    }

    let total_syllables: usize = words
        .iter()
        .map(|w| vowel_re.find_iter(&w.to_lowercase()).count().max(1))
        .sum();

    let avg_sentence_len = words.len() as f64 / sentences as f64;
    let avg_syllables = total_syllables as f64 / words.len() as f64;
    let score = 206.835 - (1.015 * avg_sentence_len) - (84.6 * avg_syllables);

    round2(score)
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
