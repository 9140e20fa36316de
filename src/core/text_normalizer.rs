//! Text Normalization
//!
//! Cleans speech-recognition output before pattern matching and converts
//! spoken numbers ("twenty five") into values.

use regex::Regex;
use std::collections::HashMap;
use tracing::warn;

/// Spoken number words and their values
const NUMBER_WORDS: [(&str, u32); 29] = [
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
    ("hundred", 100),
];

/// Whether `word` is a spoken number ("five", "twenty")
pub fn is_number_word(word: &str) -> bool {
    let lower = word.trim().to_lowercase();
    NUMBER_WORDS.iter().any(|(w, _)| *w == lower)
}

/// Normalizes transcripts and parses spoken amounts
pub struct TextNormalizer {
    /// Manual corrections from config, matched as whole words
    corrections: Vec<(Regex, String)>,
    /// Number word mappings
    number_words: HashMap<&'static str, u32>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl TextNormalizer {
    /// Create a new text normalizer
    pub fn new(corrections: HashMap<String, String>) -> Self {
        let mut number_words = HashMap::new();

        for (word, num) in NUMBER_WORDS {
            number_words.insert(word, num);
        }

        // Longest phrases first so "door dash" wins over "door"
        let mut entries: Vec<(String, String)> = corrections
            .into_iter()
            .filter(|(from, _)| !from.trim().is_empty())
            .collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        let corrections = entries
            .into_iter()
            .filter_map(|(from, to)| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(from.trim()));
                match Regex::new(&pattern) {
                    Ok(re) => Some((re, to)),
                    Err(e) => {
                        warn!("Skipping voice correction '{}': {}", from, e);
                        None
                    }
                }
            })
            .collect();

        Self {
            corrections,
            number_words,
        }
    }

    /// Normalize a transcript: fold typographic quotes, apply corrections,
    /// collapse whitespace. Case is preserved.
    pub fn normalize(&self, text: &str) -> String {
        let mut result: String = text
            .chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' | '`' => '\'',
                _ => c,
            })
            .collect();

        for (pattern, replacement) in &self.corrections {
            result = pattern
                .replace_all(&result, regex::NoExpand(replacement.as_str()))
                .into_owned();
        }

        result.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Parse a spoken number ("five", "twenty-five", "twenty five", "12")
    pub fn parse_number(&self, text: &str) -> Option<u32> {
        let text_lower = text.trim().to_lowercase();

        if let Ok(num) = text_lower.parse::<u32>() {
            return Some(num);
        }

        if let Some(&num) = self.number_words.get(text_lower.as_str()) {
            return Some(num);
        }

        let parts: Vec<&str> = text_lower
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|p| !p.is_empty())
            .collect();
        if let [first, second] = parts.as_slice() {
            let a = *self.number_words.get(*first)?;
            let b = *self.number_words.get(*second)?;
            return match (a, b) {
                (1..=9, 100) => Some(a * 100),
                // "twenty five"; "twenty twenty" is not a number
                (20..=90, 1..=9) if a % 10 == 0 => Some(a + b),
                _ => None,
            };
        }

        None
    }

    /// Parse a money or distance amount: digits with optional thousands
    /// separators and decimals, or spoken number words.
    ///
    /// Falls back to the leading one or two words so "fifteen dollars" still
    /// yields 15 and "one hundred dollars" yields 100.
    pub fn parse_amount(&self, raw: &str) -> Option<f64> {
        let compact: String = raw
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();

        if is_decimal(&compact) {
            return compact.parse::<f64>().ok();
        }

        if let Some(num) = self.parse_number(raw) {
            return Some(f64::from(num));
        }

        let words: Vec<&str> = raw.split_whitespace().collect();
        (1..words.len().min(3))
            .rev()
            .find_map(|n| self.parse_amount(&words[..n].join(" ")))
    }
}

/// Digits with at most one decimal point.
fn is_decimal(s: &str) -> bool {
    let mut seen_dot = false;
    let mut seen_digit = false;
    for c in s.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}
