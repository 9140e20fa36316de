//! Fuzzy matching utilities
//!
//! Resolves free-text tokens from a transcript to canonical entries of a
//! reference list (known services, types, places, addresses).

use strsim::normalized_levenshtein;

/// Shortest normalized label allowed to take part in a containment match.
const MIN_CONTAINMENT_LEN: usize = 3;

/// Default similarity cutoff for the edit-distance pass.
pub const DEFAULT_CUTOFF: f64 = 0.8;

/// Result of a fuzzy match with the matched value and score
#[derive(Debug, Clone)]
pub struct FuzzyMatch {
    pub value: String,
    pub score: f64,
}

/// Resolves a raw token to one of `candidates`, or `None` when nothing fits.
///
/// Implementations must not panic; "no reasonable match" is `None`.
pub trait CandidateMatcher {
    fn find_best_match(&self, input: &str, candidates: &[String]) -> Option<String>;
}

impl<F> CandidateMatcher for F
where
    F: Fn(&str, &[String]) -> Option<String>,
{
    fn find_best_match(&self, input: &str, candidates: &[String]) -> Option<String> {
        self(input, candidates)
    }
}

/// Default resolver: normalized exact match, then containment, then edit distance.
#[derive(Debug, Clone)]
pub struct FuzzyResolver {
    cutoff: f64,
}

impl Default for FuzzyResolver {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOFF)
    }
}

impl FuzzyResolver {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }
}

impl CandidateMatcher for FuzzyResolver {
    fn find_best_match(&self, input: &str, candidates: &[String]) -> Option<String> {
        let needle = strip_articles(&normalize_label(input));
        if needle.is_empty() || candidates.is_empty() {
            return None;
        }

        // 1. Exact match on normalized labels
        if let Some(found) = candidates
            .iter()
            .find(|c| strip_articles(&normalize_label(c)) == needle)
        {
            return Some(found.clone());
        }

        // 2. One contains the other
        let found = candidates.iter().find(|c| {
            let label = strip_articles(&normalize_label(c));
            let shorter = label.len().min(needle.len());
            shorter >= MIN_CONTAINMENT_LEN && (label.contains(&needle) || needle.contains(&label))
        });
        if let Some(found) = found {
            return Some(found.clone());
        }

        // 3. Edit distance
        find_best_match(&needle, candidates, self.cutoff).map(|m| m.value)
    }
}

/// Normalize a label for comparison: lowercase, drop apostrophes and
/// punctuation, collapse whitespace.
pub fn normalize_label(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | '`'))
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip common articles for better matching
pub fn strip_articles(text: &str) -> String {
    let lower = text.to_lowercase();
    let articles = ["the ", "a ", "an "];

    for article in articles {
        if lower.starts_with(article) {
            return text[article.len()..].to_string();
        }
    }
    text.to_string()
}

/// Find matches in a list of candidates
///
/// Returns up to `n` matches with scores above `cutoff`, best first.
pub fn find_matches(
    search_term: &str,
    candidates: &[String],
    n: usize,
    cutoff: f64,
) -> Vec<FuzzyMatch> {
    let search_lower = normalize_label(search_term);

    let mut matches: Vec<FuzzyMatch> = candidates
        .iter()
        .filter_map(|candidate| {
            let score = normalized_levenshtein(&search_lower, &normalize_label(candidate));
            (score >= cutoff).then(|| FuzzyMatch {
                value: candidate.clone(),
                score,
            })
        })
        .collect();

    // Stable sort keeps list order between equal scores
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    matches.truncate(n);
    matches
}

/// Find the best match above a minimum score
///
/// Returns None if no match meets the cutoff
pub fn find_best_match(
    search_term: &str,
    candidates: &[String],
    cutoff: f64,
) -> Option<FuzzyMatch> {
    find_matches(search_term, candidates, 1, cutoff)
        .into_iter()
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("McDonald's"), "mcdonalds");
        assert_eq!(normalize_label("  Uber   Eats "), "uber eats");
        assert_eq!(normalize_label("7-Eleven"), "7 eleven");
    }

    #[test]
    fn test_exact_match_ignores_apostrophes() {
        let resolver = FuzzyResolver::default();
        let places = list(&["McDonald's", "Starbucks"]);
        assert_eq!(
            resolver.find_best_match("mcdonalds", &places).as_deref(),
            Some("McDonald's")
        );
    }

    #[test]
    fn test_containment_match() {
        let resolver = FuzzyResolver::default();
        let places = list(&["Walmart Supercenter", "Target"]);
        assert_eq!(
            resolver.find_best_match("walmart", &places).as_deref(),
            Some("Walmart Supercenter")
        );
        assert_eq!(
            resolver.find_best_match("the target on main", &places).as_deref(),
            Some("Target")
        );
    }

    #[test]
    fn test_edit_distance_match() {
        let resolver = FuzzyResolver::default();
        let services = list(&["DoorDash", "Uber Eats", "Instacart"]);
        assert_eq!(
            resolver.find_best_match("door dash", &services).as_deref(),
            Some("DoorDash")
        );
        assert_eq!(
            resolver.find_best_match("instakart", &services).as_deref(),
            Some("Instacart")
        );
    }

    #[test]
    fn test_no_match() {
        let resolver = FuzzyResolver::default();
        let services = list(&["DoorDash", "Uber Eats"]);
        assert!(resolver.find_best_match("grubhub", &services).is_none());
        assert!(resolver.find_best_match("", &services).is_none());
        assert!(resolver.find_best_match("doordash", &[]).is_none());
    }

    #[test]
    fn test_short_labels_do_not_contain_match() {
        let resolver = FuzzyResolver::default();
        let types = list(&["Go"]);
        assert!(resolver.find_best_match("going home", &types).is_none());
    }

    #[test]
    fn test_closure_is_a_matcher() {
        let first = |_: &str, candidates: &[String]| candidates.first().cloned();
        let types = list(&["Pickup"]);
        assert_eq!(first.find_best_match("x", &types).as_deref(), Some("Pickup"));
    }

    #[test]
    fn test_find_matches_ranks_by_score() {
        let candidates = list(&["Lyft", "Uber", "Uber Eats"]);
        let matches = find_matches("uber", &candidates, 5, 0.4);
        assert!(!matches.is_empty());
        assert_eq!(matches[0].value, "Uber");
        assert!(matches[0].score >= 0.99);
    }

    #[test]
    fn test_resolver_cutoff_guardrails() {
        let types = list(&["Pickup", "Delivery", "Ride"]);
        let resolver = FuzzyResolver::default();
        assert_eq!(resolver.find_best_match("delivry", &types).as_deref(), Some("Delivery"));
        assert!(resolver.find_best_match("shop", &types).is_none());
        assert!(FuzzyResolver::new(1.0).find_best_match("delivry", &types).is_none());
    }
}
