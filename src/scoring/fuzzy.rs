//! The shared fuzzy-match rule.
//!
//! Two strings match when either contains the other as a substring, or when
//! their Levenshtein distance is at most 30% of the shorter string's length.
//! Every fuzzy call site in the engine — fit scoring, interest overlap,
//! industry comparison, help-topic pairing — goes through this one function
//! so the behavior never drifts between components.

/// Fraction of the shorter string's length the edit distance may reach.
const DISTANCE_RATIO: f64 = 0.3;

/// Case-insensitive substring-or-bounded-edit-distance equivalence.
pub fn fuzzy_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a.contains(&b) || b.contains(&a) {
        return true;
    }
    let shorter = a.chars().count().min(b.chars().count());
    let distance = strsim::levenshtein(&a, &b);
    distance as f64 <= shorter as f64 * DISTANCE_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_matches_either_direction() {
        assert!(fuzzy_match("product", "product strategy"));
        assert!(fuzzy_match("product strategy", "product"));
    }

    #[test]
    fn close_edits_match_within_the_ratio() {
        // distance 1 <= 0.3 * 6 = 1.8
        assert!(fuzzy_match("kitten", "sitten"));
    }

    #[test]
    fn distant_strings_do_not_match() {
        assert!(!fuzzy_match("ai", "crypto"));
        assert!(!fuzzy_match("design", "finance"));
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        assert!(fuzzy_match("  Fintech ", "fintech"));
    }

    #[test]
    fn empty_strings_never_match() {
        assert!(!fuzzy_match("", "anything"));
        assert!(!fuzzy_match("", ""));
    }
}
