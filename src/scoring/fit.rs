//! Pairwise profile compatibility ("fit") scoring.
//!
//! Four summed, uncapped contributions: complementary need/offer matches in
//! both directions (+15 each), a flat shared-interest bonus (+10), and a
//! same-industry bonus (+8). The composite cap is the ranker's job, not
//! ours — callers get the raw total plus human-readable reasons.

use serde::Serialize;

use crate::context::Profile;
use crate::scoring::fuzzy::fuzzy_match;
use crate::signal::extract::IntentSignal;
use crate::signal::rules::IntentKind;

const NEED_OFFER_POINTS: f64 = 15.0;
const SHARED_INTEREST_POINTS: f64 = 10.0;
const SAME_INDUSTRY_POINTS: f64 = 8.0;
/// Minimum shared interests before the flat bonus applies.
const SHARED_INTEREST_FLOOR: usize = 2;

/// Compatibility between two profiles, with the evidence behind it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FitScore {
    pub score: f64,
    pub reasons: Vec<String>,
    /// Their needs you can cover.
    pub you_can_help: Vec<String>,
    /// Their offers covering your needs.
    pub they_can_help: Vec<String>,
}

/// Score requester↔candidate fit. `candidate_intents` augments the
/// candidate's declared needs and offers with what they actually asked for
/// in chat.
pub fn score_fit(
    requester: &Profile,
    candidate: &Profile,
    candidate_intents: &[&IntentSignal],
) -> FitScore {
    let mut fit = FitScore::default();

    // Needs the candidate declared plus needs inferred from their intents.
    let mut candidate_needs: Vec<String> = candidate.looking_for.clone();
    let mut candidate_offers: Vec<String> = candidate.offering.clone();
    for signal in candidate_intents {
        let Some(detail) = &signal.detail else { continue };
        match signal.kind {
            IntentKind::Seeking
            | IntentKind::Hiring
            | IntentKind::JobSeeking
            | IntentKind::Fundraising => candidate_needs.push(detail.clone()),
            IntentKind::Offering | IntentKind::OfferingIntro => {
                candidate_offers.push(detail.clone())
            }
            IntentKind::Asking | IntentKind::SeekingIntro => {}
        }
    }

    // You → them: your offerings against their needs.
    for offer in &requester.offering {
        for need in &candidate_needs {
            if complementary(offer, need) {
                fit.score += NEED_OFFER_POINTS;
                fit.reasons
                    .push(format!("Your \"{offer}\" matches their need: \"{need}\""));
                if !fit.you_can_help.contains(need) {
                    fit.you_can_help.push(need.clone());
                }
            }
        }
    }

    // Them → you: their offerings against your needs.
    for offer in &candidate_offers {
        for need in &requester.looking_for {
            if complementary(offer, need) {
                fit.score += NEED_OFFER_POINTS;
                fit.reasons
                    .push(format!("Their \"{offer}\" matches your ask: \"{need}\""));
                if !fit.they_can_help.contains(offer) {
                    fit.they_can_help.push(offer.clone());
                }
            }
        }
    }

    // Shared interests: flat bonus once the fuzzy intersection reaches the
    // floor, not per item.
    let shared = shared_interests(requester, candidate);
    if shared.len() >= SHARED_INTEREST_FLOOR {
        fit.score += SHARED_INTEREST_POINTS;
        let top: Vec<&str> = shared.iter().take(3).map(String::as_str).collect();
        fit.reasons
            .push(format!("Shared interests: {}", top.join(", ")));
    }

    // Same industry.
    if let (Some(yours), Some(theirs)) = (&requester.industry, &candidate.industry) {
        if fuzzy_match(yours, theirs) {
            fit.score += SAME_INDUSTRY_POINTS;
            fit.reasons.push(format!("Same industry: {theirs}"));
        }
    }

    fit
}

/// The complementary-word-overlap rule: any word longer than 3 characters
/// in one phrase is a substring of, or contains, any such word in the other.
pub fn complementary(a: &str, b: &str) -> bool {
    let words_a = long_words(a);
    let words_b = long_words(b);
    words_a
        .iter()
        .any(|wa| words_b.iter().any(|wb| wa.contains(wb.as_str()) || wb.contains(wa.as_str())))
}

fn long_words(phrase: &str) -> Vec<String> {
    phrase
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 3)
        .map(str::to_string)
        .collect()
}

/// Requester interest terms with a fuzzy counterpart on the candidate side,
/// deduplicated, requester order.
fn shared_interests(requester: &Profile, candidate: &Profile) -> Vec<String> {
    let theirs: Vec<String> = candidate.interests.iter().flat_map(|i| i.terms()).collect();
    let mut shared = Vec::new();
    for term in requester.interests.iter().flat_map(|i| i.terms()) {
        if shared.contains(&term) {
            continue;
        }
        if theirs.iter().any(|t| fuzzy_match(&term, t)) {
            shared.push(term);
        }
    }
    shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Interest;

    fn profile(name: &str) -> Profile {
        Profile::new(name)
    }

    #[test]
    fn complementary_shares_a_long_word() {
        assert!(complementary("crypto knowledge", "crypto advisor"));
        assert!(complementary("fundraising help", "fundraise")); // substring overlap
        assert!(!complementary("ai tips", "cooking lessons"));
        // Words of 3 or fewer chars never count.
        assert!(!complementary("ai ml", "ml ai"));
    }

    #[test]
    fn offering_matching_a_need_scores_fifteen() {
        let mut requester = profile("You");
        requester.offering = vec!["crypto knowledge".into()];
        let mut candidate = profile("Alice");
        candidate.looking_for = vec!["crypto advisor".into()];

        let fit = score_fit(&requester, &candidate, &[]);
        assert_eq!(fit.score, 15.0);
        assert_eq!(fit.you_can_help, vec!["crypto advisor"]);
        assert!(fit.reasons[0].contains("crypto knowledge"));
        assert!(fit.reasons[0].contains("crypto advisor"));
    }

    #[test]
    fn intent_signals_count_as_needs() {
        let mut requester = profile("You");
        requester.offering = vec!["crypto knowledge".into()];
        let candidate = profile("Alice");
        let signal = IntentSignal {
            kind: IntentKind::Seeking,
            sender: "Alice".into(),
            detail: Some("crypto advisor".into()),
            full_text: "Looking for a crypto advisor".into(),
            timestamp: "2026-08-25T09:00:00Z".into(),
            days_since: 2,
            strength: 6.0,
            raw_strength: 2.0,
        };

        let fit = score_fit(&requester, &candidate, &[&signal]);
        assert_eq!(fit.score, 15.0);
        assert!(fit.reasons[0].contains("crypto"));
    }

    #[test]
    fn both_directions_accumulate() {
        let mut requester = profile("You");
        requester.offering = vec!["design feedback".into()];
        requester.looking_for = vec!["legal advice".into()];
        let mut candidate = profile("Alice");
        candidate.looking_for = vec!["design review".into()];
        candidate.offering = vec!["startup legal advice".into()];

        let fit = score_fit(&requester, &candidate, &[]);
        assert_eq!(fit.score, 30.0);
        assert_eq!(fit.they_can_help, vec!["startup legal advice"]);
    }

    #[test]
    fn shared_interest_bonus_is_flat_and_needs_two() {
        let mut requester = profile("You");
        let mut candidate = profile("Alice");
        requester.interests = vec![Interest::Plain("climbing".into())];
        candidate.interests = vec![Interest::Plain("climbing".into())];
        // One shared interest: no bonus.
        assert_eq!(score_fit(&requester, &candidate, &[]).score, 0.0);

        requester.interests.push(Interest::Plain("jazz".into()));
        candidate.interests.push(Interest::Themed {
            category: "music".into(),
            keywords: vec!["jazz".into(), "vinyl".into()],
        });
        let fit = score_fit(&requester, &candidate, &[]);
        // Two shared (climbing, jazz): flat +10, not +20.
        assert_eq!(fit.score, 10.0);
        assert!(fit.reasons[0].starts_with("Shared interests:"));
    }

    #[test]
    fn industry_bonus_requires_both_sides() {
        let mut requester = profile("You");
        let mut candidate = profile("Alice");
        requester.industry = Some("Fintech".into());
        assert_eq!(score_fit(&requester, &candidate, &[]).score, 0.0);

        candidate.industry = Some("fintech".into());
        assert_eq!(score_fit(&requester, &candidate, &[]).score, 8.0);
    }

    #[test]
    fn empty_profiles_score_zero_without_error() {
        let fit = score_fit(&profile("You"), &profile("Alice"), &[]);
        assert_eq!(fit.score, 0.0);
        assert!(fit.reasons.is_empty());
    }
}
