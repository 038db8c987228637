//! Signal extraction: message stream → intent and timing signal records.
//!
//! Every rule in both tables runs against every message; rules are
//! non-exclusive, so one message can yield several signals. The reference
//! time is injected by the caller, never read from the wall clock, which
//! keeps extraction reproducible.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::context::{days_since, Message};
use crate::signal::rules::{intent_rules, timing_rules, IntentKind, TimingKind};

/// Timing signals older than this are dropped entirely.
pub const TIMING_HORIZON_DAYS: i64 = 14;

/// An expressed goal (hiring, seeking, fundraising, ...) pulled from a
/// message, with a recency-weighted strength.
#[derive(Debug, Clone, Serialize)]
pub struct IntentSignal {
    pub kind: IntentKind,
    pub sender: String,
    /// First captured fragment of the matching rule, when it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Originating message text, truncated to 200 chars.
    pub full_text: String,
    pub timestamp: String,
    /// Days before the injected reference time; 999 when unparseable.
    pub days_since: i64,
    /// `raw_strength` after the recency multiplier.
    pub strength: f64,
    pub raw_strength: f64,
}

/// A time-sensitive event (travel, deadline, life change). Never older than
/// [`TIMING_HORIZON_DAYS`].
#[derive(Debug, Clone, Serialize)]
pub struct TimingSignal {
    pub kind: TimingKind,
    pub sender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub timestamp: String,
    pub days_since: i64,
    pub strength: f64,
}

/// Recency multiplier for intent signals. Boundaries are inclusive on the
/// lower side: day 7 is still "this week", day 30 still "this month".
pub fn intent_recency_multiplier(days: i64) -> f64 {
    if days <= 7 {
        3.0
    } else if days <= 30 {
        1.5
    } else {
        0.5
    }
}

/// Recency multiplier for timing signals that survived the horizon cut.
pub fn timing_recency_multiplier(days: i64) -> f64 {
    if days <= 7 {
        1.0
    } else {
        0.5
    }
}

/// Run the full intent rule table over every message.
pub fn extract_intents(messages: &[Message], now: DateTime<Utc>) -> Vec<IntentSignal> {
    let mut signals = Vec::new();
    for message in messages {
        let days = days_since(&message.timestamp, now);
        let multiplier = intent_recency_multiplier(days);
        for rule in intent_rules() {
            let Some(caps) = rule.pattern.captures(&message.text) else {
                continue;
            };
            let detail = caps.get(1).map(|m| clean_capture(m.as_str()));
            signals.push(IntentSignal {
                kind: rule.kind,
                sender: message.sender.clone(),
                detail,
                full_text: truncate_chars(&message.text, 200),
                timestamp: message.timestamp.clone(),
                days_since: days,
                strength: rule.base_strength * multiplier,
                raw_strength: rule.base_strength,
            });
        }
    }
    tracing::debug!(count = signals.len(), "intent signals extracted");
    signals
}

/// Run the full timing rule table over every message. Messages past the
/// 14-day horizon are skipped before matching.
pub fn extract_timings(messages: &[Message], now: DateTime<Utc>) -> Vec<TimingSignal> {
    let mut signals = Vec::new();
    for message in messages {
        let days = days_since(&message.timestamp, now);
        if days > TIMING_HORIZON_DAYS {
            continue;
        }
        let multiplier = timing_recency_multiplier(days);
        for rule in timing_rules() {
            let Some(caps) = rule.pattern.captures(&message.text) else {
                continue;
            };
            let captured = caps.get(1).map(|m| clean_capture(m.as_str()));
            let location = if rule.captures_location {
                captured.clone()
            } else {
                None
            };
            signals.push(TimingSignal {
                kind: rule.kind,
                sender: message.sender.clone(),
                location,
                detail: captured,
                timestamp: message.timestamp.clone(),
                days_since: days,
                strength: rule.base_strength * multiplier,
            });
        }
    }
    tracing::debug!(count = signals.len(), "timing signals extracted");
    signals
}

/// Trim whitespace and trailing punctuation off a captured fragment.
fn clean_capture(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(['.', '!', '?', ',', ':', ';'])
        .trim_end()
        .to_string()
}

/// Char-boundary-safe truncation.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap()
    }

    fn msg(sender: &str, text: &str, timestamp: &str) -> Message {
        Message {
            sender: sender.into(),
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }

    #[test]
    fn message_matching_no_rule_yields_no_signals() {
        let messages = vec![msg("Nina", "good morning all", "2026-08-26T09:00:00Z")];
        assert!(extract_intents(&messages, now()).is_empty());
        assert!(extract_timings(&messages, now()).is_empty());
    }

    #[test]
    fn one_message_can_match_several_rules() {
        // "looking for" (seeking) and "we're hiring" (hiring) both fire.
        let messages = vec![msg(
            "Nina",
            "We're hiring a designer and I'm also looking for a good accountant",
            "2026-08-26T09:00:00Z",
        )];
        let signals = extract_intents(&messages, now());
        assert_eq!(signals.len(), 2);
        let kinds: Vec<&str> = signals.iter().map(|s| s.kind.as_str()).collect();
        assert!(kinds.contains(&"seeking"));
        assert!(kinds.contains(&"hiring"));
    }

    #[test]
    fn recency_boundaries_are_inclusive() {
        assert_eq!(intent_recency_multiplier(7), 3.0);
        assert_eq!(intent_recency_multiplier(8), 1.5);
        assert_eq!(intent_recency_multiplier(30), 1.5);
        assert_eq!(intent_recency_multiplier(31), 0.5);
        assert_eq!(timing_recency_multiplier(7), 1.0);
        assert_eq!(timing_recency_multiplier(8), 0.5);
    }

    #[test]
    fn strength_applies_recency_and_keeps_raw() {
        let messages = vec![msg(
            "Nina",
            "Looking for a crypto advisor",
            "2026-08-25T09:00:00Z", // 2 days old
        )];
        let signals = extract_intents(&messages, now());
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].raw_strength, 2.0);
        assert_eq!(signals[0].strength, 6.0);
        assert_eq!(signals[0].detail.as_deref(), Some("crypto advisor"));
    }

    #[test]
    fn unparseable_timestamp_is_stale_not_fatal() {
        let messages = vec![msg("Nina", "Looking for a mentor", "who knows when")];
        let signals = extract_intents(&messages, now());
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].days_since, 999);
        assert_eq!(signals[0].strength, 2.0 * 0.5);
    }

    #[test]
    fn stale_timing_signals_are_dropped_entirely() {
        let messages = vec![
            msg("Nina", "flying to Bangkok tomorrow", "2026-08-10T09:00:00Z"), // 17 days
            msg("Omar", "flying to Bangkok tomorrow", "2026-08-26T09:00:00Z"), // 1 day
        ];
        let signals = extract_timings(&messages, now());
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].sender, "Omar");
        assert_eq!(signals[0].location.as_deref(), Some("Bangkok"));
        assert_eq!(signals[0].strength, 2.0);
    }

    #[test]
    fn timing_between_8_and_14_days_is_halved() {
        let messages = vec![msg(
            "Nina",
            "just landed in Lisbon",
            "2026-08-17T09:00:00Z", // 10 days
        )];
        let signals = extract_timings(&messages, now());
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].strength, 2.5 * 0.5);
    }

    #[test]
    fn full_text_is_capped_at_200_chars() {
        let long = format!("looking for a designer {}", "x".repeat(300));
        let messages = vec![msg("Nina", &long, "2026-08-26T09:00:00Z")];
        let signals = extract_intents(&messages, now());
        assert_eq!(signals[0].full_text.chars().count(), 200);
    }
}
