//! Input records and the shared scan context.
//!
//! Defines the boundary types the engine consumes — [`Message`], [`Member`],
//! [`Profile`] — plus lenient timestamp handling and [`ScanContext`], the
//! typed bundle of everything derived from one transcript. The bundle is
//! assembled once per scan and passed by reference to scoring and ranking,
//! so every component sees the same read-only view.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::graph::entity::EntityGraph;
use crate::graph::interaction::InteractionGraph;
use crate::signal::extract::{IntentSignal, TimingSignal};

/// `days_since` value for messages whose timestamp could not be parsed.
/// Maximally stale rather than an error.
pub const STALE_DAYS: i64 = 999;

/// A single chat message, created once at ingestion and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub text: String,
    /// Lenient format — parsed on demand, never a hard failure.
    pub timestamp: String,
}

/// A group member from the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(default)]
    pub message_count: u32,
    #[serde(default)]
    pub first_seen: Option<String>,
    #[serde(default)]
    pub last_seen: Option<String>,
}

/// An interest entry — either a bare string or a themed group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Interest {
    Plain(String),
    Themed {
        category: String,
        #[serde(default)]
        keywords: Vec<String>,
    },
}

impl Interest {
    /// Flatten to lowercase terms: a plain interest yields itself, a themed
    /// one yields its category plus every keyword.
    pub fn terms(&self) -> Vec<String> {
        match self {
            Self::Plain(s) => vec![s.to_lowercase()],
            Self::Themed { category, keywords } => {
                let mut terms = vec![category.to_lowercase()];
                terms.extend(keywords.iter().map(|k| k.to_lowercase()));
                terms
            }
        }
    }
}

/// A person's profile. Every field except `name` is optional at the
/// boundary — absent fields are empty, not errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub interests: Vec<Interest>,
    #[serde(default)]
    pub offering: Vec<String>,
    #[serde(default)]
    pub looking_for: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

impl Profile {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            interests: Vec::new(),
            offering: Vec::new(),
            looking_for: Vec::new(),
            city: None,
            industry: None,
        }
    }

    /// First name, used by mention scanning and outreach templates.
    pub fn first_name(&self) -> &str {
        first_name_of(&self.name)
    }
}

/// First whitespace-separated token of a display name.
pub fn first_name_of(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}

/// Parse a timestamp leniently: RFC 3339 first, then a handful of common
/// export formats. Returns `None` rather than an error on anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%m/%d/%Y %H:%M",
        "%m/%d/%y, %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Whole days between a raw timestamp and the injected reference time.
/// Unparseable timestamps are maximally stale ([`STALE_DAYS`]).
pub fn days_since(raw: &str, now: DateTime<Utc>) -> i64 {
    match parse_timestamp(raw) {
        Some(ts) => (now - ts).num_days(),
        None => STALE_DAYS,
    }
}

/// The shared, read-only signal bundle for one scan: the transcript plus
/// everything derived from it. Assembled once, then treated as immutable —
/// per-candidate scoring only ever borrows it.
#[derive(Debug)]
pub struct ScanContext {
    /// Injected reference time — never read from the wall clock inside
    /// extraction or scoring, so identical inputs give identical output.
    pub now: DateTime<Utc>,
    pub messages: Vec<Message>,
    pub members: Vec<Member>,
    pub intents: Vec<IntentSignal>,
    pub timings: Vec<TimingSignal>,
    pub interactions: InteractionGraph,
    pub entities: EntityGraph,
}

impl ScanContext {
    /// Run extraction and both graph builders over a transcript.
    pub fn assemble(messages: Vec<Message>, members: Vec<Member>, now: DateTime<Utc>) -> Self {
        let intents = crate::signal::extract::extract_intents(&messages, now);
        let timings = crate::signal::extract::extract_timings(&messages, now);
        let interactions = InteractionGraph::build(&messages, &members);
        let entities = EntityGraph::from_messages(&messages);
        tracing::debug!(
            messages = messages.len(),
            intents = intents.len(),
            timings = timings.len(),
            relationships = interactions.edges().len(),
            "scan context assembled"
        );
        Self {
            now,
            messages,
            members,
            intents,
            timings,
            interactions,
            entities,
        }
    }

    /// Intent signals sent by one person, strongest first.
    pub fn intents_for(&self, person: &str) -> Vec<&IntentSignal> {
        let mut found: Vec<&IntentSignal> = self
            .intents
            .iter()
            .filter(|s| s.sender == person)
            .collect();
        found.sort_by(|a, b| b.strength.total_cmp(&a.strength));
        found
    }

    /// Timing signals sent by one person, strongest first.
    pub fn timings_for(&self, person: &str) -> Vec<&TimingSignal> {
        let mut found: Vec<&TimingSignal> = self
            .timings
            .iter()
            .filter(|s| s.sender == person)
            .collect();
        found.sort_by(|a, b| b.strength.total_cmp(&a.strength));
        found
    }

    /// True if this person sent any message within the last `days` days.
    pub fn active_within(&self, person: &str, days: i64) -> bool {
        self.messages
            .iter()
            .filter(|m| m.sender == person)
            .any(|m| days_since(&m.timestamp, self.now) <= days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339_and_common_formats() {
        assert!(parse_timestamp("2026-08-20T10:00:00Z").is_some());
        assert!(parse_timestamp("2026-08-20 10:00:00").is_some());
        assert!(parse_timestamp("2026-08-20").is_some());
        assert!(parse_timestamp("8/20/2026 10:00").is_some());
    }

    #[test]
    fn garbage_timestamp_is_stale_not_an_error() {
        let now = Utc.with_ymd_and_hms(2026, 8, 27, 0, 0, 0).unwrap();
        assert_eq!(days_since("yesterday-ish", now), STALE_DAYS);
        assert_eq!(days_since("", now), STALE_DAYS);
    }

    #[test]
    fn days_since_counts_whole_days() {
        let now = Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap();
        assert_eq!(days_since("2026-08-25T12:00:00Z", now), 2);
        assert_eq!(days_since("2026-08-27T11:00:00Z", now), 0);
    }

    #[test]
    fn interest_terms_flatten_themed_shape() {
        let themed = Interest::Themed {
            category: "Crypto".into(),
            keywords: vec!["DeFi".into(), "Bitcoin".into()],
        };
        assert_eq!(themed.terms(), vec!["crypto", "defi", "bitcoin"]);
        assert_eq!(Interest::Plain("Hiking".into()).terms(), vec!["hiking"]);
    }
}
