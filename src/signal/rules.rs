//! Ordered extraction rule tables.
//!
//! Each rule is a `(pattern, kind, base strength)` triple. The tables are
//! data, not logic: extraction runs *every* rule against every message, so a
//! single message can produce several signals of several kinds. Keeping the
//! tables here makes the rule inventory auditable and testable in isolation
//! from the scoring code.
//!
//! Pattern conventions: cue phrases are wrapped in `(?i:...)` so that
//! captures meant to grab proper nouns (places, people) can still rely on
//! capitalization. A rule's first capture group, when present, becomes the
//! signal's `detail`.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Categories of expressed intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Seeking,
    Asking,
    Hiring,
    JobSeeking,
    Fundraising,
    Offering,
    SeekingIntro,
    OfferingIntro,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seeking => "seeking",
            Self::Asking => "asking",
            Self::Hiring => "hiring",
            Self::JobSeeking => "job_seeking",
            Self::Fundraising => "fundraising",
            Self::Offering => "offering",
            Self::SeekingIntro => "seeking_intro",
            Self::OfferingIntro => "offering_intro",
        }
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories of time-sensitive events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingKind {
    TravelFuture,
    TravelCurrent,
    Event,
    Deadline,
    LifeChange,
}

impl TimingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TravelFuture => "travel_future",
            Self::TravelCurrent => "travel_current",
            Self::Event => "event",
            Self::Deadline => "deadline",
            Self::LifeChange => "life_change",
        }
    }
}

impl std::fmt::Display for TimingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compiled intent rule.
pub struct IntentRule {
    pub kind: IntentKind,
    pub pattern: Regex,
    pub base_strength: f64,
}

/// One compiled timing rule. `captures_location` marks travel rules whose
/// capture group is a place name rather than a generic detail.
pub struct TimingRule {
    pub kind: TimingKind,
    pub pattern: Regex,
    pub base_strength: f64,
    pub captures_location: bool,
}

// Capture fragment for free-form targets ("a crypto advisor", "senior
// backend engineer"). Bounded so a run-on message cannot swallow a paragraph.
const FRAGMENT: &str = r"([\w][\w' -]{2,40})";
// Capture fragment for proper nouns — capitalization intact because the cue
// phrase carries the (?i:) flag, not the whole pattern.
const PLACE: &str = r"([A-Z][a-zA-Z]+(?: [A-Z][a-zA-Z]+)*)";

/// The ordered intent rule table.
pub fn intent_rules() -> &'static [IntentRule] {
    static RULES: OnceLock<Vec<IntentRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let rule = |kind, pat: String, base_strength| IntentRule {
            kind,
            pattern: Regex::new(&pat).expect("intent rule pattern must compile"),
            base_strength,
        };
        vec![
            rule(
                IntentKind::Seeking,
                format!(r"(?i:looking for (?:a |an |some )?){FRAGMENT}"),
                2.0,
            ),
            rule(
                IntentKind::Seeking,
                format!(r"(?i:in the market for (?:a |an )?){FRAGMENT}"),
                2.0,
            ),
            rule(
                IntentKind::Asking,
                format!(r"(?i:any(?:one|body) (?:know|have|recommend|tried) ?){FRAGMENT}?"),
                1.0,
            ),
            rule(
                IntentKind::Hiring,
                format!(r"(?i:(?:we'?re|we are|i'?m|i am) hiring(?: a| an| for)? ?){FRAGMENT}?"),
                3.0,
            ),
            rule(
                IntentKind::Hiring,
                format!(r"(?i:looking to hire (?:a |an )?){FRAGMENT}"),
                3.0,
            ),
            rule(
                IntentKind::JobSeeking,
                r"(?i)(?:i'?m|i am) (?:looking for (?:a new |a )?(?:job|role|gig|position)|on the job market|job hunting)".to_string(),
                2.5,
            ),
            rule(
                IntentKind::JobSeeking,
                r"(?i)open to (?:new )?(?:roles|opportunities)".to_string(),
                2.5,
            ),
            rule(
                IntentKind::Fundraising,
                r"(?i)(?:we'?re|we are|i'?m|i am) (?:raising|fundraising)(?: a| our)? ?((?:pre-)?seed|series [a-d]|round)?".to_string(),
                3.0,
            ),
            rule(
                IntentKind::Offering,
                format!(r"(?i:happy to (?:help|share|offer)(?: with| on)? ?){FRAGMENT}?"),
                1.5,
            ),
            rule(
                IntentKind::Offering,
                format!(r"(?i:(?:i can offer|i'?m offering) ){FRAGMENT}"),
                1.5,
            ),
            rule(
                IntentKind::SeekingIntro,
                format!(r"(?i:(?:can|could) (?:anyone|someone|you) intro(?:duce)? me to ){FRAGMENT}"),
                2.5,
            ),
            rule(
                IntentKind::SeekingIntro,
                format!(r"(?i:looking for an intro(?:duction)? to ){FRAGMENT}"),
                2.5,
            ),
            rule(
                IntentKind::OfferingIntro,
                format!(r"(?i:happy to (?:intro(?:duce)?|connect) (?:you|anyone)(?: to| with)? ?){FRAGMENT}?"),
                1.5,
            ),
        ]
    })
}

/// The ordered timing rule table.
pub fn timing_rules() -> &'static [TimingRule] {
    static RULES: OnceLock<Vec<TimingRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let rule = |kind, pat: String, base_strength, captures_location| TimingRule {
            kind,
            pattern: Regex::new(&pat).expect("timing rule pattern must compile"),
            base_strength,
            captures_location,
        };
        vec![
            rule(
                TimingKind::TravelFuture,
                format!(r"(?i:(?:flying|heading|going|travell?ing) to ){PLACE}"),
                2.0,
                true,
            ),
            rule(
                TimingKind::TravelCurrent,
                format!(r"(?i:(?:just landed|currently|right now) in ){PLACE}"),
                2.5,
                true,
            ),
            rule(
                TimingKind::TravelCurrent,
                format!(r"(?i:i'?m in ){PLACE}(?i: (?:this week|until|through|for))"),
                2.5,
                true,
            ),
            rule(
                TimingKind::Event,
                format!(r"(?i:(?:hosting|organizing|organising) (?:a |an )?){FRAGMENT}"),
                1.5,
                false,
            ),
            rule(
                TimingKind::Event,
                r"(?i)(demo day|meetup|conference|hackathon|happy hour)".to_string(),
                1.5,
                false,
            ),
            rule(
                TimingKind::Deadline,
                format!(r"(?i:deadline (?:is |on )?){FRAGMENT}?"),
                2.0,
                false,
            ),
            rule(
                TimingKind::Deadline,
                r"(?i)need(?:ed)? (?:it )?by (tomorrow|monday|friday|end of (?:the )?(?:week|month))".to_string(),
                2.0,
                false,
            ),
            rule(
                TimingKind::LifeChange,
                format!(r"(?i:(?:just )?(?:started|joined) (?:a new job )?at ){PLACE}"),
                1.5,
                false,
            ),
            rule(
                TimingKind::LifeChange,
                format!(r"(?i:(?:just )?moved to ){PLACE}"),
                1.5,
                false,
            ),
            rule(
                TimingKind::LifeChange,
                r"(?i)(?:quit|left) my job".to_string(),
                1.5,
                false,
            ),
        ]
    })
}
