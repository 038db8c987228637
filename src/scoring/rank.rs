//! The recommendation ranker: one capped composite score per candidate.
//!
//! Five additive contributors — top intent signals, best timing signal,
//! warm-path bonus, fit total, and a recent-activity bump — rounded and
//! clamped to [0, 100], then filtered by the configured floor, sorted
//! (stable, so original candidate order breaks ties), and truncated.

use serde::Serialize;

use crate::config::ScanConfig;
use crate::context::{first_name_of, Profile, ScanContext};
use crate::graph::interaction::InteractionGraph;
use crate::scoring::fit::{score_fit, FitScore};
use crate::signal::extract::truncate_chars;

const INTENT_WEIGHT: f64 = 10.0;
const TIMING_WEIGHT: f64 = 15.0;
const TIMING_MATCH_BONUS: f64 = 25.0;
const DIRECT_PATH_BONUS: f64 = 20.0;
const BRIDGE_PATH_BONUS: f64 = 15.0;
const RECENT_ACTIVITY_BONUS: f64 = 5.0;
/// How many of a candidate's intent signals count toward the score.
const TOP_INTENTS: usize = 3;
/// "Sent a message recently" window, in days.
const ACTIVITY_WINDOW_DAYS: i64 = 30;

const DIRECT_STRENGTH_FLOOR: u32 = 30;
const BRIDGE_REQUESTER_FLOOR: u32 = 40;
const BRIDGE_TARGET_FLOOR: u32 = 30;

/// One scored signal shown to the user as evidence.
#[derive(Debug, Clone, Serialize)]
pub struct SignalNote {
    pub kind: String,
    pub description: String,
    pub strength: f64,
}

/// The best timing signal for a candidate, with the city-match marker.
#[derive(Debug, Clone, Serialize)]
pub struct TimingNote {
    pub kind: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub days_since: i64,
    /// True when the signal's location matches the requester's city.
    pub timing_match: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarmPathType {
    Direct,
    Bridge,
}

/// The best known relationship route to a target. For bridges, `strength`
/// is `min(requester↔bridge, bridge↔target)`.
#[derive(Debug, Clone, Serialize)]
pub struct WarmPath {
    #[serde(rename = "type")]
    pub path_type: WarmPathType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
    pub strength: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Urgent,
    High,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutreachMethod {
    DirectMessage,
    IntroRequest,
    ColdOutreach,
}

/// Generated next step: what to do, how, and a ready-to-send message.
#[derive(Debug, Clone, Serialize)]
pub struct Activation {
    pub action: String,
    pub method: OutreachMethod,
    pub message: String,
    pub urgency: Urgency,
}

/// A ranked, explainable recommendation for one person.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub person: String,
    /// Composite score, always in [0, 100].
    pub score: u32,
    pub signals: Vec<SignalNote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<TimingNote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warm_path: Option<WarmPath>,
    pub fit: FitScore,
    pub activation: Activation,
}

/// Score, filter, sort, and cap recommendations for one requester.
pub fn recommend(
    ctx: &ScanContext,
    requester: &Profile,
    candidates: &[Profile],
    config: &ScanConfig,
) -> Vec<Recommendation> {
    let reference_city = config
        .reference_city
        .clone()
        .or_else(|| requester.city.clone());

    let mut recommendations: Vec<Recommendation> = candidates
        .iter()
        .filter(|c| c.name != requester.name)
        .map(|candidate| score_candidate(ctx, requester, candidate, reference_city.as_deref()))
        .filter(|r| r.score >= config.min_score)
        .collect();

    // Stable sort: equal scores keep original candidate order.
    recommendations.sort_by_key(|r| std::cmp::Reverse(r.score));
    recommendations.truncate(config.max_results);
    tracing::info!(
        requester = %requester.name,
        candidates = candidates.len(),
        recommended = recommendations.len(),
        "recommendation pass complete"
    );
    recommendations
}

fn score_candidate(
    ctx: &ScanContext,
    requester: &Profile,
    candidate: &Profile,
    reference_city: Option<&str>,
) -> Recommendation {
    let mut points = 0.0;

    // (a) Top intent signals.
    let intents = ctx.intents_for(&candidate.name);
    let mut signals = Vec::new();
    for signal in intents.iter().take(TOP_INTENTS) {
        points += signal.strength * INTENT_WEIGHT;
        signals.push(SignalNote {
            kind: signal.kind.as_str().to_string(),
            description: signal
                .detail
                .clone()
                .unwrap_or_else(|| truncate_chars(&signal.full_text, 80)),
            strength: signal.strength,
        });
    }

    // (b) Best timing signal, with the same-city bonus.
    let timing = ctx.timings_for(&candidate.name).first().map(|best| {
        points += best.strength * TIMING_WEIGHT;
        let timing_match = match (reference_city, &best.location) {
            (Some(city), Some(location)) => normalize_city(location) == normalize_city(city),
            _ => false,
        };
        if timing_match {
            points += TIMING_MATCH_BONUS;
        }
        TimingNote {
            kind: best.kind.as_str().to_string(),
            description: best
                .detail
                .clone()
                .unwrap_or_else(|| best.kind.as_str().to_string()),
            location: best.location.clone(),
            days_since: best.days_since,
            timing_match,
        }
    });

    // (c) Warm path: direct beats bridge, first path wins.
    let warm_path = build_warm_paths(&ctx.interactions, &requester.name, &candidate.name)
        .into_iter()
        .next();
    match warm_path.as_ref().map(|p| p.path_type) {
        Some(WarmPathType::Direct) => points += DIRECT_PATH_BONUS,
        Some(WarmPathType::Bridge) => points += BRIDGE_PATH_BONUS,
        None => {}
    }

    // (d) Fit total, verbatim.
    let fit = score_fit(requester, candidate, &intents);
    points += fit.score;

    // (e) Still active in the group?
    if ctx.active_within(&candidate.name, ACTIVITY_WINDOW_DAYS) {
        points += RECENT_ACTIVITY_BONUS;
    }

    let score = points.round().clamp(0.0, 100.0) as u32;
    let activation = build_activation(candidate, &signals, timing.as_ref(), warm_path.as_ref(), &fit);

    Recommendation {
        person: candidate.name.clone(),
        score,
        signals,
        timing,
        warm_path,
        fit,
        activation,
    }
}

/// Resolve warm paths between two people: a direct edge when strong enough,
/// then bridge paths through the requester's strong connections, best first.
pub fn build_warm_paths(
    interactions: &InteractionGraph,
    requester: &str,
    target: &str,
) -> Vec<WarmPath> {
    let mut paths = Vec::new();

    let direct = interactions.strength_between(requester, target);
    if direct >= DIRECT_STRENGTH_FLOOR {
        paths.push(WarmPath {
            path_type: WarmPathType::Direct,
            via: None,
            strength: direct,
        });
    }

    let mut bridges = Vec::new();
    for edge in interactions.connections_of(requester) {
        if edge.strength < BRIDGE_REQUESTER_FLOOR {
            continue;
        }
        let Some(third) = edge.other(requester) else { continue };
        if third == target {
            continue;
        }
        let to_target = interactions.strength_between(third, target);
        if to_target >= BRIDGE_TARGET_FLOOR {
            bridges.push(WarmPath {
                path_type: WarmPathType::Bridge,
                via: Some(third.to_string()),
                strength: edge.strength.min(to_target),
            });
        }
    }
    bridges.sort_by_key(|p| std::cmp::Reverse(p.strength));
    paths.extend(bridges);
    paths
}

/// Normalize a city name through the alias table, then lowercase.
pub fn normalize_city(city: &str) -> String {
    let lowered = city.trim().to_lowercase();
    match lowered.as_str() {
        "sf" => "san francisco".to_string(),
        "nyc" | "ny" => "new york".to_string(),
        "bkk" => "bangkok".to_string(),
        "la" => "los angeles".to_string(),
        _ => lowered,
    }
}

fn build_activation(
    candidate: &Profile,
    signals: &[SignalNote],
    timing: Option<&TimingNote>,
    warm_path: Option<&WarmPath>,
    fit: &FitScore,
) -> Activation {
    let first = first_name_of(&candidate.name);

    let urgency = match timing {
        Some(t) if t.timing_match => Urgency::Urgent,
        Some(t) if t.days_since <= 7 => Urgency::High,
        _ => Urgency::Normal,
    };

    // Most compelling reason: an unmet need we cover, else their top intent,
    // else a generic opener.
    let reason = if let Some(need) = fit.you_can_help.first() {
        format!("I saw you're looking for {need} — I can help with that")
    } else if let Some(top) = signals.first() {
        format!("saw your note about {}", top.description)
    } else {
        "we're in the same group and I think we'd have a lot to talk about".to_string()
    };

    match warm_path {
        Some(path) if path.path_type == WarmPathType::Direct => Activation {
            action: format!("Message {first} directly"),
            method: OutreachMethod::DirectMessage,
            message: format!("Hey {first} — {reason}. Worth a quick chat?"),
            urgency,
        },
        Some(path) => {
            let via = path.via.as_deref().unwrap_or("someone you both know");
            let via_first = first_name_of(via);
            Activation {
                action: format!("Ask {via_first} for an intro to {first}"),
                method: OutreachMethod::IntroRequest,
                message: format!(
                    "Hey {via_first}, could you introduce me to {first}? {reason}."
                ),
                urgency,
            }
        }
        None => Activation {
            action: format!("Reach out to {first} cold"),
            method: OutreachMethod::ColdOutreach,
            message: format!("Hi {first} — {reason}."),
            urgency,
        },
    }
}
