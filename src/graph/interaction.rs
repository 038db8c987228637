//! The weighted interaction graph: who actually talks to whom.
//!
//! Built from two observations over one transcript: *replies* (consecutive
//! messages where the sender changes) and *mentions* (a member's first name
//! appearing in someone else's message). Edges are unordered pairs; strength
//! is derived, never stored raw.

use serde::Serialize;
use std::collections::HashMap;

use crate::context::{first_name_of, Member, Message};

/// Replies needed before a relationship counts as two-way.
const BIDIRECTIONAL_REPLIES: u32 = 2;

/// Qualitative strength bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipLabel {
    Weak,
    Moderate,
    Strong,
}

impl RelationshipLabel {
    pub fn from_strength(strength: u32) -> Self {
        if strength >= 50 {
            Self::Strong
        } else if strength >= 25 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }
}

/// One unordered relationship edge with its derived strength.
#[derive(Debug, Clone, Serialize)]
pub struct RelationshipEdge {
    pub person_a: String,
    pub person_b: String,
    pub replies: u32,
    pub mentions: u32,
    /// `clamp(replies*3 + mentions*5, 0, 100)`.
    pub strength: u32,
    /// True once each side has replied to the other at least twice.
    pub bidirectional: bool,
    pub label: RelationshipLabel,
}

impl RelationshipEdge {
    /// The endpoint that is not `person`, if `person` is on this edge.
    pub fn other(&self, person: &str) -> Option<&str> {
        if self.person_a == person {
            Some(&self.person_b)
        } else if self.person_b == person {
            Some(&self.person_a)
        } else {
            None
        }
    }
}

/// The full interaction graph for one transcript. Edge order is first-touch
/// order, so rebuilds from the same transcript are identical.
#[derive(Debug, Default)]
pub struct InteractionGraph {
    edges: Vec<RelationshipEdge>,
    index: HashMap<(String, String), usize>,
}

impl InteractionGraph {
    /// Scan a transcript plus roster into relationship edges.
    pub fn build(messages: &[Message], members: &[Member]) -> Self {
        let mut counts: HashMap<(String, String), (u32, u32)> = HashMap::new();
        let mut order: Vec<(String, String)> = Vec::new();

        let touch = |counts: &mut HashMap<(String, String), (u32, u32)>,
                     order: &mut Vec<(String, String)>,
                     a: &str,
                     b: &str|
         -> (String, String) {
            let key = pair_key(a, b);
            if !counts.contains_key(&key) {
                counts.insert(key.clone(), (0, 0));
                order.push(key.clone());
            }
            key
        };

        // Replies: every sender change between consecutive messages.
        for window in messages.windows(2) {
            let (prev, curr) = (&window[0], &window[1]);
            if prev.sender != curr.sender {
                let key = touch(&mut counts, &mut order, &prev.sender, &curr.sender);
                counts.get_mut(&key).unwrap().0 += 1;
            }
        }

        // Mentions: a member's first name (if longer than 2 chars) inside
        // another sender's message, case-insensitive.
        for member in members {
            let first = first_name_of(&member.name);
            if first.chars().count() <= 2 {
                continue;
            }
            let needle = first.to_lowercase();
            for message in messages {
                if message.sender == member.name {
                    continue;
                }
                if message.text.to_lowercase().contains(&needle) {
                    let key = touch(&mut counts, &mut order, &message.sender, &member.name);
                    counts.get_mut(&key).unwrap().1 += 1;
                }
            }
        }

        let mut graph = Self::default();
        for key in order {
            let (replies, mentions) = counts[&key];
            let strength = (replies * 3 + mentions * 5).min(100);
            graph.index.insert(key.clone(), graph.edges.len());
            graph.edges.push(RelationshipEdge {
                person_a: key.0,
                person_b: key.1,
                replies,
                mentions,
                strength,
                bidirectional: replies >= BIDIRECTIONAL_REPLIES,
                label: RelationshipLabel::from_strength(strength),
            });
        }
        tracing::debug!(edges = graph.edges.len(), "interaction graph built");
        graph
    }

    pub fn edges(&self) -> &[RelationshipEdge] {
        &self.edges
    }

    pub fn edge_between(&self, a: &str, b: &str) -> Option<&RelationshipEdge> {
        self.index.get(&pair_key(a, b)).map(|&i| &self.edges[i])
    }

    /// Derived strength between two people; 0 when they never interacted.
    pub fn strength_between(&self, a: &str, b: &str) -> u32 {
        self.edge_between(a, b).map(|e| e.strength).unwrap_or(0)
    }

    /// All edges touching one person, in graph order.
    pub fn connections_of(&self, person: &str) -> Vec<&RelationshipEdge> {
        self.edges
            .iter()
            .filter(|e| e.person_a == person || e.person_b == person)
            .collect()
    }
}

/// Canonical unordered key for a pair of names.
fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
