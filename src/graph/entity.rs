//! The typed entity multi-graph.
//!
//! Nodes are people, schools, companies, interests, events, locations, and
//! groups, keyed by a canonical id so repeated references merge instead of
//! duplicating. The graph is an arena: nodes and edges live in flat
//! collections referenced by key/index, adjacency lists hold edge indices in
//! insertion order, and nothing aliases anything — re-ingesting the same
//! transcript only bumps weights and appends contexts.

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::context::Message;
use crate::signal::extract::truncate_chars;

/// Max characters of a message kept as edge provenance.
const QUOTE_LIMIT: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Person,
    School,
    Company,
    Interest,
    Event,
    Location,
    Group,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::School => "school",
            Self::Company => "company",
            Self::Interest => "interest",
            Self::Event => "event",
            Self::Location => "location",
            Self::Group => "group",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    Knows,
    Attended,
    WorkedAt,
    InterestedIn,
    WantsToMeet,
    WantsHelpWith,
    CanHelpWith,
    Classmate,
    Colleague,
    MetAt,
    LivesIn,
    MemberOf,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Knows => "knows",
            Self::Attended => "attended",
            Self::WorkedAt => "worked_at",
            Self::InterestedIn => "interested_in",
            Self::WantsToMeet => "wants_to_meet",
            Self::WantsHelpWith => "wants_help_with",
            Self::CanHelpWith => "can_help_with",
            Self::Classmate => "classmate",
            Self::Colleague => "colleague",
            Self::MetAt => "met_at",
            Self::LivesIn => "lives_in",
            Self::MemberOf => "member_of",
        }
    }
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase a display name and strip everything non-alphanumeric.
/// "Alice Chen" and "alice chen!" merge into the same node.
pub fn canonical_id(display: &str) -> String {
    display
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// A typed entity node.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub attributes: HashMap<String, String>,
}

/// Provenance attached to one edge observation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EdgeContext {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl EdgeContext {
    pub fn chat(timestamp: &str, quote: &str, reason: Option<String>) -> Self {
        Self {
            source: "chat".into(),
            timestamp: Some(timestamp.to_string()),
            quote: Some(truncate_chars(quote, QUOTE_LIMIT)),
            reason,
            year: None,
        }
    }
}

/// A directed, weighted, context-carrying edge. Directed at rest, but
/// traversed in both directions for connectivity queries.
#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    pub weight: u32,
    pub contexts: Vec<EdgeContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Default)]
pub struct EntityGraph {
    nodes: HashMap<String, Node>,
    node_order: Vec<String>,
    edges: Vec<Edge>,
    edge_index: HashMap<(String, String, EdgeType), usize>,
    adjacency: HashMap<String, Vec<usize>>,
}

impl EntityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or merge a node. Merging overrides attribute values on key
    /// conflict and keeps the first-seen display name and type.
    pub fn upsert_node(
        &mut self,
        display: &str,
        node_type: NodeType,
        attributes: HashMap<String, String>,
    ) -> String {
        let id = canonical_id(display);
        if id.is_empty() {
            return id;
        }
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.attributes.extend(attributes);
            }
            None => {
                self.nodes.insert(
                    id.clone(),
                    Node {
                        id: id.clone(),
                        display_name: display.trim().to_string(),
                        node_type,
                        attributes,
                    },
                );
                self.node_order.push(id.clone());
            }
        }
        id
    }

    /// Insert or merge an edge keyed on (from, to, type). Merging bumps the
    /// weight and appends the context — never duplicates.
    pub fn upsert_edge(&mut self, from: &str, to: &str, edge_type: EdgeType, context: EdgeContext) {
        let key = (from.to_string(), to.to_string(), edge_type);
        if let Some(&i) = self.edge_index.get(&key) {
            let edge = &mut self.edges[i];
            edge.weight += 1;
            if context.timestamp.is_some() {
                edge.timestamp = context.timestamp.clone();
            }
            edge.contexts.push(context);
            return;
        }
        let i = self.edges.len();
        self.edges.push(Edge {
            from: from.to_string(),
            to: to.to_string(),
            edge_type,
            weight: 1,
            timestamp: context.timestamp.clone(),
            contexts: vec![context],
        });
        self.edge_index.insert(key, i);
        self.adjacency.entry(from.to_string()).or_default().push(i);
        if from != to {
            self.adjacency.entry(to.to_string()).or_default().push(i);
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge indices touching a node, in insertion order.
    pub(crate) fn adjacent_edges(&self, id: &str) -> &[usize] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct neighbor ids in edge-insertion order, either direction.
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for &i in self.adjacent_edges(id) {
            let edge = &self.edges[i];
            let other = if edge.from == id { &edge.to } else { &edge.from };
            if other != id && !seen.contains(&other.as_str()) {
                seen.push(other);
            }
        }
        seen
    }

    /// All edges between two nodes, either direction.
    pub fn edges_between(&self, a: &str, b: &str) -> Vec<&Edge> {
        self.adjacent_edges(a)
            .iter()
            .map(|&i| &self.edges[i])
            .filter(|e| (e.from == a && e.to == b) || (e.from == b && e.to == a))
            .collect()
    }

    /// Summed weight of every edge between two nodes.
    pub fn weight_between(&self, a: &str, b: &str) -> u32 {
        self.edges_between(a, b).iter().map(|e| e.weight).sum()
    }

    /// Distinct edge-type names between two nodes, insertion order.
    pub fn relation_types(&self, a: &str, b: &str) -> Vec<&'static str> {
        let mut types = Vec::new();
        for edge in self.edges_between(a, b) {
            let name = edge.edge_type.as_str();
            if !types.contains(&name) {
                types.push(name);
            }
        }
        types
    }

    /// Outgoing edges of one type from a node.
    pub fn edges_from(&self, from: &str, edge_type: EdgeType) -> Vec<&Edge> {
        self.adjacent_edges(from)
            .iter()
            .map(|&i| &self.edges[i])
            .filter(|e| e.from == from && e.edge_type == edge_type)
            .collect()
    }

    /// Build the graph from a transcript by running the entity rule table
    /// over every message. Each match links the sender to the captured
    /// target with chat provenance.
    pub fn from_messages(messages: &[Message]) -> Self {
        let mut graph = Self::new();
        for message in messages {
            let sender_id =
                graph.upsert_node(&message.sender, NodeType::Person, HashMap::new());
            if sender_id.is_empty() {
                continue;
            }
            for rule in entity_rules() {
                let Some(caps) = rule.pattern.captures(&message.text) else {
                    continue;
                };
                let Some(target) = caps.get(1) else { continue };
                let target_text = target.as_str().trim();
                let target_id =
                    graph.upsert_node(target_text, rule.node_type, HashMap::new());
                if target_id.is_empty() || target_id == sender_id {
                    continue;
                }
                let mut context = EdgeContext::chat(
                    &message.timestamp,
                    &message.text,
                    Some(target_text.to_string()),
                );
                if rule.edge_type == EdgeType::Attended {
                    context.year = extract_year(&message.text);
                }
                graph.upsert_edge(&sender_id, &target_id, rule.edge_type, context);
            }
        }
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edges.len(),
            "entity graph built"
        );
        graph
    }
}

/// One compiled entity-extraction rule: a linguistic cue mapped to the edge
/// it creates and the node type of its target.
pub struct EntityRule {
    pub edge_type: EdgeType,
    pub node_type: NodeType,
    pub pattern: Regex,
}

// Same capture conventions as the signal rule tables: cues are (?i:)-scoped
// so proper-noun captures keep their capitalization requirement.
pub fn entity_rules() -> &'static [EntityRule] {
    static RULES: OnceLock<Vec<EntityRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let rule = |edge_type, node_type, pat: &str| EntityRule {
            edge_type,
            node_type,
            pattern: Regex::new(pat).expect("entity rule pattern must compile"),
        };
        vec![
            rule(
                EdgeType::WantsToMeet,
                NodeType::Person,
                r"(?i:(?:want|would love|trying|hoping) to meet )([A-Z][a-zA-Z]+(?: [A-Z][a-zA-Z]+)?)",
            ),
            rule(
                EdgeType::InterestedIn,
                NodeType::Interest,
                r"(?i:(?:interested in|passionate about|curious about|getting into) )([\w][\w' -]{2,40})",
            ),
            rule(
                EdgeType::CanHelpWith,
                NodeType::Interest,
                r"(?i:(?:can help with|happy to help with|ask me (?:anything )?about) )([\w][\w' -]{2,40})",
            ),
            rule(
                EdgeType::WantsHelpWith,
                NodeType::Interest,
                r"(?i:(?:need help with|could use help with|looking for help with|struggling with) )([\w][\w' -]{2,40})",
            ),
            rule(
                EdgeType::Attended,
                NodeType::School,
                r"(?i:(?:went to|studied at|graduated from|alum of) )([A-Z][a-zA-Z]+(?: [A-Z][a-zA-Z]+){0,3})",
            ),
            rule(
                EdgeType::WorkedAt,
                NodeType::Company,
                r"(?i:(?:work(?:ed|ing)? at|used to work at) )([A-Z][a-zA-Z0-9]+(?: [A-Z][a-zA-Z0-9]+){0,2})",
            ),
        ]
    })
}

/// First plausible 4-digit year in a message, for classmate-era matching.
fn extract_year(text: &str) -> Option<i32> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\b((?:19|20)\d{2})\b").expect("year pattern"));
    re.captures(text)?.get(1)?.as_str().parse().ok()
}
