//! Graph algorithms over the typed entity graph: warm-path search, bridge
//! opportunities, shared context, and help matching.
//!
//! Everything here treats edges as undirected for connectivity, works only
//! from flat arena lookups, and is deterministic — neighbor iteration
//! follows edge insertion order, so ties break the same way every run.

use serde::Serialize;

use crate::graph::entity::{canonical_id, EdgeType, EntityGraph, NodeType};
use crate::scoring::fuzzy::fuzzy_match;

/// Default hop bound for path search.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// A triangle where the requester is the unique connector: A wants to meet
/// B, and the requester knows both.
#[derive(Debug, Clone, Serialize)]
pub struct BridgeOpportunity {
    pub person_a: String,
    pub person_b: String,
    /// Reason carried on the desire edge's context, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub what_a_wants: Option<String>,
    pub your_relationship_to_a: Vec<&'static str>,
    pub your_relationship_to_b: Vec<&'static str>,
    /// `w(you↔A) + w(you↔B) + w(A→B)`.
    pub strength: u32,
}

/// A common neighbor of two nodes.
#[derive(Debug, Clone, Serialize)]
pub struct SharedContext {
    pub node: String,
    pub your_relation: Vec<&'static str>,
    pub their_relation: Vec<&'static str>,
    /// True when both connecting edges carry an equal `year` context value.
    pub same_year: bool,
}

/// A (needer, helper) pairing on one help topic among the requester's
/// first-degree neighbors.
#[derive(Debug, Clone, Serialize)]
pub struct HelpMatch {
    pub topic: String,
    pub needer: String,
    pub helper: String,
}

/// Breadth-first search for the first path between two nodes within
/// `max_depth` hops, treating every edge as undirected. Returns display
/// names along the path, or `None` when unreachable within the bound.
pub fn find_path(
    graph: &EntityGraph,
    from: &str,
    to: &str,
    max_depth: usize,
) -> Option<Vec<String>> {
    let start = canonical_id(from);
    let goal = canonical_id(to);
    graph.node(&start)?;
    graph.node(&goal)?;
    if start == goal {
        return Some(vec![display_of(graph, &start)]);
    }

    let mut queue = std::collections::VecDeque::new();
    let mut parent: std::collections::HashMap<String, String> = std::collections::HashMap::new();
    let mut depth: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    queue.push_back(start.clone());
    depth.insert(start.clone(), 0);

    while let Some(current) = queue.pop_front() {
        let d = depth[&current];
        if d == max_depth {
            continue;
        }
        for neighbor in graph.neighbors(&current) {
            if depth.contains_key(neighbor) {
                continue;
            }
            parent.insert(neighbor.to_string(), current.clone());
            depth.insert(neighbor.to_string(), d + 1);
            if neighbor == goal {
                let mut path = vec![goal.clone()];
                let mut cursor = goal.clone();
                while let Some(prev) = parent.get(&cursor) {
                    path.push(prev.clone());
                    cursor = prev.clone();
                }
                path.reverse();
                return Some(path.iter().map(|id| display_of(graph, id)).collect());
            }
            queue.push_back(neighbor.to_string());
        }
    }
    None
}

/// Enumerate bridge opportunities anchored at the requester.
///
/// S = the requester's direct person neighbors; for every ordered pair
/// (A, B) in S, a `wants_to_meet` edge A→B — or an `interested_in` edge
/// whose target is itself a person node, which the engine treats as the
/// same desire-to-meet signal — emits one opportunity. Deliberately
/// O(|S|²), never a global triangle search.
pub fn bridge_opportunities(graph: &EntityGraph, requester: &str) -> Vec<BridgeOpportunity> {
    let rid = canonical_id(requester);
    let people: Vec<&str> = graph
        .neighbors(&rid)
        .into_iter()
        .filter(|id| matches!(graph.node(id), Some(n) if n.node_type == NodeType::Person))
        .collect();

    let mut opportunities = Vec::new();
    for &a in &people {
        for &b in &people {
            if a == b {
                continue;
            }
            let desire = graph
                .edges_from(a, EdgeType::WantsToMeet)
                .into_iter()
                .chain(graph.edges_from(a, EdgeType::InterestedIn))
                .find(|e| e.to == b);
            let Some(edge) = desire else { continue };
            let what_a_wants = edge
                .contexts
                .iter()
                .find_map(|c| c.reason.clone().or_else(|| c.quote.clone()));
            opportunities.push(BridgeOpportunity {
                person_a: display_of(graph, a),
                person_b: display_of(graph, b),
                what_a_wants,
                your_relationship_to_a: graph.relation_types(&rid, a),
                your_relationship_to_b: graph.relation_types(&rid, b),
                strength: graph.weight_between(&rid, a)
                    + graph.weight_between(&rid, b)
                    + edge.weight,
            });
        }
    }
    opportunities.sort_by_key(|o| std::cmp::Reverse(o.strength));
    tracing::debug!(
        neighbors = people.len(),
        found = opportunities.len(),
        "bridge opportunities enumerated"
    );
    opportunities
}

/// Common neighbors of two nodes, with the relation each side has to the
/// shared node and whether the connections carry the same year.
pub fn shared_context(graph: &EntityGraph, yours: &str, theirs: &str) -> Vec<SharedContext> {
    let x = canonical_id(yours);
    let y = canonical_id(theirs);
    let their_neighbors = graph.neighbors(&y);

    graph
        .neighbors(&x)
        .into_iter()
        .filter(|z| *z != y && *z != x && their_neighbors.contains(z))
        .map(|z| {
            let your_years = context_years(graph, &x, z);
            let their_years = context_years(graph, &y, z);
            SharedContext {
                node: display_of(graph, z),
                your_relation: graph.relation_types(&x, z),
                their_relation: graph.relation_types(&y, z),
                same_year: your_years.iter().any(|yr| their_years.contains(yr)),
            }
        })
        .collect()
}

/// Match needers to helpers among the requester's first-degree person
/// neighbors. Topics group by canonical id and pair across the two sides
/// via the shared fuzzy rule; self-pairs are excluded.
pub fn help_matches(graph: &EntityGraph, requester: &str) -> Vec<HelpMatch> {
    let rid = canonical_id(requester);
    let people: Vec<&str> = graph
        .neighbors(&rid)
        .into_iter()
        .filter(|id| matches!(graph.node(id), Some(n) if n.node_type == NodeType::Person))
        .collect();

    // (topic display, people) per topic, insertion-ordered.
    let mut needs: Vec<(String, Vec<String>)> = Vec::new();
    let mut offers: Vec<(String, Vec<String>)> = Vec::new();
    let mut collect = |bucket: &mut Vec<(String, Vec<String>)>, person: &str, edge_type| {
        for edge in graph.edges_from(person, edge_type) {
            let topic = display_of(graph, &edge.to);
            let who = display_of(graph, person);
            match bucket.iter_mut().find(|(t, _)| canonical_id(t) == edge.to) {
                Some((_, members)) => {
                    if !members.contains(&who) {
                        members.push(who);
                    }
                }
                None => bucket.push((topic, vec![who])),
            }
        }
    };
    for &person in &people {
        collect(&mut needs, person, EdgeType::WantsHelpWith);
        collect(&mut offers, person, EdgeType::CanHelpWith);
    }

    let mut matches = Vec::new();
    for (need_topic, needers) in &needs {
        for (offer_topic, helpers) in &offers {
            if !fuzzy_match(need_topic, offer_topic) {
                continue;
            }
            for needer in needers {
                for helper in helpers {
                    if needer == helper {
                        continue;
                    }
                    let hit = HelpMatch {
                        topic: need_topic.clone(),
                        needer: needer.clone(),
                        helper: helper.clone(),
                    };
                    if !matches.iter().any(|m: &HelpMatch| {
                        m.topic == hit.topic && m.needer == hit.needer && m.helper == hit.helper
                    }) {
                        matches.push(hit);
                    }
                }
            }
        }
    }
    matches
}

fn display_of(graph: &EntityGraph, id: &str) -> String {
    graph
        .node(id)
        .map(|n| n.display_name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn context_years(graph: &EntityGraph, a: &str, b: &str) -> Vec<i32> {
    graph
        .edges_between(a, b)
        .iter()
        .flat_map(|e| e.contexts.iter().filter_map(|c| c.year))
        .collect()
}
