mod helpers;

use helpers::{member, msg_days_ago};
use warmpath::graph::entity::{EdgeType, EntityGraph, NodeType};
use warmpath::graph::interaction::{InteractionGraph, RelationshipLabel};

#[test]
fn interaction_graph_combines_replies_and_mentions() {
    let messages = vec![
        msg_days_ago("Alice Chen", "hey ben, did you ship it?", 2),
        msg_days_ago("Ben Ortiz", "yes! thanks for the nudge", 2),
        msg_days_ago("Alice Chen", "amazing", 2),
    ];
    let members = vec![member("Alice Chen"), member("Ben Ortiz")];
    let graph = InteractionGraph::build(&messages, &members);

    let edge = graph.edge_between("Alice Chen", "Ben Ortiz").unwrap();
    // Two sender changes plus one "ben" mention: 2*3 + 1*5.
    assert_eq!(edge.replies, 2);
    assert_eq!(edge.mentions, 1);
    assert_eq!(edge.strength, 11);
    assert!(edge.bidirectional);
    assert_eq!(edge.label, RelationshipLabel::Weak);
}

#[test]
fn entity_graph_merges_across_display_casings() {
    let messages = vec![
        msg_days_ago("Nathan", "I'm interested in urban farming", 3),
        msg_days_ago("nathan", "interested in urban farming", 2),
    ];
    let graph = EntityGraph::from_messages(&messages);

    // One person node, one interest node, one edge at weight 2.
    assert_eq!(graph.node_count(), 2);
    let edges = graph.edges_from("nathan", EdgeType::InterestedIn);
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].weight, 2);
    assert_eq!(edges[0].contexts.len(), 2);
    assert_eq!(edges[0].contexts[0].source, "chat");
}

#[test]
fn chat_extraction_builds_typed_nodes_with_provenance() {
    let messages = vec![
        msg_days_ago("Alice", "I graduated from Berkeley in 2014", 3),
        msg_days_ago("Alice", "these days I work at Stripe", 3),
        msg_days_ago("Ben", "would love to meet Alice sometime", 2),
        msg_days_ago("Cara", "I need help with fundraising strategy", 1),
    ];
    let graph = EntityGraph::from_messages(&messages);

    assert_eq!(graph.node("berkeley").unwrap().node_type, NodeType::School);
    assert_eq!(graph.node("stripe").unwrap().node_type, NodeType::Company);

    let attended = graph.edges_from("alice", EdgeType::Attended);
    assert_eq!(attended[0].contexts[0].year, Some(2014));

    // Ben's target merges into the existing person node for Alice.
    let meet = graph.edges_from("ben", EdgeType::WantsToMeet);
    assert_eq!(meet[0].to, "alice");
    assert_eq!(graph.node("alice").unwrap().node_type, NodeType::Person);

    let needs = graph.edges_from("cara", EdgeType::WantsHelpWith);
    assert_eq!(needs[0].to, "fundraisingstrategy");
    assert!(needs[0].contexts[0].quote.as_deref().unwrap().contains("fundraising"));
}

#[test]
fn reingesting_the_same_transcript_merges_not_duplicates() {
    let batch = vec![
        msg_days_ago("Alice", "I'm passionate about ceramics", 2),
        msg_days_ago("Ben", "happy to help with hiring plans", 2),
    ];
    let mut doubled = batch.clone();
    doubled.extend(batch.clone());

    let once = EntityGraph::from_messages(&batch);
    let twice = EntityGraph::from_messages(&doubled);
    assert_eq!(once.node_count(), twice.node_count());
    assert_eq!(once.edges().len(), twice.edges().len());
    // Weights accumulate instead of new edges appearing.
    assert_eq!(
        twice.edges_from("alice", EdgeType::InterestedIn)[0].weight,
        2
    );
}
