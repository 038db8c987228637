//! Standalone graph queries from the terminal: path search, bridge
//! opportunities, shared context, and help matches.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::ingest;
use crate::graph::bridge;
use crate::graph::entity::EntityGraph;

fn build_graph(transcript_path: &Path) -> Result<EntityGraph> {
    let transcript = ingest::load_transcript(transcript_path)
        .with_context(|| format!("loading transcript {}", transcript_path.display()))?;
    Ok(EntityGraph::from_messages(&transcript.messages))
}

pub fn path(
    transcript_path: &Path,
    from: &str,
    to: &str,
    max_depth: usize,
    json: bool,
) -> Result<()> {
    let graph = build_graph(transcript_path)?;
    let found = bridge::find_path(&graph, from, to, max_depth);
    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }
    match found {
        Some(path) => println!("{}", path.join(" -> ")),
        None => println!("No path within {max_depth} hops."),
    }
    Ok(())
}

pub fn bridges(transcript_path: &Path, requester: &str, json: bool) -> Result<()> {
    let graph = build_graph(transcript_path)?;
    let found = bridge::bridge_opportunities(&graph, requester);
    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }
    if found.is_empty() {
        println!("No bridge opportunities found.");
        return Ok(());
    }
    for opp in &found {
        let wants = opp.what_a_wants.as_deref().unwrap_or("(no stated reason)");
        println!(
            "{} wants to meet {} — {} (strength {})",
            opp.person_a, opp.person_b, wants, opp.strength
        );
    }
    Ok(())
}

pub fn shared(transcript_path: &Path, yours: &str, theirs: &str, json: bool) -> Result<()> {
    let graph = build_graph(transcript_path)?;
    let found = bridge::shared_context(&graph, yours, theirs);
    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }
    if found.is_empty() {
        println!("No shared context found.");
        return Ok(());
    }
    for ctx in &found {
        let year = if ctx.same_year { " (same year)" } else { "" };
        println!(
            "{}: you {}, they {}{year}",
            ctx.node,
            ctx.your_relation.join("/"),
            ctx.their_relation.join("/")
        );
    }
    Ok(())
}

pub fn help_matches(transcript_path: &Path, requester: &str, json: bool) -> Result<()> {
    let graph = build_graph(transcript_path)?;
    let found = bridge::help_matches(&graph, requester);
    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }
    if found.is_empty() {
        println!("No help matches found.");
        return Ok(());
    }
    for m in &found {
        println!("{}: {} needs help, {} can help", m.topic, m.needer, m.helper);
    }
    Ok(())
}
