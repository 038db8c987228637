//! The end-to-end scan command: transcript + profiles → ranked output.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

use crate::cli::ingest;
use crate::config::ScanConfig;
use crate::context::{parse_timestamp, ScanContext};
use crate::scoring::rank::recommend;

/// Run a full scan and print recommendations.
pub fn scan(
    transcript_path: &Path,
    profiles_path: &Path,
    requester_name: &str,
    scan_config: &ScanConfig,
    now_override: Option<&str>,
    json: bool,
) -> Result<()> {
    let transcript = ingest::load_transcript(transcript_path)
        .with_context(|| format!("loading transcript {}", transcript_path.display()))?;
    let profiles = ingest::load_profiles(profiles_path)
        .with_context(|| format!("loading profiles {}", profiles_path.display()))?;

    let requester = profiles
        .iter()
        .find(|p| p.name == requester_name)
        .cloned();
    let Some(requester) = requester else {
        bail!("requester {requester_name:?} not found in profiles");
    };

    let now = resolve_now(now_override)?;
    let ctx = ScanContext::assemble(transcript.messages, transcript.members, now);
    let recommendations = recommend(&ctx, &requester, &profiles, scan_config);

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    if recommendations.is_empty() {
        println!("No one cleared the score floor. Not an error — quiet group, quiet week.");
        return Ok(());
    }

    println!(
        "Top {} recommendation(s) for {}\n",
        recommendations.len(),
        requester.name
    );
    for (i, rec) in recommendations.iter().enumerate() {
        println!("  {}. {} (score: {})", i + 1, rec.person, rec.score);
        for signal in &rec.signals {
            println!("     - [{}] {} ({:.1})", signal.kind, signal.description, signal.strength);
        }
        if let Some(timing) = &rec.timing {
            let marker = if timing.timing_match { ", same city" } else { "" };
            println!(
                "     - timing: {} {} ({}d ago{marker})",
                timing.kind, timing.description, timing.days_since
            );
        }
        if let Some(path) = &rec.warm_path {
            match &path.via {
                Some(via) => println!("     - warm path: via {via} (strength {})", path.strength),
                None => println!("     - warm path: direct (strength {})", path.strength),
            }
        }
        for reason in &rec.fit.reasons {
            println!("     - {reason}");
        }
        println!(
            "     -> [{:?}] {}",
            rec.activation.urgency, rec.activation.message
        );
        println!();
    }
    Ok(())
}

/// Use the injected `--now` when given, else capture the wall clock once
/// here at the boundary — the engine itself never reads it.
pub fn resolve_now(now_override: Option<&str>) -> Result<DateTime<Utc>> {
    match now_override {
        Some(raw) => parse_timestamp(raw)
            .with_context(|| format!("unparseable --now value: {raw:?}")),
        None => Ok(Utc::now()),
    }
}
