//! Loading transcripts and profile records from JSON exports.
//!
//! This is boundary code, not engine code: the core consumes in-memory
//! records and never touches the filesystem itself. A transcript file is
//! `{"messages": [...], "members": [...]}`; the roster is optional and is
//! derived from message senders when absent.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::context::{Member, Message, Profile};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("transcript has no messages")]
    Empty,
}

/// A parsed transcript export.
#[derive(Debug, Deserialize)]
pub struct Transcript {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub members: Vec<Member>,
}

/// Load a transcript file. When the export carries no roster, one is
/// derived from the message senders.
pub fn load_transcript(path: &Path) -> Result<Transcript, IngestError> {
    let contents = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let mut transcript: Transcript =
        serde_json::from_str(&contents).map_err(|source| IngestError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    if transcript.messages.is_empty() {
        return Err(IngestError::Empty);
    }
    if transcript.members.is_empty() {
        transcript.members = derive_roster(&transcript.messages);
        tracing::debug!(
            members = transcript.members.len(),
            "no roster in export, derived from senders"
        );
    }
    Ok(transcript)
}

/// Load a JSON array of profile records.
pub fn load_profiles(path: &Path) -> Result<Vec<Profile>, IngestError> {
    let contents = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| IngestError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// One roster entry per distinct sender, first-seen order.
fn derive_roster(messages: &[Message]) -> Vec<Member> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, (u32, String, String)> = HashMap::new();
    for message in messages {
        match counts.get_mut(&message.sender) {
            Some((count, _, last)) => {
                *count += 1;
                *last = message.timestamp.clone();
            }
            None => {
                order.push(message.sender.clone());
                counts.insert(
                    message.sender.clone(),
                    (1, message.timestamp.clone(), message.timestamp.clone()),
                );
            }
        }
    }
    order
        .into_iter()
        .map(|name| {
            let (count, first, last) = counts.remove(&name).unwrap_or_default();
            Member {
                name,
                message_count: count,
                first_seen: Some(first),
                last_seen: Some(last),
            }
        })
        .collect()
}
