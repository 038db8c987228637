#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use warmpath::context::{Member, Message, Profile, ScanContext};

/// Fixed reference time every integration test scores against.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap()
}

/// Build a message with an explicit timestamp.
pub fn msg(sender: &str, text: &str, timestamp: &str) -> Message {
    Message {
        sender: sender.into(),
        text: text.into(),
        timestamp: timestamp.into(),
    }
}

/// A message `days` whole days before [`test_now`].
pub fn msg_days_ago(sender: &str, text: &str, days: i64) -> Message {
    let ts = test_now() - chrono::Duration::days(days);
    msg(sender, text, &ts.to_rfc3339())
}

pub fn member(name: &str) -> Member {
    Member {
        name: name.into(),
        message_count: 0,
        first_seen: None,
        last_seen: None,
    }
}

/// Assemble a scan context from messages, with the roster derived from the
/// distinct senders.
pub fn test_ctx(messages: Vec<Message>) -> ScanContext {
    let mut members: Vec<Member> = Vec::new();
    for message in &messages {
        if !members.iter().any(|m| m.name == message.sender) {
            members.push(member(&message.sender));
        }
    }
    ScanContext::assemble(messages, members, test_now())
}

pub fn profile(name: &str) -> Profile {
    Profile::new(name)
}
