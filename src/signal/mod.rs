pub mod extract;
pub mod rules;

pub use extract::{extract_intents, extract_timings, IntentSignal, TimingSignal};
pub use rules::{IntentKind, TimingKind};
