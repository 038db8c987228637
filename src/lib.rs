//! Discovery & relationship graph engine for group chats.
//!
//! Warmpath mines a group-chat transcript plus lightweight member profiles
//! into a ranked, explainable list of people worth contacting — and why,
//! and how. The pipeline:
//!
//! 1. **Signal extraction** — rule tables turn message text into weighted
//!    intent signals (hiring, seeking, fundraising, ...) and time-sensitive
//!    timing signals (travel, deadlines, life changes)
//! 2. **Graph building** — the same transcript becomes a weighted
//!    interaction graph (who replies to / mentions whom) and a typed entity
//!    graph (people, schools, companies, interests)
//! 3. **Fit scoring** — fuzzy matching of complementary needs and offers
//!    between two profiles
//! 4. **Bridge detection** — bounded path search, warm-introduction
//!    triangles, shared context, and help matching over the entity graph
//! 5. **Ranking** — one capped 0–100 composite score per candidate, with
//!    evidence and auto-generated outreach text
//!
//! The whole engine is synchronous and pure: the reference time is injected,
//! so identical inputs always produce identical output. Transcript parsing,
//! persistence, and enrichment are the caller's concern.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`context`] — Input records, lenient time handling, and the shared [`context::ScanContext`]
//! - [`signal`] — Intent/timing rule tables and the signal extractor
//! - [`graph`] — Interaction graph, typed entity graph, and bridge detection
//! - [`scoring`] — Fuzzy matching, fit scoring, and the recommendation ranker

pub mod config;
pub mod context;
pub mod graph;
pub mod scoring;
pub mod signal;
