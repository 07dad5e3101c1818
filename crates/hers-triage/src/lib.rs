//! `hers-triage` — request profiles and facility scoring.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`profile`]   | `RequestProfile`, `EmergencyNeed`, `Severity`              |
//! | [`score`]     | `score`, `Score` — the rule table                          |
//! | [`recommend`] | `recommend` (straight line), `rescore` (road-ranked input) |
//!
//! Scoring never fails: every input, including zero capacity or zero
//! distance, maps to a value in `[0, 100]`.

pub mod profile;
pub mod recommend;
pub mod score;

#[cfg(test)]
mod tests;

pub use profile::{EmergencyNeed, RequestProfile, Severity};
pub use recommend::{Recommendation, recommend, recommend_with, rescore};
pub use score::{BASE_SCORE, Score, score};
