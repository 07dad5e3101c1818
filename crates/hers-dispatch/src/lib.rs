//! `hers-dispatch` — road-time ranking of candidates and rank-and-commit
//! dispatch.
//!
//! # Flow
//!
//! ```text
//! query point ─┐
//!              ├─ Ranker::rank      one read guard; per candidate:
//! candidates ──┘                     nearest node → find_path → keep if found
//!                                    stable sort by total_time_secs, truncate
//!
//! Dispatcher::dispatch              available resources → rank (ToQuery)
//!                                    → try_dispatch best; StateConflict → next
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the per-candidate searches on Rayon's thread pool. |

pub mod dispatcher;
pub mod error;
pub mod ranker;

#[cfg(test)]
mod tests;

pub use dispatcher::{Assignment, Dispatcher};
pub use error::{DispatchError, DispatchResult};
pub use ranker::{Direction, Ranked, Ranker};
