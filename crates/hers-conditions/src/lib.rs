//! `hers-conditions` — road closures and congestion with exact bulk revert.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`simulator`] | `ConditionSimulator` over a `SharedNetwork`               |
//! | [`record`]    | `EdgeKey`, `ConditionRecord`, `ConditionSummary`          |
//! | [`error`]     | `ConditionError`, `ConditionResult<T>`                    |
//!
//! # Revert model
//!
//! Each mutated `(from, to)` road has one record holding its current blocked
//! flag and congestion multiplier.  Clearing a condition updates the record;
//! a record whose road is back to free-flow is dropped.  `clear_all` restores
//! every recorded road and leaves the graph identical to its unmutated state,
//! however the closures and jams were stacked.

pub mod error;
pub mod record;
pub mod simulator;


pub use error::{ConditionError, ConditionResult};
pub use record::{ConditionKind, ConditionRecord, ConditionSummary, EdgeKey};
pub use simulator::ConditionSimulator;
