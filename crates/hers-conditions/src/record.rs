//! Per-edge condition records.

use std::fmt;

use hers_core::NodeId;

/// A directed `(from, to)` road, the key of the condition table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub from: NodeId,
    pub to:   NodeId,
}

impl EdgeKey {
    #[inline]
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// What currently dominates an edge's condition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConditionKind {
    Blocked,
    Congested,
}

/// The active condition of one directed road.
///
/// Mirrors the graph exactly: `blocked` is the edge's blocked flag and
/// `multiplier` the factor its weight was last scaled by.  `reason` is the
/// label of the most recent mutation (a closure reason or a severity).  A
/// record whose edge is back to free-flow is removed from the table.
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionRecord {
    pub key:        EdgeKey,
    pub blocked:    bool,
    pub multiplier: f64,
    pub reason:     String,
}

impl ConditionRecord {
    pub(crate) fn free_flow(key: EdgeKey) -> Self {
        Self { key, blocked: false, multiplier: 1.0, reason: String::new() }
    }

    /// `true` when the edge is open and unscaled.
    pub fn is_free_flow(&self) -> bool {
        !self.blocked && self.multiplier == 1.0
    }

    /// A blocked edge reports `Blocked` even if it also carries congestion.
    pub fn kind(&self) -> ConditionKind {
        if self.blocked { ConditionKind::Blocked } else { ConditionKind::Congested }
    }
}

impl fmt::Display for ConditionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ConditionKind::Blocked   => write!(f, "{}: BLOCKED ({})", self.key, self.reason),
            ConditionKind::Congested => write!(f, "{}: {} (x{})", self.key, self.reason, self.multiplier),
        }
    }
}

/// Counts over the active condition table.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConditionSummary {
    /// Edges with any active record.
    pub affected:  usize,
    pub blocked:   usize,
    /// Edges with a multiplier other than 1.0, blocked or not.
    pub congested: usize,
}

impl fmt::Display for ConditionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.affected == 0 {
            return f.write_str("all roads clear");
        }
        write!(
            f,
            "{} affected road segments ({} blocked, {} congested)",
            self.affected, self.blocked, self.congested
        )
    }
}
