//! `ConditionSimulator` — applies and reverts road conditions on a shared
//! network.
//!
//! Every mutation goes through the network's write guard, and every
//! mutation that changes the graph is mirrored into a record table keyed by
//! `(from, to)`.  [`ConditionSimulator::clear_all`] walks that table to put
//! each affected edge back to free-flow, so the table must stay in lockstep
//! with the graph:
//!
//! - an edge has a record ⇔ it is blocked or its multiplier is not 1.0;
//! - a record's `blocked`/`multiplier` are the edge's current state.
//!
//! Batch operations validate every hop before taking the write guard and
//! apply all hops under that one guard, so readers see either none or all
//! of the batch.

use std::collections::BTreeMap;

use hers_core::NodeId;
use hers_graph::{RoadNetwork, SharedNetwork, check_multiplier};

use crate::{ConditionError, ConditionRecord, ConditionResult, ConditionSummary, EdgeKey};

type RecordTable = BTreeMap<EdgeKey, ConditionRecord>;

// ── ConditionSimulator ────────────────────────────────────────────────────────

pub struct ConditionSimulator {
    network: SharedNetwork,
    records: RecordTable,
}

impl ConditionSimulator {
    pub fn new(network: SharedNetwork) -> Self {
        Self { network, records: RecordTable::new() }
    }

    /// The handle mutations are applied through.
    pub fn network(&self) -> &SharedNetwork {
        &self.network
    }

    // ── Single-edge mutations ─────────────────────────────────────────────

    /// Close `from → to`.
    ///
    /// Returns `Ok(false)` (and records nothing) if both nodes exist but are
    /// not joined by an edge.
    ///
    /// # Errors
    ///
    /// [`ConditionError::InvalidMutation`] if either node is not in the graph.
    pub fn block_road(&mut self, from: NodeId, to: NodeId, reason: &str) -> ConditionResult<bool> {
        let Self { network, records } = self;
        let mut net = network.write();
        check_nodes(&net, from, to)?;
        Ok(apply_block(records, &mut net, EdgeKey::new(from, to), reason))
    }

    /// Reopen `from → to`.  Congestion on the edge, if any, is kept.
    pub fn unblock_road(&mut self, from: NodeId, to: NodeId) -> ConditionResult<bool> {
        let Self { network, records } = self;
        let mut net = network.write();
        check_nodes(&net, from, to)?;
        Ok(apply_unblock(records, &mut net, EdgeKey::new(from, to)))
    }

    /// Scale `from → to` to `free_flow * multiplier`, labelled with `severity`.
    ///
    /// A multiplier of exactly 1.0 behaves like [`Self::clear_traffic`].
    ///
    /// # Errors
    ///
    /// [`ConditionError::InvalidMutation`] if `multiplier` is not a finite
    /// number ≥ 1 or either node is not in the graph.
    pub fn apply_traffic(
        &mut self,
        from:       NodeId,
        to:         NodeId,
        multiplier: f64,
        severity:   &str,
    ) -> ConditionResult<bool> {
        check_multiplier(multiplier).map_err(|e| ConditionError::InvalidMutation(e.to_string()))?;
        let Self { network, records } = self;
        let mut net = network.write();
        check_nodes(&net, from, to)?;
        apply_congestion(records, &mut net, EdgeKey::new(from, to), multiplier, severity)
    }

    /// Restore `from → to` to free-flow weight.  A closure, if any, is kept.
    pub fn clear_traffic(&mut self, from: NodeId, to: NodeId) -> ConditionResult<bool> {
        let Self { network, records } = self;
        let mut net = network.write();
        check_nodes(&net, from, to)?;
        apply_congestion(records, &mut net, EdgeKey::new(from, to), 1.0, "")
    }

    // ── Batch mutations ───────────────────────────────────────────────────

    /// Close the hops `path[i] → path[i + 1]` for `i` in `start..end`.
    ///
    /// `end` is clamped to the last hop of `path`.  Returns the number of
    /// hops that matched an edge.
    ///
    /// # Errors
    ///
    /// [`ConditionError::InvalidMutation`] if `start > end` or any node on the
    /// segment is not in the graph.  Nothing is applied in that case.
    pub fn block_path_segment(
        &mut self,
        path:   &[NodeId],
        start:  usize,
        end:    usize,
        reason: &str,
    ) -> ConditionResult<usize> {
        let hops = segment(path, start, end)?;
        let Self { network, records } = self;
        let mut net = network.write();
        for key in &hops {
            check_nodes(&net, key.from, key.to)?;
        }

        let applied = hops
            .into_iter()
            .filter(|&key| apply_block(records, &mut net, key, reason))
            .count();
        tracing::info!(applied, start, end, reason, "path segment blocked");
        Ok(applied)
    }

    /// Congest the hops `path[i] → path[i + 1]` for `i` in `start..end`.
    ///
    /// Same range and validation rules as [`Self::block_path_segment`]; the
    /// multiplier is validated first.
    pub fn apply_traffic_jam(
        &mut self,
        path:       &[NodeId],
        start:      usize,
        end:        usize,
        multiplier: f64,
        severity:   &str,
    ) -> ConditionResult<usize> {
        check_multiplier(multiplier).map_err(|e| ConditionError::InvalidMutation(e.to_string()))?;
        let hops = segment(path, start, end)?;
        let Self { network, records } = self;
        let mut net = network.write();
        for key in &hops {
            check_nodes(&net, key.from, key.to)?;
        }

        let mut applied = 0;
        for key in hops {
            if apply_congestion(records, &mut net, key, multiplier, severity)? {
                applied += 1;
            }
        }
        tracing::info!(applied, start, end, multiplier, severity, "traffic jam applied");
        Ok(applied)
    }

    /// Put every recorded edge back to free-flow and empty the table.
    ///
    /// Returns the number of edges restored.
    pub fn clear_all(&mut self) -> usize {
        let Self { network, records } = self;
        let mut net = network.write();
        let restored = records.len();
        for key in records.keys() {
            net.reset_free_flow(key.from, key.to);
        }
        records.clear();
        tracing::info!(restored, "all road conditions cleared");
        restored
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn record(&self, from: NodeId, to: NodeId) -> Option<&ConditionRecord> {
        self.records.get(&EdgeKey::new(from, to))
    }

    /// Active records in `(from, to)` order.
    pub fn records(&self) -> impl Iterator<Item = &ConditionRecord> + '_ {
        self.records.values()
    }

    pub fn is_clear(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> ConditionSummary {
        let mut summary = ConditionSummary { affected: self.records.len(), ..Default::default() };
        for rec in self.records.values() {
            if rec.blocked {
                summary.blocked += 1;
            }
            if rec.multiplier != 1.0 {
                summary.congested += 1;
            }
        }
        summary
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn check_nodes(net: &RoadNetwork, from: NodeId, to: NodeId) -> ConditionResult<()> {
    for node in [from, to] {
        if !net.contains(node) {
            return Err(ConditionError::InvalidMutation(format!("node {node} is not in the road network")));
        }
    }
    Ok(())
}

/// Hops `path[i] → path[i + 1]` for `i` in `start..min(end, path.len() - 1)`.
fn segment(path: &[NodeId], start: usize, end: usize) -> ConditionResult<Vec<EdgeKey>> {
    if start > end {
        return Err(ConditionError::InvalidMutation(format!("segment start {start} is after end {end}")));
    }
    let end = end.min(path.len().saturating_sub(1));
    Ok((start..end).map(|i| EdgeKey::new(path[i], path[i + 1])).collect())
}

fn apply_block(records: &mut RecordTable, net: &mut RoadNetwork, key: EdgeKey, reason: &str) -> bool {
    if !net.block(key.from, key.to) {
        return false;
    }
    let rec = records.entry(key).or_insert_with(|| ConditionRecord::free_flow(key));
    rec.blocked = true;
    rec.reason  = reason.to_owned();
    tracing::info!(edge = %key, reason, "road blocked");
    true
}

fn apply_unblock(records: &mut RecordTable, net: &mut RoadNetwork, key: EdgeKey) -> bool {
    if !net.unblock(key.from, key.to) {
        return false;
    }
    if let Some(rec) = records.get_mut(&key) {
        rec.blocked = false;
        if rec.is_free_flow() {
            records.remove(&key);
        }
    }
    tracing::info!(edge = %key, "road unblocked");
    true
}

fn apply_congestion(
    records:    &mut RecordTable,
    net:        &mut RoadNetwork,
    key:        EdgeKey,
    multiplier: f64,
    severity:   &str,
) -> ConditionResult<bool> {
    if !net.set_congestion(key.from, key.to, multiplier)? {
        return Ok(false);
    }
    let rec = records.entry(key).or_insert_with(|| ConditionRecord::free_flow(key));
    rec.multiplier = multiplier;
    if multiplier != 1.0 {
        rec.reason = severity.to_owned();
    }
    if rec.is_free_flow() {
        records.remove(&key);
    }
    tracing::info!(edge = %key, multiplier, severity, "traffic updated");
    Ok(true)
}
