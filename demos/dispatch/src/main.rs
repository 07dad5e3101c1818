//! dispatch: end-to-end walk through the hers routing core.
//!
//! Loads a synthetic city grid, dispatches the fastest suitable ambulance to
//! an incident, closes roads on its route, re-ranks the remaining fleet
//! under the new conditions, picks a hospital by road time and clinical
//! score, then reverts every condition.
//!
//! `RUST_LOG=debug cargo run -p dispatch` shows per-search diagnostics.

mod network;

use std::io::Cursor;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use hers_conditions::ConditionSimulator;
use hers_core::{Algorithm, RoutingConfig};
use hers_dispatch::{Direction, Dispatcher, Ranker};
use hers_graph::{SharedNetwork, load_network_reader};
use hers_registry::{Facility, FacilityRegistry, Fleet, Resource, ResourceKind};
use hers_triage::{EmergencyNeed, RequestProfile, Severity, recommend, rescore};

use network::{grid_csv, lattice_pos};

// ── Constants ─────────────────────────────────────────────────────────────────

const ROWS: usize = 24;
const COLS: usize = 24;
const SEED: u64   = 42;

// ── Registries ────────────────────────────────────────────────────────────────

fn fleet() -> Result<Fleet> {
    let at = |row, col| lattice_pos(ROWS, COLS, row, col);
    Ok(Fleet::from_resources([
        Resource::new("AMB-001", "Clifton Station",  ResourceKind::Advanced, at(2, 3)),
        Resource::new("AMB-002", "Clifton Station",  ResourceKind::Basic,    at(2, 3)),
        Resource::new("AMB-003", "Saddar Station",   ResourceKind::Critical, at(12, 10)),
        Resource::new("AMB-004", "Gulshan Station",  ResourceKind::Advanced, at(20, 18)),
        Resource::new("AMB-005", "Korangi Station",  ResourceKind::Basic,    at(6, 21)),
        Resource::new("AMB-006", "DHA Station",      ResourceKind::Critical, at(3, 15)),
    ])?)
}

fn facilities() -> FacilityRegistry {
    let at = |row, col| lattice_pos(ROWS, COLS, row, col);
    let facility = |name: &str, category: &str, position, capacity, er, trauma| Facility {
        name: name.to_owned(),
        category: category.to_owned(),
        position,
        capacity,
        has_emergency: er,
        has_trauma_center: trauma,
    };
    FacilityRegistry::new(vec![
        facility("Civil Hospital",          "Tertiary Teaching Hospital", at(11, 9),  1_900, true,  true),
        facility("National Heart Institute", "Cardiac Specialty",         at(16, 14), 350,   true,  false),
        facility("City Children's Hospital", "Pediatric Hospital",        at(8, 17),  180,   true,  false),
        facility("Northside Clinic",        "General",                    at(19, 20), 40,    false, false),
        facility("Metro Medical Center",    "Medical Center",             at(4, 6),   420,   true,  true),
    ])
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    // `RUST_LOG` wins when set; otherwise log at info.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== dispatch: hers emergency routing core ===");
    println!();

    // 1. Road network.
    let config = RoutingConfig::default();
    config.validate()?;
    let (nodes_csv, edges_csv) = grid_csv(ROWS, COLS, SEED);
    let loaded = load_network_reader(Cursor::new(nodes_csv), Cursor::new(edges_csv), &config)?;
    println!(
        "Road network: {} nodes, {} edges ({ROWS}×{COLS} grid, seed {SEED})",
        loaded.network.node_count(),
        loaded.network.edge_count()
    );
    let net = SharedNetwork::new(loaded.network);

    // 2. Dijkstra vs A* across the grid.
    let corner_a = net.nearest_node(lattice_pos(ROWS, COLS, 0, 0));
    let corner_b = net.nearest_node(lattice_pos(ROWS, COLS, ROWS - 1, COLS - 1));
    for algorithm in [Algorithm::Dijkstra, Algorithm::AStar] {
        println!("  {}", net.find_path(corner_a, corner_b, algorithm));
    }
    println!();

    // 3. Incident and dispatch.
    let incident = lattice_pos(ROWS, COLS, 14, 12);
    let profile  = RequestProfile::new(67, EmergencyNeed::Cardiac, Severity::Critical);
    let fleet    = fleet()?;
    println!("Incident at {incident}: {profile}");
    println!("Fleet: {}", fleet.stats());

    let dispatcher = Dispatcher::new(net.clone());
    let assignment = dispatcher.dispatch_at_least(
        incident,
        &fleet,
        profile.required_resource_kind(),
        config.default_algorithm,
        "INC-0001",
    )?;
    println!(
        "Dispatched {} - ETA {:.1} min over {:.2} km (rank {})",
        assignment.resource,
        assignment.eta_minutes(),
        assignment.path.distance_km(),
        assignment.rank
    );
    println!("  route: {}", assignment.path.route_summary());
    println!();

    // 4. Conditions on the dispatched route.
    let mut conditions = ConditionSimulator::new(net.clone());
    let route = assignment.path.nodes.clone();
    let blocked = conditions.block_path_segment(&route, 1, 2, "Accident")?;
    let jammed  = conditions.apply_traffic_jam(&route, 2, 5, 2.5, "Heavy")?;
    println!("Closed {blocked} and congested {jammed} road segments: {}", conditions.summary());
    for record in conditions.records() {
        println!("  {record}");
    }

    let ranker = Ranker::new(net.clone());
    let available = fleet.available();
    let reranked = ranker.rank(incident, &available, config.default_algorithm, Direction::ToQuery, Some(3));
    println!("Next available units under current conditions:");
    for (i, r) in reranked.iter().enumerate() {
        println!(
            "  #{} {} - {:.1} min by road, {:.2} km straight line",
            i + 1,
            r.candidate,
            r.eta_minutes(),
            r.straight_line_m / 1000.0
        );
    }
    println!();

    // 5. Hospital selection.
    let hospitals = facilities();
    println!("Straight-line recommendations:");
    for rec in recommend(&profile, incident, hospitals.as_slice(), 3) {
        println!("  {rec}");
    }

    let by_road = ranker.rank(incident, hospitals.as_slice(), Algorithm::AStar, Direction::FromQuery, None);
    println!("Road-network recommendations:");
    for rec in rescore(&profile, by_road, 3) {
        println!("  {rec}");
        println!("      {}", rec.score.rationale);
    }
    println!();

    // 6. Revert.
    let restored = conditions.clear_all();
    println!("Cleared {restored} road conditions: {}", conditions.summary());
    if let (Some(from), Some(to)) = (assignment.path.source(), assignment.path.destination()) {
        let after = net.find_path(from, to, config.default_algorithm);
        println!(
            "Original route cost restored: {:.1} min (dispatch ETA {:.1} min)",
            after.eta_minutes(),
            assignment.eta_minutes()
        );
    }

    fleet.release(assignment.resource.id())?;
    println!("Fleet: {}", fleet.stats());

    Ok(())
}
