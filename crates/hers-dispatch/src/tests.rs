//! Ranking and dispatch tests for hers-dispatch.

use hers_core::{GeoPoint, NodeId};
use hers_graph::{RoadNetworkBuilder, SharedNetwork};
use hers_registry::{Fleet, Resource, ResourceKind};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Degrees of longitude (or latitude) per kilometre on the equator.
const DEG_PER_KM: f64 = 1.0 / 111.195;

fn km_east(km: f64) -> GeoPoint {
    GeoPoint::new(0.0, km * DEG_PER_KM)
}

const QUERY: GeoPoint = GeoPoint { lat: 0.0, lon: 0.0 };

/// Query point Q at the origin and three stations:
///
/// | Node | Straight line | Road to Q | Note                        |
/// |------|---------------|-----------|-----------------------------|
/// | A    | 1 km east     | 8 000 m   | across a river, long detour |
/// | B    | 3 km west     | 3 200 m   |                             |
/// | C    | 5 km north    | 5 100 m   |                             |
/// | D    | 2 km south    | —         | isolated                    |
/// | E    | 4 km east     | Q→E only  | one-way 4 000 m             |
///
/// All roads except Q→E are two-way.
struct Scenario {
    net:   SharedNetwork,
    nodes: [NodeId; 6],
}

fn scenario() -> Scenario {
    let mut b = RoadNetworkBuilder::new();
    let q  = b.add_node(QUERY);
    let a  = b.add_node(km_east(1.0));
    let bn = b.add_node(km_east(-3.0));
    let c  = b.add_node(GeoPoint::new(5.0 * DEG_PER_KM, 0.0));
    let d  = b.add_node(GeoPoint::new(-2.0 * DEG_PER_KM, 0.0));
    let e  = b.add_node(km_east(4.0));
    b.add_road(a, q, 8_000.0);
    b.add_road(bn, q, 3_200.0);
    b.add_road(c, q, 5_100.0);
    b.add_directed_edge(q, e, 4_000.0);
    Scenario { net: SharedNetwork::new(b.build().unwrap()), nodes: [q, a, bn, c, d, e] }
}

fn stations() -> Vec<(&'static str, GeoPoint)> {
    vec![
        ("A", km_east(1.0)),
        ("B", km_east(-3.0)),
        ("C", GeoPoint::new(5.0 * DEG_PER_KM, 0.0)),
    ]
}

/// A critical unit at A, a basic unit at B, an advanced unit at C.
fn fleet() -> Fleet {
    let kinds = [ResourceKind::Critical, ResourceKind::Basic, ResourceKind::Advanced];
    Fleet::from_resources(
        stations()
            .into_iter()
            .zip(kinds)
            .map(|((name, pos), kind)| Resource::new(format!("AMB-{name}"), name, kind, pos)),
    )
    .unwrap()
}

// ── Ranker ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ranker {
    use hers_core::{Algorithm, GeoPoint};
    use hers_registry::Located;
    use crate::{Direction, Ranker};
    use super::*;

    /// Minimal candidate type: anything `Located` can be ranked.
    #[derive(Debug)]
    struct Pin(&'static str, Option<GeoPoint>);

    impl Located for Pin {
        fn position(&self) -> Option<GeoPoint> {
            self.1
        }
    }

    fn pins() -> Vec<Pin> {
        stations().into_iter().map(|(name, pos)| Pin(name, Some(pos))).collect()
    }

    fn names(ranked: &[crate::Ranked<'_, Pin>]) -> Vec<&'static str> {
        ranked.iter().map(|r| r.candidate.0).collect()
    }

    #[test]
    fn orders_by_road_time_not_straight_line() {
        let s = scenario();
        let ranker = Ranker::new(s.net);
        let candidates = pins();
        let ranked = ranker.rank(QUERY, &candidates, Algorithm::AStar, Direction::ToQuery, None);

        assert_eq!(names(&ranked), vec!["B", "C", "A"]);
        assert!((ranked[0].straight_line_m - 3_000.0).abs() < 1.0);
        assert!((ranked[2].straight_line_m - 1_000.0).abs() < 1.0);
        assert_eq!(ranked[0].road_distance_m(), 3_200.0);
    }

    #[test]
    fn both_algorithms_agree() {
        let s = scenario();
        let ranker = Ranker::new(s.net);
        let candidates = pins();
        let dijkstra = ranker.rank(QUERY, &candidates, Algorithm::Dijkstra, Direction::ToQuery, None);
        let astar    = ranker.rank(QUERY, &candidates, Algorithm::AStar, Direction::ToQuery, None);
        assert_eq!(names(&dijkstra), names(&astar));
    }

    #[test]
    fn limit_truncates() {
        let s = scenario();
        let candidates = pins();
        let ranked = Ranker::new(s.net).rank(QUERY, &candidates, Algorithm::AStar, Direction::ToQuery, Some(2));
        assert_eq!(names(&ranked), vec!["B", "C"]);
    }

    #[test]
    fn unreachable_and_unlocated_are_skipped() {
        let s = scenario();
        let mut candidates = pins();
        candidates.push(Pin("D", Some(GeoPoint::new(-2.0 * DEG_PER_KM, 0.0))));
        candidates.push(Pin("nowhere", None));

        let ranked = Ranker::new(s.net).rank(QUERY, &candidates, Algorithm::AStar, Direction::ToQuery, None);
        assert_eq!(names(&ranked), vec!["B", "C", "A"]);
    }

    #[test]
    fn invalid_query_ranks_nothing() {
        let s = scenario();
        let candidates = pins();
        let ranker = Ranker::new(s.net);
        for query in [
            GeoPoint::new(f64::NAN, 0.0),
            GeoPoint::new(0.0, f64::INFINITY),
            GeoPoint::new(91.0, 0.0),
            GeoPoint::new(0.0, -181.0),
        ] {
            for direction in [Direction::ToQuery, Direction::FromQuery] {
                let ranked = ranker.rank(query, &candidates, Algorithm::AStar, direction, None);
                assert!(ranked.is_empty(), "{query} ranked {:?}", names(&ranked));
            }
        }
    }

    #[test]
    fn ties_keep_input_order() {
        let s = scenario();
        let pos = Some(km_east(-3.0));
        let candidates = vec![Pin("first", pos), Pin("second", pos), Pin("third", pos)];
        let ranked = Ranker::new(s.net).rank(QUERY, &candidates, Algorithm::Dijkstra, Direction::ToQuery, None);
        assert_eq!(names(&ranked), vec!["first", "second", "third"]);
    }

    #[test]
    fn direction_selects_search_orientation() {
        let s = scenario();
        let ranker = Ranker::new(s.net);
        let candidates = vec![Pin("E", Some(km_east(4.0)))];

        assert!(ranker.rank(QUERY, &candidates, Algorithm::AStar, Direction::ToQuery, None).is_empty());
        let from = ranker.rank(QUERY, &candidates, Algorithm::AStar, Direction::FromQuery, None);
        assert_eq!(from.len(), 1);
        assert_eq!(from[0].path.nodes.first(), Some(&s.nodes[0]));
    }

    #[test]
    fn blocked_road_drops_candidate() {
        let s = scenario();
        let [q, _, b, ..] = s.nodes;
        s.net.write().block(b, q);

        let candidates = pins();
        let ranked = Ranker::new(s.net).rank(QUERY, &candidates, Algorithm::AStar, Direction::ToQuery, None);
        assert_eq!(names(&ranked), vec!["C", "A"]);
    }

    #[test]
    fn congestion_reorders() {
        let s = scenario();
        let [q, _, b, ..] = s.nodes;
        s.net.write().set_congestion(b, q, 2.0).unwrap();

        let candidates = pins();
        let ranked = Ranker::new(s.net).rank(QUERY, &candidates, Algorithm::AStar, Direction::ToQuery, None);
        // B: 6 400 m-equivalent, C: 5 100 m.
        assert_eq!(names(&ranked), vec!["C", "B", "A"]);
    }

    #[test]
    fn fleet_resources_rank_through_references() {
        let s = scenario();
        let fleet = fleet();
        let available = fleet.available();
        let ranked = Ranker::new(s.net).rank(QUERY, &available, Algorithm::AStar, Direction::ToQuery, None);
        let ids: Vec<&str> = ranked.iter().map(|r| r.candidate.id()).collect();
        assert_eq!(ids, vec!["AMB-B", "AMB-C", "AMB-A"]);
    }
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatcher {
    use std::thread;

    use hers_core::Algorithm;
    use hers_registry::{ResourceKind, ResourceStatus};
    use crate::{DispatchError, Dispatcher};
    use super::*;

    #[test]
    fn commits_fastest_unit() {
        let s = scenario();
        let fleet = fleet();
        let dispatcher = Dispatcher::new(s.net);

        let a = dispatcher.dispatch(QUERY, &fleet, Algorithm::AStar, "INC-1").unwrap();
        assert_eq!(a.resource.id(), "AMB-B");
        assert_eq!(a.rank, 0);
        assert_eq!(a.resource.status(), ResourceStatus::Dispatched);
        assert_eq!(a.resource.assignment().as_deref(), Some("INC-1"));
    }

    #[test]
    fn successive_dispatches_use_next_unit() {
        let s = scenario();
        let fleet = fleet();
        let dispatcher = Dispatcher::new(s.net);

        let ids: Vec<&str> = (0..3)
            .map(|i| {
                dispatcher
                    .dispatch(QUERY, &fleet, Algorithm::Dijkstra, &format!("INC-{i}"))
                    .unwrap()
                    .resource
                    .id()
            })
            .collect();
        assert_eq!(ids, vec!["AMB-B", "AMB-C", "AMB-A"]);

        let err = dispatcher.dispatch(QUERY, &fleet, Algorithm::Dijkstra, "INC-4").unwrap_err();
        assert!(matches!(err, DispatchError::NoReachableCandidate { considered: 0 }));
    }

    #[test]
    fn minimum_kind_filters_units() {
        let s = scenario();
        let fleet = fleet();
        let dispatcher = Dispatcher::new(s.net);

        let a = dispatcher
            .dispatch_at_least(QUERY, &fleet, ResourceKind::Advanced, Algorithm::AStar, "INC-1")
            .unwrap();
        assert_eq!(a.resource.id(), "AMB-C");
        assert!(fleet.get("AMB-B").unwrap().is_available());
    }

    #[test]
    fn unreachable_fleet_is_an_error() {
        let s = scenario();
        let fleet = Fleet::from_resources([Resource::new(
            "AMB-D",
            "D",
            ResourceKind::Basic,
            GeoPoint::new(-2.0 * DEG_PER_KM, 0.0),
        )])
        .unwrap();

        let err = Dispatcher::new(s.net).dispatch(QUERY, &fleet, Algorithm::AStar, "INC-1").unwrap_err();
        assert!(matches!(err, DispatchError::NoReachableCandidate { considered: 1 }));
        assert!(fleet.get("AMB-D").unwrap().is_available());
    }

    #[test]
    fn invalid_query_commits_nothing() {
        let s = scenario();
        let fleet = fleet();

        let err = Dispatcher::new(s.net)
            .dispatch(GeoPoint::new(f64::NAN, 0.0), &fleet, Algorithm::AStar, "INC-1")
            .unwrap_err();
        assert!(matches!(err, DispatchError::NoReachableCandidate { considered: 3 }));
        assert_eq!(fleet.available().len(), 3);
    }

    /// Four dispatchers race for three units: each unit is committed once
    /// and the losing dispatcher reports no candidate.
    #[test]
    fn concurrent_dispatch_never_double_commits() {
        let s = scenario();
        let fleet = fleet();
        let dispatcher = Dispatcher::new(s.net);

        let results: Vec<Option<String>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let (fleet, dispatcher) = (&fleet, &dispatcher);
                    scope.spawn(move || {
                        dispatcher
                            .dispatch(QUERY, fleet, Algorithm::AStar, &format!("INC-{i}"))
                            .ok()
                            .map(|a| a.resource.id().to_owned())
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let mut won: Vec<String> = results.into_iter().flatten().collect();
        won.sort();
        assert_eq!(won, vec!["AMB-A", "AMB-B", "AMB-C"]);
        assert_eq!(fleet.stats().available, 0);
    }
}
