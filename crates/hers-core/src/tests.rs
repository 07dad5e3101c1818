//! Unit tests for hers-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::default(), EdgeId::INVALID);
        assert!(!NodeId::INVALID.is_valid());
        assert!(NodeId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "7");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(24.8607, 67.0011);
        assert!(p.distance_m(p) < 1e-6);
    }

    #[test]
    fn one_degree_latitude() {
        // 1° of latitude ≈ 111.195 km on a 6 371 km sphere.
        let a = GeoPoint::new(24.0, 67.0);
        let b = GeoPoint::new(25.0, 67.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 1.0, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = GeoPoint::new(24.82, 67.03);
        let b = GeoPoint::new(24.93, 67.08);
        assert!((a.distance_m(b) - b.distance_m(a)).abs() < 1e-9);
    }

    #[test]
    fn validity() {
        assert!(GeoPoint::new(24.8, 67.0).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }
}

#[cfg(test)]
mod config {
    use crate::{Algorithm, RoutingConfig};

    #[test]
    fn defaults() {
        let cfg = RoutingConfig::default();
        assert_eq!(cfg.base_speed_mps, 13.89);
        assert_eq!(cfg.transport_speed_kmh, 40.0);
        assert_eq!(cfg.default_algorithm, Algorithm::AStar);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_speed() {
        let cfg = RoutingConfig { base_speed_mps: 0.0, ..RoutingConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = RoutingConfig { transport_speed_kmh: -1.0, ..RoutingConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn straight_line_eta() {
        // 10 km at 40 km/h = 15 min.
        let cfg = RoutingConfig::default();
        assert!((cfg.straight_line_eta_min(10_000.0) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn algorithm_display() {
        assert_eq!(Algorithm::Dijkstra.to_string(), "Dijkstra");
        assert_eq!(Algorithm::AStar.to_string(), "A*");
    }
}
