//! Unit and property tests for hers-triage.

use hers_core::GeoPoint;
use hers_registry::Facility;

use crate::{EmergencyNeed, RequestProfile, Severity};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn fac(category: &str, capacity: u32, has_emergency: bool, has_trauma_center: bool) -> Facility {
    Facility {
        name: category.to_owned(),
        category: category.to_owned(),
        position: GeoPoint::new(0.0, 0.0),
        capacity,
        has_emergency,
        has_trauma_center,
    }
}

fn profile(age: u32, need: EmergencyNeed, severity: Severity) -> RequestProfile {
    RequestProfile::new(age, need, severity)
}

// ── RequestProfile ────────────────────────────────────────────────────────────

#[cfg(test)]
mod request_profile {
    use hers_registry::ResourceKind;
    use super::*;

    #[test]
    fn age_bands() {
        assert!(profile(17, EmergencyNeed::General, Severity::Moderate).is_pediatric());
        assert!(!profile(18, EmergencyNeed::General, Severity::Moderate).is_pediatric());
        assert!(!profile(64, EmergencyNeed::General, Severity::Moderate).is_geriatric());
        assert!(profile(65, EmergencyNeed::General, Severity::Moderate).is_geriatric());
    }

    #[test]
    fn severity_maps_to_unit_kind() {
        let kind = |s| profile(30, EmergencyNeed::General, s).required_resource_kind();
        assert_eq!(kind(Severity::Critical), ResourceKind::Critical);
        assert_eq!(kind(Severity::Serious), ResourceKind::Advanced);
        assert_eq!(kind(Severity::Moderate), ResourceKind::Basic);
    }

    #[test]
    fn display() {
        let p = profile(45, EmergencyNeed::Cardiac, Severity::Critical);
        assert_eq!(p.to_string(), "Age 45 - Cardiac Emergency - Severity: CRITICAL");
        assert_eq!(Severity::Serious.priority(), 2);
    }
}

// ── Rule table ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rules {
    use crate::score;
    use super::*;

    #[test]
    fn small_clinic_far_away() {
        // 100 - 20 (10 km) - 30 (no ER) - 10 (capacity) = 40
        let s = score(
            &fac("Clinic", 30, false, false),
            &profile(30, EmergencyNeed::General, Severity::Moderate),
            10_000.0,
        );
        assert_eq!(s.value, 40);
        assert_eq!(s.rationale, "Acceptable match. Far distance. No dedicated emergency department.");
    }

    #[test]
    fn trauma_centre_for_critical_trauma_clamps() {
        let s = score(
            &fac("Trauma Center", 250, true, true),
            &profile(30, EmergencyNeed::Trauma, Severity::Critical),
            7_500.0,
        );
        assert_eq!(s.value, 100);
        assert_eq!(
            s.rationale,
            "Excellent match. Moderate distance. Has trauma center for injury treatment. \
             24/7 emergency department. Well-equipped for critical cases."
        );
    }

    #[test]
    fn heart_category_matches_cardiac_need() {
        // 100 - 100 (50 km) + 35 (heart) + 20 (ER) + 15 (serious) + 10 (capacity) = 80
        let s = score(
            &fac("Heart Institute", 180, true, false),
            &profile(70, EmergencyNeed::Cardiac, Severity::Serious),
            50_000.0,
        );
        assert_eq!(s.value, 80);
        // The specialty line wants the word "cardiac" itself.
        assert_eq!(s.rationale, "Excellent match. Far distance. 24/7 emergency department.");
    }

    #[test]
    fn pediatric_bonuses_stack() {
        // 100 - 120 (60 km) + 40 (child) + 20 (ER) + 25 (age) + 5 (capacity) = 70
        let s = score(
            &fac("Children's Hospital", 120, true, false),
            &profile(8, EmergencyNeed::Pediatric, Severity::Moderate),
            60_000.0,
        );
        assert_eq!(s.value, 70);
        assert_eq!(s.rationale, "Good match. Far distance. 24/7 emergency department.");
    }

    #[test]
    fn pediatric_specialty_line() {
        let s = score(
            &fac("Pediatric Hospital", 120, true, false),
            &profile(8, EmergencyNeed::Pediatric, Severity::Moderate),
            1_000.0,
        );
        assert!(s.rationale.contains("Specialized pediatric care available."));
    }

    #[test]
    fn critical_halves_distance_penalty_at_tertiary_centre() {
        // 100 - 160 (80 km) + 35 (neuro) + 20 (ER) + 20 (medical center)
        //     + 40 (critical distance relief) + 15 (capacity) + 12 (tertiary) = 82
        let s = score(
            &fac("Tertiary Neuro Medical Center", 400, true, false),
            &profile(50, EmergencyNeed::Stroke, Severity::Critical),
            80_000.0,
        );
        assert_eq!(s.value, 82);
        assert_eq!(
            s.rationale,
            "Excellent match. Far distance. 24/7 emergency department. Well-equipped for critical cases."
        );
    }

    #[test]
    fn critical_at_small_clinic() {
        // 100 - 2 - 30 + 0 (trunc 0.5) - 10 = 58
        let s = score(
            &fac("Clinic", 40, false, false),
            &profile(30, EmergencyNeed::General, Severity::Critical),
            1_000.0,
        );
        assert_eq!(s.value, 58);
        assert_eq!(
            s.rationale,
            "Acceptable match. Very close proximity. No dedicated emergency department. \
             May lack resources for critical care."
        );
    }

    #[test]
    fn respiratory_specialty_without_er() {
        // 100 - 8 + 30 - 30 + 5 = 97
        let s = score(
            &fac("Pulmonary Care", 60, false, false),
            &profile(30, EmergencyNeed::Respiratory, Severity::Serious),
            4_000.0,
        );
        assert_eq!(s.value, 97);
        assert_eq!(s.rationale, "Excellent match. Close proximity. No dedicated emergency department.");
    }

    #[test]
    fn geriatric_prefers_large_hospitals() {
        let hospital = fac("General", 250, true, false);
        let young = score(&hospital, &profile(40, EmergencyNeed::General, Severity::Moderate), 45_000.0);
        let old   = score(&hospital, &profile(80, EmergencyNeed::General, Severity::Moderate), 45_000.0);
        // 100 - 90 + 20 + 20 + 10 (capacity) = 60, plus 10 for age.
        assert_eq!(young.value, 60);
        assert_eq!(old.value, 70);
    }

    #[test]
    fn category_match_ignores_case() {
        let upper = score(&fac("CARDIAC CENTRE", 100, true, false), &profile(30, EmergencyNeed::Cardiac, Severity::Moderate), 90_000.0);
        let lower = score(&fac("cardiac centre", 100, true, false), &profile(30, EmergencyNeed::Cardiac, Severity::Moderate), 90_000.0);
        assert_eq!(upper, lower);
    }

    #[test]
    fn floor_is_zero() {
        let s = score(
            &fac("Clinic", 0, false, false),
            &profile(30, EmergencyNeed::General, Severity::Moderate),
            1_000_000.0,
        );
        assert_eq!(s.value, 0);
        assert!(s.rationale.starts_with("Suboptimal match. Far distance."));
    }
}

// ── Recommendations ───────────────────────────────────────────────────────────

#[cfg(test)]
mod recommendations {
    use hers_core::{Algorithm, GeoPoint};
    use hers_dispatch::{Direction, Ranker};
    use hers_graph::{RoadNetworkBuilder, SharedNetwork};
    use hers_registry::Facility;
    use crate::{recommend, rescore};
    use super::*;

    const DEG_PER_KM: f64 = 1.0 / 111.195;

    fn at(mut f: Facility, km_east: f64) -> Facility {
        f.position = GeoPoint::new(0.0, km_east * DEG_PER_KM);
        f
    }

    #[test]
    fn best_score_first_with_straight_line_eta() {
        let facilities = vec![
            at(fac("Clinic", 30, false, false), 1.0),
            at(fac("General Hospital", 200, true, false), 10.0),
        ];
        let p = profile(40, EmergencyNeed::General, Severity::Moderate);
        let recs = recommend(&p, GeoPoint::new(0.0, 0.0), &facilities, 5);

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].facility.name, "General Hospital");
        assert!((recs[0].distance_m - 10_000.0).abs() < 1.0);
        // 10 km at 40 km/h.
        assert!((recs[0].eta_minutes - 15.0).abs() < 0.01);
        assert!(recs[0].path.is_none());
    }

    #[test]
    fn ties_keep_input_order_and_top_n_truncates() {
        let facilities = vec![
            at(fac("First", 400, true, true), 1.0),
            at(fac("Second", 400, true, true), 1.0),
            at(fac("Third", 400, true, true), 1.0),
        ];
        let p = profile(40, EmergencyNeed::Trauma, Severity::Serious);
        let recs = recommend(&p, GeoPoint::new(0.0, 0.0), &facilities, 2);
        let names: Vec<&str> = recs.iter().map(|r| r.facility.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn display_line() {
        let facilities = vec![at(fac("General Hospital", 200, true, false), 10.0)];
        let p = profile(40, EmergencyNeed::General, Severity::Moderate);
        let recs = recommend(&p, GeoPoint::new(0.0, 0.0), &facilities, 1);
        assert_eq!(
            recs[0].to_string(),
            "General Hospital - Score: 100/100 - Distance: 10.00 km - ETA: 15.0 min"
        );
    }

    /// The clinic is the fastest by road, but the hospital scores higher.
    #[test]
    fn rescore_uses_road_distance() {
        let mut b = RoadNetworkBuilder::new();
        let q = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0 * DEG_PER_KM));
        let h = b.add_node(GeoPoint::new(0.0, 4.0 * DEG_PER_KM));
        b.add_road(q, c, 2_000.0);
        b.add_road(q, h, 6_000.0);
        let net = SharedNetwork::new(b.build().unwrap());

        let facilities = vec![
            at(fac("Clinic", 40, false, false), 1.0),
            at(fac("General Hospital", 300, true, false), 4.0),
        ];
        let ranked = Ranker::new(net).rank(
            GeoPoint::new(0.0, 0.0),
            &facilities,
            Algorithm::AStar,
            Direction::FromQuery,
            None,
        );
        assert_eq!(ranked[0].candidate.name, "Clinic");

        let p = profile(40, EmergencyNeed::General, Severity::Moderate);
        let recs = rescore(&p, ranked, 5);
        assert_eq!(recs[0].facility.name, "General Hospital");
        assert_eq!(recs[0].distance_m, 6_000.0);
        assert!(recs[0].path.as_ref().is_some_and(|path| path.is_found()));
        // 100 - 4 - 30 - 10 = 56 on road distance.
        assert_eq!(recs[1].score.value, 56);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use crate::score;
    use super::*;

    fn need() -> impl Strategy<Value = EmergencyNeed> {
        prop_oneof![
            Just(EmergencyNeed::Cardiac),
            Just(EmergencyNeed::Trauma),
            Just(EmergencyNeed::Stroke),
            Just(EmergencyNeed::Respiratory),
            Just(EmergencyNeed::Pediatric),
            Just(EmergencyNeed::General),
        ]
    }

    fn severity() -> impl Strategy<Value = Severity> {
        prop_oneof![Just(Severity::Critical), Just(Severity::Serious), Just(Severity::Moderate)]
    }

    fn category() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("General"),
            Just("Trauma Center"),
            Just("Cardiac Hospital"),
            Just("Children's Hospital"),
            Just("Tertiary Teaching Medical Center"),
            Just("Geriatric Care"),
            Just(""),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn score_is_bounded(
            cat in category(),
            capacity in any::<u32>(),
            er in any::<bool>(),
            trauma in any::<bool>(),
            age in any::<u32>(),
            need in need(),
            sev in severity(),
            distance in any::<f64>(),
        ) {
            let s = score(&fac(cat, capacity, er, trauma), &profile(age, need, sev), distance);
            prop_assert!(s.value <= 100);
            prop_assert!(!s.rationale.is_empty());
        }

        /// Outside critical severity, moving further away never helps.
        #[test]
        fn distance_never_raises_non_critical_score(
            cat in category(),
            capacity in 0u32..500,
            er in any::<bool>(),
            need in need(),
            serious in any::<bool>(),
            near in 0.0f64..100_000.0,
            extra in 0.0f64..100_000.0,
        ) {
            let sev = if serious { Severity::Serious } else { Severity::Moderate };
            let f = fac(cat, capacity, er, false);
            let p = profile(40, need, sev);
            prop_assert!(score(&f, &p, near).value >= score(&f, &p, near + extra).value);
        }
    }
}
