//! Facility recommendations: score every candidate, best first.

use std::borrow::Borrow;
use std::fmt;

use hers_core::{GeoPoint, RoutingConfig};
use hers_dispatch::Ranked;
use hers_graph::PathResult;
use hers_registry::Facility;

use crate::{RequestProfile, Score, score};

/// One scored facility.
#[derive(Clone, Debug)]
pub struct Recommendation<'a> {
    pub facility:    &'a Facility,
    /// Straight-line or road distance, whichever the score was computed on.
    pub distance_m:  f64,
    pub eta_minutes: f64,
    pub score:       Score,
    /// The road route, when the recommendation came from [`rescore`].
    pub path:        Option<PathResult>,
}

impl fmt::Display for Recommendation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Score: {}/100 - Distance: {:.2} km - ETA: {:.1} min",
            self.facility.name,
            self.score.value,
            self.distance_m / 1000.0,
            self.eta_minutes
        )
    }
}

/// Score every facility by straight-line distance from `query` and return
/// the best `top_n`.  ETAs assume the default transport speed.
pub fn recommend<'a>(
    profile:    &RequestProfile,
    query:      GeoPoint,
    facilities: &'a [Facility],
    top_n:      usize,
) -> Vec<Recommendation<'a>> {
    recommend_with(&RoutingConfig::default(), profile, query, facilities, top_n)
}

/// [`recommend`] with ETAs from `config.transport_speed_kmh`.
pub fn recommend_with<'a>(
    config:     &RoutingConfig,
    profile:    &RequestProfile,
    query:      GeoPoint,
    facilities: &'a [Facility],
    top_n:      usize,
) -> Vec<Recommendation<'a>> {
    let recs = facilities
        .iter()
        .map(|facility| {
            let distance_m = facility.distance_to(query);
            Recommendation {
                facility,
                distance_m,
                eta_minutes: config.straight_line_eta_min(distance_m),
                score: score(facility, profile, distance_m),
                path: None,
            }
        })
        .collect();
    best_first(recs, top_n)
}

/// Re-rank road-ranked facilities by score, using road distance and road
/// ETA.  Input order breaks score ties, so a travel-time ranking stays the
/// tie-breaker.
pub fn rescore<'a, C: Borrow<Facility>>(
    profile: &RequestProfile,
    ranked:  Vec<Ranked<'a, C>>,
    top_n:   usize,
) -> Vec<Recommendation<'a>> {
    let recs = ranked
        .into_iter()
        .map(|r| {
            let facility: &'a Facility = Borrow::<Facility>::borrow(r.candidate);
            let distance_m = r.path.total_distance_m;
            Recommendation {
                facility,
                distance_m,
                eta_minutes: r.path.eta_minutes(),
                score: score(facility, profile, distance_m),
                path: Some(r.path),
            }
        })
        .collect();
    best_first(recs, top_n)
}

fn best_first(mut recs: Vec<Recommendation<'_>>, top_n: usize) -> Vec<Recommendation<'_>> {
    let scored = recs.len();
    recs.sort_by(|a, b| b.score.value.cmp(&a.score.value));
    recs.truncate(top_n);
    tracing::debug!(scored, kept = recs.len(), "facilities scored");
    recs
}
