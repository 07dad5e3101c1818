//! Fixed facilities (hospitals) and their registry.

use std::fmt;

use hers_core::GeoPoint;

use crate::Located;

/// A receiving facility.  Read-only once registered.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facility {
    pub name:              String,
    /// Free-text label such as `"Trauma Center"` or `"Pediatric Hospital"`.
    pub category:          String,
    pub position:          GeoPoint,
    /// Available beds.
    pub capacity:          u32,
    pub has_emergency:     bool,
    pub has_trauma_center: bool,
}

impl Facility {
    /// `true` if the category contains any of `needles`, ignoring case.
    ///
    /// Needles are expected in lower case.
    pub fn category_matches(&self, needles: &[&str]) -> bool {
        let category = self.category.to_lowercase();
        needles.iter().any(|n| category.contains(n))
    }

    pub fn distance_to(&self, pos: GeoPoint) -> f64 {
        self.position.distance_m(pos)
    }
}

impl Located for Facility {
    fn position(&self) -> Option<GeoPoint> {
        self.position.is_valid().then_some(self.position)
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yes_no = |b: bool| if b { "Yes" } else { "No" };
        write!(
            f,
            "{} ({}) - Emergency: {}, Trauma: {}",
            self.name,
            self.category,
            yes_no(self.has_emergency),
            yes_no(self.has_trauma_center)
        )
    }
}

// ── FacilityRegistry ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct FacilityRegistry {
    facilities: Vec<Facility>,
}

impl FacilityRegistry {
    pub fn new(facilities: Vec<Facility>) -> Self {
        Self { facilities }
    }

    pub fn push(&mut self, facility: Facility) {
        self.facilities.push(facility);
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    pub fn as_slice(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn iter(&self) -> impl Iterator<Item = &Facility> + '_ {
        self.facilities.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Facility> {
        self.facilities.iter().find(|f| f.name == name)
    }

    /// Up to `k` facilities by straight-line distance; ties keep registry order.
    pub fn nearest(&self, pos: GeoPoint, k: usize) -> Vec<&Facility> {
        let mut by_distance: Vec<(&Facility, f64)> =
            self.facilities.iter().map(|f| (f, f.distance_to(pos))).collect();
        by_distance.sort_by(|a, b| a.1.total_cmp(&b.1));
        by_distance.into_iter().take(k).map(|(f, _)| f).collect()
    }

    pub fn with_emergency(&self) -> Vec<&Facility> {
        self.facilities.iter().filter(|f| f.has_emergency).collect()
    }

    pub fn trauma_centers(&self) -> Vec<&Facility> {
        self.facilities.iter().filter(|f| f.has_trauma_center).collect()
    }
}

impl FromIterator<Facility> for FacilityRegistry {
    fn from_iter<I: IntoIterator<Item = Facility>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
