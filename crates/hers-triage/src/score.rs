//! Rule-based facility scoring.
//!
//! A facility starts at [`BASE_SCORE`] and is adjusted by a fixed sequence of
//! rules, then clamped to `[0, 100]`:
//!
//! | # | Rule              | Adjustment                                            |
//! |---|-------------------|-------------------------------------------------------|
//! | 1 | distance          | `-trunc(km * 2)`                                      |
//! | 2 | need match        | specialty bonus, else a smaller ER bonus (see below)  |
//! | 3 | emergency dept.   | `+20` present, `-30` absent                           |
//! | 4 | severity          | critical: `+25` trauma, `+20` tertiary/medical center, `+trunc(km * 0.5)`; serious: `+15` with ER |
//! | 5 | age               | pediatric `+25` at child/pediatric; geriatric `+10` at geriatric or capacity > 200 |
//! | 6 | capacity          | `>300 +15`, `>150 +10`, `>50 +5`, else `-10`          |
//! | 7 | teaching/tertiary | `+12`                                                 |
//!
//! Need match:
//!
//! | Need        | Specialty (category contains)      | Else, with ER |
//! |-------------|------------------------------------|---------------|
//! | Trauma      | trauma centre flag: `+35`          | `+10`         |
//! | Cardiac     | cardiac, heart: `+35`              | `+15`         |
//! | Stroke      | neuro, stroke: `+35`               | `+15`         |
//! | Respiratory | pulmonary, respiratory: `+30`      | `+15`         |
//! | Pediatric   | child, pediatric: `+40`            | `+10`         |
//! | General     | —                                  | `+20`         |

use std::fmt;

use hers_registry::Facility;

use crate::{EmergencyNeed, RequestProfile, Severity};

pub const BASE_SCORE: i64 = 100;

const PEDIATRIC: &[&str] = &["child", "pediatric"];

/// A clamped score plus the text explaining it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Score {
    /// In `[0, 100]`.
    pub value:     u8,
    pub rationale: String,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100 - {}", self.value, self.rationale)
    }
}

/// Score `facility` for `profile` at `distance_m` (straight-line or road).
///
/// Pure and deterministic.
pub fn score(facility: &Facility, profile: &RequestProfile, distance_m: f64) -> Score {
    let value = points(facility, profile, distance_m);
    Score { value, rationale: rationale(facility, profile, distance_m, value) }
}

/// `trunc(x)` as an integer; saturates on overflow and maps NaN to 0.
#[inline]
fn trunc(x: f64) -> i64 {
    x as i64
}

fn points(facility: &Facility, profile: &RequestProfile, distance_m: f64) -> u8 {
    let km = distance_m / 1000.0;
    let er = facility.has_emergency;
    let mut s = BASE_SCORE;
    let mut add = |delta: i64| s = s.saturating_add(delta);

    // 1. Distance.
    add(trunc(km * 2.0).saturating_neg());

    // 2. Need match.
    let specialty = |needles: &[&str], bonus: i64, er_bonus: i64| {
        if facility.category_matches(needles) {
            bonus
        } else if er {
            er_bonus
        } else {
            0
        }
    };
    add(match profile.need {
        EmergencyNeed::Trauma      => if facility.has_trauma_center { 35 } else if er { 10 } else { 0 },
        EmergencyNeed::Cardiac     => specialty(&["cardiac", "heart"], 35, 15),
        EmergencyNeed::Stroke      => specialty(&["neuro", "stroke"], 35, 15),
        EmergencyNeed::Respiratory => specialty(&["pulmonary", "respiratory"], 30, 15),
        EmergencyNeed::Pediatric   => specialty(PEDIATRIC, 40, 10),
        EmergencyNeed::General     => if er { 20 } else { 0 },
    });

    // 3. Emergency department.
    add(if er { 20 } else { -30 });

    // 4. Severity.
    match profile.severity {
        Severity::Critical => {
            if facility.has_trauma_center {
                add(25);
            }
            if facility.category_matches(&["tertiary", "medical center"]) {
                add(20);
            }
            add(trunc(km * 0.5));
        }
        Severity::Serious if er => add(15),
        Severity::Serious | Severity::Moderate => {}
    }

    // 5. Age.
    if profile.is_pediatric() && facility.category_matches(PEDIATRIC) {
        add(25);
    }
    if profile.is_geriatric() && (facility.category_matches(&["geriatric"]) || facility.capacity > 200) {
        add(10);
    }

    // 6. Capacity.
    add(match facility.capacity {
        301..     => 15,
        151..=300 => 10,
        51..=150  => 5,
        _         => -10,
    });

    // 7. Teaching / tertiary.
    if facility.category_matches(&["tertiary", "teaching"]) {
        add(12);
    }

    // `clamp` keeps the value in 0..=100, so the cast is lossless.
    s.clamp(0, 100) as u8
}

fn rationale(facility: &Facility, profile: &RequestProfile, distance_m: f64, value: u8) -> String {
    let km = distance_m / 1000.0;
    let mut lines: Vec<&str> = Vec::with_capacity(6);

    lines.push(match value {
        80.. => "Excellent match.",
        60.. => "Good match.",
        40.. => "Acceptable match.",
        _    => "Suboptimal match.",
    });

    lines.push(if km < 2.0 {
        "Very close proximity."
    } else if km < 5.0 {
        "Close proximity."
    } else if km < 10.0 {
        "Moderate distance."
    } else {
        "Far distance."
    });

    match profile.need {
        EmergencyNeed::Trauma if facility.has_trauma_center => {
            lines.push("Has trauma center for injury treatment.");
        }
        EmergencyNeed::Pediatric if facility.category_matches(&["pediatric"]) => {
            lines.push("Specialized pediatric care available.");
        }
        EmergencyNeed::Cardiac if facility.category_matches(&["cardiac"]) => {
            lines.push("Cardiac specialty center.");
        }
        _ => {}
    }

    lines.push(if facility.has_emergency {
        "24/7 emergency department."
    } else {
        "No dedicated emergency department."
    });

    if profile.severity == Severity::Critical {
        lines.push(if facility.has_trauma_center || facility.capacity > 200 {
            "Well-equipped for critical cases."
        } else {
            "May lack resources for critical care."
        });
    }

    lines.join(" ")
}
