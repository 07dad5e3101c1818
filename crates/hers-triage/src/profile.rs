//! What the caller needs: the request profile a facility is scored against.

use std::fmt;

use hers_registry::ResourceKind;

/// Clinical category of the request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum EmergencyNeed {
    Cardiac,
    Trauma,
    Stroke,
    Respiratory,
    Pediatric,
    #[default]
    General,
}

impl EmergencyNeed {
    pub fn description(self) -> &'static str {
        match self {
            Self::Cardiac     => "Cardiac Emergency",
            Self::Trauma      => "Trauma/Injury",
            Self::Stroke      => "Stroke",
            Self::Respiratory => "Respiratory Distress",
            Self::Pediatric   => "Pediatric Emergency",
            Self::General     => "General Emergency",
        }
    }
}

impl fmt::Display for EmergencyNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// How urgent the request is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Life threatening, immediate care required.
    Critical,
    /// Urgent care needed.
    Serious,
    /// Stable but urgent.
    Moderate,
}

impl Severity {
    /// 3 for critical down to 1 for moderate.
    pub fn priority(self) -> u8 {
        match self {
            Self::Critical => 3,
            Self::Serious  => 2,
            Self::Moderate => 1,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Critical => "CRITICAL",
            Self::Serious  => "SERIOUS",
            Self::Moderate => "MODERATE",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RequestProfile {
    /// Years.
    pub age:      u32,
    pub need:     EmergencyNeed,
    pub severity: Severity,
}

impl RequestProfile {
    pub fn new(age: u32, need: EmergencyNeed, severity: Severity) -> Self {
        Self { age, need, severity }
    }

    /// Under 18.
    #[inline]
    pub fn is_pediatric(&self) -> bool {
        self.age < 18
    }

    /// 65 and over.
    #[inline]
    pub fn is_geriatric(&self) -> bool {
        self.age >= 65
    }

    /// Minimum unit capability for this severity.
    pub fn required_resource_kind(&self) -> ResourceKind {
        match self.severity {
            Severity::Critical => ResourceKind::Critical,
            Severity::Serious  => ResourceKind::Advanced,
            Severity::Moderate => ResourceKind::Basic,
        }
    }
}

impl fmt::Display for RequestProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Age {} - {} - Severity: {}", self.age, self.need, self.severity)
    }
}
