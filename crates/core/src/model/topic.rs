use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject-matter domains covered by the certification exam.
///
/// Topics and their quotas are static exam configuration: every quiz draws a
/// fixed number of questions from each topic, and two topics additionally
/// require a fixed share of situational questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    Regulations,
    HazardIdentification,
    RiskManagement,
    EmergencyResponse,
    Ergonomics,
}

impl Topic {
    /// Fixed drawing order used by the selection algorithm.
    pub const ALL: [Topic; 5] = [
        Topic::Regulations,
        Topic::HazardIdentification,
        Topic::RiskManagement,
        Topic::EmergencyResponse,
        Topic::Ergonomics,
    ];

    /// Target number of questions drawn from this topic per quiz.
    #[must_use]
    pub fn quota(self) -> u32 {
        match self {
            Topic::Regulations => 11,
            Topic::HazardIdentification => 6,
            Topic::RiskManagement => 11,
            Topic::EmergencyResponse => 8,
            Topic::Ergonomics => 4,
        }
    }

    /// Situational sub-quota, for the topics that carry one.
    ///
    /// The remainder of the topic's quota is filled with knowledge questions.
    #[must_use]
    pub fn situational_quota(self) -> Option<u32> {
        match self {
            Topic::RiskManagement => Some(6),
            Topic::EmergencyResponse => Some(4),
            _ => None,
        }
    }

    /// Sum of all per-topic quotas.
    ///
    /// Must equal the configured total question count; `ExamSettings::new`
    /// enforces this.
    #[must_use]
    pub fn total_quota() -> u32 {
        Self::ALL.iter().map(|t| t.quota()).sum()
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topic::Regulations => "Regulations",
            Topic::HazardIdentification => "Hazard Identification",
            Topic::RiskManagement => "Risk Management",
            Topic::EmergencyResponse => "Emergency Response",
            Topic::Ergonomics => "Ergonomics",
        };
        write!(f, "{name}")
    }
}
