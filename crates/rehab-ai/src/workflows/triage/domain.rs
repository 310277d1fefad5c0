use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for patients tracked by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(pub String);

/// Identifier wrapper for care-team staff.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaregiverId(pub String);

/// Advisory cap applied to new roster entries when none is recorded.
pub const DEFAULT_MAX_PATIENTS: u8 = 5;

/// Certified capability level determining which severity of case a caregiver
/// may be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareTier {
    Bronze,
    Silver,
    Gold,
}

impl CareTier {
    pub const fn label(self) -> &'static str {
        match self {
            CareTier::Bronze => "bronze",
            CareTier::Silver => "silver",
            CareTier::Gold => "gold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaregiverStatus {
    Active,
    Inactive,
}

/// Roster entry read from the record store. Administrative account flows own
/// all mutation; the engine only ever reads snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caregiver {
    pub id: CaregiverId,
    /// A missing tier is treated as bronze throughout.
    pub tier: Option<CareTier>,
    pub status: CaregiverStatus,
    #[serde(default = "default_max_patients")]
    pub max_patients: u8,
}

fn default_max_patients() -> u8 {
    DEFAULT_MAX_PATIENTS
}

impl Caregiver {
    pub fn is_active(&self) -> bool {
        self.status == CaregiverStatus::Active
    }

    pub fn effective_tier(&self) -> CareTier {
        self.tier.unwrap_or(CareTier::Bronze)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Low,
    Moderate,
    Extreme,
}

impl SeverityLevel {
    /// Threshold table: score ≤ 5 is low, 5 < score ≤ 8 is moderate,
    /// anything above 8 is extreme.
    pub fn from_score(score: f32) -> Self {
        if score <= 5.0 {
            SeverityLevel::Low
        } else if score <= 8.0 {
            SeverityLevel::Moderate
        } else {
            SeverityLevel::Extreme
        }
    }

    pub const fn required_tier(self) -> CareTier {
        match self {
            SeverityLevel::Low => CareTier::Bronze,
            SeverityLevel::Moderate => CareTier::Silver,
            SeverityLevel::Extreme => CareTier::Gold,
        }
    }

    pub const fn correlated_urgency(self) -> Urgency {
        match self {
            SeverityLevel::Low => Urgency::Low,
            SeverityLevel::Moderate => Urgency::Medium,
            SeverityLevel::Extreme => Urgency::High,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SeverityLevel::Low => "low",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::Extreme => "extreme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub const fn label(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

/// Structured output of classifying one injury description.
///
/// Created once per triage request and attached permanently to the patient
/// record that triggered it; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityAssessment {
    /// Numeric severity in [0, 10].
    pub severity_score: f32,
    pub severity_level: SeverityLevel,
    /// Correlated with the level but reported independently.
    pub urgency: Urgency,
    /// Advisory only; never drives a decision.
    pub risk_factors: Vec<String>,
    pub recommended_care: String,
    pub required_tier: CareTier,
    /// True when the local heuristic produced this assessment instead of the
    /// external classification service.
    pub is_fallback: bool,
}

impl SeverityAssessment {
    /// Build an assessment whose level, tier, and urgency are all derived from
    /// the clamped score, keeping the threshold invariant intact no matter
    /// what the untrusted service reported.
    pub fn from_score(
        score: f32,
        risk_factors: Vec<String>,
        recommended_care: String,
        is_fallback: bool,
    ) -> Self {
        let severity_score = if score.is_finite() {
            score.clamp(0.0, 10.0)
        } else {
            0.0
        };
        let severity_level = SeverityLevel::from_score(severity_score);

        Self {
            severity_score,
            severity_level,
            urgency: severity_level.correlated_urgency(),
            risk_factors,
            recommended_care,
            required_tier: severity_level.required_tier(),
            is_fallback,
        }
    }
}

/// Staff roles a change in a patient's care team can notify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Physician,
    Nurse,
    Caregiver,
}

impl StaffRole {
    pub const fn label(self) -> &'static str {
        match self {
            StaffRole::Physician => "physician",
            StaffRole::Nurse => "nurse",
            StaffRole::Caregiver => "caregiver",
        }
    }
}

/// One care-team assignment. Records are append-only: reassignment supersedes
/// with a new record rather than editing this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub patient_id: PatientId,
    pub caregiver_id: CaregiverId,
    pub assigned_tier: CareTier,
    pub assigned_at: DateTime<Utc>,
}
