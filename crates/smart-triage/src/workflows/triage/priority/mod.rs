mod config;
pub(crate) mod rules;

pub use config::{PriorityThresholds, DEFAULT_HIGH_PRIORITY_SCORE, DEFAULT_MEDIUM_PRIORITY_SCORE};

use super::domain::{PriorityLevel, VitalSigns};
use serde::{Deserialize, Serialize};

/// Stateless classifier turning vitals into a triage priority.
#[derive(Debug, Clone, Default)]
pub struct PriorityClassifier {
    thresholds: PriorityThresholds,
}

impl PriorityClassifier {
    pub fn new(thresholds: PriorityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify(&self, vitals: &VitalSigns) -> PriorityLevel {
        self.assess(vitals).priority
    }

    /// Score every vital once and keep the contributing bands for audit.
    pub fn assess(&self, vitals: &VitalSigns) -> PriorityAssessment {
        let (components, score) = rules::score_vitals(vitals);

        PriorityAssessment {
            priority: self.level_for(score),
            score,
            components,
        }
    }

    pub fn level_for(&self, score: u8) -> PriorityLevel {
        if score >= self.thresholds.high_priority_score {
            PriorityLevel::High
        } else if score >= self.thresholds.medium_priority_score {
            PriorityLevel::Medium
        } else {
            PriorityLevel::Low
        }
    }
}

/// Vital sign a score component was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalSign {
    HeartRate,
    SystolicBp,
    DiastolicBp,
    RespiratoryRate,
    OxygenSaturation,
    Gcs,
    BloodGlucose,
}

impl VitalSign {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HeartRate => "heart rate",
            Self::SystolicBp => "systolic BP",
            Self::DiastolicBp => "diastolic BP",
            Self::RespiratoryRate => "respiratory rate",
            Self::OxygenSaturation => "oxygen saturation",
            Self::Gcs => "GCS",
            Self::BloodGlucose => "blood glucose",
        }
    }
}

/// Points a single vital added to the priority score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub vital: VitalSign,
    pub points: u8,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityAssessment {
    pub priority: PriorityLevel,
    pub score: u8,
    pub components: Vec<ScoreComponent>,
}

impl PriorityAssessment {
    pub fn points_for(&self, vital: VitalSign) -> u8 {
        self.components
            .iter()
            .filter(|component| component.vital == vital)
            .map(|component| component.points)
            .sum()
    }
}
