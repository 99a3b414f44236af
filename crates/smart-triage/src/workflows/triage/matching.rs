use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{BedAvailability, Capability, Hospital, PriorityLevel};

pub const DEFAULT_MATCH_SCORE_CEILING: u16 = 30;

const CAPABILITY_POINTS: u16 = 3;
const INTENSIVE_CARE_POINTS: u16 = 3;

/// Matching knobs. The ceiling only drives the display percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub score_ceiling: u16,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            score_ceiling: DEFAULT_MATCH_SCORE_CEILING,
        }
    }
}

/// Why a hospital earned points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchComponent {
    Capability { capability: Capability, points: u16 },
    BedAvailability { availability: BedAvailability, points: u16 },
    IntensiveCare { points: u16 },
}

impl MatchComponent {
    pub fn points(&self) -> u16 {
        match self {
            Self::Capability { points, .. }
            | Self::BedAvailability { points, .. }
            | Self::IntensiveCare { points } => *points,
        }
    }
}

/// A scored hospital. Produced fresh on every ranking call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalMatch {
    pub hospital: Hospital,
    pub match_score: u16,
    pub components: Vec<MatchComponent>,
}

impl HospitalMatch {
    pub fn match_percentage(&self, ceiling: u16) -> u8 {
        if ceiling == 0 {
            return 100;
        }
        let pct = (f64::from(self.match_score) / f64::from(ceiling) * 100.0).round();
        pct.min(100.0) as u8
    }
}

pub fn bed_bonus(priority: PriorityLevel, availability: BedAvailability) -> u16 {
    match (priority, availability) {
        (PriorityLevel::High, BedAvailability::High) => 5,
        (PriorityLevel::High, BedAvailability::Medium) => 3,
        (PriorityLevel::High, BedAvailability::Low) => 1,
        (PriorityLevel::Medium, BedAvailability::High) => 3,
        (PriorityLevel::Medium, BedAvailability::Medium) => 2,
        (PriorityLevel::Medium, BedAvailability::Low) => 0,
        (PriorityLevel::Low, BedAvailability::High) => 2,
        (PriorityLevel::Low, BedAvailability::Medium | BedAvailability::Low) => 0,
    }
}

/// Ranks a hospital catalog against a patient's needs.
#[derive(Debug, Clone, Default)]
pub struct HospitalMatcher {
    config: MatchingConfig,
}

impl HospitalMatcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn percentage(&self, matched: &HospitalMatch) -> u8 {
        matched.match_percentage(self.config.score_ceiling)
    }

    pub fn score(
        &self,
        hospital: &Hospital,
        required: &BTreeSet<Capability>,
        priority: PriorityLevel,
    ) -> HospitalMatch {
        let mut components = Vec::new();

        for capability in required.iter().filter(|capability| hospital.offers(capability)) {
            components.push(MatchComponent::Capability {
                capability: capability.clone(),
                points: CAPABILITY_POINTS,
            });
        }

        let bonus = bed_bonus(priority, hospital.bed_availability);
        if bonus > 0 {
            components.push(MatchComponent::BedAvailability {
                availability: hospital.bed_availability,
                points: bonus,
            });
        }

        if priority == PriorityLevel::High && hospital.offers(&Capability::Icu) {
            components.push(MatchComponent::IntensiveCare {
                points: INTENSIVE_CARE_POINTS,
            });
        }

        let match_score = components.iter().map(MatchComponent::points).sum();

        HospitalMatch {
            hospital: hospital.clone(),
            match_score,
            components,
        }
    }

    /// Score every hospital, drop zero scores, and order best first.
    ///
    /// Equal scores fall back to the closer hospital; the sort is stable so
    /// catalog order settles anything left.
    pub fn rank(
        &self,
        hospitals: &[Hospital],
        required: &BTreeSet<Capability>,
        priority: PriorityLevel,
    ) -> Vec<HospitalMatch> {
        let mut matches: Vec<HospitalMatch> = hospitals
            .iter()
            .map(|hospital| self.score(hospital, required, priority))
            .filter(|matched| matched.match_score > 0)
            .collect();

        matches.sort_by(|a, b| {
            b.match_score.cmp(&a.match_score).then_with(|| {
                a.hospital
                    .distance_miles
                    .total_cmp(&b.hospital.distance_miles)
            })
        });

        matches
    }
}
