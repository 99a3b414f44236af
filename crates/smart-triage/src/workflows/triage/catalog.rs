use std::collections::{BTreeSet, HashSet};

use super::domain::{BedAvailability, Capability, Hospital, HospitalId};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("hospital catalog is empty")]
    Empty,
    #[error("hospital id {0} appears more than once")]
    DuplicateId(HospitalId),
    #[error("hospital {0} has an invalid distance")]
    InvalidDistance(HospitalId),
}

/// Owned, validated set of receiving hospitals.
#[derive(Debug, Clone)]
pub struct HospitalCatalog {
    hospitals: Vec<Hospital>,
}

impl HospitalCatalog {
    pub fn new(hospitals: Vec<Hospital>) -> Result<Self, CatalogError> {
        if hospitals.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for hospital in &hospitals {
            if !seen.insert(hospital.id) {
                return Err(CatalogError::DuplicateId(hospital.id));
            }
            if !hospital.distance_miles.is_finite() || hospital.distance_miles < 0.0 {
                return Err(CatalogError::InvalidDistance(hospital.id));
            }
        }

        Ok(Self { hospitals })
    }

    /// Static catalog used by the demo and the default server wiring.
    pub fn demo() -> Result<Self, CatalogError> {
        Self::new(vec![
            hospital(
                1,
                "City General Hospital",
                2.3,
                "15 min",
                BedAvailability::High,
                &["emergency", "icu", "surgery", "cardiology", "respiratory-care"],
            ),
            hospital(
                2,
                "St. Mary's Medical Center",
                3.8,
                "25 min",
                BedAvailability::Medium,
                &[
                    "emergency",
                    "icu",
                    "cardiology",
                    "cardiac-surgery",
                    "neurology",
                    "stroke-center",
                ],
            ),
            hospital(
                3,
                "Riverside Trauma Institute",
                5.1,
                "10 min",
                BedAvailability::High,
                &[
                    "emergency",
                    "trauma-center",
                    "orthopedic-surgery",
                    "surgery",
                    "burn-unit",
                    "icu",
                ],
            ),
            hospital(
                4,
                "Northside Community Hospital",
                1.6,
                "40 min",
                BedAvailability::Low,
                &["emergency", "pediatric-unit", "endocrine"],
            ),
            hospital(
                5,
                "University Children's & Women's",
                6.4,
                "20 min",
                BedAvailability::Medium,
                &["emergency", "pediatric-unit", "neonatal-icu", "respiratory-care"],
            ),
        ])
    }

    pub fn hospitals(&self) -> &[Hospital] {
        &self.hospitals
    }

    pub fn get(&self, id: HospitalId) -> Option<&Hospital> {
        self.hospitals.iter().find(|hospital| hospital.id == id)
    }

    /// Closest hospital regardless of services, used when nothing matches.
    pub fn nearest(&self) -> Option<&Hospital> {
        self.hospitals
            .iter()
            .min_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles))
    }
}

fn hospital(
    id: u32,
    name: &str,
    distance_miles: f64,
    wait_time: &str,
    bed_availability: BedAvailability,
    capabilities: &[&str],
) -> Hospital {
    Hospital {
        id: HospitalId(id),
        name: name.to_string(),
        distance_miles,
        wait_time: wait_time.to_string(),
        bed_availability,
        capabilities: capabilities
            .iter()
            .map(|tag| Capability::from(*tag))
            .collect::<BTreeSet<_>>(),
    }
}
