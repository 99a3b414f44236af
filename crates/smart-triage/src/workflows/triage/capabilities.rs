use std::collections::BTreeSet;

use super::domain::{Capability, VitalSigns};
use super::priority::rules;

/// Symptom keywords and the services they call for.
fn symptom_rules() -> [(&'static [&'static str], [Capability; 2]); 3] {
    [
        (
            &["chest pain", "heart"],
            [Capability::Cardiology, Capability::CardiacSurgery],
        ),
        (
            &["stroke", "paralysis", "numbness"],
            [Capability::Neurology, Capability::StrokeCenter],
        ),
        (
            &["trauma", "accident", "fracture"],
            [Capability::TraumaCenter, Capability::OrthopedicSurgery],
        ),
    ]
}

/// Derives the hospital services a patient needs from vitals and symptom text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityResolver;

impl CapabilityResolver {
    pub fn resolve(&self, vitals: &VitalSigns) -> BTreeSet<Capability> {
        let mut required = BTreeSet::new();

        if rules::heart_rate_severe(vitals.heart_rate) || rules::systolic_severe(vitals.systolic_bp)
        {
            required.insert(Capability::Cardiology);
        }

        if rules::respiratory_rate_severe(vitals.respiratory_rate)
            || rules::oxygen_saturation_severe(vitals.oxygen_saturation)
        {
            required.insert(Capability::RespiratoryCare);
        }

        if vitals.gcs < 13 {
            required.insert(Capability::Neurology);
        }

        if rules::blood_glucose_severe(vitals.blood_glucose) {
            required.insert(Capability::Endocrine);
        }

        let symptoms = vitals.symptoms.to_lowercase();
        if !symptoms.trim().is_empty() {
            for (keywords, capabilities) in symptom_rules() {
                if keywords.iter().any(|keyword| symptoms.contains(keyword)) {
                    required.extend(capabilities);
                }
            }
        }

        required.insert(Capability::Emergency);
        required
    }
}
