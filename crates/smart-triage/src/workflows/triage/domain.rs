use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized patient vitals handed to the scoring engine.
///
/// Values are scored as given; range checks belong to intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    pub heart_rate: i32,
    pub systolic_bp: i32,
    pub diastolic_bp: i32,
    pub respiratory_rate: i32,
    pub oxygen_saturation: i32,
    pub temperature: f32,
    pub gcs: i32,
    pub blood_glucose: i32,
    pub chief_complaint: String,
    #[serde(default)]
    pub symptoms: String,
}

/// Triage urgency. Declaration order gives `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
}

impl PriorityLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Clinical service tag. Known tags get their own variant; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Capability {
    Emergency,
    Icu,
    Surgery,
    Cardiology,
    CardiacSurgery,
    Neurology,
    StrokeCenter,
    TraumaCenter,
    OrthopedicSurgery,
    RespiratoryCare,
    Endocrine,
    PediatricUnit,
    BurnUnit,
    NeonatalIcu,
    Other(String),
}

impl Capability {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Emergency => "emergency",
            Self::Icu => "icu",
            Self::Surgery => "surgery",
            Self::Cardiology => "cardiology",
            Self::CardiacSurgery => "cardiac-surgery",
            Self::Neurology => "neurology",
            Self::StrokeCenter => "stroke-center",
            Self::TraumaCenter => "trauma-center",
            Self::OrthopedicSurgery => "orthopedic-surgery",
            Self::RespiratoryCare => "respiratory-care",
            Self::Endocrine => "endocrine",
            Self::PediatricUnit => "pediatric-unit",
            Self::BurnUnit => "burn-unit",
            Self::NeonatalIcu => "neonatal-icu",
            Self::Other(tag) => tag,
        }
    }

    /// Human readable name for hospital cards.
    pub fn label(&self) -> &str {
        match self {
            Self::Emergency => "Emergency",
            Self::Icu => "ICU",
            Self::Surgery => "Surgery",
            Self::Cardiology => "Cardiology",
            Self::CardiacSurgery => "Cardiac Surgery",
            Self::Neurology => "Neurology",
            Self::StrokeCenter => "Stroke Center",
            Self::TraumaCenter => "Trauma Center",
            Self::OrthopedicSurgery => "Orthopedics",
            Self::RespiratoryCare => "Respiratory Care",
            Self::Endocrine => "Endocrine",
            Self::PediatricUnit => "Pediatrics",
            Self::BurnUnit => "Burn Care",
            Self::NeonatalIcu => "NICU",
            Self::Other(tag) if tag == "neuro" => "Neurology",
            Self::Other(tag) => tag,
        }
    }
}

/// Tags match exactly; anything outside the vocabulary, including other casings, stays `Other`.
impl From<&str> for Capability {
    fn from(raw: &str) -> Self {
        match raw {
            "emergency" => Self::Emergency,
            "icu" => Self::Icu,
            "surgery" => Self::Surgery,
            "cardiology" => Self::Cardiology,
            "cardiac-surgery" => Self::CardiacSurgery,
            "neurology" => Self::Neurology,
            "stroke-center" => Self::StrokeCenter,
            "trauma-center" => Self::TraumaCenter,
            "orthopedic-surgery" => Self::OrthopedicSurgery,
            "respiratory-care" => Self::RespiratoryCare,
            "endocrine" => Self::Endocrine,
            "pediatric-unit" => Self::PediatricUnit,
            "burn-unit" => Self::BurnUnit,
            "neonatal-icu" => Self::NeonatalIcu,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Capability {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<Capability> for String {
    fn from(capability: Capability) -> Self {
        match capability {
            Capability::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BedAvailability {
    High,
    Medium,
    Low,
}

impl BedAvailability {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HospitalId(pub u32);

impl fmt::Display for HospitalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog entry for a receiving facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
    pub distance_miles: f64,
    pub wait_time: String,
    pub bed_availability: BedAvailability,
    pub capabilities: BTreeSet<Capability>,
}

impl Hospital {
    pub fn offers(&self, capability: &Capability) -> bool {
        self.capabilities.contains(capability)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(pub String);

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored patient after triage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: PatientId,
    pub vitals: VitalSigns,
    pub priority: PriorityLevel,
    pub score: u8,
    pub required_capabilities: BTreeSet<Capability>,
    pub arrival_time: DateTime<Utc>,
}

impl PatientRecord {
    /// Case-insensitive match against the chief complaint and symptoms.
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.vitals.chief_complaint.to_lowercase().contains(&needle)
            || self.vitals.symptoms.to_lowercase().contains(&needle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Pending,
    Arrived,
}

impl NotificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Arrived => "arrived",
        }
    }
}

/// Pre-arrival notice sent by an ambulance crew to the chosen hospital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalNotification {
    pub patient_id: PatientId,
    pub hospital_id: HospitalId,
    pub eta_minutes: u32,
    pub ambulance_crew_id: String,
    pub status: NotificationStatus,
    pub patient: PatientRecord,
    pub dispatched_at: DateTime<Utc>,
}
