//! Emergency triage: vital-sign priority scoring, capability resolution, and
//! hospital matching, plus the intake and service plumbing around them.

pub mod capabilities;
pub mod catalog;
pub mod domain;
pub mod intake;
pub mod matching;
pub mod priority;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use capabilities::CapabilityResolver;
pub use catalog::{CatalogError, HospitalCatalog};
pub use domain::{
    BedAvailability, Capability, Hospital, HospitalId, HospitalNotification, NotificationStatus,
    PatientId, PatientRecord, PriorityLevel, VitalSigns,
};
pub use intake::{IntakeError, IntakeGuard, TriageSubmission};
pub use matching::{HospitalMatch, HospitalMatcher, MatchComponent, MatchingConfig};
pub use priority::{
    PriorityAssessment, PriorityClassifier, PriorityThresholds, ScoreComponent, VitalSign,
};
pub use repository::{NotificationRepository, PatientRepository, RepositoryError};
pub use router::triage_router;
pub use service::{
    DashboardQuery, DispatchRequest, RankedHospital, TriageConfig, TriageOutcome, TriageService,
    TriageServiceError,
};
