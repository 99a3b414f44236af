use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::capabilities::CapabilityResolver;
use super::catalog::HospitalCatalog;
use super::domain::{
    Capability, Hospital, HospitalId, HospitalNotification, NotificationStatus, PatientId,
    PatientRecord, PriorityLevel, VitalSigns,
};
use super::intake::{IntakeError, IntakeGuard, TriageSubmission};
use super::matching::{HospitalMatch, HospitalMatcher, MatchingConfig};
use super::priority::{PriorityClassifier, PriorityThresholds, ScoreComponent};
use super::repository::{NotificationRepository, PatientRepository, RepositoryError};

/// Engine tuning shared by the classifier and matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageConfig {
    pub thresholds: PriorityThresholds,
    pub matching: MatchingConfig,
}

/// Everything the engine derives for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageOutcome {
    pub priority: PriorityLevel,
    pub score: u8,
    pub components: Vec<ScoreComponent>,
    pub required_capabilities: BTreeSet<Capability>,
    pub matches: Vec<RankedHospital>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Hospital>,
}

impl TriageOutcome {
    pub fn best_match(&self) -> Option<&RankedHospital> {
        self.matches.first()
    }
}

/// A hospital match plus its display percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedHospital {
    #[serde(flatten)]
    pub matched: HospitalMatch,
    pub match_percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub patient_id: PatientId,
    pub hospital_id: HospitalId,
    pub eta_minutes: u32,
    pub ambulance_crew_id: String,
}

/// Hospital dashboard filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub priority: Option<PriorityLevel>,
    #[serde(default)]
    pub search: Option<String>,
}

static PATIENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_patient_id() -> PatientId {
    let id = PATIENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PatientId(format!("P{id:06}"))
}

/// Service composing intake, the scoring engine, the catalog, and storage.
pub struct TriageService<P, N> {
    guard: IntakeGuard,
    classifier: PriorityClassifier,
    resolver: CapabilityResolver,
    matcher: HospitalMatcher,
    catalog: Arc<HospitalCatalog>,
    patients: Arc<P>,
    notifications: Arc<N>,
}

impl<P, N> TriageService<P, N>
where
    P: PatientRepository + 'static,
    N: NotificationRepository + 'static,
{
    pub fn new(
        catalog: Arc<HospitalCatalog>,
        patients: Arc<P>,
        notifications: Arc<N>,
        config: TriageConfig,
    ) -> Self {
        Self {
            guard: IntakeGuard,
            classifier: PriorityClassifier::new(config.thresholds),
            resolver: CapabilityResolver,
            matcher: HospitalMatcher::new(config.matching),
            catalog,
            patients,
            notifications,
        }
    }

    pub fn catalog(&self) -> &HospitalCatalog {
        &self.catalog
    }

    /// Run the engine over already-validated vitals.
    pub fn evaluate(&self, vitals: &VitalSigns) -> TriageOutcome {
        let assessment = self.classifier.assess(vitals);
        let required_capabilities = self.resolver.resolve(vitals);
        let matches: Vec<RankedHospital> = self
            .matcher
            .rank(
                self.catalog.hospitals(),
                &required_capabilities,
                assessment.priority,
            )
            .into_iter()
            .map(|matched| RankedHospital {
                match_percentage: self.matcher.percentage(&matched),
                matched,
            })
            .collect();

        debug!(
            priority = %assessment.priority,
            score = assessment.score,
            candidates = matches.len(),
            "ranked hospitals"
        );

        let fallback = if matches.is_empty() {
            let nearest = self.catalog.nearest().cloned();
            warn!(
                fallback = nearest.as_ref().map(|hospital| hospital.name.as_str()),
                "no hospital matched patient requirements"
            );
            nearest
        } else {
            None
        };

        TriageOutcome {
            priority: assessment.priority,
            score: assessment.score,
            components: assessment.components,
            required_capabilities,
            matches,
            fallback,
        }
    }

    /// Assess a submission without storing anything.
    pub fn assess(&self, submission: &TriageSubmission) -> Result<TriageOutcome, TriageServiceError> {
        let vitals = self.guard.vitals_from_submission(submission)?;
        Ok(self.evaluate(&vitals))
    }

    /// Assess a submission and record the patient.
    pub fn submit(
        &self,
        submission: TriageSubmission,
    ) -> Result<(PatientRecord, TriageOutcome), TriageServiceError> {
        let vitals = self.guard.vitals_from_submission(&submission)?;
        let outcome = self.evaluate(&vitals);

        let record = PatientRecord {
            id: next_patient_id(),
            vitals,
            priority: outcome.priority,
            score: outcome.score,
            required_capabilities: outcome.required_capabilities.clone(),
            arrival_time: Utc::now(),
        };

        let stored = self.patients.insert(record)?;
        info!(
            patient_id = %stored.id,
            priority = %stored.priority,
            score = stored.score,
            "patient triaged"
        );

        Ok((stored, outcome))
    }

    pub fn patient(&self, patient_id: &PatientId) -> Result<PatientRecord, TriageServiceError> {
        let record = self
            .patients
            .fetch(patient_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Notify the chosen hospital that a patient is on the way.
    pub fn dispatch(
        &self,
        request: DispatchRequest,
    ) -> Result<HospitalNotification, TriageServiceError> {
        if self.catalog.get(request.hospital_id).is_none() {
            return Err(TriageServiceError::UnknownHospital(request.hospital_id));
        }
        let patient = self.patient(&request.patient_id)?;

        let notification = HospitalNotification {
            patient_id: patient.id.clone(),
            hospital_id: request.hospital_id,
            eta_minutes: request.eta_minutes,
            ambulance_crew_id: request.ambulance_crew_id,
            status: NotificationStatus::Pending,
            patient,
            dispatched_at: Utc::now(),
        };

        self.notifications.publish(notification.clone())?;
        info!(
            patient_id = %notification.patient_id,
            hospital_id = %notification.hospital_id,
            eta_minutes = notification.eta_minutes,
            "hospital notified of incoming patient"
        );

        Ok(notification)
    }

    pub fn incoming(
        &self,
        hospital_id: HospitalId,
    ) -> Result<Vec<HospitalNotification>, TriageServiceError> {
        if self.catalog.get(hospital_id).is_none() {
            return Err(TriageServiceError::UnknownHospital(hospital_id));
        }
        Ok(self.notifications.for_hospital(hospital_id)?)
    }

    /// Mark an incoming patient as arrived.
    pub fn admit(
        &self,
        patient_id: &PatientId,
    ) -> Result<HospitalNotification, TriageServiceError> {
        let notification = self.notifications.mark_arrived(patient_id)?;
        info!(patient_id = %patient_id, "patient marked as arrived");
        Ok(notification)
    }

    /// Patients for the hospital dashboard, most urgent then most recent first.
    pub fn dashboard(
        &self,
        query: &DashboardQuery,
    ) -> Result<Vec<PatientRecord>, TriageServiceError> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty());

        let mut patients: Vec<PatientRecord> = self
            .patients
            .list()?
            .into_iter()
            .filter(|record| query.priority.map_or(true, |level| record.priority == level))
            .filter(|record| search.map_or(true, |term| record.mentions(term)))
            .collect();

        patients.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.arrival_time.cmp(&a.arrival_time))
        });

        Ok(patients)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TriageServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("hospital {0} is not in the catalog")]
    UnknownHospital(HospitalId),
}
