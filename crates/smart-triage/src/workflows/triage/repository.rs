use super::domain::{HospitalId, HospitalNotification, PatientId, PatientRecord};

/// Patient store owned by the orchestrator.
pub trait PatientRepository: Send + Sync {
    fn insert(&self, record: PatientRecord) -> Result<PatientRecord, RepositoryError>;
    fn fetch(&self, id: &PatientId) -> Result<Option<PatientRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<PatientRecord>, RepositoryError>;
}

/// Outbound pre-arrival notices keyed by receiving hospital.
pub trait NotificationRepository: Send + Sync {
    fn publish(&self, notification: HospitalNotification) -> Result<(), RepositoryError>;
    fn for_hospital(
        &self,
        hospital_id: HospitalId,
    ) -> Result<Vec<HospitalNotification>, RepositoryError>;
    /// Flag the patient's notification as arrived and return the updated copy.
    fn mark_arrived(&self, patient_id: &PatientId)
        -> Result<HospitalNotification, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
