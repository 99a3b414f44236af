use metrics_exporter_prometheus::PrometheusHandle;
use smart_triage::workflows::triage::{
    HospitalId, HospitalNotification, NotificationRepository, NotificationStatus, PatientId,
    PatientRecord, PatientRepository, RepositoryError,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn poisoned<T>(_: PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("in-memory store lock poisoned".to_string())
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPatientRepository {
    records: Arc<Mutex<HashMap<PatientId, PatientRecord>>>,
}

impl PatientRepository for InMemoryPatientRepository {
    fn insert(&self, record: PatientRecord) -> Result<PatientRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &PatientId) -> Result<Option<PatientRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationRepository {
    events: Arc<Mutex<Vec<HospitalNotification>>>,
}

impl NotificationRepository for InMemoryNotificationRepository {
    fn publish(&self, notification: HospitalNotification) -> Result<(), RepositoryError> {
        let mut guard = self.events.lock().map_err(poisoned)?;
        guard.push(notification);
        Ok(())
    }

    fn for_hospital(
        &self,
        hospital_id: HospitalId,
    ) -> Result<Vec<HospitalNotification>, RepositoryError> {
        let guard = self.events.lock().map_err(poisoned)?;
        Ok(guard
            .iter()
            .filter(|notification| notification.hospital_id == hospital_id)
            .cloned()
            .collect())
    }

    // Re-dispatch: the latest notice is admitted, not the first one published.
    fn mark_arrived(
        &self,
        patient_id: &PatientId,
    ) -> Result<HospitalNotification, RepositoryError> {
        let mut guard = self.events.lock().map_err(poisoned)?;
        let notification = guard
            .iter_mut()
            .rev()
            .find(|notification| &notification.patient_id == patient_id)
            .ok_or(RepositoryError::NotFound)?;
        notification.status = NotificationStatus::Arrived;
        Ok(notification.clone())
    }
}
