use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::triage::catalog::HospitalCatalog;
use crate::workflows::triage::domain::{
    BedAvailability, Capability, Hospital, HospitalId, HospitalNotification, NotificationStatus,
    PatientId, PatientRecord, VitalSigns,
};
use crate::workflows::triage::intake::TriageSubmission;
use crate::workflows::triage::repository::{
    NotificationRepository, PatientRepository, RepositoryError,
};
use crate::workflows::triage::service::{TriageConfig, TriageService};

/// Vitals that sit inside every normal band.
pub(super) fn stable_vitals() -> VitalSigns {
    VitalSigns {
        heart_rate: 80,
        systolic_bp: 120,
        diastolic_bp: 80,
        respiratory_rate: 16,
        oxygen_saturation: 98,
        temperature: 37.0,
        gcs: 15,
        blood_glucose: 100,
        chief_complaint: "Routine check".to_string(),
        symptoms: String::new(),
    }
}

/// Chest pain presentation with one point from each of six vitals.
pub(super) fn chest_pain_vitals() -> VitalSigns {
    VitalSigns {
        heart_rate: 110,
        systolic_bp: 165,
        diastolic_bp: 105,
        respiratory_rate: 22,
        oxygen_saturation: 92,
        temperature: 38.5,
        gcs: 14,
        blood_glucose: 90,
        chief_complaint: "Chest pain".to_string(),
        symptoms: "chest pain radiating to arm".to_string(),
    }
}

/// Collapsed patient scoring well above the high-priority cut-off.
pub(super) fn critical_vitals() -> VitalSigns {
    VitalSigns {
        heart_rate: 135,
        systolic_bp: 85,
        diastolic_bp: 55,
        respiratory_rate: 28,
        oxygen_saturation: 88,
        temperature: 35.1,
        gcs: 7,
        blood_glucose: 40,
        chief_complaint: "Unresponsive after car accident".to_string(),
        symptoms: "Trauma to chest, suspected fracture".to_string(),
    }
}

pub(super) fn submission_from(vitals: &VitalSigns) -> TriageSubmission {
    TriageSubmission {
        heart_rate: Some(vitals.heart_rate),
        systolic_bp: Some(vitals.systolic_bp),
        diastolic_bp: Some(vitals.diastolic_bp),
        blood_pressure: None,
        respiratory_rate: Some(vitals.respiratory_rate),
        oxygen_saturation: Some(vitals.oxygen_saturation),
        temperature: Some(vitals.temperature),
        gcs: Some(vitals.gcs),
        blood_glucose: Some(vitals.blood_glucose),
        chief_complaint: vitals.chief_complaint.clone(),
        symptoms: Some(vitals.symptoms.clone()),
    }
}

pub(super) fn capabilities(tags: &[&str]) -> BTreeSet<Capability> {
    tags.iter().map(|tag| Capability::from(*tag)).collect()
}

pub(super) fn hospital(
    id: u32,
    distance_miles: f64,
    bed_availability: BedAvailability,
    tags: &[&str],
) -> Hospital {
    Hospital {
        id: HospitalId(id),
        name: format!("Hospital {id}"),
        distance_miles,
        wait_time: "15 min".to_string(),
        bed_availability,
        capabilities: capabilities(tags),
    }
}

pub(super) fn build_service() -> (
    TriageService<MemoryPatients, MemoryNotifications>,
    Arc<MemoryPatients>,
    Arc<MemoryNotifications>,
) {
    let patients = Arc::new(MemoryPatients::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = TriageService::new(
        Arc::new(HospitalCatalog::demo().expect("demo catalog is valid")),
        patients.clone(),
        notifications.clone(),
        TriageConfig::default(),
    );
    (service, patients, notifications)
}

#[derive(Default, Clone)]
pub(super) struct MemoryPatients {
    pub(super) records: Arc<Mutex<HashMap<PatientId, PatientRecord>>>,
}

impl PatientRepository for MemoryPatients {
    fn insert(&self, record: PatientRecord) -> Result<PatientRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &PatientId) -> Result<Option<PatientRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifications {
    events: Arc<Mutex<Vec<HospitalNotification>>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<HospitalNotification> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}

impl NotificationRepository for MemoryNotifications {
    fn publish(&self, notification: HospitalNotification) -> Result<(), RepositoryError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }

    fn for_hospital(
        &self,
        hospital_id: HospitalId,
    ) -> Result<Vec<HospitalNotification>, RepositoryError> {
        let guard = self.events.lock().expect("notification mutex poisoned");
        Ok(guard
            .iter()
            .filter(|notification| notification.hospital_id == hospital_id)
            .cloned()
            .collect())
    }

    fn mark_arrived(
        &self,
        patient_id: &PatientId,
    ) -> Result<HospitalNotification, RepositoryError> {
        let mut guard = self.events.lock().expect("notification mutex poisoned");
        let notification = guard
            .iter_mut()
            .find(|notification| &notification.patient_id == patient_id)
            .ok_or(RepositoryError::NotFound)?;
        notification.status = NotificationStatus::Arrived;
        Ok(notification.clone())
    }
}

pub(super) struct UnavailablePatients;

impl PatientRepository for UnavailablePatients {
    fn insert(&self, _record: PatientRecord) -> Result<PatientRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &PatientId) -> Result<Option<PatientRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
