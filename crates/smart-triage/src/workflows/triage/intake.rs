use serde::{Deserialize, Serialize};

use super::domain::VitalSigns;

/// Raw crew-entered observations as they arrive from the form or API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriageSubmission {
    #[serde(default)]
    pub heart_rate: Option<i32>,
    #[serde(default)]
    pub systolic_bp: Option<i32>,
    #[serde(default)]
    pub diastolic_bp: Option<i32>,
    /// Combined `"120/80"` reading, used when the split fields are absent.
    #[serde(default)]
    pub blood_pressure: Option<String>,
    #[serde(default)]
    pub respiratory_rate: Option<i32>,
    #[serde(default)]
    pub oxygen_saturation: Option<i32>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub gcs: Option<i32>,
    #[serde(default)]
    pub blood_glucose: Option<i32>,
    #[serde(default)]
    pub chief_complaint: String,
    #[serde(default)]
    pub symptoms: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("missing required vital sign: {0}")]
    MissingField(&'static str),
    #[error("blood pressure '{0}' must look like 120/80 with systolic above diastolic")]
    InvalidBloodPressure(String),
    #[error("temperature must be a finite number")]
    NonFiniteTemperature,
    #[error("chief complaint is required")]
    MissingChiefComplaint,
}

/// Converts submissions into `VitalSigns`, failing on absent or malformed fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn vitals_from_submission(
        &self,
        submission: &TriageSubmission,
    ) -> Result<VitalSigns, IntakeError> {
        let (systolic_bp, diastolic_bp) = match (submission.systolic_bp, submission.diastolic_bp) {
            (Some(systolic), Some(diastolic)) => (systolic, diastolic),
            _ => match submission.blood_pressure.as_deref() {
                Some(raw) => parse_blood_pressure(raw)?,
                None if submission.systolic_bp.is_none() => {
                    return Err(IntakeError::MissingField("systolic_bp"))
                }
                None => return Err(IntakeError::MissingField("diastolic_bp")),
            },
        };

        let temperature = required(submission.temperature, "temperature")?;
        if !temperature.is_finite() {
            return Err(IntakeError::NonFiniteTemperature);
        }

        let chief_complaint = submission.chief_complaint.trim();
        if chief_complaint.is_empty() {
            return Err(IntakeError::MissingChiefComplaint);
        }

        Ok(VitalSigns {
            heart_rate: required(submission.heart_rate, "heart_rate")?,
            systolic_bp,
            diastolic_bp,
            respiratory_rate: required(submission.respiratory_rate, "respiratory_rate")?,
            oxygen_saturation: required(submission.oxygen_saturation, "oxygen_saturation")?,
            temperature,
            gcs: required(submission.gcs, "gcs")?,
            blood_glucose: required(submission.blood_glucose, "blood_glucose")?,
            chief_complaint: chief_complaint.to_string(),
            symptoms: submission
                .symptoms
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
        })
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, IntakeError> {
    value.ok_or(IntakeError::MissingField(field))
}

/// Parse a `systolic/diastolic` reading of two or three digits each.
pub fn parse_blood_pressure(raw: &str) -> Result<(i32, i32), IntakeError> {
    let invalid = || IntakeError::InvalidBloodPressure(raw.to_string());

    let (systolic, diastolic) = raw.trim().split_once('/').ok_or_else(invalid)?;
    let systolic = parse_reading(systolic).ok_or_else(invalid)?;
    let diastolic = parse_reading(diastolic).ok_or_else(invalid)?;

    if systolic == 0 || diastolic == 0 || systolic <= diastolic {
        return Err(invalid());
    }

    Ok((systolic, diastolic))
}

fn parse_reading(part: &str) -> Option<i32> {
    let digits = part.len();
    if !(2..=3).contains(&digits) || !part.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
