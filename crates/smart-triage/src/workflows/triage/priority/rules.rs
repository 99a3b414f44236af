use super::super::domain::VitalSigns;
use super::{ScoreComponent, VitalSign};

// Inclusive `(low, high)` bounds. The capability resolver keys on the severe
// bands through the `*_severe` helpers.
const HEART_RATE_SEVERE: (i32, i32) = (50, 120);
const HEART_RATE_MODERATE: (i32, i32) = (60, 100);
const SYSTOLIC_SEVERE: (i32, i32) = (90, 180);
const SYSTOLIC_MODERATE: (i32, i32) = (100, 160);
const DIASTOLIC_SEVERE: (i32, i32) = (60, 110);
const DIASTOLIC_MODERATE: (i32, i32) = (70, 100);
const RESPIRATORY_RATE_SEVERE: (i32, i32) = (12, 24);
const RESPIRATORY_RATE_MODERATE: (i32, i32) = (14, 20);
const GLUCOSE_SEVERE: (i32, i32) = (50, 250);
const GLUCOSE_MODERATE: (i32, i32) = (70, 180);
const OXYGEN_SEVERE_BELOW: i32 = 92;
const OXYGEN_MODERATE_BELOW: i32 = 95;

fn outside(value: i32, band: (i32, i32)) -> bool {
    value < band.0 || value > band.1
}

pub(crate) fn heart_rate_severe(value: i32) -> bool {
    outside(value, HEART_RATE_SEVERE)
}

pub(crate) fn systolic_severe(value: i32) -> bool {
    outside(value, SYSTOLIC_SEVERE)
}

pub(crate) fn respiratory_rate_severe(value: i32) -> bool {
    outside(value, RESPIRATORY_RATE_SEVERE)
}

pub(crate) fn oxygen_saturation_severe(value: i32) -> bool {
    value < OXYGEN_SEVERE_BELOW
}

pub(crate) fn blood_glucose_severe(value: i32) -> bool {
    outside(value, GLUCOSE_SEVERE)
}

fn banded(value: i32, severe: (i32, i32), moderate: (i32, i32)) -> u8 {
    if outside(value, severe) {
        2
    } else if outside(value, moderate) {
        1
    } else {
        0
    }
}

fn oxygen_points(value: i32) -> u8 {
    if oxygen_saturation_severe(value) {
        3
    } else if value < OXYGEN_MODERATE_BELOW {
        1
    } else {
        0
    }
}

fn gcs_points(value: i32) -> u8 {
    if value < 9 {
        3
    } else if value < 13 {
        2
    } else if value < 15 {
        1
    } else {
        0
    }
}

// The two glucose bands stack: a reading below 50 or above 250 also sits
// outside 70..=180, so it earns both.
fn glucose_points(value: i32) -> u8 {
    let mut points = 0;
    if outside(value, GLUCOSE_MODERATE) {
        points += 1;
    }
    if blood_glucose_severe(value) {
        points += 2;
    }
    points
}

pub(crate) fn score_vitals(vitals: &VitalSigns) -> (Vec<ScoreComponent>, u8) {
    let contributions = [
        (
            VitalSign::HeartRate,
            vitals.heart_rate,
            banded(vitals.heart_rate, HEART_RATE_SEVERE, HEART_RATE_MODERATE),
            "bpm",
        ),
        (
            VitalSign::SystolicBp,
            vitals.systolic_bp,
            banded(vitals.systolic_bp, SYSTOLIC_SEVERE, SYSTOLIC_MODERATE),
            "mmHg",
        ),
        (
            VitalSign::DiastolicBp,
            vitals.diastolic_bp,
            banded(vitals.diastolic_bp, DIASTOLIC_SEVERE, DIASTOLIC_MODERATE),
            "mmHg",
        ),
        (
            VitalSign::RespiratoryRate,
            vitals.respiratory_rate,
            banded(
                vitals.respiratory_rate,
                RESPIRATORY_RATE_SEVERE,
                RESPIRATORY_RATE_MODERATE,
            ),
            "breaths/min",
        ),
        (
            VitalSign::OxygenSaturation,
            vitals.oxygen_saturation,
            oxygen_points(vitals.oxygen_saturation),
            "%",
        ),
        (VitalSign::Gcs, vitals.gcs, gcs_points(vitals.gcs), "/15"),
        (
            VitalSign::BloodGlucose,
            vitals.blood_glucose,
            glucose_points(vitals.blood_glucose),
            "mg/dL",
        ),
    ];

    let mut components = Vec::new();
    let mut total: u8 = 0;

    for (vital, value, points, unit) in contributions {
        if points == 0 {
            continue;
        }
        total += points;
        components.push(ScoreComponent {
            vital,
            points,
            notes: format!("{} {value}{unit} outside normal range", vital.label()),
        });
    }

    (components, total)
}
