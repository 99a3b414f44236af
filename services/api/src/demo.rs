use crate::infra::{InMemoryNotificationRepository, InMemoryPatientRepository};
use clap::Args;
use smart_triage::config::AppConfig;
use smart_triage::error::AppError;
use smart_triage::workflows::triage::{
    DashboardQuery, DispatchRequest, HospitalCatalog, HospitalId, TriageConfig, TriageOutcome,
    TriageService, TriageSubmission,
};
use std::sync::Arc;

type DemoService = TriageService<InMemoryPatientRepository, InMemoryNotificationRepository>;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Heart rate in beats per minute
    #[arg(long)]
    pub(crate) heart_rate: i32,
    /// Blood pressure as systolic/diastolic, e.g. 120/80
    #[arg(long)]
    pub(crate) blood_pressure: String,
    /// Breaths per minute
    #[arg(long)]
    pub(crate) respiratory_rate: i32,
    /// SpO2 percentage
    #[arg(long)]
    pub(crate) oxygen_saturation: i32,
    /// Body temperature in Celsius
    #[arg(long)]
    pub(crate) temperature: f32,
    /// Glasgow Coma Scale (3-15)
    #[arg(long)]
    pub(crate) gcs: i32,
    /// Blood glucose in mg/dL
    #[arg(long)]
    pub(crate) blood_glucose: i32,
    /// Chief complaint as reported by the crew
    #[arg(long)]
    pub(crate) chief_complaint: String,
    /// Free-text symptom description
    #[arg(long)]
    pub(crate) symptoms: Option<String>,
}

impl AssessArgs {
    fn into_submission(self) -> TriageSubmission {
        TriageSubmission {
            heart_rate: Some(self.heart_rate),
            systolic_bp: None,
            diastolic_bp: None,
            blood_pressure: Some(self.blood_pressure),
            respiratory_rate: Some(self.respiratory_rate),
            oxygen_saturation: Some(self.oxygen_saturation),
            temperature: Some(self.temperature),
            gcs: Some(self.gcs),
            blood_glucose: Some(self.blood_glucose),
            chief_complaint: self.chief_complaint,
            symptoms: self.symptoms,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Hospital whose incoming dashboard is shown after dispatch
    #[arg(long, default_value_t = 1)]
    pub(crate) hospital: u32,
    /// Minutes until arrival reported on every dispatch
    #[arg(long, default_value_t = 12)]
    pub(crate) eta_minutes: u32,
    /// Ambulance crew identifier attached to dispatches
    #[arg(long, default_value = "AMB-01")]
    pub(crate) crew: String,
    /// Leave dispatched patients pending instead of admitting them
    #[arg(long)]
    pub(crate) skip_admission: bool,
}

fn build_service(config: TriageConfig) -> Result<DemoService, AppError> {
    Ok(TriageService::new(
        Arc::new(HospitalCatalog::demo()?),
        Arc::new(InMemoryPatientRepository::default()),
        Arc::new(InMemoryNotificationRepository::default()),
        config,
    ))
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(config.triage)?;

    let outcome = service.assess(&args.into_submission())?;
    render_outcome(&outcome);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        hospital,
        eta_minutes,
        crew,
        skip_admission,
    } = args;

    let config = AppConfig::load()?;
    let service = build_service(config.triage)?;

    println!("Smart emergency triage demo");
    let mut dispatched = Vec::new();
    for submission in sample_submissions() {
        let (record, outcome) = service.submit(submission)?;
        println!("\nPatient {} | {}", record.id, record.vitals.chief_complaint);
        render_outcome(&outcome);

        let destination = outcome
            .best_match()
            .map(|ranked| ranked.matched.hospital.id)
            .or_else(|| outcome.fallback.as_ref().map(|hospital| hospital.id));
        let Some(hospital_id) = destination else {
            println!("  No destination available; patient not dispatched");
            continue;
        };

        let notification = service.dispatch(DispatchRequest {
            patient_id: record.id.clone(),
            hospital_id,
            eta_minutes,
            ambulance_crew_id: crew.clone(),
        })?;
        println!(
            "  Dispatched to hospital {} (ETA {} min, crew {})",
            notification.hospital_id, notification.eta_minutes, notification.ambulance_crew_id
        );
        dispatched.push(record.id);
    }

    render_incoming(&service, HospitalId(hospital))?;

    println!("\nDashboard (priority, then most recent)");
    for record in service.dashboard(&DashboardQuery::default())? {
        println!(
            "  - {} [{}] score {} | {}",
            record.id, record.priority, record.score, record.vitals.chief_complaint
        );
    }

    if skip_admission {
        return Ok(());
    }

    println!("\nAdmissions");
    for patient_id in &dispatched {
        let notification = service.admit(patient_id)?;
        println!(
            "  - {} at hospital {}: {}",
            notification.patient_id,
            notification.hospital_id,
            notification.status.label()
        );
    }

    Ok(())
}

fn render_outcome(outcome: &TriageOutcome) {
    println!(
        "  Priority: {} (score {})",
        outcome.priority.label().to_uppercase(),
        outcome.score
    );
    for component in &outcome.components {
        println!("    + {} {}", component.points, component.notes);
    }

    let labels: Vec<&str> = outcome
        .required_capabilities
        .iter()
        .map(|capability| capability.label())
        .collect();
    println!("  Required capabilities: {}", labels.join(", "));

    if outcome.matches.is_empty() {
        match &outcome.fallback {
            Some(hospital) => println!(
                "  No suitable hospitals found; nearest is {} ({:.1} miles)",
                hospital.name, hospital.distance_miles
            ),
            None => println!("  No suitable hospitals found"),
        }
        return;
    }

    println!("  Recommended hospitals:");
    for ranked in &outcome.matches {
        let hospital = &ranked.matched.hospital;
        println!(
            "    - {} | {}% match | {:.1} mi | wait {} | beds {}",
            hospital.name,
            ranked.match_percentage,
            hospital.distance_miles,
            hospital.wait_time,
            hospital.bed_availability.label()
        );
    }
}

fn render_incoming(service: &DemoService, hospital_id: HospitalId) -> Result<(), AppError> {
    let name = service
        .catalog()
        .get(hospital_id)
        .map(|hospital| hospital.name.clone())
        .unwrap_or_else(|| format!("hospital {hospital_id}"));
    let incoming = service.incoming(hospital_id)?;

    println!("\nIncoming at {name}");
    if incoming.is_empty() {
        println!("  No incoming patients");
    }
    for notification in incoming {
        println!(
            "  - {} [{}] ETA {} min | {}",
            notification.patient_id,
            notification.patient.priority,
            notification.eta_minutes,
            notification.status.label()
        );
    }
    Ok(())
}

fn sample_submissions() -> Vec<TriageSubmission> {
    vec![
        TriageSubmission {
            heart_rate: Some(110),
            blood_pressure: Some("150/95".to_string()),
            respiratory_rate: Some(22),
            oxygen_saturation: Some(92),
            temperature: Some(38.5),
            gcs: Some(14),
            blood_glucose: Some(110),
            chief_complaint: "Chest pain".to_string(),
            symptoms: Some("Chest pain radiating to left arm, shortness of breath".to_string()),
            ..TriageSubmission::default()
        },
        TriageSubmission {
            heart_rate: Some(85),
            blood_pressure: Some("118/78".to_string()),
            respiratory_rate: Some(16),
            oxygen_saturation: Some(98),
            temperature: Some(37.2),
            gcs: Some(15),
            blood_glucose: Some(95),
            chief_complaint: "Fever and cough".to_string(),
            symptoms: Some("Fever, cough, body aches for 3 days".to_string()),
            ..TriageSubmission::default()
        },
        TriageSubmission {
            heart_rate: Some(72),
            blood_pressure: Some("130/85".to_string()),
            respiratory_rate: Some(18),
            oxygen_saturation: Some(96),
            temperature: Some(36.8),
            gcs: Some(15),
            blood_glucose: Some(180),
            chief_complaint: "Forearm laceration".to_string(),
            symptoms: Some("Laceration on right forearm from fall".to_string()),
            ..TriageSubmission::default()
        },
    ]
}
