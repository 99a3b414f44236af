use crate::demo::{run_assess, run_demo, AssessArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use smart_triage::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Smart Emergency Triage",
    about = "Score ambulance patients and route them to the best-equipped hospital",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assess one patient from vitals given on the command line
    Assess(AssessArgs),
    /// Run the sample patients through triage, dispatch, and admission
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assess_flags_parse_into_args() {
        let cli = Cli::try_parse_from([
            "smart-triage",
            "assess",
            "--heart-rate",
            "110",
            "--blood-pressure",
            "150/95",
            "--respiratory-rate",
            "22",
            "--oxygen-saturation",
            "92",
            "--temperature",
            "38.5",
            "--gcs",
            "14",
            "--blood-glucose",
            "90",
            "--chief-complaint",
            "Chest pain",
            "--symptoms",
            "chest pain radiating to arm",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Assess(args)) => {
                assert_eq!(args.heart_rate, 110);
                assert_eq!(args.blood_pressure, "150/95");
                assert_eq!(args.symptoms.as_deref(), Some("chest pain radiating to arm"));
            }
            other => panic!("expected assess command, got {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["smart-triage"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
