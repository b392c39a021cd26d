mod config;

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    FieldKind, FieldName, FormController, RawFormValues, RequestCoordinator, ServerStatus,
    SubmitError, ValidatedForm, Verdict, FIELD_SPECS,
};
use shared::protocol::PredictionOutcome;
use tracing::{debug, info};

use crate::config::{load_settings, prepare_base_url};

#[derive(Parser, Debug)]
#[command(name = "predictor", about = "Predictor de estrés para estudiantes")]
struct Cli {
    /// Overrides the configured prediction service url.
    #[arg(long)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the form and ask the service for a prediction.
    Predict {
        #[command(flatten)]
        form: FormArgs,
        /// Probe the server status while the prediction is in flight.
        #[arg(long)]
        check_health: bool,
    },
    /// Check whether the prediction service is reachable.
    Health,
    /// Score a JSON array of form records in one request.
    Batch { file: PathBuf },
    /// List the form fields with their constraints and choices.
    Options,
}

#[derive(Args, Debug)]
struct FormArgs {
    #[arg(long)]
    age: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    year_of_study: Option<String>,
    /// Course label or its position in the course list.
    #[arg(long)]
    course: Option<String>,
    #[arg(long)]
    cgpa: Option<String>,
    #[arg(long)]
    married: Option<String>,
    #[arg(long)]
    specialized_treatment: Option<String>,
}

impl FormArgs {
    fn apply(self, form: &mut FormController) {
        let inputs = [
            (FieldName::Age, self.age),
            (FieldName::Gender, self.gender),
            (FieldName::YearOfStudy, self.year_of_study),
            (FieldName::Course, self.course),
            (FieldName::Cgpa, self.cgpa),
            (FieldName::Married, self.married),
            (FieldName::SpecializedTreatment, self.specialized_treatment),
        ];
        for (field, value) in inputs {
            if let Some(value) = value {
                form.set(field, value);
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let base_url = prepare_base_url(cli.base_url.as_deref().unwrap_or(&settings.base_url))?;
    info!(%base_url, "using prediction service");
    let coordinator = RequestCoordinator::new(base_url);
    let mut out = io::stdout();

    match cli.command {
        Command::Predict { form, check_health } => {
            run_predict(&coordinator, form, check_health, &mut out).await
        }
        Command::Health => run_health(&coordinator, &mut out).await,
        Command::Batch { file } => {
            let records = load_records(&file)?;
            run_batch(&coordinator, &records, &mut out).await
        }
        Command::Options => print_options(&mut out),
    }
}

async fn run_predict(
    coordinator: &RequestCoordinator,
    args: FormArgs,
    check_health: bool,
    out: &mut impl Write,
) -> Result<()> {
    let mut form = FormController::new();
    args.apply(&mut form);

    let result = if check_health {
        let (result, status) = tokio::join!(form.submit(coordinator), coordinator.check_health());
        print_server_status(out, status)?;
        result
    } else {
        form.submit(coordinator).await
    };

    match result {
        Ok(outcome) => print_verdict(out, &outcome),
        Err(SubmitError::Validation(errors)) => {
            writeln!(out, "Revisa los siguientes campos:")?;
            for error in errors.iter() {
                writeln!(out, "  {error}")?;
            }
            bail!("{} invalid field(s); nothing was sent", errors.len())
        }
        Err(SubmitError::Transport(error)) => {
            Err(anyhow::Error::new(error).context("prediction request failed"))
        }
    }
}

async fn run_health(coordinator: &RequestCoordinator, out: &mut impl Write) -> Result<()> {
    let status = coordinator.check_health().await;
    print_server_status(out, status)?;
    if status == ServerStatus::Offline {
        bail!("prediction service is offline");
    }
    Ok(())
}

fn load_records(file: &Path) -> Result<Vec<RawFormValues>> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("failed to read records from '{}'", file.display()))?;
    let records: Vec<RawFormValues> = serde_json::from_str(&raw)
        .with_context(|| format!("'{}' is not a JSON array of form records", file.display()))?;
    debug!(count = records.len(), "loaded batch records");
    Ok(records)
}

/// Validates every record first; a single invalid record means nothing is sent.
async fn run_batch(
    coordinator: &RequestCoordinator,
    records: &[RawFormValues],
    out: &mut impl Write,
) -> Result<()> {
    let mut payloads = Vec::with_capacity(records.len());
    let mut invalid = 0usize;
    for (index, record) in records.iter().enumerate() {
        match ValidatedForm::from_raw(record) {
            Ok(form) => payloads.push(form.to_payload()),
            Err(errors) => {
                invalid += 1;
                writeln!(out, "Registro #{}:", index + 1)?;
                for error in errors.iter() {
                    writeln!(out, "  {error}")?;
                }
            }
        }
    }
    if invalid > 0 {
        bail!("{invalid} of {} record(s) are invalid; nothing was sent", records.len());
    }

    let outcomes = coordinator
        .predict_batch(&payloads)
        .await
        .context("batch prediction request failed")?;
    for (index, outcome) in outcomes.iter().enumerate() {
        writeln!(out, "#{}: {}", index + 1, Verdict::from(outcome).title())?;
    }
    Ok(())
}

fn print_verdict(out: &mut impl Write, outcome: &PredictionOutcome) -> Result<()> {
    let verdict = Verdict::from(outcome);
    writeln!(out, "{}", verdict.title())?;
    writeln!(out, "{}", verdict.message())?;
    Ok(())
}

fn print_server_status(out: &mut impl Write, status: ServerStatus) -> Result<()> {
    if let Some(description) = status.description() {
        writeln!(out, "Estado del servidor: {description}")?;
    }
    Ok(())
}

fn print_options(out: &mut impl Write) -> Result<()> {
    for spec in &FIELD_SPECS {
        let constraint = match spec.kind {
            FieldKind::Integer { min, max } => format!("entero entre {min} y {max}"),
            FieldKind::Decimal { min, max } => format!("número entre {min} y {max}"),
            FieldKind::Choice {
                options,
                accepts_index,
            } => {
                if accepts_index {
                    options
                        .iter()
                        .enumerate()
                        .map(|(index, option)| format!("{index}={option}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                } else {
                    options.join(" | ")
                }
            }
        };
        writeln!(out, "--{:<24} {} ({constraint})", flag_name(spec.name), spec.label)?;
        writeln!(out, "  {:<24} {}", "", spec.placeholder)?;
        if let Some(description) = spec.description {
            writeln!(out, "  {:<24} {description}", "")?;
        }
    }
    Ok(())
}

fn flag_name(field: FieldName) -> &'static str {
    match field {
        FieldName::Age => "age",
        FieldName::Gender => "gender",
        FieldName::YearOfStudy => "year-of-study",
        FieldName::Course => "course",
        FieldName::Cgpa => "cgpa",
        FieldName::Married => "married",
        FieldName::SpecializedTreatment => "specialized-treatment",
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
