use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use orthanc_gateway::config::Config;
use orthanc_gateway::{
    ApiConfig, HttpTransport, Orthanc, Outcome, PatientSex, PerformedProcedureStep, PrintSettings, ResourceType,
    WorkerPool, WorklistRequest,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "orthanc-gateway",
    about = "Run archive operations against an Orthanc server"
)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Archive host, overrides the configuration file
    #[arg(long)]
    host: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// C-ECHO a modality
    Echo { modality: String },
    /// List configured modalities
    Modalities,
    /// Show the AE title of a modality
    AeTitle { modality: String },
    /// Query a modality worklist
    Worklist {
        modality: String,
        #[arg(long, default_value = "")]
        name: String,
        /// M, F or O
        #[arg(long, default_value = "")]
        sex: String,
        /// Scheduled station modality, e.g. CT
        #[arg(long, default_value = "")]
        station_modality: String,
        /// First start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last start date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Download the DICOMDIR media archive of a resource
    Media {
        #[arg(value_enum)]
        level: Level,
        id: String,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// C-STORE a resource to a modality
    Store {
        #[arg(value_enum)]
        level: Level,
        id: String,
        modality: String,
    },
    /// Print an image file on a printer modality
    Print {
        modality: String,
        image: PathBuf,
        #[arg(long, default_value_t = 1)]
        copies: i32,
        #[arg(long, default_value = "")]
        film_size: String,
        #[arg(long, default_value = "")]
        orientation: String,
    },
    /// Start a scheduled procedure step
    SpsStart { modality: String, uuid: String },
    /// Cancel the running procedure step
    SpsCancel { modality: String },
    /// Complete the running procedure step with one performed series
    SpsComplete {
        modality: String,
        #[arg(long)]
        operator: String,
        #[arg(long)]
        series_uid: String,
        #[arg(long)]
        retrieve_aet: String,
    },
    /// List resources at a level
    Resources {
        #[arg(value_enum)]
        level: Level,
    },
    /// Delete a resource by public id
    Remove {
        #[arg(value_enum)]
        level: Level,
        id: String,
    },
    /// Reload the archive configuration
    Reload,
    /// Restart the archive
    Restart,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Level {
    Patient,
    Study,
    Series,
    Instance,
}

impl From<Level> for ResourceType {
    fn from(level: Level) -> Self {
        match level {
            Level::Patient => ResourceType::Patient,
            Level::Study => ResourceType::Study,
            Level::Series => ResourceType::Series,
            Level::Instance => ResourceType::Instance,
        }
    }
}

fn print_outcome<R: Serialize>(outcome: &Outcome<R>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    orthanc_gateway::init_logging(&config.logging)?;

    orthanc_gateway::set_host(cli.host.unwrap_or(config.archive.host));
    let orthanc = match config.archive.worker_threads {
        Some(threads) => Orthanc::with_transport(
            HttpTransport::new(ApiConfig::with_host(orthanc_gateway::host())),
            Arc::new(WorkerPool::new(threads).context("failed to start worker pool")?),
        ),
        None => Orthanc::new(),
    };
    tracing::debug!("Using archive at {}", orthanc.target().base_url());

    match cli.cmd {
        Cmd::Echo { modality } => print_outcome(&orthanc.echo(&modality).wait()),
        Cmd::Modalities => print_outcome(&orthanc.list_modalities().wait()),
        Cmd::AeTitle { modality } => print_outcome(&orthanc.ae_title(&modality).wait()),
        Cmd::Worklist {
            modality,
            name,
            sex,
            station_modality,
            from,
            to,
        } => {
            let request = WorklistRequest {
                patient_name: name,
                sex: PatientSex::from_code(&sex.to_uppercase()),
                modality: station_modality,
                start_date_from: from,
                start_date_to: to,
            };
            print_outcome(&orthanc.worklist(&modality, &request).wait())
        }
        Cmd::Media { level, id, output } => {
            let outcome = orthanc.media(level.into(), &id).wait();
            if outcome.success() && !outcome.result().is_empty() {
                std::fs::write(&output, outcome.result())
                    .with_context(|| format!("failed to write {}", output.display()))?;
                eprintln!("Wrote {} bytes to {}", outcome.result().len(), output.display());
            }
            println!(
                "{}",
                serde_json::json!({ "success": outcome.success(), "bytes": outcome.result().len() })
            );
            Ok(())
        }
        Cmd::Store { level, id, modality } => {
            print_outcome(&orthanc.store(level.into(), &id, &modality).wait())
        }
        Cmd::Print {
            modality,
            image,
            copies,
            film_size,
            orientation,
        } => {
            let bitmap = image::open(&image)
                .with_context(|| format!("failed to open {}", image.display()))?;
            let settings = PrintSettings {
                copies,
                film_size_id: film_size,
                film_orientation: orientation,
                image: bitmap,
                ..PrintSettings::default()
            };
            print_outcome(&orthanc.print(&modality, &settings).wait())
        }
        Cmd::SpsStart { modality, uuid } => print_outcome(&orthanc.sps_start(&modality, &uuid).wait()),
        Cmd::SpsCancel { modality } => print_outcome(&orthanc.sps_cancel(&modality).wait()),
        Cmd::SpsComplete {
            modality,
            operator,
            series_uid,
            retrieve_aet,
        } => {
            let steps = [PerformedProcedureStep {
                operators_name: operator,
                series_instance_uid: series_uid,
                retrieve_ae_title: retrieve_aet,
            }];
            print_outcome(&orthanc.sps_complete(&modality, &steps).wait())
        }
        Cmd::Resources { level } => print_outcome(&orthanc.list_resources(level.into()).wait()),
        Cmd::Remove { level, id } => print_outcome(&orthanc.remove(level.into(), &id).wait()),
        Cmd::Reload => print_outcome(&orthanc.reload().wait()),
        Cmd::Restart => {
            // A detached restart could be cut off by process exit
            orthanc.operations().restart();
            Ok(())
        }
    }
}
