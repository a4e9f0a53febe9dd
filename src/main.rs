use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use asigna::engine::{self, LicenseNamer};
use asigna::model::Minutes;
use asigna::report;
use asigna::table;

/// Assign a term's class sessions to shared video-conferencing licenses.
#[derive(Debug, Parser)]
#[command(name = "asigna", version, about)]
struct Cli {
    /// Timetable CSV with DOCENTE, DIA, HORA INICIO and HORA FIN columns.
    input: PathBuf,

    /// Allocated schedule CSV.
    #[arg(long, default_value = "horario_con_licencias.csv")]
    output: PathBuf,

    /// Per-day license summary CSV.
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Full run report as JSON.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Minimum gap in minutes for two bookings to count as non-overlapping.
    #[arg(long, default_value_t = 10)]
    margin: u32,

    /// How many overlapping sessions one license may host.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    max_simultaneous: u32,

    /// License identifier prefix.
    #[arg(long, default_value = "UAI")]
    prefix: String,

    /// License identifier mail domain.
    #[arg(long, default_value = "@autonomadeica.edu.pe")]
    domain: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let rows = table::read_rows(File::open(&cli.input)?)?;
    info!("read {} row(s) from {}", rows.len(), cli.input.display());

    // Validation gate: the whole batch canonicalizes or nothing runs.
    let sessions = table::canonicalize(&rows)?;

    let namer = LicenseNamer::new(cli.prefix.as_str(), cli.domain.as_str());
    let allocation = engine::allocate(
        &sessions,
        cli.margin as Minutes,
        cli.max_simultaneous,
        &namer,
    );
    info!(
        "allocated {} session(s) onto {} license(s)",
        sessions.len(),
        allocation.licenses.len()
    );

    let summary = engine::summarize(&sessions, &allocation);
    for entry in &summary {
        info!("{}: {} license(s)", entry.day.name(), entry.licenses);
    }

    report::write_schedule(File::create(&cli.output)?, &sessions, &allocation)?;
    info!("schedule written to {}", cli.output.display());

    if let Some(path) = &cli.summary {
        report::write_summary(File::create(path)?, &summary)?;
        info!("summary written to {}", path.display());
    }

    if let Some(path) = &cli.json {
        let report = report::run_report(&sessions, &allocation, &summary);
        serde_json::to_writer_pretty(File::create(path)?, &report)?;
        info!("report written to {}", path.display());
    }

    Ok(())
}
