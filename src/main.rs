mod config;
mod index;
mod output;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use lunchcal_core::{
    DateRange, Generation, GenerationRequest, NutrisliceClient, SchoolErrorPolicy, SchoolFailure,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use crate::config::{Overrides, Settings};
use crate::output::Manifest;
use crate::render::Render;

#[derive(Parser)]
#[command(name = "lunchcal")]
#[command(about = "Generate ICS calendars from Nutrislice school lunch menus")]
#[command(version)]
struct Cli {
    /// Nutrislice district [env: NUTRISLICE_DISTRICT] [default: a2schools]
    #[arg(long)]
    district: Option<String>,

    /// Menu type to fetch [env: NUTRISLICE_MENU_TYPE] [default: lunch]
    #[arg(long)]
    menu_type: Option<String>,

    /// Number of days to generate from today forward [env: NUTRISLICE_DAYS_AHEAD] [default: 28]
    #[arg(long)]
    days_ahead: Option<u32>,

    /// Directory to write ICS files and index.html [env: NUTRISLICE_OUTPUT_DIR] [default: public]
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Config file (defaults to ./lunchcal.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip schools whose menus fail to download instead of stopping
    #[arg(long)]
    keep_going: bool,

    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::load(
        cli.config.as_deref(),
        Overrides {
            district: cli.district,
            menu_type: cli.menu_type,
            days_ahead: cli.days_ahead,
            output_dir: cli.output_dir,
        },
    )?;

    let policy = if cli.keep_going {
        SchoolErrorPolicy::Skip
    } else {
        SchoolErrorPolicy::Abort
    };

    run(&settings, policy).await
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(settings: &Settings, policy: SchoolErrorPolicy) -> Result<()> {
    let today = Local::now().date_naive();
    let request = GenerationRequest {
        district: settings.district.clone(),
        menu_type: settings.menu_type.clone(),
        range: DateRange::days_ahead(today, settings.days_ahead)?,
        on_school_error: policy,
    };

    let client = NutrisliceClient::new()?;

    let spinner = utils::tui::create_spinner(format!("Fetching schools for {}...", request.district));
    let schools = client.fetch_schools(&request.district).await;
    spinner.finish_and_clear();
    let schools =
        schools.with_context(|| format!("Failed to list schools for {}", request.district))?;
    tracing::info!(district = %request.district, count = schools.len(), "Fetched schools");

    println!(
        "📅 {} {}",
        request.district.bold(),
        format!(
            "({} menus, {} to {})",
            request.menu_type, request.range.start, request.range.end
        )
        .dimmed()
    );

    let mut generation = Generation::default();
    for school in schools {
        let spinner = utils::tui::create_spinner(format!("   {}", school.name));
        let result = lunchcal_core::generate_school(&client, &request, &school).await;
        spinner.finish_and_clear();

        match result {
            Ok(calendar) => {
                println!("{}", calendar.render());
                generation.calendars.push(calendar);
            }
            Err(error) if policy == SchoolErrorPolicy::Skip => {
                tracing::warn!(school = %school.slug, "Skipping school: {error}");
                let failure = SchoolFailure { school, error };
                println!("{}", failure.render());
                generation.failures.push(failure);
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("Failed to generate calendar for {}", school.name));
            }
        }
    }

    if generation.calendars.is_empty() && generation.failures.is_empty() {
        println!("{}", generation.render());
    }

    let schools = generation.schools();
    output::write_calendars(&settings.output_dir, &generation.calendars)?;
    index::write_index(&settings.output_dir, &schools)?;
    output::write_manifest(
        &settings.output_dir,
        &Manifest::new(settings, schools, Utc::now()),
    )?;

    println!(
        "\nWrote {} {} to {}",
        generation.calendars.len(),
        if generation.calendars.len() == 1 { "calendar" } else { "calendars" },
        settings.output_dir.display()
    );

    if !generation.failures.is_empty() {
        anyhow::bail!(
            "{} of {} schools failed to generate",
            generation.failures.len(),
            generation.failures.len() + generation.calendars.len()
        );
    }

    Ok(())
}
