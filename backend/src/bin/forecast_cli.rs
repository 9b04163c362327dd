//! Avalanche forecast command-line tool.
//!
//! Rates avalanche problems and manages stored forecasts.
//!
//! # Usage
//!
//! ```bash
//! # Rate a single problem: likelihood 4 (Very Likely), size 2 (Large)
//! forecast-cli rate 4 2
//!
//! # Rate the problems in a JSON draft
//! forecast-cli calc draft.json
//!
//! # Work against a JSON file store
//! forecast-cli --data-file forecasts.json create --region "Rogers Pass" --date 2025-01-10
//! forecast-cli --data-file forecasts.json edit 1 --slot primary --likelihood 4 --add alp_N
//! forecast-cli --data-file forecasts.json publish 1
//! forecast-cli --data-file forecasts.json report 1
//! ```
//!
//! # Environment Variables
//!
//! - `REPOSITORY_TYPE`: `local` or `file`
//! - `FORECAST_DATA_FILE`: data file for the file repository
//!
//! Without `--data-file`, `--config`, these variables or a `repository.toml`,
//! forecasts are kept in `forecasts.json` in the working directory.
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use avalanche_forecast::algorithms::risk_level_checked;
use avalanche_forecast::api::{ForecastReport, RiskRequest};
use avalanche_forecast::db::{
    self, services, ForecastRepository, RepositoryFactory, RepositoryType,
};
use avalanche_forecast::models::{
    DangerRatings, ForecastId, LikelihoodLevel, ProblemSlot, ProblemType, SectorKey, SizeLevel,
};

#[derive(Parser)]
#[command(name = "forecast-cli")]
#[command(about = "Avalanche danger ratings and forecast management", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Repository configuration file (repository.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Use a JSON file store at this path, overriding other configuration
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the risk matrix for one likelihood/size pair (1-5 each)
    Rate { likelihood: i64, size: i64 },

    /// Compute per-band ratings for a JSON draft ("-" reads stdin)
    Calc {
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Create a new draft forecast
    Create {
        #[arg(short, long)]
        region: String,

        /// Forecast date (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,

        #[arg(short, long, default_value = "")]
        author: String,
    },

    /// List stored forecasts
    List {
        /// Only published forecasts
        #[arg(long)]
        published: bool,

        /// Only this region (implies --published)
        #[arg(long)]
        region: Option<String>,
    },

    /// Show a stored forecast as JSON
    Show { id: ForecastId },

    /// Edit a stored forecast and save it with recomputed ratings
    Edit {
        id: ForecastId,

        /// Problem to edit: primary or secondary
        #[arg(long, default_value = "primary")]
        slot: ProblemSlot,

        #[arg(long = "type")]
        problem_type: Option<ProblemType>,

        /// Likelihood 1-5
        #[arg(long)]
        likelihood: Option<i64>,

        /// Size 1-5
        #[arg(long)]
        size: Option<i64>,

        /// Remove all sectors before applying --add / --toggle
        #[arg(long)]
        clear: bool,

        /// Sector keys to add (e.g. alp_N)
        #[arg(long, value_delimiter = ',')]
        add: Vec<SectorKey>,

        /// Sector keys to toggle
        #[arg(long, value_delimiter = ',')]
        toggle: Vec<SectorKey>,

        #[arg(long)]
        description: Option<String>,

        /// Include the secondary problem in the ratings (true/false)
        #[arg(long)]
        secondary_enabled: Option<bool>,

        #[arg(long)]
        bottom_line: Option<String>,
    },

    /// Publish a draft forecast
    Publish { id: ForecastId },

    /// Return a published forecast to draft
    Unpublish { id: ForecastId },

    /// Delete a forecast
    Delete { id: ForecastId },

    /// Print the publication summary of a forecast
    Report {
        id: ForecastId,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn print_ratings(ratings: &DangerRatings) {
    for (band, level) in ratings.iter() {
        println!("{:<16} {} {}", band.label(), level.value(), level.label());
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn open_repository(cli: &Cli) -> Result<Arc<dyn ForecastRepository>> {
    if let Some(path) = &cli.data_file {
        return RepositoryFactory::create(RepositoryType::File, Some(path.as_path()))
            .context("Failed to open data file");
    }
    // Unconfigured runs persist to forecasts.json in the working directory.
    db::init_repository_with_fallback(cli.config.as_deref(), RepositoryType::File)?;
    Ok(Arc::clone(db::get_repository()?))
}

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Rate { likelihood, size } => {
            let level = risk_level_checked(*likelihood, *size)?;
            println!("{} {}", level.value(), level.label());
            return Ok(());
        }
        Commands::Calc { file, json } => {
            let request: RiskRequest = serde_json::from_str(&read_input(file)?)
                .with_context(|| format!("Invalid draft in {}", file.display()))?;
            let response = request.evaluate();
            if *json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_ratings(&response.danger);
                println!(
                    "Highest: {} {}",
                    response.highest.value(),
                    response.highest.label()
                );
            }
            return Ok(());
        }
        _ => {}
    }

    let repo = open_repository(&cli)?;
    let repo = repo.as_ref();
    if !services::health_check(repo).await? {
        bail!("Forecast repository is not available");
    }

    match cli.command {
        Commands::Rate { .. } | Commands::Calc { .. } => {}
        Commands::Create {
            region,
            date,
            author,
        } => {
            let forecast = services::create_draft(repo, &region, date, &author).await?;
            if let Some(id) = forecast.id {
                println!("{}", id);
            }
        }
        Commands::List { published, region } => {
            let forecasts = if published || region.is_some() {
                services::list_published(repo, region.as_deref()).await?
            } else {
                services::list_forecasts(repo).await?
            };
            for info in forecasts {
                println!(
                    "{:>5}  {}  {:<9}  {}/{}/{}  {}",
                    info.forecast_id.value(),
                    info.forecast_date,
                    info.status.as_str(),
                    info.danger.alp.value(),
                    info.danger.tl.value(),
                    info.danger.btl.value(),
                    info.region
                );
            }
        }
        Commands::Show { id } => {
            let forecast = services::get_forecast(repo, id).await?;
            println!("{}", serde_json::to_string_pretty(&forecast)?);
        }
        Commands::Edit {
            id,
            slot,
            problem_type,
            likelihood,
            size,
            clear,
            add,
            toggle,
            description,
            secondary_enabled,
            bottom_line,
        } => {
            let mut editor = services::open_editor(repo, id).await?;
            if let Some(problem_type) = problem_type {
                editor.set_problem_type(slot, problem_type);
            }
            if let Some(likelihood) = likelihood {
                editor.set_likelihood(slot, LikelihoodLevel::from_value(likelihood)?);
            }
            if let Some(size) = size {
                editor.set_size(slot, SizeLevel::from_value(size)?);
            }
            if clear {
                editor.clear_sectors(slot);
            }
            for key in add {
                editor.insert_sector(slot, key);
            }
            for key in toggle {
                editor.toggle_sector(slot, key);
            }
            if let Some(description) = description {
                editor.set_description(slot, description);
            }
            if let Some(enabled) = secondary_enabled {
                editor.set_secondary_enabled(enabled);
            }
            if let Some(bottom_line) = bottom_line {
                editor.set_bottom_line(bottom_line);
            }

            let mut forecast = editor.finish();
            if forecast.is_published() {
                info!("Editing published forecast {}", id);
            }
            let info = services::save_forecast(repo, &mut forecast).await?;
            print_ratings(&info.danger);
        }
        Commands::Publish { id } => {
            let forecast = services::publish_forecast(repo, id).await?;
            print_ratings(&forecast.danger);
        }
        Commands::Unpublish { id } => {
            services::unpublish_forecast(repo, id).await?;
        }
        Commands::Delete { id } => {
            services::delete_forecast(repo, id).await?;
        }
        Commands::Report { id, json } => {
            let forecast = services::get_forecast(repo, id).await?;
            let report = ForecastReport::from_forecast(&forecast);
            if json {
                println!("{}", report.to_json()?);
            } else {
                print!("{}", report);
            }
        }
    }

    Ok(())
}
