use crate::api;
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::processors::IngestionPipeline;
use crate::query::QueryService;
use crate::settings::Settings;
use crate::storage::Database;
use crate::utils::progress::ProgressReporter;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error when a subscriber is already installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// Resolve settings from the config layers plus global CLI overrides
pub fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match cli.config {
        Some(ref path) => Settings::load_from_file(path)?,
        None => Settings::load()?,
    };

    if let Some(ref database) = cli.database {
        settings.database.path = database.clone();
    }

    Ok(settings)
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut settings = resolve_settings(&cli)?;

    let db = Database::open(&settings.database.path, settings.database.max_connections).await?;

    match cli.command {
        Commands::Ingest {
            weather_dir,
            yield_file,
            reset,
            skip_weather,
            skip_yield,
            mmap,
            quiet,
        } => {
            if let Some(dir) = weather_dir {
                settings.ingest.weather_dir = dir;
            }
            if let Some(file) = yield_file {
                settings.ingest.yield_file = file;
            }
            let use_mmap = mmap || settings.ingest.use_mmap;

            IngestionPipeline::check_sources(
                (!skip_weather).then_some(settings.ingest.weather_dir.as_path()),
                (!skip_yield).then_some(settings.ingest.yield_file.as_path()),
            )?;

            if reset {
                db.reset().await?;
            }

            println!("Database: {}", settings.database.path.display());

            let pipeline = IngestionPipeline::new(db.clone()).with_mmap(use_mmap);

            if !skip_weather {
                println!("Weather directory: {}", settings.ingest.weather_dir.display());
                let progress = ProgressReporter::new_spinner("Ingesting weather data...", quiet);
                let report = pipeline
                    .ingest_weather_dir(&settings.ingest.weather_dir, Some(&progress))
                    .await?;
                progress.finish_with_message(&format!("Inserted {} observations", report.inserted));
                println!("\n{}", report.generate_summary());
            }

            if !skip_yield {
                println!("Yield file: {}", settings.ingest.yield_file.display());
                let progress = ProgressReporter::new_spinner("Ingesting yield data...", quiet);
                let report = pipeline
                    .ingest_yield_file(&settings.ingest.yield_file, Some(&progress))
                    .await?;
                progress.finish_with_message(&format!("Inserted {} yields", report.inserted));
                println!("\n{}", report.generate_summary());
            }

            println!("Ingestion complete!");
        }

        Commands::Serve { bind } => {
            if let Some(addr) = bind {
                settings.server.bind_addr = addr;
            }

            info!(
                database = %settings.database.path.display(),
                default_per_page = settings.pagination.default_per_page,
                max_per_page = settings.pagination.max_per_page,
                "Starting weather API"
            );

            let queries = QueryService::new(db.clone(), settings.pagination.clone());
            api::serve(queries, &settings.server.bind_addr).await?;
        }

        Commands::Summary => {
            let counts = db.table_counts().await?;

            println!("Database: {}", settings.database.path.display());
            println!("  weather observations: {}", counts.weather);
            println!("  weather yearly stats: {}", counts.weather_stats);
            println!("  corn yields:          {}", counts.corn_yield);
        }
    }

    db.close().await;
    Ok(())
}
