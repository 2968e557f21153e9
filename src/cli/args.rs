use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weather-yield-api")]
#[command(about = "Weather and corn yield ingestion with a paginated read API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Configuration file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "SQLite database path")]
    pub database: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest weather station files and the corn yield file into the database
    Ingest {
        #[arg(short, long, help = "Directory with one weather file per station")]
        weather_dir: Option<PathBuf>,

        #[arg(short, long, help = "Corn yield data file")]
        yield_file: Option<PathBuf>,

        #[arg(long, help = "Drop and recreate all tables before ingesting")]
        reset: bool,

        #[arg(long, help = "Do not ingest weather data")]
        skip_weather: bool,

        #[arg(long, help = "Do not ingest yield data")]
        skip_yield: bool,

        #[arg(long, help = "Read station files through a memory map")]
        mmap: bool,

        #[arg(long, help = "Hide the progress spinner")]
        quiet: bool,
    },

    /// Serve the read-only HTTP API
    Serve {
        #[arg(short, long, help = "Address to bind, e.g. 127.0.0.1:5000")]
        bind: Option<String>,
    },

    /// Display row counts of the stored tables
    Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingest() {
        let cli = Cli::parse_from([
            "weather-yield-api",
            "--database",
            "/tmp/wx.db",
            "ingest",
            "--weather-dir",
            "data/wx_data",
            "--reset",
            "--skip-yield",
        ]);

        assert_eq!(cli.database, Some(PathBuf::from("/tmp/wx.db")));
        match cli.command {
            Commands::Ingest {
                weather_dir,
                yield_file,
                reset,
                skip_weather,
                skip_yield,
                ..
            } => {
                assert_eq!(weather_dir, Some(PathBuf::from("data/wx_data")));
                assert_eq!(yield_file, None);
                assert!(reset);
                assert!(!skip_weather);
                assert!(skip_yield);
            }
            _ => panic!("expected ingest command"),
        }
    }

    #[test]
    fn test_parse_serve_with_global_flag_after_subcommand() {
        let cli = Cli::parse_from(["weather-yield-api", "serve", "--bind", "0.0.0.0:8080", "-v"]);

        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Serve { bind: Some(ref addr) } if addr == "0.0.0.0:8080"));
    }
}
