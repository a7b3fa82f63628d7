use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prsa-processor")]
#[command(about = "Multi-station PRSA air quality data processor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Suppress progress output")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean the hourly dataset and print the monthly summaries
    Process {
        #[arg(short, long, help = "Directory containing per-station CSV files")]
        input_dir: PathBuf,

        #[arg(short, long, help = "Show the monthly series for one station")]
        station: Option<String>,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Stations included in the combined view [default: the report's ten-station subset]"
        )]
        stations: Vec<String>,

        #[arg(long, help = "Combine every station instead of a subset")]
        all_stations: bool,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(long, help = "Memory-map station files while reading")]
        mmap: bool,
    },

    /// Run the cleaning pipeline and report row statistics only
    Validate {
        #[arg(short, long, help = "Directory containing per-station CSV files")]
        input_dir: PathBuf,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(long, help = "Memory-map station files while reading")]
        mmap: bool,
    },

    /// Answer the four analysis questions over the cleaned dataset
    Report {
        #[arg(short, long, help = "Directory containing per-station CSV files")]
        input_dir: PathBuf,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Stations included in the combined view [default: the report's ten-station subset]"
        )]
        stations: Vec<String>,

        #[arg(long, help = "Combine every station instead of a subset")]
        all_stations: bool,

        #[arg(long, help = "Emit the statistics as JSON")]
        json: bool,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(long, help = "Memory-map station files while reading")]
        mmap: bool,
    },
}
