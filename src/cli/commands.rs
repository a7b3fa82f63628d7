use tracing_subscriber::EnvFilter;

use crate::analyzers::AirQualityAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::processors::{CombineConfig, Pipeline};
use crate::utils::progress::ProgressReporter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Process {
            input_dir,
            station,
            stations,
            all_stations,
            max_workers,
            mmap,
        } => {
            let progress = ProgressReporter::new_spinner("Processing air quality data...", cli.quiet);

            let pipeline = Pipeline::new()
                .with_max_workers(max_workers)
                .with_mmap(mmap)
                .with_combine_config(combine_config(stations, all_stations));
            let (dataset, report) = pipeline.run(&input_dir, Some(&progress))?;

            progress.finish_with_message(&format!(
                "Cleaned {} hourly rows into {} monthly records",
                report.rows_clean, report.monthly_records
            ));

            println!("\n{}", report.summary());

            println!("\nStations:");
            for name in dataset.stations() {
                let months = dataset.station(name).map(|m| m.len()).unwrap_or(0);
                println!("- {} ({} months)", name, months);
            }

            if let Some(name) = station {
                let analyzer = AirQualityAnalyzer::new();
                let summary = analyzer.summarize_station(&name, &dataset)?;
                println!(
                    "\n{}: {} months ({} to {})\n\
                    - Mean pollutant index: {:.1} (min {:.1}, max {:.1})\n\
                    - Mean rainfall: {:.2}",
                    summary.station,
                    summary.months,
                    summary.first_month,
                    summary.last_month,
                    summary.mean_pollutant_index,
                    summary.min_pollutant_index,
                    summary.max_pollutant_index,
                    summary.mean_rainfall
                );
            }
        }

        Commands::Validate {
            input_dir,
            max_workers,
            mmap,
        } => {
            let progress = ProgressReporter::new_spinner("Validating air quality data...", cli.quiet);

            let pipeline = Pipeline::new()
                .with_max_workers(max_workers)
                .with_mmap(mmap)
                .with_combine_config(CombineConfig::all());
            let (_dataset, report) = pipeline.run(&input_dir, Some(&progress))?;

            progress.finish_with_message("Validation complete");
            println!("\n{}", report.summary());
        }

        Commands::Report {
            input_dir,
            stations,
            all_stations,
            json,
            max_workers,
            mmap,
        } => {
            let progress = ProgressReporter::new_spinner("Building report...", cli.quiet);

            let pipeline = Pipeline::new()
                .with_max_workers(max_workers)
                .with_mmap(mmap)
                .with_combine_config(combine_config(stations, all_stations));
            let (dataset, _report) = pipeline.run(&input_dir, Some(&progress))?;

            let analyzer = AirQualityAnalyzer::new();
            let stats = analyzer.analyze(&dataset)?;

            progress.finish_with_message("Report complete");

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("\n{}", stats.detailed_summary());
            }
        }
    }

    Ok(())
}

fn combine_config(stations: Vec<String>, all_stations: bool) -> CombineConfig {
    if all_stations {
        CombineConfig::all()
    } else if stations.is_empty() {
        CombineConfig::report_default()
    } else {
        CombineConfig::subset(stations)
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init in tests is fine to ignore.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
