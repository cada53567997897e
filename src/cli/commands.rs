use crate::analyzers::OutputAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::config::AugmentConfig;
use crate::error::{ProcessingError, Result};
use crate::holidays::CalendarOracle;
use crate::processors::{AugmentReport, Augmenter, CoverageChecker};
use crate::readers::{PopulationReader, SourceReader};
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvWriter;
use tracing::info;

pub fn run(cli: Cli) -> Result<()> {
    let config = AugmentConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Augment {
            data_dir,
            output_file,
            filter,
            new_cases,
            on_missing_population,
            no_demographics,
        } => {
            let mut config = config;
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }
            if let Some(file) = output_file {
                config.output_file = file;
            }
            if let Some(mode) = filter {
                config.filter = mode;
            }
            if let Some(mode) = new_cases {
                config.new_cases = mode;
            }
            if let Some(policy) = on_missing_population {
                config.on_missing_population = policy;
            }
            if no_demographics {
                config.include_demographics = false;
            }

            let report = augment(&config, cli.quiet)?;
            println!("\n{}", report.generate_summary());
            println!("Output file: {}", config.output_path().display());
        }

        Commands::Validate {
            data_dir,
            skip_source,
        } => {
            let mut config = config;
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }

            let delimiter = config.delimiter_byte();
            let population =
                PopulationReader::with_delimiter(delimiter).read_table(&config.population_path())?;
            let source = if skip_source {
                None
            } else {
                Some(SourceReader::with_delimiter(delimiter).read_table(&config.source_path())?)
            };

            let filter = config.jurisdiction_filter();
            let checker = CoverageChecker::new(&filter);
            let report = checker.check(&population, source.as_ref());
            println!("{}", checker.generate_summary(&report));

            if !report.is_complete() {
                let missing = report.missing_codes();
                return Err(ProcessingError::MissingCodes {
                    count: missing.len(),
                    codes: missing.join(", "),
                });
            }
        }

        Commands::Info { file, json } => {
            let summary = OutputAnalyzer::with_delimiter(config.delimiter_byte()).analyze(&file)?;

            if json {
                let rendered = serde_json::to_string_pretty(&summary)
                    .map_err(|e| ProcessingError::InvalidFormat(e.to_string()))?;
                println!("{}", rendered);
            } else {
                println!("Augmented file: {}", file.display());
                println!("\n{}", summary.detailed_summary());
            }
        }
    }

    Ok(())
}

/// Read the configured inputs, augment, and write the output table.
pub fn augment(config: &AugmentConfig, quiet: bool) -> Result<AugmentReport> {
    let delimiter = config.delimiter_byte();
    let source_path = config.source_path();
    info!(path = %source_path.display(), "Reading source table");

    let spinner = ProgressReporter::new_spinner("Loading tables...", quiet);
    let table = SourceReader::with_delimiter(delimiter).read_table(&source_path)?;
    let oracle = CalendarOracle::from_path(&config.holidays_path(), delimiter)?;
    let population = if config.include_demographics {
        Some(PopulationReader::with_delimiter(delimiter).read_table(&config.population_path())?)
    } else {
        None
    };
    spinner.finish_with_message(&format!("Loaded {} source rows", table.len()));

    let mut augmenter = Augmenter::new(&oracle, config.jurisdiction_filter())
        .with_options(config.augment_options());
    if let Some(ref population) = population {
        augmenter = augmenter.with_population(population);
    }

    let progress = ProgressReporter::new(table.len() as u64, "Augmenting rows...", quiet);
    let (augmented, report) = augmenter.augment(table, Some(&progress))?;
    progress.finish_with_message(&format!("Augmented {} rows", augmented.len()));

    CsvWriter::with_delimiter(delimiter).write_table(&augmented, &config.output_path())?;

    Ok(report)
}
