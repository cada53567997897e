use crate::processors::{DiffMode, FilterMode, MissingPopulationPolicy};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxcgrt-augment")]
#[command(about = "Augment OxCGRT policy data with holidays, demographics, new cases and GeoIDs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide progress bars")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Configuration file [default: ./augment.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Augment the source table and write the result
    Augment {
        #[arg(short, long, help = "Directory holding the input and output tables")]
        data_dir: Option<PathBuf>,

        #[arg(
            short,
            long,
            help = "Output file name within the data directory [default: OxCGRT_latest_aug.csv]"
        )]
        output_file: Option<String>,

        #[arg(long, value_enum)]
        filter: Option<FilterMode>,

        #[arg(long, value_enum)]
        new_cases: Option<DiffMode>,

        #[arg(long, value_enum)]
        on_missing_population: Option<MissingPopulationPolicy>,

        #[arg(long, help = "Skip population, area and density columns")]
        no_demographics: bool,
    },

    /// Check that every valid code has a population entry
    Validate {
        #[arg(short, long, help = "Directory holding the input tables")]
        data_dir: Option<PathBuf>,

        #[arg(long, help = "Only check the reference tables, not the source rows")]
        skip_source: bool,
    },

    /// Summarize an augmented output file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_augment_overrides() {
        let cli = Cli::parse_from([
            "oxcgrt-augment",
            "--quiet",
            "augment",
            "--filter",
            "post",
            "--new-cases",
            "per-entity",
            "--on-missing-population",
            "skip",
            "--no-demographics",
        ]);

        assert!(cli.quiet);
        match cli.command {
            Commands::Augment {
                filter,
                new_cases,
                on_missing_population,
                no_demographics,
                data_dir,
                ..
            } => {
                assert_eq!(filter, Some(FilterMode::Post));
                assert_eq!(new_cases, Some(DiffMode::PerEntity));
                assert_eq!(on_missing_population, Some(MissingPopulationPolicy::Skip));
                assert!(no_demographics);
                assert!(data_dir.is_none());
            }
            _ => panic!("expected augment command"),
        }
    }
}
