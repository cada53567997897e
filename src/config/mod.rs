//! Run configuration: serde defaults, then an optional TOML file, then
//! `AUGMENT_*` environment variables.

use crate::error::{ProcessingError, Result};
use crate::processors::{
    AugmentOptions, DiffMode, FilterMode, JurisdictionFilter, MissingPopulationPolicy,
};
use crate::utils::constants::*;
use ::config::{Config, Environment, File, Source};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentConfig {
    pub data_dir: PathBuf,
    pub source_file: String,
    pub population_file: String,
    pub holidays_file: String,
    pub output_file: String,
    pub delimiter: char,
    pub valid_countries: Vec<String>,
    pub valid_regions: Vec<String>,
    pub include_demographics: bool,
    pub filter: FilterMode,
    pub new_cases: DiffMode,
    pub on_missing_population: MissingPopulationPolicy,
    pub region_placeholder: String,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            source_file: DEFAULT_SOURCE_FILE.to_string(),
            population_file: DEFAULT_POPULATION_FILE.to_string(),
            holidays_file: DEFAULT_HOLIDAYS_FILE.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            delimiter: DEFAULT_DELIMITER,
            valid_countries: Vec::new(),
            valid_regions: Vec::new(),
            include_demographics: true,
            filter: FilterMode::Off,
            new_cases: DiffMode::Global,
            on_missing_population: MissingPopulationPolicy::Abort,
            region_placeholder: DEFAULT_REGION_PLACEHOLDER.to_string(),
        }
    }
}

impl AugmentConfig {
    /// Load from an explicit file (which must exist) or from `augment.toml` in
    /// the working directory when present, then apply the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        Self::load_from(file, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("valid_countries")
            .with_list_parse_key("valid_regions")
    }

    fn load_from<S>(file: S, env: Environment) -> Result<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder().add_source(file).add_source(env).build()?;
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            return Err(ProcessingError::Config(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        if self.output_file.trim().is_empty() {
            return Err(ProcessingError::Config("Output file name is empty".to_string()));
        }
        Ok(())
    }

    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }

    pub fn source_path(&self) -> PathBuf {
        self.data_dir.join(&self.source_file)
    }

    pub fn population_path(&self) -> PathBuf {
        self.data_dir.join(&self.population_file)
    }

    pub fn holidays_path(&self) -> PathBuf {
        self.data_dir.join(&self.holidays_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join(&self.output_file)
    }

    pub fn jurisdiction_filter(&self) -> JurisdictionFilter {
        JurisdictionFilter::new(self.valid_countries.clone(), self.valid_regions.clone())
    }

    pub fn augment_options(&self) -> AugmentOptions {
        AugmentOptions {
            include_demographics: self.include_demographics,
            filter: self.filter,
            new_cases: self.new_cases,
            on_missing_population: self.on_missing_population,
            region_placeholder: self.region_placeholder.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AugmentConfig::environment().source(Some(source))
    }

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let config = AugmentConfig::load_from(
            File::with_name("does-not-exist").required(false),
            env(&[]),
        )?;

        assert_eq!(config, AugmentConfig::default());
        assert_eq!(config.output_path(), PathBuf::from("data/OxCGRT_latest_aug.csv"));
        assert_eq!(config.source_path(), PathBuf::from("data/OxCGRT_latest.csv"));
        Ok(())
    }

    #[test]
    fn test_file_then_environment() -> Result<()> {
        let file = toml_file(
            r#"
data_dir = "/srv/oxcgrt"
valid_countries = ["USA", "GBR"]
valid_regions = ["US_CA"]
filter = "pre"
new_cases = "per-entity"
on_missing_population = "null"
include_demographics = false
"#,
        );

        let config = AugmentConfig::load_from(
            File::from(file.path()).required(true),
            env(&[("AUGMENT_DATA_DIR", "/tmp/override"), ("AUGMENT_VALID_REGIONS", "US_TX,US_NY")]),
        )?;

        assert_eq!(config.data_dir, PathBuf::from("/tmp/override"));
        assert_eq!(config.valid_countries, vec!["USA", "GBR"]);
        assert_eq!(config.valid_regions, vec!["US_TX", "US_NY"]);
        assert_eq!(config.filter, FilterMode::Pre);
        assert_eq!(config.new_cases, DiffMode::PerEntity);
        assert_eq!(config.on_missing_population, MissingPopulationPolicy::Null);
        assert!(!config.include_demographics);

        let options = config.augment_options();
        assert_eq!(options.filter, FilterMode::Pre);
        assert_eq!(options.region_placeholder, "nan");
        Ok(())
    }

    #[test]
    fn test_required_file_missing() {
        let result = AugmentConfig::load(Some(Path::new("/nonexistent/augment.toml")));
        assert!(matches!(result, Err(ProcessingError::Settings(_))));
    }

    #[test]
    fn test_invalid_enum_value() {
        let file = toml_file("filter = \"sometimes\"\n");
        let result = AugmentConfig::load_from(File::from(file.path()).required(true), env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_delimiter() {
        let config = AugmentConfig {
            delimiter: 'é',
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ProcessingError::Config(_))));
        assert_eq!(AugmentConfig::default().delimiter_byte(), b',');
    }
}
