/// Source column names
pub const COL_DATE: &str = "Date";
pub const COL_JURISDICTION: &str = "Jurisdiction";
pub const COL_COUNTRY_CODE: &str = "CountryCode";
pub const COL_REGION_CODE: &str = "RegionCode";
pub const COL_COUNTRY_NAME: &str = "CountryName";
pub const COL_REGION_NAME: &str = "RegionName";
pub const COL_CONFIRMED_CASES: &str = "ConfirmedCases";

pub const REQUIRED_SOURCE_COLUMNS: [&str; 7] = [
    COL_DATE,
    COL_JURISDICTION,
    COL_COUNTRY_CODE,
    COL_REGION_CODE,
    COL_COUNTRY_NAME,
    COL_REGION_NAME,
    COL_CONFIRMED_CASES,
];

/// Reference table column names
pub const COL_CODE: &str = "Code";
pub const COL_HOLIDAY_DATE: &str = "Date";

/// Population values are read positionally: population, area, density
pub const POPULATION_VALUE_COLUMNS: [usize; 3] = [2, 3, 4];

/// Date formats
pub const SOURCE_DATE_FORMAT: &str = "%Y%m%d";
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
pub const ORACLE_DATE_FORMAT: &str = "%Y%m%d";

/// GeoID construction
pub const GEO_ID_SEPARATOR: &str = "__";
pub const DEFAULT_REGION_PLACEHOLDER: &str = "nan";

/// File names
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_SOURCE_FILE: &str = "OxCGRT_latest.csv";
pub const DEFAULT_POPULATION_FILE: &str = "population.csv";
pub const DEFAULT_HOLIDAYS_FILE: &str = "holidays.csv";
pub const DEFAULT_OUTPUT_FILE: &str = "OxCGRT_latest_aug.csv";
pub const DEFAULT_CONFIG_FILE: &str = "augment";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "AUGMENT";

pub const DEFAULT_DELIMITER: char = ',';
