use crate::utils::constants::GEO_ID_SEPARATOR;

/// `CountryName__RegionName`, with a missing region rendered as `placeholder`.
///
/// There is no identifier without a country name.
pub fn geo_id(
    country_name: Option<&str>,
    region_name: Option<&str>,
    placeholder: &str,
) -> Option<String> {
    let country = country_name?;
    let region = region_name.unwrap_or(placeholder);
    Some(format!("{}{}{}", country, GEO_ID_SEPARATOR, region))
}
