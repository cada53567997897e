use serde::{Deserialize, Serialize};

/// Raw `Jurisdiction` value for national aggregates.
pub const NAT_TOTAL: &str = "NAT_TOTAL";
/// Raw `Jurisdiction` value for sub-national (state/region) aggregates.
pub const STATE_TOTAL: &str = "STATE_TOTAL";

/// Granularity of a source row.
///
/// Any value other than `NAT_TOTAL` or `STATE_TOTAL` is kept as `Other` with its
/// raw text. `Other` rows never receive holiday or demographic values and never
/// pass the jurisdiction filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    National,
    State,
    Other(String),
}

impl Jurisdiction {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            NAT_TOTAL => Jurisdiction::National,
            STATE_TOTAL => Jurisdiction::State,
            other => Jurisdiction::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Jurisdiction::National => NAT_TOTAL,
            Jurisdiction::State => STATE_TOTAL,
            Jurisdiction::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
