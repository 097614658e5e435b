//! Column classification, computed once after load and consumed by every
//! later stage in place of repeated substring matching.

use serde::{Deserialize, Serialize};

/// Generation technology detected from a column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationSource {
    Solar,
    Wind,
    /// A generation column with no recognized technology keyword.
    Other,
}

/// Role a column plays in the dataset, from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRole {
    Timestamp,
    Price,
    Load,
    Generation(GenerationSource),
    Other,
}

/// Tag attached to one column.
///
/// Role keywords match case-insensitively; focus-country codes match as
/// case-sensitive contiguous substrings anywhere in the name, so a code
/// embedded in a longer token (for example a bidding-zone suffix) still
/// counts. A column can match several countries; all matches are kept in
/// focus-list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTag {
    pub name: String,
    pub role: ColumnRole,
    pub countries: Vec<String>,
}

impl ColumnTag {
    /// True for price, load, and generation columns: the set the imputer
    /// operates on.
    pub fn is_time_series(&self) -> bool {
        matches!(
            self.role,
            ColumnRole::Price | ColumnRole::Load | ColumnRole::Generation(_)
        )
    }

    /// True when the column name matched at least one focus country.
    pub fn matches_focus(&self) -> bool {
        !self.countries.is_empty()
    }

    pub fn matches_country(&self, code: &str) -> bool {
        self.countries.iter().any(|c| c == code)
    }
}

/// Tags every column of a table. `time_column` is tagged
/// [`ColumnRole::Timestamp`] regardless of its name.
pub fn tag_columns(
    names: &[String],
    time_column: &str,
    focus_countries: &[String],
) -> Vec<ColumnTag> {
    names
        .iter()
        .map(|name| tag_column(name, time_column, focus_countries))
        .collect()
}

fn tag_column(name: &str, time_column: &str, focus_countries: &[String]) -> ColumnTag {
    if name == time_column {
        return ColumnTag {
            name: name.to_string(),
            role: ColumnRole::Timestamp,
            countries: Vec::new(),
        };
    }
    let lower = name.to_lowercase();
    // Precedence: price, then load, then generation keywords. Only the
    // role varies with precedence; time-series eligibility does not.
    let role = if lower.contains("price") {
        ColumnRole::Price
    } else if lower.contains("load") {
        ColumnRole::Load
    } else if lower.contains("solar") {
        ColumnRole::Generation(GenerationSource::Solar)
    } else if lower.contains("wind") {
        ColumnRole::Generation(GenerationSource::Wind)
    } else if lower.contains("generation") {
        ColumnRole::Generation(GenerationSource::Other)
    } else {
        ColumnRole::Other
    };
    let countries = focus_countries
        .iter()
        .filter(|code| name.contains(code.as_str()))
        .cloned()
        .collect();
    ColumnTag {
        name: name.to_string(),
        role,
        countries,
    }
}
