use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::ConfigError;

/// One dealer or point-of-sale location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: Option<String>,
    /// Channel label such as `DEALER` or `POS`; the set is open.
    pub category: String,
    /// Administrative area (kabupaten/kota) used by the area filter.
    pub area: Option<String>,
    #[serde(flatten)]
    pub location: GeoPoint,
}

impl Site {
    /// Display name, falling back to the identifier.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A latitude/longitude cell as it appears in the dataset file.
///
/// Spreadsheet exports often carry coordinates as text (sometimes with a
/// decimal comma), so both numbers and strings are accepted here and
/// coerced later. Any other YAML value lands in `Other` so the row can be
/// rejected on its own instead of failing the whole document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Number(f64),
    Text(String),
    Other(serde_yaml::Value),
}

/// Dealer codes are sometimes exported as bare numbers, and as floats
/// (`10231.0`) when the source column has blanks.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl RawId {
    fn into_trimmed(self) -> String {
        match self {
            RawId::Text(text) => text.trim().to_string(),
            RawId::Integer(n) => n.to_string(),
            RawId::Float(n) if n.is_finite() && n.fract() == 0.0 => format!("{n:.0}"),
            RawId::Float(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SiteRow {
    id: RawId,
    name: Option<String>,
    category: String,
    area: Option<String>,
    latitude: Option<RawCoordinate>,
    longitude: Option<RawCoordinate>,
}

#[derive(Debug, Deserialize)]
struct SitesFile {
    sites: Vec<SiteRow>,
}

/// A dataset row dropped during loading because its coordinates were unusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub id: String,
    pub reason: String,
}

/// Result of loading a sites file: the accepted snapshot plus dropped rows.
#[derive(Debug, Clone)]
pub struct SiteLoad {
    pub dataset: SiteDataset,
    pub rejected: Vec<RejectedRow>,
}

/// Immutable, id-indexed snapshot of sites.
#[derive(Debug, Clone, Default)]
pub struct SiteDataset {
    sites: Vec<Site>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaCount {
    pub area: String,
    pub count: usize,
}

impl SiteDataset {
    /// Build a snapshot, enforcing unique site identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] on a duplicate id.
    pub fn new(sites: Vec<Site>) -> Result<Self, ConfigError> {
        let mut index = HashMap::with_capacity(sites.len());
        for (pos, site) in sites.iter().enumerate() {
            if index.insert(site.id.clone(), pos).is_some() {
                return Err(ConfigError::Validation(format!(
                    "duplicate site id: '{}'",
                    site.id
                )));
            }
        }
        Ok(Self { sites, index })
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Site> {
        self.index.get(id.trim()).map(|&pos| &self.sites[pos])
    }

    #[must_use]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Sites matching `filter`, in dataset order.
    #[must_use]
    pub fn filter(&self, filter: &SiteFilter) -> Vec<Site> {
        self.sites
            .iter()
            .filter(|site| filter.matches(site))
            .cloned()
            .collect()
    }

    /// Distinct areas with their site counts, sorted by area name.
    #[must_use]
    pub fn areas(&self) -> Vec<AreaCount> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for area in self.sites.iter().filter_map(|s| s.area.as_deref()) {
            *counts.entry(area).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(area, count)| AreaCount {
                area: area.to_string(),
                count,
            })
            .collect()
    }

    /// Distinct categories, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.sites
            .iter()
            .map(|s| s.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(ToOwned::to_owned)
            .collect()
    }
}

/// Candidate narrowing criteria (channel + area dropdowns).
///
/// `None` or a blank value matches everything; otherwise matching is exact
/// after trimming, ignoring ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SiteFilter {
    pub category: Option<String>,
    pub area: Option<String>,
}

impl SiteFilter {
    #[must_use]
    pub fn matches(&self, site: &Site) -> bool {
        criterion_matches(self.category.as_deref(), Some(site.category.as_str()))
            && criterion_matches(self.area.as_deref(), site.area.as_deref())
    }
}

fn criterion_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted.map(str::trim).filter(|w| !w.is_empty()) {
        None => true,
        Some(wanted) => actual.is_some_and(|a| a.trim().eq_ignore_ascii_case(wanted)),
    }
}

/// Load and validate the sites dataset from a YAML file.
///
/// Rows with missing, non-numeric, or out-of-range coordinates are dropped
/// and reported in [`SiteLoad::rejected`].
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (blank id or category, duplicate id).
pub fn load_sites(path: &Path) -> Result<SiteLoad, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SitesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_sites(&content)
}

/// Parse a sites document already in memory. See [`load_sites`].
///
/// # Errors
///
/// Returns `ConfigError` on YAML errors or validation failures.
pub fn parse_sites(content: &str) -> Result<SiteLoad, ConfigError> {
    let file: SitesFile = serde_yaml::from_str(content)?;

    let mut sites = Vec::with_capacity(file.sites.len());
    let mut rejected = Vec::new();

    for row in file.sites {
        let id = row.id.into_trimmed();
        if id.is_empty() {
            return Err(ConfigError::Validation(
                "site id must be non-empty".to_string(),
            ));
        }
        let category = row.category.trim().to_string();
        if category.is_empty() {
            return Err(ConfigError::Validation(format!(
                "site '{id}' has an empty category"
            )));
        }

        let location = match row_location(row.latitude.as_ref(), row.longitude.as_ref()) {
            Ok(location) => location,
            Err(reason) => {
                rejected.push(RejectedRow { id, reason });
                continue;
            }
        };

        sites.push(Site {
            id,
            name: non_blank(row.name),
            category,
            area: non_blank(row.area),
            location,
        });
    }

    let dataset = SiteDataset::new(sites)?;
    Ok(SiteLoad { dataset, rejected })
}

fn row_location(
    latitude: Option<&RawCoordinate>,
    longitude: Option<&RawCoordinate>,
) -> Result<GeoPoint, String> {
    let latitude = coerce_coordinate("latitude", latitude)?;
    let longitude = coerce_coordinate("longitude", longitude)?;
    GeoPoint::new(latitude, longitude).map_err(|e| e.to_string())
}

fn coerce_coordinate(field: &str, raw: Option<&RawCoordinate>) -> Result<f64, String> {
    match raw {
        None => Err(format!("missing {field}")),
        Some(RawCoordinate::Number(value)) => Ok(*value),
        Some(RawCoordinate::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(format!("missing {field}"));
            }
            trimmed
                .replace(',', ".")
                .parse::<f64>()
                .map_err(|_| format!("{field} '{trimmed}' is not numeric"))
        }
        Some(RawCoordinate::Other(_)) => Err(format!("{field} is not numeric")),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "sites_test.rs"]
mod tests;
