//! Ring classification: bucket candidate sites into concentric distance
//! bands around a reference site.

use serde::{Deserialize, Serialize};

use crate::geo::distance;
use crate::sites::Site;
use crate::CoreError;

/// A named distance interval in meters.
///
/// The upper bound is inclusive; `None` means unbounded. The lower bound is
/// exclusive unless `lower_inclusive` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingBand {
    pub label: String,
    pub lower_m: f64,
    #[serde(default)]
    pub lower_inclusive: bool,
    pub upper_m: Option<f64>,
}

impl RingBand {
    #[must_use]
    pub fn new(label: impl Into<String>, lower_m: f64, upper_m: Option<f64>) -> Self {
        Self {
            label: label.into(),
            lower_m,
            lower_inclusive: false,
            upper_m,
        }
    }

    /// The conventional 5/10/15 km rings.
    ///
    /// Ring 1 is closed at zero so a reference that is kept in its own
    /// candidate list lands in Ring 1 rather than outside every ring.
    #[must_use]
    pub fn standard() -> Vec<RingBand> {
        let mut bands = vec![
            RingBand::new("Ring 1", 0.0, Some(5_000.0)),
            RingBand::new("Ring 2", 5_000.0, Some(10_000.0)),
            RingBand::new("Ring 3", 10_000.0, Some(15_000.0)),
        ];
        bands[0].lower_inclusive = true;
        bands
    }

    /// Whether `distance_m` falls inside this band.
    #[must_use]
    pub fn contains(&self, distance_m: f64) -> bool {
        let above_lower = if self.lower_inclusive {
            distance_m >= self.lower_m
        } else {
            distance_m > self.lower_m
        };
        above_lower && self.upper_m.is_none_or(|upper| distance_m <= upper)
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.label.trim().is_empty() {
            return Err(CoreError::InvalidBandConfiguration(
                "band label must be non-empty".to_string(),
            ));
        }
        if !self.lower_m.is_finite() || self.lower_m < 0.0 {
            return Err(CoreError::InvalidBandConfiguration(format!(
                "band '{}' has invalid lower bound {}",
                self.label, self.lower_m
            )));
        }
        if let Some(upper) = self.upper_m {
            if upper.is_nan() || upper <= self.lower_m {
                return Err(CoreError::InvalidBandConfiguration(format!(
                    "band '{}' upper bound {upper} must exceed lower bound {}",
                    self.label, self.lower_m
                )));
            }
        }
        Ok(())
    }
}

/// Build `Ring 1..n` bands from ascending outer radii in meters.
///
/// The first band starts at zero (inclusive); each later band starts where
/// the previous one ends.
///
/// # Errors
///
/// Returns [`CoreError::InvalidBandConfiguration`] when `radii` is empty or
/// not strictly ascending and positive.
pub fn bands_from_radii(radii: &[f64]) -> Result<Vec<RingBand>, CoreError> {
    if radii.is_empty() {
        return Err(CoreError::InvalidBandConfiguration(
            "at least one ring radius is required".to_string(),
        ));
    }

    let mut bands = Vec::with_capacity(radii.len());
    let mut lower = 0.0;
    for (i, &radius) in radii.iter().enumerate() {
        if !radius.is_finite() || radius <= lower {
            return Err(CoreError::InvalidBandConfiguration(format!(
                "ring radii must be positive and strictly ascending; got {radius} after {lower}"
            )));
        }
        let mut band = RingBand::new(format!("Ring {}", i + 1), lower, Some(radius));
        band.lower_inclusive = i == 0;
        bands.push(band);
        lower = radius;
    }
    Ok(bands)
}

/// One classified candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingEntry {
    pub site: Site,
    pub distance_m: f64,
    pub band: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandSummary {
    pub label: String,
    pub count: usize,
}

/// Candidates around a reference site, nearest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub reference: Site,
    pub bands: Vec<RingBand>,
    pub entries: Vec<RingEntry>,
}

impl ClassificationResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries assigned to the band labelled `label`.
    pub fn in_band<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a RingEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.band.as_deref() == Some(label))
    }

    /// Per-band counts in band order.
    #[must_use]
    pub fn summary(&self) -> Vec<BandSummary> {
        self.bands
            .iter()
            .map(|band| BandSummary {
                label: band.label.clone(),
                count: self.in_band(&band.label).count(),
            })
            .collect()
    }

    /// Number of entries that fell outside every band.
    #[must_use]
    pub fn unassigned(&self) -> usize {
        self.entries.iter().filter(|e| e.band.is_none()).count()
    }
}

/// Classify `candidates` by great-circle distance from `reference`.
///
/// Each candidate goes to the first band in `bands` that contains its
/// distance, or `None`. With `exclude_self`, candidates sharing the
/// reference's id are dropped. Output is sorted by distance, ties broken by
/// id. An empty candidate list yields an empty result.
///
/// # Errors
///
/// Returns [`CoreError::InvalidBandConfiguration`] if `bands` is empty or
/// any band is malformed. Bands are validated before any distance is
/// computed.
pub fn classify(
    reference: &Site,
    candidates: &[Site],
    bands: &[RingBand],
    exclude_self: bool,
) -> Result<ClassificationResult, CoreError> {
    if bands.is_empty() {
        return Err(CoreError::InvalidBandConfiguration(
            "band list must not be empty".to_string(),
        ));
    }
    for band in bands {
        band.validate()?;
    }

    let mut entries: Vec<RingEntry> = candidates
        .iter()
        .filter(|c| !(exclude_self && c.id == reference.id))
        .map(|candidate| {
            let distance_m = distance(reference.location, candidate.location);
            let band = bands
                .iter()
                .find(|b| b.contains(distance_m))
                .map(|b| b.label.clone());
            RingEntry {
                site: candidate.clone(),
                distance_m,
                band,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        a.distance_m
            .total_cmp(&b.distance_m)
            .then_with(|| a.site.id.cmp(&b.site.id))
    });

    Ok(ClassificationResult {
        reference: reference.clone(),
        bands: bands.to_vec(),
        entries,
    })
}

#[cfg(test)]
#[path = "rings_test.rs"]
mod tests;
