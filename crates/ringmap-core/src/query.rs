use crate::rings::{classify, ClassificationResult, RingBand};
use crate::sites::{SiteDataset, SiteFilter};
use crate::CoreError;

/// Classify the sites around `reference_id` within a dataset snapshot.
///
/// The reference is looked up in the full dataset, so it may sit outside the
/// filtered candidate set (e.g. a dealer viewed against POS-only candidates).
///
/// # Errors
///
/// Returns [`CoreError::UnknownSite`] when the reference id is not in the
/// dataset, or [`CoreError::InvalidBandConfiguration`] from [`classify`].
pub fn ring_query(
    dataset: &SiteDataset,
    reference_id: &str,
    filter: &SiteFilter,
    bands: &[RingBand],
    exclude_self: bool,
) -> Result<ClassificationResult, CoreError> {
    let reference = dataset
        .get(reference_id)
        .ok_or_else(|| CoreError::UnknownSite(reference_id.trim().to_string()))?;
    let candidates = dataset.filter(filter);
    classify(reference, &candidates, bands, exclude_self)
}
