//! Dataset loading and the read-only `sites` / `areas` listings.

use std::path::Path;

use ringmap_core::{MarkerStyle, SiteDataset, SiteFilter};

/// Load the sites snapshot, logging any rows dropped for bad coordinates.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub(crate) fn load_dataset(path: &Path) -> anyhow::Result<SiteDataset> {
    let load = ringmap_core::load_sites(path)?;
    for row in &load.rejected {
        tracing::warn!(site = %row.id, reason = %row.reason, "skipping site row");
    }
    tracing::debug!(
        path = %path.display(),
        loaded = load.dataset.len(),
        rejected = load.rejected.len(),
        "sites dataset loaded"
    );
    Ok(load.dataset)
}

/// Print a table of sites matching `filter`.
pub(crate) fn run_sites_list(dataset: &SiteDataset, filter: &SiteFilter) {
    let sites = dataset.filter(filter);
    if sites.is_empty() {
        println!("no sites match the given filter");
        return;
    }

    println!(
        "{:<14}{:<8}{:<26}{:<12}{:<12}NAME",
        "ID", "TYPE", "AREA", "LATITUDE", "LONGITUDE"
    );
    for site in &sites {
        let style = MarkerStyle::for_category(&site.category);
        println!(
            "{:<14}{:<8}{:<26}{:<12.6}{:<12.6}{}",
            site.id,
            style.label_prefix,
            site.area.as_deref().unwrap_or("\u{2014}"),
            site.location.latitude(),
            site.location.longitude(),
            site.display_name()
        );
    }
    println!();
    println!("{} site(s)", sites.len());
}

/// Print distinct areas with counts.
pub(crate) fn run_areas(dataset: &SiteDataset) {
    let areas = dataset.areas();
    if areas.is_empty() {
        println!("no areas found in the dataset");
        return;
    }

    println!("{:<32}SITES", "AREA");
    for area in &areas {
        println!("{:<32}{}", area.area, area.count);
    }
}
