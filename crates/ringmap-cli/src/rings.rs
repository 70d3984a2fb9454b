use ringmap_core::{
    bands_from_radii, ring_query, ClassificationResult, GeoPoint, SiteDataset, SiteFilter,
};

pub(crate) struct RingsOptions {
    pub filter: SiteFilter,
    pub radii: Vec<f64>,
    pub exclude_self: bool,
    pub json: bool,
}

/// Classify sites around `reference_id` and print the ring table.
///
/// # Errors
///
/// Returns an error if the reference site is unknown, the radii are
/// invalid, or JSON serialization fails.
pub(crate) fn run_rings(
    dataset: &SiteDataset,
    reference_id: &str,
    options: &RingsOptions,
) -> anyhow::Result<()> {
    let bands = bands_from_radii(&options.radii)?;
    let result = ring_query(
        dataset,
        reference_id,
        &options.filter,
        &bands,
        options.exclude_self,
    )?;
    tracing::debug!(
        reference = %result.reference.id,
        candidates = result.entries.len(),
        "ring classification complete"
    );

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_rings(&result);
    Ok(())
}

fn print_rings(result: &ClassificationResult) {
    let reference = &result.reference;
    println!(
        "Reference: {} \u{2014} {} ({})",
        reference.id,
        reference.display_name(),
        reference.location
    );
    println!();

    if result.is_empty() {
        println!("no candidate sites match the given filter");
        return;
    }

    println!(
        "{:<14}{:<10}{:<12}{:<26}NAME",
        "ID", "RING", "DIST KM", "AREA"
    );
    for entry in &result.entries {
        println!(
            "{:<14}{:<10}{:<12}{:<26}{}",
            entry.site.id,
            entry.band.as_deref().unwrap_or("\u{2014}"),
            fmt_km(entry.distance_m),
            entry.site.area.as_deref().unwrap_or("\u{2014}"),
            entry.site.display_name()
        );
    }

    println!();
    println!("{:<10}SITES", "RING");
    for band in result.summary() {
        println!("{:<10}{}", band.label, band.count);
    }
    println!("{:<10}{}", "outside", result.unassigned());
}

/// Print the great-circle distance between two points.
pub(crate) fn run_distance(from: GeoPoint, to: GeoPoint) {
    let meters = ringmap_core::distance(from, to);
    println!("{meters:.1} m ({} km)", fmt_km(meters));
}

/// Format meters as kilometers with two decimals.
fn fmt_km(meters: f64) -> String {
    format!("{:.2}", meters / 1_000.0)
}
