use super::*;
use crate::geo::GeoPoint;

fn site(id: &str, lat: f64, lng: f64) -> Site {
    Site {
        id: id.to_string(),
        name: None,
        category: "DEALER".to_string(),
        area: None,
        location: GeoPoint::new(lat, lng).expect("valid point"),
    }
}

fn ids(result: &ClassificationResult) -> Vec<&str> {
    result.entries.iter().map(|e| e.site.id.as_str()).collect()
}

#[test]
fn classify_assigns_standard_rings_along_equator() {
    let reference = site("REF", 0.0, 0.0);
    let candidates = vec![
        site("C1", 0.0, 0.03),
        site("C2", 0.0, 0.08),
        site("C3", 0.0, 0.2),
    ];

    let result = classify(&reference, &candidates, &RingBand::standard(), true).expect("ok");

    let bands: Vec<Option<&str>> = result.entries.iter().map(|e| e.band.as_deref()).collect();
    assert_eq!(bands, vec![Some("Ring 1"), Some("Ring 2"), None]);
    assert!((result.entries[0].distance_m - 3_336.0).abs() < 5.0);
    assert!((result.entries[1].distance_m - 8_896.0).abs() < 5.0);
    assert!((result.entries[2].distance_m - 22_239.0).abs() < 5.0);
}

#[test]
fn classify_empty_candidates_is_empty_result() {
    let reference = site("REF", -6.9, 107.6);
    let result = classify(&reference, &[], &RingBand::standard(), true).expect("ok");
    assert!(result.is_empty());
    assert_eq!(result.unassigned(), 0);
}

#[test]
fn classify_excludes_reference_id_even_with_coincident_twin() {
    let reference = site("REF", -6.9, 107.6);
    let candidates = vec![
        site("REF", -6.9, 107.6),
        site("TWIN", -6.9, 107.6),
        site("NEAR", -6.91, 107.6),
    ];

    let result = classify(&reference, &candidates, &RingBand::standard(), true).expect("ok");
    assert_eq!(ids(&result), vec!["TWIN", "NEAR"]);
    assert_eq!(result.entries[0].distance_m, 0.0);
    assert_eq!(result.entries[0].band.as_deref(), Some("Ring 1"));
}

#[test]
fn classify_keeps_reference_at_zero_when_not_excluded() {
    let reference = site("REF", -6.9, 107.6);
    let candidates = vec![site("NEAR", -6.91, 107.6), site("REF", -6.9, 107.6)];

    let result = classify(&reference, &candidates, &RingBand::standard(), false).expect("ok");
    assert_eq!(ids(&result), vec!["REF", "NEAR"]);
    assert_eq!(result.entries[0].distance_m, 0.0);
    assert_eq!(result.entries[0].band.as_deref(), Some("Ring 1"));
}

#[test]
fn classify_breaks_distance_ties_by_id() {
    let reference = site("REF", 0.0, 0.0);
    let candidates = vec![
        site("B", 0.0, 0.05),
        site("A", 0.0, -0.05),
        site("C", 0.0, 0.05),
    ];

    let result = classify(&reference, &candidates, &RingBand::standard(), true).expect("ok");
    assert_eq!(ids(&result), vec!["A", "B", "C"]);
}

#[test]
fn classify_is_ordered_and_deterministic() {
    let reference = site("REF", -6.9, 107.6);
    let candidates: Vec<Site> = (0..40)
        .map(|i| {
            let offset = f64::from((i * 37) % 23) * 0.01;
            site(&format!("S{i:02}"), -6.9 + offset, 107.6 - offset / 2.0)
        })
        .collect();
    let bands = RingBand::standard();

    let first = classify(&reference, &candidates, &bands, true).expect("ok");
    let second = classify(&reference, &candidates, &bands, true).expect("ok");
    assert_eq!(first, second);

    for pair in first.entries.windows(2) {
        assert!(pair[0].distance_m <= pair[1].distance_m);
    }
}

#[test]
fn classify_assigns_each_candidate_to_at_most_one_band() {
    let reference = site("REF", 0.0, 0.0);
    let candidates: Vec<Site> = (1..=20)
        .map(|i| site(&format!("S{i}"), 0.0, f64::from(i) * 0.01))
        .collect();
    let bands = RingBand::standard();

    let result = classify(&reference, &candidates, &bands, true).expect("ok");
    for entry in &result.entries {
        let matching = bands.iter().filter(|b| b.contains(entry.distance_m)).count();
        assert!(matching <= 1, "{} matched {matching} bands", entry.site.id);
        assert_eq!(entry.band.is_some(), matching == 1);
    }

    let summary_total: usize = result.summary().iter().map(|s| s.count).sum();
    assert_eq!(summary_total + result.unassigned(), result.entries.len());
}

#[test]
fn classify_first_match_wins_for_overlapping_bands() {
    let reference = site("REF", 0.0, 0.0);
    let candidates = vec![site("C1", 0.0, 0.03)];
    let bands = vec![
        RingBand::new("wide", 0.0, Some(20_000.0)),
        RingBand::new("narrow", 0.0, Some(5_000.0)),
    ];

    let result = classify(&reference, &candidates, &bands, true).expect("ok");
    assert_eq!(result.entries[0].band.as_deref(), Some("wide"));
}

#[test]
fn band_upper_bound_is_inclusive_and_lower_exclusive() {
    let band = RingBand::new("Ring 2", 5_000.0, Some(10_000.0));
    assert!(!band.contains(5_000.0));
    assert!(band.contains(5_000.001));
    assert!(band.contains(10_000.0));
    assert!(!band.contains(10_000.001));
}

#[test]
fn unbounded_band_catches_everything_beyond_lower() {
    let band = RingBand::new("Outer", 15_000.0, None);
    assert!(band.contains(1.0e9));
    assert!(!band.contains(15_000.0));
}

#[test]
fn classify_rejects_empty_band_list() {
    let reference = site("REF", 0.0, 0.0);
    let err = classify(&reference, &[], &[], true).unwrap_err();
    assert!(matches!(err, CoreError::InvalidBandConfiguration(_)));
}

#[test]
fn classify_rejects_malformed_bands() {
    let reference = site("REF", 0.0, 0.0);
    let malformed = [
        RingBand::new("", 0.0, Some(5_000.0)),
        RingBand::new("neg", -1.0, Some(5_000.0)),
        RingBand::new("inverted", 5_000.0, Some(1_000.0)),
        RingBand::new("flat", 5_000.0, Some(5_000.0)),
        RingBand::new("nan", f64::NAN, None),
    ];
    for band in malformed {
        let label = band.label.clone();
        let err = classify(&reference, &[], &[band], true).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidBandConfiguration(_)),
            "band '{label}' should be rejected"
        );
    }
}

#[test]
fn bands_from_radii_builds_contiguous_rings() {
    let bands = bands_from_radii(&[5_000.0, 10_000.0, 15_000.0]).expect("ok");
    assert_eq!(bands, RingBand::standard());
}

#[test]
fn bands_from_radii_rejects_empty_and_unsorted() {
    assert!(bands_from_radii(&[]).is_err());
    assert!(bands_from_radii(&[10_000.0, 5_000.0]).is_err());
    assert!(bands_from_radii(&[0.0]).is_err());
    assert!(bands_from_radii(&[5_000.0, 5_000.0]).is_err());
}

#[test]
fn summary_counts_follow_band_order() {
    let reference = site("REF", 0.0, 0.0);
    let candidates = vec![
        site("A", 0.0, 0.01),
        site("B", 0.0, 0.02),
        site("C", 0.0, 0.12),
        site("D", 0.0, 0.5),
    ];
    let result = classify(&reference, &candidates, &RingBand::standard(), true).expect("ok");

    let summary = result.summary();
    let counts: Vec<(&str, usize)> = summary.iter().map(|s| (s.label.as_str(), s.count)).collect();
    assert_eq!(counts, vec![("Ring 1", 2), ("Ring 2", 0), ("Ring 3", 1)]);
    assert_eq!(result.unassigned(), 1);
    assert_eq!(
        result.in_band("Ring 1").map(|e| e.site.id.as_str()).collect::<Vec<_>>(),
        vec!["A", "B"]
    );
}
