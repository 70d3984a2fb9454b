//! Map-overlay descriptors handed to the external map renderer.
//!
//! Nothing here draws anything; these are the marker and ring conventions
//! a renderer needs so every front end styles dealers and rings the same way.

use serde::Serialize;

use crate::geo::GeoPoint;
use crate::rings::RingBand;

/// Default map center (West Java), latitude then longitude.
pub const DEFAULT_MAP_CENTER: (f64, f64) = (-6.9, 107.6);

/// Color and fill opacity per ring, innermost first.
const RING_PALETTE: &[(&str, f64)] = &[("green", 0.3), ("orange", 0.2), ("red", 0.1)];
const RING_FALLBACK: (&str, f64) = ("gray", 0.05);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerStyle {
    pub label_prefix: &'static str,
    pub color: &'static str,
}

impl MarkerStyle {
    /// `DEALER` sites get a red "Dealer" marker; every other channel is a
    /// blue "Pos" marker.
    #[must_use]
    pub fn for_category(category: &str) -> Self {
        if category.trim().eq_ignore_ascii_case("DEALER") {
            Self {
                label_prefix: "Dealer",
                color: "red",
            }
        } else {
            Self {
                label_prefix: "Pos",
                color: "blue",
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingCircle {
    pub label: String,
    pub center: GeoPoint,
    pub radius_m: f64,
    pub color: &'static str,
    pub fill_opacity: f64,
}

/// One circle per bounded band, largest first so smaller rings draw on top.
///
/// Unbounded bands have no radius and are skipped.
#[must_use]
pub fn ring_circles(center: GeoPoint, bands: &[RingBand]) -> Vec<RingCircle> {
    let mut circles: Vec<RingCircle> = bands
        .iter()
        .filter_map(|band| band.upper_m.map(|radius| (band, radius)))
        .enumerate()
        .map(|(i, (band, radius_m))| {
            let (color, fill_opacity) = RING_PALETTE.get(i).copied().unwrap_or(RING_FALLBACK);
            RingCircle {
                label: band.label.clone(),
                center,
                radius_m,
                color,
                fill_opacity,
            }
        })
        .collect();
    circles.sort_by(|a, b| b.radius_m.total_cmp(&a.radius_m));
    circles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_style_for_dealer_and_pos() {
        assert_eq!(
            MarkerStyle::for_category("dealer"),
            MarkerStyle {
                label_prefix: "Dealer",
                color: "red"
            }
        );
        assert_eq!(MarkerStyle::for_category("POS").color, "blue");
        assert_eq!(MarkerStyle::for_category("WORKSHOP").label_prefix, "Pos");
    }

    #[test]
    fn standard_circles_are_largest_first_with_palette() {
        let center = GeoPoint::new(DEFAULT_MAP_CENTER.0, DEFAULT_MAP_CENTER.1).expect("point");
        let circles = ring_circles(center, &RingBand::standard());

        let summary: Vec<(&str, f64, &str)> = circles
            .iter()
            .map(|c| (c.label.as_str(), c.radius_m, c.color))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Ring 3", 15_000.0, "red"),
                ("Ring 2", 10_000.0, "orange"),
                ("Ring 1", 5_000.0, "green"),
            ]
        );
        assert_eq!(circles[2].fill_opacity, 0.3);
    }

    #[test]
    fn unbounded_bands_are_skipped_and_extra_rings_are_gray() {
        let center = GeoPoint::new(0.0, 0.0).expect("point");
        let mut bands = RingBand::standard();
        bands.push(RingBand::new("Ring 4", 15_000.0, Some(20_000.0)));
        bands.push(RingBand::new("Beyond", 20_000.0, None));

        let circles = ring_circles(center, &bands);
        assert_eq!(circles.len(), 4);
        assert_eq!(circles[0].label, "Ring 4");
        assert_eq!(circles[0].color, "gray");
    }
}
