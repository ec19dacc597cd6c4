//! Common types used across the platform

/// Sixteen-sector compass rose label for a wind bearing
///
/// Matches the categorical wind directions in the historical dataset, plus
/// `Unknown` for bearings that land outside every sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassDirection {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
    Unknown,
}

/// Sector table over a normalized bearing. Edges are exclusive on both
/// sides, and the arc from 348.75 up to 360 belongs to no sector.
const SECTORS: [(CompassDirection, f64, f64); 16] = [
    (CompassDirection::N, 0.0, 11.25),
    (CompassDirection::Nne, 11.25, 33.75),
    (CompassDirection::Ne, 33.75, 56.25),
    (CompassDirection::Ene, 56.25, 78.75),
    (CompassDirection::E, 78.75, 101.25),
    (CompassDirection::Ese, 101.25, 123.75),
    (CompassDirection::Se, 123.75, 146.25),
    (CompassDirection::Sse, 146.25, 168.75),
    (CompassDirection::S, 168.75, 191.25),
    (CompassDirection::Ssw, 191.25, 213.75),
    (CompassDirection::Sw, 213.75, 236.25),
    (CompassDirection::Wsw, 236.25, 258.75),
    (CompassDirection::W, 258.75, 281.25),
    (CompassDirection::Wnw, 281.25, 303.75),
    (CompassDirection::Nw, 303.75, 326.25),
    (CompassDirection::Nnw, 326.25, 348.75),
];

impl CompassDirection {
    /// Bucket a wind bearing onto the compass rose
    ///
    /// The bearing is normalized into `[0, 360)` first, so negative and
    /// oversized values wrap. A bearing that falls exactly on a sector edge
    /// (or in the gap above the NNW sector) maps to `Unknown`, as does NaN.
    pub fn from_degrees(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        SECTORS
            .iter()
            .find(|(_, start, end)| *start < normalized && normalized < *end)
            .map(|(direction, _, _)| *direction)
            .unwrap_or(CompassDirection::Unknown)
    }

    /// Canonical label, matching the categories in the historical dataset
    pub fn as_str(&self) -> &'static str {
        match self {
            CompassDirection::N => "N",
            CompassDirection::Nne => "NNE",
            CompassDirection::Ne => "NE",
            CompassDirection::Ene => "ENE",
            CompassDirection::E => "E",
            CompassDirection::Ese => "ESE",
            CompassDirection::Se => "SE",
            CompassDirection::Sse => "SSE",
            CompassDirection::S => "S",
            CompassDirection::Ssw => "SSW",
            CompassDirection::Sw => "SW",
            CompassDirection::Wsw => "WSW",
            CompassDirection::W => "W",
            CompassDirection::Wnw => "WNW",
            CompassDirection::Nw => "NW",
            CompassDirection::Nnw => "NNW",
            CompassDirection::Unknown => "Unknown",
        }
    }

    /// True when the bearing fell outside every sector
    pub fn is_unknown(&self) -> bool {
        matches!(self, CompassDirection::Unknown)
    }
}

impl std::fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_bearings() {
        assert_eq!(CompassDirection::from_degrees(5.0), CompassDirection::N);
        assert_eq!(CompassDirection::from_degrees(200.0), CompassDirection::Ssw);
        assert_eq!(CompassDirection::from_degrees(292.5), CompassDirection::Wnw);
    }

    #[test]
    fn test_boundary_bearings_are_unknown() {
        assert_eq!(CompassDirection::from_degrees(0.0), CompassDirection::Unknown);
        assert_eq!(CompassDirection::from_degrees(11.25), CompassDirection::Unknown);
        assert_eq!(CompassDirection::from_degrees(348.75), CompassDirection::Unknown);
    }

    #[test]
    fn test_wrap_gap_is_unknown() {
        assert_eq!(CompassDirection::from_degrees(355.0), CompassDirection::Unknown);
        assert_eq!(CompassDirection::from_degrees(359.9), CompassDirection::Unknown);
    }

    #[test]
    fn test_negative_and_oversized_bearings_normalize() {
        assert_eq!(CompassDirection::from_degrees(-160.0), CompassDirection::Ssw);
        assert_eq!(CompassDirection::from_degrees(560.0), CompassDirection::Ssw);
        assert_eq!(CompassDirection::from_degrees(360.0), CompassDirection::Unknown);
    }

    #[test]
    fn test_nan_is_unknown() {
        assert_eq!(CompassDirection::from_degrees(f64::NAN), CompassDirection::Unknown);
    }

    #[test]
    fn test_labels_match_dataset_categories() {
        assert_eq!(CompassDirection::Nne.as_str(), "NNE");
        assert_eq!(CompassDirection::Ssw.to_string(), "SSW");
        assert!(CompassDirection::from_degrees(0.0).is_unknown());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Bucketing never panics and never invents a label
            #[test]
            fn prop_bucketing_is_total(degrees in proptest::num::f64::ANY) {
                let direction = CompassDirection::from_degrees(degrees);
                prop_assert!(!direction.as_str().is_empty());
            }

            /// Labeled sectors agree with their table bounds
            #[test]
            fn prop_labeled_bearings_sit_inside_their_sector(degrees in 0.0..360.0f64) {
                let direction = CompassDirection::from_degrees(degrees);
                if let Some((_, start, end)) =
                    SECTORS.iter().find(|(d, _, _)| *d == direction)
                {
                    prop_assert!(*start < degrees && degrees < *end);
                }
            }
        }
    }
}
