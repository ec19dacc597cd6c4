//! Categorical feature encoding
//!
//! The rain classifier consumes numeric matrices, so the categorical columns
//! (wind gust direction, rain outcome) are label-encoded on every build.
//! Codes follow the sorted order of the distinct fitted values, which makes
//! the mapping reproducible for a given dataset.

use std::collections::BTreeSet;

use shared::types::CompassDirection;

/// Code assigned to live categories absent from the fitted classes
pub const UNSEEN_CATEGORY: i64 = -1;

/// Dense label encoder over string categories
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit an encoder over the distinct values of an iterator
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = values.into_iter().collect();
        Self {
            classes: distinct.into_iter().map(str::to_owned).collect(),
        }
    }

    /// Code for a fitted category, if present
    pub fn transform(&self, value: &str) -> Option<i64> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .ok()
            .map(|index| index as i64)
    }

    /// Code for a live category, falling back to the unseen sentinel
    pub fn encode_live(&self, value: &str) -> i64 {
        self.transform(value).unwrap_or(UNSEEN_CATEGORY)
    }

    /// Category for a code produced by this encoder
    pub fn inverse_transform(&self, code: i64) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|index| self.classes.get(index))
            .map(String::as_str)
    }

    /// Fitted categories in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Encode a live wind direction for the classifier
///
/// An unknown bearing maps straight to the sentinel, even when the fitted
/// classes happen to contain an "Unknown" label of their own.
pub fn encode_direction(encoder: &LabelEncoder, direction: CompassDirection) -> i64 {
    match direction {
        CompassDirection::Unknown => UNSEEN_CATEGORY,
        labeled => encoder.encode_live(labeled.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_sorted_order() {
        let encoder = LabelEncoder::fit(["W", "E", "N", "E"]);

        assert_eq!(encoder.classes(), &["E", "N", "W"]);
        assert_eq!(encoder.transform("E"), Some(0));
        assert_eq!(encoder.transform("N"), Some(1));
        assert_eq!(encoder.transform("W"), Some(2));
        assert_eq!(encoder.len(), 3);
    }

    #[test]
    fn transform_round_trips_through_inverse() {
        let encoder = LabelEncoder::fit(["No", "Yes"]);

        for class in encoder.classes() {
            let code = encoder.transform(class).unwrap();
            assert_eq!(encoder.inverse_transform(code), Some(class.as_str()));
        }
    }

    #[test]
    fn binary_outcomes_encode_no_zero_yes_one() {
        let encoder = LabelEncoder::fit(["Yes", "No", "Yes"]);

        assert_eq!(encoder.transform("No"), Some(0));
        assert_eq!(encoder.transform("Yes"), Some(1));
    }

    #[test]
    fn unseen_category_maps_to_sentinel() {
        let encoder = LabelEncoder::fit(["N", "S"]);

        assert_eq!(encoder.encode_live("NNW"), UNSEEN_CATEGORY);
        assert_eq!(encoder.inverse_transform(UNSEEN_CATEGORY), None);
    }

    #[test]
    fn empty_fit_encodes_everything_as_unseen() {
        let encoder = LabelEncoder::fit([]);

        assert!(encoder.is_empty());
        assert_eq!(encoder.encode_live("N"), UNSEEN_CATEGORY);
    }

    #[test]
    fn unknown_direction_bypasses_the_fitted_classes() {
        let encoder = LabelEncoder::fit(["N", "S", "Unknown"]);

        assert_eq!(
            encode_direction(&encoder, CompassDirection::Unknown),
            UNSEEN_CATEGORY
        );
        assert_eq!(
            encode_direction(&encoder, CompassDirection::N),
            encoder.transform("N").unwrap()
        );
    }
}
