use std::collections::{BTreeMap, BTreeSet};

use super::error::{DataError, DataResult};
use super::model::{normalize_category, CategoricalField, HousingDataset, HousingRecord, NumericField};

// ---------------------------------------------------------------------------
// ValueRange – inclusive numeric bounds in stored units
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    low: f64,
    high: f64,
}

impl ValueRange {
    /// Fails when `low > high` or either bound is NaN.
    pub fn new(field: NumericField, low: f64, high: f64) -> DataResult<Self> {
        if low.is_nan() || high.is_nan() || low > high {
            return Err(DataError::InvalidRange {
                field: field.column().to_string(),
                low,
                high,
            });
        }
        Ok(Self { low, high })
    }

    /// Build from bounds expressed in the field's display unit
    /// (e.g. price in millions).
    pub fn from_display(field: NumericField, low: f64, high: f64) -> DataResult<Self> {
        let scale = field.display_scale();
        Self::new(field, low * scale, high * scale)
    }

    /// The full `(min, max)` range of a column; `None` on an empty dataset.
    pub fn covering(dataset: &HousingDataset, field: NumericField) -> Option<Self> {
        dataset
            .bounds(field)
            .map(|(low, high)| Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria – everything the user has constrained
// ---------------------------------------------------------------------------

/// A bundle of predicates, all of which a row must satisfy.
///
/// `None` ranges mean "unbounded". Accepted sets are always explicit: an
/// empty set accepts nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub price: Option<ValueRange>,
    pub area: Option<ValueRange>,
    pub stories: BTreeSet<i64>,
    categories: BTreeMap<CategoricalField, BTreeSet<String>>,
}

impl FilterCriteria {
    /// Criteria that keep every row of `dataset`.
    pub fn unrestricted(dataset: &HousingDataset) -> Self {
        Self {
            price: ValueRange::covering(dataset, NumericField::Price),
            area: ValueRange::covering(dataset, NumericField::Area),
            stories: dataset.distinct_stories().clone(),
            categories: CategoricalField::ALL
                .iter()
                .map(|&field| (field, dataset.distinct_values(field).clone()))
                .collect(),
        }
    }

    pub fn range(&self, field: NumericField) -> Option<ValueRange> {
        match field {
            NumericField::Price => self.price,
            NumericField::Area => self.area,
        }
    }

    pub fn set_range(&mut self, field: NumericField, range: ValueRange) {
        match field {
            NumericField::Price => self.price = Some(range),
            NumericField::Area => self.area = Some(range),
        }
    }

    pub fn accepted(&self, field: CategoricalField) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.categories.get(&field).unwrap_or(&EMPTY)
    }

    /// Replace the accepted values of a categorical field. Values are
    /// normalized so they compare against the stored canonical form.
    pub fn set_accepted<I, S>(&mut self, field: CategoricalField, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized = values
            .into_iter()
            .map(|v| normalize_category(v.as_ref()))
            .collect();
        self.categories.insert(field, normalized);
    }
}

// ---------------------------------------------------------------------------
// Individual filters
// ---------------------------------------------------------------------------

/// Rows with `low <= row[field] <= high`.
pub fn apply_range(
    dataset: &HousingDataset,
    field: NumericField,
    low: f64,
    high: f64,
) -> DataResult<HousingDataset> {
    let range = ValueRange::new(field, low, high)?;
    Ok(retain(dataset, |rec| range.contains(rec.numeric(field))))
}

/// Rows whose categorical value is in `accepted` (normalized before comparison).
pub fn apply_membership<S: AsRef<str>>(
    dataset: &HousingDataset,
    field: CategoricalField,
    accepted: &[S],
) -> HousingDataset {
    let accepted: BTreeSet<String> = accepted
        .iter()
        .map(|v| normalize_category(v.as_ref()))
        .collect();
    retain(dataset, |rec| accepted.contains(rec.category(field)))
}

/// Rows whose story count is in `accepted`.
pub fn apply_stories(dataset: &HousingDataset, accepted: &BTreeSet<i64>) -> HousingDataset {
    retain(dataset, |rec| accepted.contains(&rec.stories))
}

fn retain(dataset: &HousingDataset, keep: impl Fn(&HousingRecord) -> bool) -> HousingDataset {
    let records = dataset
        .records()
        .iter()
        .filter(|&rec| keep(rec))
        .cloned()
        .collect();
    HousingDataset::from_records(records)
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Return indices of records that pass every predicate in `criteria`.
///
/// Numeric bounds are checked before set membership. A membership set that
/// covers every distinct value of the dataset is skipped entirely.
pub fn filtered_indices(dataset: &HousingDataset, criteria: &FilterCriteria) -> Vec<usize> {
    let stories_active = !criteria.stories.is_superset(dataset.distinct_stories());
    let active_categories: Vec<(CategoricalField, &BTreeSet<String>)> = CategoricalField::ALL
        .iter()
        .map(|&field| (field, criteria.accepted(field)))
        .filter(|(field, accepted)| !accepted.is_superset(dataset.distinct_values(*field)))
        .collect();

    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            for field in NumericField::ALL {
                if let Some(range) = criteria.range(field) {
                    if !range.contains(rec.numeric(field)) {
                        return false;
                    }
                }
            }
            if stories_active && !criteria.stories.contains(&rec.stories) {
                return false;
            }
            active_categories
                .iter()
                .all(|(field, accepted)| accepted.contains(rec.category(*field)))
        })
        .map(|(i, _)| i)
        .collect()
}

/// The filtered subset as a new dataset; the input is left untouched.
pub fn filter(dataset: &HousingDataset, criteria: &FilterCriteria) -> HousingDataset {
    let indices = filtered_indices(dataset, criteria);
    log::debug!("Filter kept {} of {} records", indices.len(), dataset.len());
    dataset.select(&indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn five_prices() -> HousingDataset {
        HousingDataset::from_records(
            [1e6, 2e6, 3e6, 4e6, 5e6]
                .iter()
                .enumerate()
                .map(|(i, &price)| {
                    record(
                        price,
                        1000.0 + 500.0 * i as f64,
                        (i % 3) as i64 + 1,
                        if i % 2 == 0 { "yes" } else { "no" },
                        if i < 2 { "yes" } else { "no" },
                        ["furnished", "semi-furnished", "unfurnished"][i % 3],
                    )
                })
                .collect(),
        )
    }

    fn prices(ds: &HousingDataset) -> Vec<f64> {
        ds.records().iter().map(|r| r.price).collect()
    }

    #[test]
    fn range_is_inclusive() {
        let ds = five_prices();
        let out = apply_range(&ds, NumericField::Price, 2e6, 4e6).expect("valid range");
        assert_eq!(prices(&out), vec![2e6, 3e6, 4e6]);
    }

    #[test]
    fn range_at_data_bounds_keeps_everything() {
        let ds = five_prices();
        for field in NumericField::ALL {
            let (lo, hi) = ds.bounds(field).expect("non-empty");
            let out = apply_range(&ds, field, lo, hi).expect("valid range");
            assert_eq!(out.len(), ds.len());
        }
    }

    #[test]
    fn narrowing_range_never_grows_result() {
        let ds = five_prices();
        let mut previous = ds.len();
        for (lo, hi) in [(1e6, 5e6), (1.5e6, 5e6), (1.5e6, 4.5e6), (3e6, 4e6), (3e6, 3e6)] {
            let n = apply_range(&ds, NumericField::Price, lo, hi)
                .expect("valid range")
                .len();
            assert!(n <= previous, "{n} > {previous} for [{lo}, {hi}]");
            previous = n;
        }
        assert_eq!(previous, 1);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let ds = five_prices();
        let err = apply_range(&ds, NumericField::Area, 10.0, 5.0).unwrap_err();
        assert!(matches!(err, DataError::InvalidRange { .. }));
        assert!(ValueRange::new(NumericField::Price, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn display_range_converts_millions() {
        let range = ValueRange::from_display(NumericField::Price, 2.0, 4.0).expect("valid");
        assert_eq!(range.low(), 2e6);
        assert_eq!(range.high(), 4e6);
        let area = ValueRange::from_display(NumericField::Area, 1200.0, 1500.0).expect("valid");
        assert_eq!(area.low(), 1200.0);
    }

    #[test]
    fn membership_with_all_values_is_noop() {
        let ds = five_prices();
        for field in CategoricalField::ALL {
            let all: Vec<&String> = ds.distinct_values(field).iter().collect();
            assert_eq!(apply_membership(&ds, field, &all).len(), ds.len());
        }
    }

    #[test]
    fn membership_with_empty_set_is_empty() {
        let ds = five_prices();
        let none: [&str; 0] = [];
        assert!(apply_membership(&ds, CategoricalField::Basement, &none).is_empty());
        assert!(apply_stories(&ds, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn membership_normalizes_accepted_values() {
        let ds = five_prices();
        let out = apply_membership(&ds, CategoricalField::FurnishingStatus, &["FURNISHED"]);
        assert_eq!(prices(&out), vec![1e6, 4e6]);
    }

    #[test]
    fn unrestricted_criteria_keep_all_rows() {
        let ds = five_prices();
        let criteria = FilterCriteria::unrestricted(&ds);
        assert_eq!(filter(&ds, &criteria), ds);
    }

    #[test]
    fn pipeline_matches_sequential_filters_in_any_order() {
        let ds = five_prices();
        let mut criteria = FilterCriteria::unrestricted(&ds);
        criteria.set_range(
            NumericField::Price,
            ValueRange::new(NumericField::Price, 1e6, 4e6).expect("valid"),
        );
        criteria.set_range(
            NumericField::Area,
            ValueRange::new(NumericField::Area, 1000.0, 3000.0).expect("valid"),
        );
        criteria.stories = [1, 2].into_iter().collect();
        criteria.set_accepted(CategoricalField::Basement, ["YES", "no"]);
        criteria.set_accepted(CategoricalField::AirConditioning, ["yes", "no"]);
        criteria.set_accepted(CategoricalField::FurnishingStatus, ["furnished", "semi-furnished"]);

        let piped = filter(&ds, &criteria);
        assert_eq!(prices(&piped), vec![1e6, 2e6, 4e6]);

        let forward = {
            let d = apply_range(&ds, NumericField::Price, 1e6, 4e6).expect("valid");
            let d = apply_range(&d, NumericField::Area, 1000.0, 3000.0).expect("valid");
            let d = apply_stories(&d, &criteria.stories);
            let d = apply_membership(&d, CategoricalField::Basement, &["yes", "no"]);
            let d = apply_membership(&d, CategoricalField::AirConditioning, &["yes", "no"]);
            apply_membership(&d, CategoricalField::FurnishingStatus, &["furnished", "semi-furnished"])
        };
        let backward = {
            let d = apply_membership(&ds, CategoricalField::FurnishingStatus, &["furnished", "semi-furnished"]);
            let d = apply_membership(&d, CategoricalField::AirConditioning, &["yes", "no"]);
            let d = apply_membership(&d, CategoricalField::Basement, &["yes", "no"]);
            let d = apply_stories(&d, &criteria.stories);
            let d = apply_range(&d, NumericField::Area, 1000.0, 3000.0).expect("valid");
            apply_range(&d, NumericField::Price, 1e6, 4e6).expect("valid")
        };
        assert_eq!(forward, piped);
        assert_eq!(backward, piped);
    }

    #[test]
    fn empty_category_selection_excludes_everything() {
        let ds = five_prices();
        let mut criteria = FilterCriteria::unrestricted(&ds);
        criteria.set_accepted(CategoricalField::AirConditioning, Vec::<String>::new());
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn filter_leaves_source_untouched() {
        let ds = five_prices();
        let before = ds.clone();
        let mut criteria = FilterCriteria::unrestricted(&ds);
        criteria.stories = BTreeSet::from([3]);
        let out = filter(&ds, &criteria);
        assert_eq!(prices(&out), vec![3e6]);
        assert_eq!(ds, before);
    }
}
