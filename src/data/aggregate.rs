use std::collections::HashMap;

use super::model::{CategoricalField, HousingDataset, NumericField};

// ---------------------------------------------------------------------------
// Feature counts
// ---------------------------------------------------------------------------

/// One bar of the feature-count chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Count occurrences of each distinct value of `field`.
///
/// Sorted by descending count; ties keep the order in which values first
/// appear in the dataset. An empty dataset yields an empty vector.
pub fn count_by_value(dataset: &HousingDataset, field: CategoricalField) -> Vec<ValueCount> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();

    for rec in dataset.records() {
        let value = rec.category(field);
        match slots.get(value) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                slots.insert(value, counts.len());
                counts.push(ValueCount {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

// ---------------------------------------------------------------------------
// Price distribution
// ---------------------------------------------------------------------------

/// Half-open bucket `[start, end)`; the last bucket also includes `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width histogram of prices over the dataset's own price range.
pub fn price_histogram(dataset: &HousingDataset, bins: usize) -> Vec<HistogramBin> {
    histogram(dataset, NumericField::Price, bins)
}

pub fn histogram(dataset: &HousingDataset, field: NumericField, bins: usize) -> Vec<HistogramBin> {
    let Some((min, max)) = dataset.bounds(field) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    if max <= min {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: dataset.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for rec in dataset.records() {
        let offset = ((rec.numeric(field) - min) / width) as usize;
        out[offset.min(bins - 1)].count += 1;
    }
    out
}

// ---------------------------------------------------------------------------
// Area vs price
// ---------------------------------------------------------------------------

/// `[area, price]` pairs for the scatter plot, in row order.
pub fn area_price_points(dataset: &HousingDataset) -> Vec<[f64; 2]> {
    dataset
        .records()
        .iter()
        .map(|rec| [rec.area, rec.price])
        .collect()
}
