use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Typed schema: the columns the explorer knows about
// ---------------------------------------------------------------------------

/// Numeric columns that support range filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericField {
    Price,
    Area,
}

impl NumericField {
    pub const ALL: [NumericField; 2] = [NumericField::Price, NumericField::Area];

    /// Exact, case-sensitive column name in the source file.
    pub fn column(self) -> &'static str {
        match self {
            NumericField::Price => "price",
            NumericField::Area => "area",
        }
    }

    /// Factor between stored values and the unit shown to the user.
    /// A displayed bound `b` compares against `b * display_scale()`.
    pub fn display_scale(self) -> f64 {
        match self {
            NumericField::Price => 1e6,
            NumericField::Area => 1.0,
        }
    }

    pub fn display_unit(self) -> &'static str {
        match self {
            NumericField::Price => "million",
            NumericField::Area => "sq. ft.",
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Free-text columns, lowercased at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoricalField {
    Basement,
    AirConditioning,
    FurnishingStatus,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 3] = [
        CategoricalField::Basement,
        CategoricalField::AirConditioning,
        CategoricalField::FurnishingStatus,
    ];

    pub fn column(self) -> &'static str {
        match self {
            CategoricalField::Basement => "basement",
            CategoricalField::AirConditioning => "airconditioning",
            CategoricalField::FurnishingStatus => "furnishingstatus",
        }
    }

    /// Human readable name for widgets.
    pub fn label(self) -> &'static str {
        match self {
            CategoricalField::Basement => "Basement",
            CategoricalField::AirConditioning => "Air Conditioning",
            CategoricalField::FurnishingStatus => "Furnishing Status",
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

pub const STORIES_COLUMN: &str = "stories";

/// Canonical form of a categorical value.
pub fn normalize_category(value: &str) -> String {
    value.to_lowercase()
}

// ---------------------------------------------------------------------------
// HousingRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single property listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingRecord {
    pub price: f64,
    pub area: f64,
    pub stories: i64,
    pub basement: String,
    pub airconditioning: String,
    pub furnishingstatus: String,
}

impl HousingRecord {
    pub fn numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Price => self.price,
            NumericField::Area => self.area,
        }
    }

    pub fn category(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Basement => &self.basement,
            CategoricalField::AirConditioning => &self.airconditioning,
            CategoricalField::FurnishingStatus => &self.furnishingstatus,
        }
    }

    /// Lowercase every categorical field in place.
    pub(crate) fn normalize(&mut self) {
        self.basement = normalize_category(&self.basement);
        self.airconditioning = normalize_category(&self.airconditioning);
        self.furnishingstatus = normalize_category(&self.furnishingstatus);
    }
}

// ---------------------------------------------------------------------------
// HousingDataset – an immutable, ordered collection of records
// ---------------------------------------------------------------------------

/// Rows plus pre-computed distinct values. Never mutated after construction;
/// every filter produces a new dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct HousingDataset {
    records: Vec<HousingRecord>,
    stories: BTreeSet<i64>,
    unique_values: BTreeMap<CategoricalField, BTreeSet<String>>,
}

impl Default for HousingDataset {
    fn default() -> Self {
        HousingDataset::from_records(Vec::new())
    }
}

impl HousingDataset {
    /// Build the distinct-value indices from the given rows.
    pub fn from_records(records: Vec<HousingRecord>) -> Self {
        let mut stories = BTreeSet::new();
        let mut unique_values: BTreeMap<CategoricalField, BTreeSet<String>> = CategoricalField::ALL
            .iter()
            .map(|&field| (field, BTreeSet::new()))
            .collect();

        for rec in &records {
            stories.insert(rec.stories);
            for field in CategoricalField::ALL {
                unique_values
                    .entry(field)
                    .or_default()
                    .insert(rec.category(field).to_string());
            }
        }

        HousingDataset {
            records,
            stories,
            unique_values,
        }
    }

    pub fn records(&self) -> &[HousingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct values of a categorical column.
    pub fn distinct_values(&self, field: CategoricalField) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.unique_values.get(&field).unwrap_or(&EMPTY)
    }

    pub fn distinct_stories(&self) -> &BTreeSet<i64> {
        &self.stories
    }

    /// `(min, max)` of a numeric column in stored units.
    pub fn bounds(&self, field: NumericField) -> Option<(f64, f64)> {
        let mut values = self.records.iter().map(|r| r.numeric(field));
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Bounds in display units, widened outwards to whole numbers so that a
    /// slider seeded with them selects every row.
    pub fn display_bounds(&self, field: NumericField) -> Option<(f64, f64)> {
        let scale = field.display_scale();
        self.bounds(field)
            .map(|(lo, hi)| ((lo / scale).floor(), (hi / scale).ceil()))
    }

    /// Copy the rows at `indices` (in the given order) into a new dataset.
    pub fn select(&self, indices: &[usize]) -> HousingDataset {
        let records = indices
            .iter()
            .filter_map(|&i| self.records.get(i).cloned())
            .collect();
        HousingDataset::from_records(records)
    }
}

#[cfg(test)]
pub(crate) fn record(
    price: f64,
    area: f64,
    stories: i64,
    basement: &str,
    airconditioning: &str,
    furnishingstatus: &str,
) -> HousingRecord {
    HousingRecord {
        price,
        area,
        stories,
        basement: basement.to_string(),
        airconditioning: airconditioning.to_string(),
        furnishingstatus: furnishingstatus.to_string(),
    }
}
