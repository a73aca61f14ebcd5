use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

use house_explorer::config::ExplorerConfig;
use house_explorer::data::aggregate::{count_by_value, price_histogram, HistogramBin, ValueCount};
use house_explorer::data::{
    filter, CategoricalField, DataResult, DatasetLoader, FilterCriteria, HousingDataset,
    NumericField, ValueRange,
};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Sidebar control values
// ---------------------------------------------------------------------------

/// Raw widget values. Ranges are kept in display units (price in millions).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterControls {
    pub price: (f64, f64),
    pub area: (f64, f64),
    pub stories: BTreeSet<i64>,
    pub categories: BTreeMap<CategoricalField, BTreeSet<String>>,
}

impl FilterControls {
    /// Everything selected, sliders at the widened data bounds.
    pub fn defaults(dataset: &HousingDataset) -> Self {
        let bounds = |field| dataset.display_bounds(field).unwrap_or((0.0, 0.0));
        Self {
            price: bounds(NumericField::Price),
            area: bounds(NumericField::Area),
            stories: dataset.distinct_stories().clone(),
            categories: CategoricalField::ALL
                .iter()
                .map(|&field| (field, dataset.distinct_values(field).clone()))
                .collect(),
        }
    }

    pub fn range_mut(&mut self, field: NumericField) -> &mut (f64, f64) {
        match field {
            NumericField::Price => &mut self.price,
            NumericField::Area => &mut self.area,
        }
    }

    /// Build fresh criteria from the current widget values.
    pub fn criteria(&self, dataset: &HousingDataset) -> DataResult<FilterCriteria> {
        let mut criteria = FilterCriteria::unrestricted(dataset);
        if !dataset.is_empty() {
            for (field, (low, high)) in [
                (NumericField::Price, self.price),
                (NumericField::Area, self.area),
            ] {
                criteria.set_range(field, ValueRange::from_display(field, low, high)?);
            }
        }
        criteria.stories = self.stories.clone();
        for field in CategoricalField::ALL {
            let selected = self.categories.get(&field).into_iter().flatten();
            criteria.set_accepted(field, selected);
        }
        Ok(criteria)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ExplorerConfig,

    loader: DatasetLoader,

    /// Loaded dataset (None until a load succeeds). Shared, never mutated.
    pub dataset: Option<Arc<HousingDataset>>,

    pub controls: FilterControls,

    /// Rows passing the current controls, recomputed on every change.
    pub filtered: HousingDataset,

    /// Which categorical field the feature-count chart and scatter colours use.
    pub feature: CategoricalField,

    pub feature_counts: Vec<ValueCount>,

    pub histogram: Vec<HistogramBin>,

    pub color_map: Option<ColorMap>,

    pub show_raw: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            loader: DatasetLoader::new(config.data_path.clone()),
            config,
            dataset: None,
            controls: FilterControls::default(),
            filtered: HousingDataset::default(),
            feature: CategoricalField::Basement,
            feature_counts: Vec::new(),
            histogram: Vec::new(),
            color_map: None,
            show_raw: false,
            status_message: None,
        }
    }

    /// Load (or re-serve) the configured dataset.
    pub fn load(&mut self) {
        match self.loader.load() {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", self.loader.path().display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Point the loader at a different file and read it.
    pub fn open_path(&mut self, path: PathBuf) {
        self.loader = DatasetLoader::new(path);
        self.load();
    }

    /// Ingest a newly loaded dataset, reset controls and colours.
    pub fn set_dataset(&mut self, dataset: Arc<HousingDataset>) {
        self.controls = FilterControls::defaults(&dataset);
        self.color_map = Some(ColorMap::new(
            self.feature,
            dataset.distinct_values(self.feature),
        ));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the filtered rows and everything derived from them.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        match self.controls.criteria(ds) {
            Ok(criteria) => {
                self.filtered = filter(ds, &criteria);
                self.status_message = None;
            }
            Err(e) => {
                // sliders clamp low <= high, so this is a bug
                log::error!("Rejected filter controls: {e}");
                self.status_message = Some(format!("Error: {e}"));
                return;
            }
        }
        self.feature_counts = count_by_value(&self.filtered, self.feature);
        self.histogram = price_histogram(&self.filtered, self.config.histogram_bins);
    }

    pub fn set_feature(&mut self, feature: CategoricalField) {
        self.feature = feature;
        if let Some(ds) = &self.dataset {
            self.color_map = Some(ColorMap::new(feature, ds.distinct_values(feature)));
        }
        self.feature_counts = count_by_value(&self.filtered, feature);
    }

    pub fn toggle_story(&mut self, stories: i64) {
        if !self.controls.stories.remove(&stories) {
            self.controls.stories.insert(stories);
        }
        self.refilter();
    }

    pub fn toggle_category(&mut self, field: CategoricalField, value: &str) {
        let selected = self.controls.categories.entry(field).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select all values of a field.
    pub fn select_all(&mut self, field: CategoricalField) {
        if let Some(ds) = &self.dataset {
            self.controls
                .categories
                .insert(field, ds.distinct_values(field).clone());
            self.refilter();
        }
    }

    /// Deselect all values of a field.
    pub fn select_none(&mut self, field: CategoricalField) {
        self.controls.categories.insert(field, BTreeSet::new());
        self.refilter();
    }
}
