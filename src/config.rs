use std::path::PathBuf;

/// Dataset path used when `HOUSE_EXPLORER_DATA` is not set.
pub const DEFAULT_DATA_PATH: &str = "house_data.csv";
pub const DATA_PATH_ENV: &str = "HOUSE_EXPLORER_DATA";
pub const HISTOGRAM_BINS_ENV: &str = "HOUSE_EXPLORER_BINS";

const DEFAULT_HISTOGRAM_BINS: usize = 30;
pub const MAX_HISTOGRAM_BINS: usize = 1000;

/// Startup settings for the explorer front-end.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    pub data_path: PathBuf,
    pub histogram_bins: usize,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
        }
    }
}

impl ExplorerConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source; unset or blank keys keep
    /// their defaults, unparseable bin counts are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(DATA_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(HISTOGRAM_BINS_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(bins) if (1..=MAX_HISTOGRAM_BINS).contains(&bins) => {
                    config.histogram_bins = bins
                }
                _ => log::warn!(
                    "Ignoring {HISTOGRAM_BINS_ENV}={raw:?}: expected an integer in 1..={MAX_HISTOGRAM_BINS}"
                ),
            }
        }

        config
    }
}
