//! Configuration for the CORD-19 explorer.

use std::path::PathBuf;

use chrono::Datelike;

/// Default values shared by the loader, the dashboard controls and the binary.
pub mod defaults {
    /// Pre-cleaned source, tried first.
    pub const CLEANED_PATH: &str = "cleaned_metadata.csv";

    /// Raw source, cleaned inline when the cleaned file is unusable.
    pub const RAW_PATH: &str = "metadata.csv";

    /// File name offered for the filtered CSV export.
    pub const EXPORT_FILE_NAME: &str = "filtered_cord19_data.csv";

    /// Earliest publication year kept by raw cleaning.
    pub const MIN_YEAR: i32 = 2019;

    /// Year slider range used when the table has no year column.
    pub const FALLBACK_YEAR_RANGE: (i32, i32) = (2019, 2023);

    /// Word-count slider bounds.
    pub const WORD_SLIDER_BOUNDS: (usize, usize) = (0, 1000);

    /// Word-count selection the slider starts at.
    pub const WORD_RANGE: (usize, usize) = (0, 500);

    /// Number of distinct journals offered in the journal selector.
    pub const JOURNAL_OPTIONS: usize = 20;

    /// Top journals shown.
    pub const TOP_JOURNALS: usize = 10;

    /// Top title words shown.
    pub const TOP_TITLE_WORDS: usize = 15;

    /// Histogram bins for abstract length.
    pub const HISTOGRAM_BINS: usize = 30;

    /// Sample rows shown under the charts.
    pub const SAMPLE_ROWS: usize = 10;

    /// HTTP port.
    pub const PORT: u16 = 8501;
}

/// Explorer configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-cleaned CSV source.
    pub cleaned_path: PathBuf,

    /// Raw CSV source.
    pub raw_path: PathBuf,

    /// Earliest publication year kept by raw cleaning.
    pub min_year: i32,

    /// Latest publication year kept by raw cleaning (the current calendar year by default).
    pub max_year: i32,
}

impl Config {
    /// Create a configuration for the given source paths.
    ///
    /// The year window ends at the current calendar year.
    #[must_use]
    pub fn new(cleaned_path: impl Into<PathBuf>, raw_path: impl Into<PathBuf>) -> Self {
        Self {
            cleaned_path: cleaned_path.into(),
            raw_path: raw_path.into(),
            min_year: defaults::MIN_YEAR,
            max_year: current_year(),
        }
    }

    /// Create a test configuration rooted in a directory, with a pinned year window.
    #[must_use]
    pub fn for_testing(dir: &std::path::Path) -> Self {
        Self {
            cleaned_path: dir.join(defaults::CLEANED_PATH),
            raw_path: dir.join(defaults::RAW_PATH),
            min_year: defaults::MIN_YEAR,
            max_year: 2023,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads a `.env` file first if one is present.
    ///
    /// # Errors
    ///
    /// Returns error if `CORD19_MAX_YEAR` is set but not an integer.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let cleaned = std::env::var("CORD19_CLEANED_PATH")
            .unwrap_or_else(|_| defaults::CLEANED_PATH.to_string());
        let raw =
            std::env::var("CORD19_RAW_PATH").unwrap_or_else(|_| defaults::RAW_PATH.to_string());

        let mut config = Self::new(cleaned, raw);
        if let Ok(year) = std::env::var("CORD19_MAX_YEAR") {
            config.max_year = year
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("CORD19_MAX_YEAR must be a year: {e}"))?;
        }
        Ok(config)
    }

    /// File name of the cleaned source, as shown in status messages.
    #[must_use]
    pub fn cleaned_name(&self) -> String {
        file_name(&self.cleaned_path)
    }

    /// File name of the raw source, as shown in status messages.
    #[must_use]
    pub fn raw_name(&self) -> String {
        file_name(&self.raw_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(defaults::CLEANED_PATH, defaults::RAW_PATH)
    }
}

/// Current calendar year in local time.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cleaned_path, PathBuf::from("cleaned_metadata.csv"));
        assert_eq!(config.raw_path, PathBuf::from("metadata.csv"));
        assert_eq!(config.min_year, 2019);
        assert_eq!(config.max_year, current_year());
    }

    #[test]
    fn test_config_for_testing() {
        let config = Config::for_testing(std::path::Path::new("/tmp/data"));
        assert_eq!(config.cleaned_name(), "cleaned_metadata.csv");
        assert_eq!(config.raw_name(), "metadata.csv");
        assert_eq!(config.max_year, 2023);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(defaults::EXPORT_FILE_NAME, "filtered_cord19_data.csv");
        assert!(defaults::WORD_RANGE.1 <= defaults::WORD_SLIDER_BOUNDS.1);
    }
}
