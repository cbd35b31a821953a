//! Data source resolution.
//!
//! Sources are tried in order (cleaned CSV, raw CSV with inline cleaning) and the
//! first usable one wins. When every real tier fails, the synthetic table is used,
//! so resolving always yields a table. Each attempt emits a [`StatusSignal`] that is
//! logged and kept on the [`Resolved`] result for the presentation layer; signals
//! never influence which table is returned.

mod cache;
mod cleaned;
mod raw;
pub mod schema;
mod synthetic;

pub use cache::{DataLoader, MokaTableCache, TableCache, Uncached};
pub use cleaned::CleanedSource;
pub use raw::{CleaningReport, RawSource, UNKNOWN_JOURNAL, parse_publish_time, title_case};
pub use synthetic::SyntheticSource;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::SourceResult;
use crate::models::Table;

/// Where the resolved table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    Cleaned,
    RawCleaned,
    Synthetic,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Cleaned => "cleaned",
            Self::RawCleaned => "raw-cleaned",
            Self::Synthetic => "synthetic",
        })
    }
}

/// Severity of a status signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Success,
    Info,
    Error,
}

/// Observational message about one tier attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSignal {
    pub level: StatusLevel,
    pub message: String,
}

impl StatusSignal {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: StatusLevel::Success, message: message.into() }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: StatusLevel::Info, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: StatusLevel::Error, message: message.into() }
    }

    fn emit(self, sink: &mut Vec<Self>) {
        match self.level {
            StatusLevel::Success => tracing::info!(status = "success", "{}", self.message),
            StatusLevel::Info => tracing::info!(status = "info", "{}", self.message),
            StatusLevel::Error => tracing::error!(status = "error", "{}", self.message),
        }
        sink.push(self);
    }
}

/// A resolved table with its provenance and the signals emitted while resolving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub table: Table,
    pub provenance: Provenance,
    pub statuses: Vec<StatusSignal>,
}

impl Resolved {
    /// Whether the synthetic fallback is in use.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.provenance == Provenance::Synthetic
    }
}

/// One tier of the fallback chain.
pub trait SourceTier: Send + Sync {
    /// Source name shown in status messages (usually a file name).
    fn name(&self) -> &str;

    /// Provenance tag attached when this tier wins.
    fn provenance(&self) -> Provenance;

    /// Message emitted when this tier loads.
    fn success_message(&self) -> String;

    /// Load the table, or fail so the next tier is tried.
    fn load(&self) -> SourceResult<Table>;
}

/// Ordered fallback chain ending in the synthetic table.
pub struct Resolver {
    tiers: Vec<Box<dyn SourceTier>>,
    fallback: SyntheticSource,
}

impl Resolver {
    /// Build a resolver over the given tiers, tried in order.
    #[must_use]
    pub fn new(tiers: Vec<Box<dyn SourceTier>>) -> Self {
        Self { tiers, fallback: SyntheticSource }
    }

    /// Cleaned source, then raw source, per the configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(vec![
            Box::new(CleanedSource::new(&config.cleaned_path, config.cleaned_name())),
            Box::new(RawSource::new(
                &config.raw_path,
                config.raw_name(),
                config.min_year,
                config.max_year,
            )),
        ])
    }

    /// Try each tier in order; fall back to the synthetic table.
    #[must_use]
    pub fn resolve(&self) -> Resolved {
        let mut statuses = Vec::new();

        for (i, tier) in self.tiers.iter().enumerate() {
            match tier.load() {
                Ok(table) => {
                    tracing::info!(
                        source = tier.name(),
                        provenance = %tier.provenance(),
                        rows = table.len(),
                        "Resolved data source"
                    );
                    StatusSignal::success(tier.success_message()).emit(&mut statuses);
                    return Resolved { table, provenance: tier.provenance(), statuses };
                }
                Err(e) => {
                    tracing::warn!(source = tier.name(), error = %e, "Source tier failed");
                    match self.tiers.get(i + 1) {
                        Some(next) => StatusSignal::info(format!(
                            "{} not found. Trying to load {}...",
                            tier.name(),
                            next.name()
                        ))
                        .emit(&mut statuses),
                        None => StatusSignal::error(self.exhausted_message()).emit(&mut statuses),
                    }
                }
            }
        }

        tracing::warn!("All data sources failed, using synthetic sample data");
        StatusSignal::info(SyntheticSource::MESSAGE).emit(&mut statuses);
        Resolved { table: self.fallback.table(), provenance: Provenance::Synthetic, statuses }
    }

    fn exhausted_message(&self) -> String {
        let names: Vec<&str> = self.tiers.iter().rev().map(|t| t.name()).collect();
        format!("Could not load data. Please ensure either {} is available.", names.join(" or "))
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("tiers", &self.tiers.iter().map(|t| t.name()).collect::<Vec<_>>())
            .finish()
    }
}
