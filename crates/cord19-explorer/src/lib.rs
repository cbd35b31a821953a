//! CORD-19 Explorer
//!
//! Data pipeline behind an interactive dashboard over CORD-19 research paper metadata.
//! Loads a cleaned or raw metadata CSV (falling back to a built-in sample), filters it
//! by year, journal and abstract length, and computes the dashboard panels.
//!
//! # Features
//!
//! - **Never-failing loading**: cleaned source → raw source with inline cleaning → sample data
//! - **Capability flags**: missing journal/year columns degrade panels instead of failing
//! - **Pure pipeline**: filtering and aggregation never mutate the cached table
//! - **Cached**: the resolved table is loaded once per process
//!
//! # Example
//!
//! ```no_run
//! use cord19_explorer::{
//!     Config, DashboardView, DataLoader, FilterControls, MokaTableCache, Resolver,
//! };
//!
//! let config = Config::default();
//! let loader = DataLoader::new(Resolver::from_config(&config), MokaTableCache::new());
//!
//! let resolved = loader.load();
//! let filter = FilterControls::from_table(&resolved.table).default_state();
//! let view = DashboardView::build(&resolved, &filter);
//! println!("{} papers", view.summary.total_papers);
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod formatters;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod source;

pub use config::Config;
pub use dashboard::{DashboardView, FilterControls};
pub use error::{SourceError, ViewError};
pub use models::{FilterState, JournalSelection, Paper, Table};
pub use source::{DataLoader, MokaTableCache, Provenance, Resolved, Resolver, Uncached};
