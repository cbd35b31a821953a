//! Output formatting for the CLI and the `/report` endpoint.

mod markdown;

pub use markdown::format_dashboard_markdown;
