//! Logging facilities for report-results.
//!
//! report-results uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("report_results_net=debug")
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Flattener target.
    pub const FLATTEN: &str = "report_results_core::flatten";
    /// HTTP transport target.
    pub const HTTP: &str = "report_results_net::http";
    /// GraphQL exchange target.
    pub const GRAPHQL: &str = "report_results_net::graphql";
    /// Report lookup target.
    pub const REPORT: &str = "report_results_net::report";
}
