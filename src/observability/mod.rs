//! Observability for siterestore
//!
//! A restore run emits a stream of structured progress events (one JSON line
//! per event) so operators can follow which site and which step is running.
//! Progress goes to stdout, errors and fatal reports to stderr.

mod logger;

pub use logger::{Logger, Severity};
