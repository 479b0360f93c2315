//! Database restoration for siterestore
//!
//! Replays a site's compressed SQL dump into a freshly reset database.
//!
//! The sequence is strict and destructive on purpose: the target database
//! is dropped and recreated, its user and credential re-asserted, and the
//! dump loaded with administrative credentials. Running it twice against
//! the same target converges to the same state.
//!
//! All engine access goes through the [`DatabaseAdmin`] trait; the shipped
//! implementation shells out to the `mysql` command-line client, and every
//! invocation's exit status is checked. A failed step aborts that site's
//! restore instead of silently proceeding.

mod admin;
mod dump;
mod errors;
mod restorer;
mod target;

pub use admin::{DatabaseAdmin, MysqlAdmin};
pub use dump::decompress_dump;
pub use errors::{DbError, DbResult};
pub use restorer::DatabaseRestorer;
pub use target::DatabaseTarget;
