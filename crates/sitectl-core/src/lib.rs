//! Site directory semantics for `sitectl`.
//!
//! This crate owns the behavior: the [`DirectoryStore`] port over the
//! metabase tree, the [`SiteDirectory`] adapter implementing the site
//! lifecycle (exists / create / delete / control), property-string
//! parsing, and the fixed task-action vocabulary. The wire protocol lives
//! in `sitectl-api`; presentation lives in the CLI crate.

pub mod action;
pub mod directory;
pub mod error;
pub mod model;
pub mod store;
pub mod task;

pub use action::{ControlAction, TaskAction};
pub use directory::{DEFAULT_CONTROL_DELAY, SLOT_LIMIT, SiteDirectory};
pub use error::CoreError;
pub use model::{PropertySet, Site};
pub use store::DirectoryStore;
pub use task::{TaskOutcome, TaskRequest};

// Re-exported so consumers can construct the production store without
// depending on the api crate directly.
pub use sitectl_api::{Credentials, MetabaseClient, NodeEntry, TlsMode, TransportConfig};
