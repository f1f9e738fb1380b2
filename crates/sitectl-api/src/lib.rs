//! Async client for the legacy web-server metabase admin protocol.
//!
//! The metabase is a hierarchical configuration store: a tree of named
//! nodes, each carrying a typed property bag and a set of invocable verbs.
//! This crate speaks the admin service's HTTP surface and exposes the raw
//! directory operations; `sitectl-core` layers the site semantics on top.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{Credentials, MetabaseClient};
pub use error::{CODE_IDENTIFIER_IN_USE, CODE_NODE_NOT_FOUND, Error};
pub use models::NodeEntry;
pub use transport::{TlsMode, TransportConfig};
