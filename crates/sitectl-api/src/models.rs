// Wire models for the metabase admin protocol.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response envelope used by every metabase service endpoint.
///
/// Success: `{ "status": "ok", "data": ... }`
/// Failure: `{ "status": "error", "message": "...", "code": "..." }`
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Envelope<T> {
    pub status: String,
    #[serde(default)]
    pub data: Option<T>,
    pub message: Option<String>,
    pub code: Option<String>,
}

/// One child entry of a metabase node, as reported by the service.
///
/// Properties are multi-valued by design; a single-valued property is a
/// one-element list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeEntry {
    /// Node name — for site entries this is the numeric identifier.
    pub name: String,
    /// Schema class (e.g. `web-server`, `virtual-directory`).
    pub class: String,
    /// The node's property bag.
    #[serde(default)]
    pub properties: BTreeMap<String, Vec<String>>,
}

impl NodeEntry {
    /// First value of the named property, if present.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
