// ── Site domain type ──

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sitectl_api::NodeEntry;

use crate::store::PROP_SERVER_COMMENT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// Numeric identifier assigned by the store at creation time. Site
    /// nodes live at `w3svc/{id}`.
    pub id: u32,
    /// Human-readable name (the `ServerComment` property).
    pub name: String,
    /// The site node's property bag as reported by the store.
    pub properties: BTreeMap<String, Vec<String>>,
}

impl Site {
    /// Build a `Site` from a child entry of the service root.
    ///
    /// Returns `None` for entries whose name is not a numeric identifier;
    /// the service root carries non-site children too.
    pub(crate) fn from_entry(entry: &NodeEntry) -> Option<Self> {
        let id = entry.name.parse().ok()?;
        let name = entry.property(PROP_SERVER_COMMENT).unwrap_or_default().to_owned();
        Some(Self {
            id,
            name,
            properties: entry.properties.clone(),
        })
    }
}
