// ── Site directory adapter ──
//
// The five site operations, written against the `DirectoryStore` port.
// Sites are children of the service root; the store assigns each one a
// numeric identifier found by bounded slot probing at creation time.

use std::time::Duration;

use tracing::{debug, info};

use crate::action::ControlAction;
use crate::error::CoreError;
use crate::model::{PropertySet, Site};
use crate::store::{
    DirectoryStore, PROP_APP_FRIENDLY_NAME, PROP_SERVER_COMMENT, ROOT_VDIR, SERVICE_ROOT,
    SITE_CLASS, VDIR_CLASS,
};

/// Upper bound of the site identifier space.
pub const SLOT_LIMIT: u32 = 1000;

/// Default delay before control verbs.
pub const DEFAULT_CONTROL_DELAY: Duration = Duration::from_millis(250);

/// Path of the site node with the given identifier.
fn site_path(id: u32) -> String {
    format!("{SERVICE_ROOT}/{id}")
}

/// Site lifecycle operations over an abstract [`DirectoryStore`].
pub struct SiteDirectory<S> {
    store: S,
    control_delay: Duration,
}

impl<S: DirectoryStore> SiteDirectory<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            control_delay: DEFAULT_CONTROL_DELAY,
        }
    }

    /// Override the delay inserted before control verbs.
    pub fn with_control_delay(mut self, delay: Duration) -> Self {
        self.control_delay = delay;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// All sites under the service root.
    pub async fn list(&self) -> Result<Vec<Site>, CoreError> {
        let entries = self.store.children(SERVICE_ROOT).await?;
        Ok(entries
            .iter()
            .filter(|e| e.class == SITE_CLASS)
            .filter_map(Site::from_entry)
            .collect())
    }

    /// Whether a site with this name exists (ASCII-case-insensitive).
    pub async fn exists(&self, name: &str) -> Result<bool, CoreError> {
        Ok(self.find(name).await?.is_some())
    }

    /// Linear scan of the service root for a site whose `ServerComment`
    /// matches `name`.
    async fn find(&self, name: &str) -> Result<Option<Site>, CoreError> {
        let entries = self.store.children(SERVICE_ROOT).await?;
        for entry in &entries {
            if entry.class != SITE_CLASS {
                continue;
            }
            let comment = entry.property(PROP_SERVER_COMMENT).unwrap_or_default();
            if comment.eq_ignore_ascii_case(name) {
                return Ok(Site::from_entry(entry));
            }
        }
        Ok(None)
    }

    // ── Create ───────────────────────────────────────────────────────

    /// Create a site named `name` with the given properties.
    ///
    /// If the name is taken: with `force`, the existing site is deleted
    /// first; otherwise the operation fails with `SiteAlreadyExists` and
    /// the existing site is left untouched.
    ///
    /// There is no rollback if property application fails after the entry
    /// was created; re-run with `force` to start over.
    pub async fn create(
        &self,
        name: &str,
        force: bool,
        properties: &PropertySet,
    ) -> Result<Site, CoreError> {
        info!(site = name, "creating site");

        if let Some(existing) = self.find(name).await? {
            if !force {
                return Err(CoreError::SiteAlreadyExists { name: name.into() });
            }
            info!(site = name, id = existing.id, "site exists, deleting first");
            self.delete_by_id(existing.id).await?;
        }

        let id = self.claim_slot().await?;
        let path = site_path(id);

        self.store.create_child(&path, VDIR_CLASS, ROOT_VDIR).await?;
        self.store.commit(&format!("{path}/{ROOT_VDIR}")).await?;

        self.store.put_property(&path, PROP_APP_FRIENDLY_NAME, name).await?;
        self.store.put_property(&path, PROP_SERVER_COMMENT, name).await?;
        self.store.commit(&path).await?;

        for (prop, values) in properties.iter() {
            debug!(site = name, property = prop, "applying property");
            self.apply_property(&path, prop, values).await?;
        }
        self.store.commit(&path).await?;

        info!(site = name, id, "site created");
        Ok(Site {
            id,
            name: name.to_owned(),
            properties: properties
                .iter()
                .map(|(n, v)| (n.to_owned(), v.to_vec()))
                .collect(),
        })
    }

    /// Probe identifiers sequentially until the store accepts one.
    ///
    /// Only identifier collisions advance the probe; any other failure
    /// aborts the create.
    async fn claim_slot(&self) -> Result<u32, CoreError> {
        for id in 1..=SLOT_LIMIT {
            match self
                .store
                .create_child(SERVICE_ROOT, SITE_CLASS, &id.to_string())
                .await
            {
                Ok(_) => {
                    self.store.commit(&site_path(id)).await?;
                    self.store.commit(SERVICE_ROOT).await?;
                    debug!(id, "claimed site identifier");
                    return Ok(id);
                }
                Err(e) if e.is_identifier_collision() => {
                    debug!(id, "identifier in use, probing next");
                }
                Err(e) => return Err(e),
            }
        }
        Err(CoreError::IdentifierSpaceExhausted { limit: SLOT_LIMIT })
    }

    /// Apply one parsed property to the site node.
    ///
    /// Single-valued properties are written directly; multi-valued ones are
    /// cleared and re-appended element by element.
    async fn apply_property(
        &self,
        path: &str,
        name: &str,
        values: &[String],
    ) -> Result<(), CoreError> {
        match values {
            [single] => {
                self.store.put_property(path, name, single).await?;
                self.store.commit(path).await?;
            }
            many => {
                self.store.put_property(path, name, "").await?;
                self.store.commit(path).await?;
                for value in many {
                    self.store.append_property_value(path, name, value).await?;
                }
                self.store.commit(path).await?;
            }
        }
        Ok(())
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Delete the site named `name`, failing with `SiteNotFound` (and
    /// performing no mutation) if it does not exist.
    pub async fn delete(&self, name: &str) -> Result<(), CoreError> {
        let Some(site) = self.find(name).await? else {
            return Err(CoreError::SiteNotFound { name: name.into() });
        };
        info!(site = name, id = site.id, "deleting site");
        self.delete_by_id(site.id).await
    }

    async fn delete_by_id(&self, id: u32) -> Result<(), CoreError> {
        self.store
            .delete_child(SERVICE_ROOT, SITE_CLASS, &id.to_string())
            .await
    }

    // ── Control ──────────────────────────────────────────────────────

    /// Invoke a control verb on the site named `name`.
    ///
    /// The provider intermittently rejects control verbs issued right
    /// after a lookup, so a short configurable delay precedes the invoke.
    pub async fn control(&self, name: &str, action: ControlAction) -> Result<(), CoreError> {
        let Some(site) = self.find(name).await? else {
            return Err(CoreError::SiteNotFound { name: name.into() });
        };
        info!(site = name, id = site.id, %action, "controlling site");
        tokio::time::sleep(self.control_delay).await;
        self.store.invoke(&site_path(site.id), &action.to_string()).await
    }
}
