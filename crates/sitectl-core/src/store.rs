// ── Directory store port ──
//
// The narrow interface the site adapter is written against: list children,
// create/delete child entries, stage property writes, invoke verbs, commit.
// `MetabaseClient` is the production implementation; tests use an in-memory
// store. Keeping the seam this thin is what makes the adapter logic
// testable without a live web-server management service.

use sitectl_api::{MetabaseClient, NodeEntry};

use crate::error::CoreError;

/// Path of the web-service root node. Sites are its children.
pub const SERVICE_ROOT: &str = "w3svc";

/// Schema class of site entries.
pub const SITE_CLASS: &str = "web-server";

/// Schema class of the default sub-entry created under every new site.
pub const VDIR_CLASS: &str = "virtual-directory";

/// Name of the default sub-entry.
pub const ROOT_VDIR: &str = "root";

/// Property holding a site's human-readable name.
pub const PROP_SERVER_COMMENT: &str = "ServerComment";

/// Property holding a site's friendly application name.
pub const PROP_APP_FRIENDLY_NAME: &str = "AppFriendlyName";

/// Abstract directory-style configuration store.
///
/// Property writes are staged until [`commit`](DirectoryStore::commit) is
/// called on the owning node; implementations signal an occupied site
/// identifier from `create_child` with an identifier-collision error
/// (see [`CoreError::is_identifier_collision`]).
pub trait DirectoryStore: Send + Sync {
    /// List the child entries of a node.
    fn children(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<Vec<NodeEntry>, CoreError>> + Send;

    /// Create a child entry under a node.
    fn create_child(
        &self,
        path: &str,
        class: &str,
        name: &str,
    ) -> impl Future<Output = Result<NodeEntry, CoreError>> + Send;

    /// Delete a child entry by class and name.
    fn delete_child(
        &self,
        path: &str,
        class: &str,
        name: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Stage a property write, replacing any existing values. An empty
    /// value clears the property.
    fn put_property(
        &self,
        path: &str,
        name: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Stage appending one value to a multi-valued property.
    fn append_property_value(
        &self,
        path: &str,
        name: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Invoke a named verb on a node.
    fn invoke(&self, path: &str, verb: &str)
    -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Flush staged writes on a node.
    fn commit(&self, path: &str) -> impl Future<Output = Result<(), CoreError>> + Send;
}

impl DirectoryStore for MetabaseClient {
    async fn children(&self, path: &str) -> Result<Vec<NodeEntry>, CoreError> {
        Ok(MetabaseClient::children(self, path).await?)
    }

    async fn create_child(&self, path: &str, class: &str, name: &str) -> Result<NodeEntry, CoreError> {
        Ok(MetabaseClient::create_child(self, path, class, name).await?)
    }

    async fn delete_child(&self, path: &str, class: &str, name: &str) -> Result<(), CoreError> {
        Ok(MetabaseClient::delete_child(self, path, class, name).await?)
    }

    async fn put_property(&self, path: &str, name: &str, value: &str) -> Result<(), CoreError> {
        Ok(MetabaseClient::put_property(self, path, name, value).await?)
    }

    async fn append_property_value(&self, path: &str, name: &str, value: &str) -> Result<(), CoreError> {
        Ok(MetabaseClient::append_property_value(self, path, name, value).await?)
    }

    async fn invoke(&self, path: &str, verb: &str) -> Result<(), CoreError> {
        Ok(MetabaseClient::invoke(self, path, verb).await?)
    }

    async fn commit(&self, path: &str) -> Result<(), CoreError> {
        Ok(MetabaseClient::commit(self, path).await?)
    }
}
