// Metabase admin HTTP client
//
// Wraps `reqwest::Client` with node-path URL construction and envelope
// unwrapping. The store is a tree of named nodes addressed by
// slash-separated paths under a per-machine root; all endpoints return the
// `{ status, data }` envelope, which is stripped before the caller sees it.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{Envelope, NodeEntry};
use crate::transport::TransportConfig;

/// Basic-auth credentials for the admin endpoint.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Raw HTTP client for a machine's metabase admin service.
///
/// Node paths are slash-separated (`w3svc`, `w3svc/42`, `w3svc/42/root`)
/// and are addressed under `/metabase/{machine}/`. Property writes are
/// staged by the service until `commit` flushes them.
pub struct MetabaseClient {
    http: reqwest::Client,
    base_url: Url,
    machine: String,
    credentials: Option<Credentials>,
}

impl MetabaseClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the admin service root (e.g. `https://deploy-host:8172`);
    /// `machine` selects the managed machine, `localhost` for the local one.
    pub fn new(
        base_url: Url,
        machine: impl Into<String>,
        credentials: Option<Credentials>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            machine: machine.into(),
            credentials,
        })
    }

    /// Create a client with a pre-built `reqwest::Client` (used by tests).
    pub fn with_client(http: reqwest::Client, base_url: Url, machine: impl Into<String>) -> Self {
        Self {
            http,
            base_url,
            machine: machine.into(),
            credentials: None,
        }
    }

    /// The managed machine name.
    pub fn machine(&self) -> &str {
        &self.machine
    }

    /// The admin service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for a node-scoped endpoint:
    /// `{base}/metabase/{machine}/{node_path}/{suffix}`
    fn node_url(&self, node_path: &str, suffix: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let node = node_path.trim_matches('/');
        let full = format!("{base}/metabase/{}/{node}/{suffix}", self.machine);
        Url::parse(&full).expect("invalid node URL")
    }

    // ── Directory operations ─────────────────────────────────────────

    /// List the child entries of a node.
    ///
    /// `GET {node}/children`
    pub async fn children(&self, node_path: &str) -> Result<Vec<NodeEntry>, Error> {
        let url = self.node_url(node_path, "children");
        debug!(node = node_path, "listing children");
        self.get(url).await
    }

    /// Create a child entry under a node.
    ///
    /// `POST {node}/children` with `{"class": ..., "name": ...}`. An
    /// occupied identifier is reported as an error envelope with code
    /// [`CODE_IDENTIFIER_IN_USE`](crate::error::CODE_IDENTIFIER_IN_USE).
    pub async fn create_child(
        &self,
        node_path: &str,
        class: &str,
        name: &str,
    ) -> Result<NodeEntry, Error> {
        let url = self.node_url(node_path, "children");
        debug!(node = node_path, class, name, "creating child");
        self.post(url, &json!({ "class": class, "name": name })).await
    }

    /// Delete a child entry by class and name.
    ///
    /// `DELETE {node}/children/{class}/{name}`
    pub async fn delete_child(&self, node_path: &str, class: &str, name: &str) -> Result<(), Error> {
        let url = self.node_url(node_path, &format!("children/{class}/{name}"));
        debug!(node = node_path, class, name, "deleting child");
        let _: Option<serde_json::Value> = self.delete(url).await?;
        Ok(())
    }

    // ── Property operations ──────────────────────────────────────────

    /// Set a property to a single value, replacing any existing values.
    ///
    /// `PUT {node}/properties/{name}` with `{"value": ...}`. An empty value
    /// clears the property.
    pub async fn put_property(&self, node_path: &str, name: &str, value: &str) -> Result<(), Error> {
        let url = self.node_url(node_path, &format!("properties/{name}"));
        debug!(node = node_path, property = name, "setting property");
        let _: Option<serde_json::Value> = self.put(url, &json!({ "value": value })).await?;
        Ok(())
    }

    /// Append one value to a multi-valued property.
    ///
    /// `POST {node}/properties/{name}/values` with `{"value": ...}`
    pub async fn append_property_value(
        &self,
        node_path: &str,
        name: &str,
        value: &str,
    ) -> Result<(), Error> {
        let url = self.node_url(node_path, &format!("properties/{name}/values"));
        debug!(node = node_path, property = name, "appending property value");
        let _: Option<serde_json::Value> = self.post_unit(url, &json!({ "value": value })).await?;
        Ok(())
    }

    // ── Verbs & commit ───────────────────────────────────────────────

    /// Invoke a named verb on a node (e.g. `start`, `stop`).
    ///
    /// `POST {node}/invoke` with `{"verb": ...}`
    pub async fn invoke(&self, node_path: &str, verb: &str) -> Result<(), Error> {
        let url = self.node_url(node_path, "invoke");
        debug!(node = node_path, verb, "invoking verb");
        let _: Option<serde_json::Value> = self.post_unit(url, &json!({ "verb": verb })).await?;
        Ok(())
    }

    /// Flush staged property writes on a node.
    ///
    /// `POST {node}/commit`
    pub async fn commit(&self, node_path: &str) -> Result<(), Error> {
        let url = self.node_url(node_path, "commit");
        debug!(node = node_path, "committing");
        let _: Option<serde_json::Value> = self.post_unit(url, &json!({})).await?;
        Ok(())
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some(creds) => {
                builder.basic_auth(&creds.username, Some(creds.password.expose_secret()))
            }
            None => builder,
        }
    }

    /// Send a GET request and unwrap the envelope into a required payload.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let resp = self
            .apply_auth(self.http.get(url))
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_required(resp).await
    }

    /// Send a POST request and unwrap the envelope into a required payload.
    async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let resp = self
            .apply_auth(self.http.post(url).json(body))
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_required(resp).await
    }

    /// Send a POST request where the envelope carries no payload.
    async fn post_unit<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<T>, Error> {
        let resp = self
            .apply_auth(self.http.post(url).json(body))
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_envelope(resp).await
    }

    /// Send a PUT request where the envelope carries no payload.
    async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<T>, Error> {
        let resp = self
            .apply_auth(self.http.put(url).json(body))
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_envelope(resp).await
    }

    /// Send a DELETE request where the envelope carries no payload.
    async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, Error> {
        let resp = self
            .apply_auth(self.http.delete(url))
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_envelope(resp).await
    }

    async fn parse_required<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let url = resp.url().clone();
        self.parse_envelope(resp).await?.ok_or_else(|| Error::Provider {
            message: format!("missing data payload from {url}"),
            code: None,
            status: None,
        })
    }

    /// Parse the `{ status, data }` envelope, returning `data` on success
    /// or `Error::Provider` with the service's message and code otherwise.
    async fn parse_envelope<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<Option<T>, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized {
                message: "invalid or missing admin credentials".into(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        // Error statuses still carry the envelope when the service produced
        // them; fall back to a body preview for proxy-generated responses.
        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_str::<Envelope<T>>(&body) {
                return Err(Error::Provider {
                    message: envelope.message.unwrap_or_else(|| format!("HTTP {status}")),
                    code: envelope.code,
                    status: Some(status.as_u16()),
                });
            }
            return Err(Error::Provider {
                message: format!("HTTP {status}: {}", &body[..body.len().min(200)]),
                code: None,
                status: Some(status.as_u16()),
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        match envelope.status.as_str() {
            "ok" => Ok(envelope.data),
            _ => Err(Error::Provider {
                message: envelope
                    .message
                    .unwrap_or_else(|| format!("status={}", envelope.status)),
                code: envelope.code,
                status: None,
            }),
        }
    }
}
