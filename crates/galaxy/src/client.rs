//! Galaxy `tool_shed_repositories` API client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use shedsync_core::{Error, Result};
use tracing::{debug, info};

use crate::config::GalaxyConfig;
use crate::types::{InstallOutcome, InstallRequest, InstalledRepository};

/// The registry calls the reconciler consumes.
///
/// Every method issues exactly one network round trip and resolves when the
/// registry answers. Dropping the returned future aborts the in-flight
/// request; no retries happen at this layer.
#[async_trait]
pub trait ToolShedRepositories: Send + Sync {
    /// Installs a tool-shed repository into the Galaxy instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry rejects the request or the
    /// transport fails. An install the registry accepts but that yields no
    /// new repository is NOT an error here; it decodes to
    /// [`InstallOutcome::None`].
    async fn install(&self, request: &InstallRequest) -> Result<InstallOutcome>;

    /// Fetches one installed repository by its registry-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RepositoryNotFound`] if the registry no longer
    /// knows the id, or an API/transport error.
    async fn get(&self, id: &str) -> Result<InstalledRepository>;

    /// Lists all installed repositories on the instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry rejects the request or the
    /// transport fails.
    async fn list(&self) -> Result<Vec<InstalledRepository>>;

    /// Uninstalls an installed repository, optionally removing it from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry rejects the request or the
    /// transport fails. After an error the repository's existence is
    /// ambiguous and must be re-read.
    async fn uninstall(&self, id: &str, remove_from_disk: bool) -> Result<()>;
}

#[async_trait]
impl<T> ToolShedRepositories for std::sync::Arc<T>
where
    T: ToolShedRepositories + ?Sized,
{
    async fn install(&self, request: &InstallRequest) -> Result<InstallOutcome> {
        (**self).install(request).await
    }

    async fn get(&self, id: &str) -> Result<InstalledRepository> {
        (**self).get(id).await
    }

    async fn list(&self) -> Result<Vec<InstalledRepository>> {
        (**self).list().await
    }

    async fn uninstall(&self, id: &str, remove_from_disk: bool) -> Result<()> {
        (**self).uninstall(id, remove_from_disk).await
    }
}

/// Install payload as the Galaxy API expects it. At most one of the two
/// panel fields is ever present.
#[derive(Serialize)]
struct InstallPayload<'a> {
    tool_shed_url: &'a str,
    name: &'a str,
    owner: &'a str,
    changeset_revision: &'a str,
    install_tool_dependencies: bool,
    install_repository_dependencies: bool,
    install_resolver_dependencies: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_panel_section_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_tool_panel_section_label: Option<&'a str>,
}

#[derive(Serialize)]
struct UninstallPayload {
    remove_from_disk: bool,
}

/// HTTP client for the Galaxy `tool_shed_repositories` API.
#[derive(Debug)]
pub struct GalaxyClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl GalaxyClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the base URL does not parse or
    /// no API key is available, and an HTTP error if the underlying client
    /// cannot be constructed.
    pub fn new(config: GalaxyConfig) -> Result<Self> {
        let base_url = Url::parse(config.normalized_base_url())
            .map_err(|e| Error::invalid_config(format!("invalid Galaxy base URL: {e}")))?;

        let api_key = config.get_api_key().ok_or_else(|| {
            Error::invalid_config(format!(
                "no Galaxy API key configured (set one explicitly or via {})",
                config.api_key_env
            ))
        })?;

        let client = Client::builder()
            .user_agent("shedsync")
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/tool_shed_repositories{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Maps a non-success response to an API error, capturing the body.
    async fn api_error(response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Error::Api { status, message }
    }
}

#[async_trait]
impl ToolShedRepositories for GalaxyClient {
    async fn install(&self, request: &InstallRequest) -> Result<InstallOutcome> {
        let url = self.endpoint("");
        debug!(
            tool_shed = %request.tool_shed,
            owner = %request.owner,
            name = %request.name,
            changeset_revision = %request.changeset_revision,
            "Installing tool shed repository"
        );

        let payload = InstallPayload {
            tool_shed_url: &request.tool_shed,
            name: &request.name,
            owner: &request.owner,
            changeset_revision: &request.changeset_revision,
            install_tool_dependencies: request.install_tool_dependencies,
            install_repository_dependencies: request.install_repository_dependencies,
            install_resolver_dependencies: request.install_resolver_dependencies,
            tool_panel_section_id: request.placement.section_id(),
            new_tool_panel_section_label: request.placement.section_label(),
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        // The registry answers an accepted install with either a list of
        // installed repositories or a bare message object when nothing new
        // was installed.
        let body: serde_json::Value = response.json().await?;
        let outcome = match body {
            serde_json::Value::Array(_) => {
                let results: Vec<InstalledRepository> = serde_json::from_value(body)?;
                InstallOutcome::from_results(results)
            }
            _ => InstallOutcome::None,
        };

        info!(
            owner = %request.owner,
            name = %request.name,
            installed = outcome.len(),
            "Install call completed"
        );
        Ok(outcome)
    }

    async fn get(&self, id: &str) -> Result<InstalledRepository> {
        let url = self.endpoint(&format!("/{id}"));
        debug!(%id, "Fetching installed repository");

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::RepositoryNotFound { id: id.to_string() });
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(response.json().await?)
    }

    async fn list(&self) -> Result<Vec<InstalledRepository>> {
        let url = self.endpoint("");
        debug!("Listing installed repositories");

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(response.json().await?)
    }

    async fn uninstall(&self, id: &str, remove_from_disk: bool) -> Result<()> {
        let url = self.endpoint(&format!("/{id}"));
        debug!(%id, remove_from_disk, "Uninstalling repository");

        let response = self
            .client
            .delete(&url)
            .header("x-api-key", &self.api_key)
            .json(&UninstallPayload { remove_from_disk })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        info!(%id, remove_from_disk, "Repository uninstalled");
        Ok(())
    }
}
