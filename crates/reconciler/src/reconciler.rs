//! The repository reconciler.

use shedsync_core::{Diagnostic, Error, Result};
use shedsync_galaxy::{InstallOutcome, ToolShedRepositories};
use tracing::{info, instrument, warn};

use crate::spec::RepositorySpec;
use crate::state::RepositoryState;

/// Reconciles declared tool-shed repositories against the registry.
///
/// Each operation is one synchronous request/response exchange: it issues
/// exactly one registry call, awaits it, and either returns the projected
/// state or a fatal error. There is no retry, no background work, and no
/// shared mutable state between operations; dropping an operation's future
/// cancels the in-flight registry call before any state is produced.
pub struct RepositoryReconciler<C> {
    client: C,
}

impl<C: ToolShedRepositories> RepositoryReconciler<C> {
    /// Creates a reconciler over the given registry client.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Creates the declared repository on the registry.
    ///
    /// Issues one install call and interprets its result set. An empty
    /// result set means the registry installed nothing new and is a hard
    /// failure rather than a silent adoption of the existing install. More
    /// than one result is a registry surprise: the first entry becomes the
    /// resource's state and a warning diagnostic lists every returned id so
    /// the extra, untracked objects are not lost.
    ///
    /// # Errors
    ///
    /// [`Error::PanelPlacementConflict`] if both panel fields are set (no
    /// network call is made), [`Error::AlreadyInstalled`] on an empty
    /// result set, or any registry/transport error.
    #[instrument(
        name = "repository_create",
        skip(self, spec),
        fields(tool_shed = %spec.tool_shed, owner = %spec.owner, name = %spec.name)
    )]
    pub async fn create(&self, spec: &RepositorySpec) -> Result<(RepositoryState, Vec<Diagnostic>)> {
        // Placement conflict is a local input error; fail before the network.
        let request = spec.install_request()?;

        match self.client.install(&request).await? {
            InstallOutcome::None => Err(Error::AlreadyInstalled {
                tool_shed: spec.tool_shed.clone(),
                owner: spec.owner.clone(),
                name: spec.name.clone(),
                changeset_revision: spec.changeset_revision.clone(),
            }),
            InstallOutcome::One(repo) => {
                let state = RepositoryState::project(&repo);
                info!(id = %state.id, status = %state.status, "Repository installed");
                Ok((state, Vec::new()))
            }
            InstallOutcome::Many(repos) => match repos.as_slice() {
                [] => Err(Error::AlreadyInstalled {
                    tool_shed: spec.tool_shed.clone(),
                    owner: spec.owner.clone(),
                    name: spec.name.clone(),
                    changeset_revision: spec.changeset_revision.clone(),
                }),
                [first, ..] => {
                    let ids: Vec<&str> = repos.iter().map(|r| r.id.as_str()).collect();
                    warn!(
                        count = repos.len(),
                        ?ids,
                        "Install returned more than one repository; tracking the first"
                    );
                    let diagnostic = Diagnostic::warning(
                        format!("Unexpected number of repositories created: {}", repos.len()),
                        format!("Repository IDs: {ids:?}"),
                    );
                    let state = RepositoryState::project(first);
                    Ok((state, vec![diagnostic]))
                }
            },
        }
    }

    /// Refreshes the observed state of a previously created repository.
    ///
    /// Overwrites every computed field from the registry's current answer;
    /// desired fields are untouched and nothing is ever re-installed.
    /// Registry-side deletion or uninstallation is surfaced through the
    /// returned state's flags, not healed.
    ///
    /// # Errors
    ///
    /// [`Error::RepositoryNotFound`] if the registry no longer knows the
    /// id, or any registry/transport error. On error no state is produced.
    #[instrument(name = "repository_read", skip(self))]
    pub async fn read(&self, id: &str) -> Result<RepositoryState> {
        let repo = self.client.get(id).await?;
        let state = RepositoryState::project(&repo);

        if state.has_drifted_away() {
            warn!(
                %id,
                deleted = state.deleted,
                uninstalled = state.uninstalled,
                "Repository was removed behind the declarative model"
            );
        }

        Ok(state)
    }

    /// Destroys the repository by uninstalling it from the registry.
    ///
    /// The `remove_from_disk` flag travels verbatim from the declaration.
    /// On success the caller clears the resource's record. On error the
    /// repository's existence is ambiguous: re-read or retry on the next
    /// reconciliation cycle rather than assuming either outcome.
    ///
    /// # Errors
    ///
    /// Any registry/transport error from the uninstall call.
    #[instrument(name = "repository_delete", skip(self))]
    pub async fn delete(&self, id: &str, remove_from_disk: bool) -> Result<()> {
        self.client.uninstall(id, remove_from_disk).await?;
        info!(%id, "Repository uninstalled");
        Ok(())
    }
}
