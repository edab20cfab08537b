//! Observed-state projection of an installed repository.

use serde::{Deserialize, Serialize};
use shedsync_galaxy::InstalledRepository;

/// Registry-owned state of a declared repository, as last observed.
///
/// This is the projection written back to the declarative model by Create
/// and Read. It carries only computed fields; the desired fields live on
/// [`RepositorySpec`](crate::RepositorySpec). The `id` is assigned by the
/// registry on install and is immutable for the lifetime of the declared
/// resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryState {
    /// Registry-assigned identifier
    pub id: String,
    /// Lifecycle status
    pub status: String,
    /// Soft-deleted on the registry side
    pub deleted: bool,
    /// Context revision token
    pub ctx_rev: String,
    /// Last error message reported by the registry
    pub error_message: String,
    /// Changeset revision that was actually installed
    pub installed_changeset_revision: String,
    /// Registry URL of the installed repository
    pub url: String,
    /// Distributed to the tool shed
    pub dist_to_shed: bool,
    /// Uninstalled on the registry side
    pub uninstalled: bool,
    /// Repository includes datatype definitions
    pub include_datatypes: bool,
    /// Latest installable revision pointer
    pub latest_installable_revision: String,
    /// Revision update indicator
    pub revision_update: String,
    /// Revision upgrade indicator
    pub revision_upgrade: String,
    /// Deprecation indicator
    pub repository_deprecated: String,
}

impl RepositoryState {
    /// Projects a registry result into declarative state.
    ///
    /// The mapping is total: every registry-owned field has a target here,
    /// and projecting cannot fail.
    #[must_use]
    pub fn project(repo: &InstalledRepository) -> Self {
        Self {
            id: repo.id.clone(),
            status: repo.status.clone(),
            deleted: repo.deleted,
            ctx_rev: repo.ctx_rev.clone(),
            error_message: repo.error_message.clone(),
            installed_changeset_revision: repo.installed_changeset_revision.clone(),
            url: repo.url.clone(),
            dist_to_shed: repo.dist_to_shed,
            uninstalled: repo.uninstalled,
            include_datatypes: repo.include_datatypes,
            latest_installable_revision: repo.latest_installable_revision.clone(),
            revision_update: repo.revision_update.clone(),
            revision_upgrade: repo.revision_upgrade.clone(),
            repository_deprecated: repo.repository_deprecated.clone(),
        }
    }

    /// True when the registry reports the repository deleted or
    /// uninstalled behind the declarative model's back.
    #[must_use]
    pub fn has_drifted_away(&self) -> bool {
        self.deleted || self.uninstalled
    }
}
