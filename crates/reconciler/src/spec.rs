//! Desired-state model of a declared tool-shed repository.

use serde::{Deserialize, Serialize};
use shedsync_core::{Error, Result};
use shedsync_galaxy::{InstallRequest, Placement};

fn default_remove_from_disk() -> bool {
    true
}

/// The declared desired state of one tool-shed repository installation.
///
/// These are the fields the declarative store owns. The reconciler reads
/// them on Create (and `remove_from_disk` on Delete) and never writes them;
/// observed registry state lives in
/// [`RepositoryState`](crate::RepositoryState).
///
/// The two tool-panel fields are mutually exclusive; [`Self::placement`]
/// checks the conflict once, before any network call, and yields the
/// [`Placement`] union the registry boundary consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositorySpec {
    /// Tool shed host the package comes from
    pub tool_shed: String,
    /// Package owner
    pub owner: String,
    /// Package name
    pub name: String,
    /// Changeset revision to install; empty is a distinct desired value
    /// meaning "track latest", not "unset"
    pub changeset_revision: String,
    /// Install the package's tool dependencies
    pub install_tool_dependencies: bool,
    /// Install the package's repository dependencies
    pub install_repository_dependencies: bool,
    /// Install dependencies through the dependency resolvers
    pub install_resolver_dependencies: bool,
    /// Existing tool panel section to place tools into
    pub tool_panel_section_id: String,
    /// Label of a new tool panel section to create
    pub new_tool_panel_section_label: String,
    /// Remove the repository from disk when uninstalling
    #[serde(default = "default_remove_from_disk")]
    pub remove_from_disk: bool,
}

impl Default for RepositorySpec {
    fn default() -> Self {
        Self {
            tool_shed: String::new(),
            owner: String::new(),
            name: String::new(),
            changeset_revision: String::new(),
            install_tool_dependencies: false,
            install_repository_dependencies: false,
            install_resolver_dependencies: false,
            tool_panel_section_id: String::new(),
            new_tool_panel_section_label: String::new(),
            remove_from_disk: true,
        }
    }
}

impl RepositorySpec {
    /// Creates a spec for the given package with all options at their
    /// defaults (latest revision, no dependency installs, default panel
    /// placement, remove from disk on delete).
    #[must_use]
    pub fn new(
        tool_shed: impl Into<String>,
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            tool_shed: tool_shed.into(),
            owner: owner.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Pins the changeset revision to install.
    #[must_use]
    pub fn with_changeset_revision(mut self, revision: impl Into<String>) -> Self {
        self.changeset_revision = revision.into();
        self
    }

    /// Sets the three dependency-install toggles at once.
    #[must_use]
    pub fn with_dependencies(mut self, tool: bool, repository: bool, resolver: bool) -> Self {
        self.install_tool_dependencies = tool;
        self.install_repository_dependencies = repository;
        self.install_resolver_dependencies = resolver;
        self
    }

    /// Places the package's tools into an existing panel section.
    #[must_use]
    pub fn with_tool_panel_section_id(mut self, id: impl Into<String>) -> Self {
        self.tool_panel_section_id = id.into();
        self
    }

    /// Places the package's tools into a panel section created on install.
    #[must_use]
    pub fn with_new_tool_panel_section_label(mut self, label: impl Into<String>) -> Self {
        self.new_tool_panel_section_label = label.into();
        self
    }

    /// Sets whether Delete removes the repository from disk.
    #[must_use]
    pub fn with_remove_from_disk(mut self, remove: bool) -> Self {
        self.remove_from_disk = remove;
        self
    }

    /// Derives the tool panel placement from the two panel fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PanelPlacementConflict`] when both fields are
    /// non-empty.
    pub fn placement(&self) -> Result<Placement> {
        match (
            self.tool_panel_section_id.is_empty(),
            self.new_tool_panel_section_label.is_empty(),
        ) {
            (true, true) => Ok(Placement::Default),
            (false, true) => Ok(Placement::ExistingSection {
                id: self.tool_panel_section_id.clone(),
            }),
            (true, false) => Ok(Placement::NewSection {
                label: self.new_tool_panel_section_label.clone(),
            }),
            (false, false) => Err(Error::PanelPlacementConflict {
                section_id: self.tool_panel_section_id.clone(),
                section_label: self.new_tool_panel_section_label.clone(),
            }),
        }
    }

    /// Builds the install request for this spec.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PanelPlacementConflict`] when both panel fields are
    /// non-empty.
    pub fn install_request(&self) -> Result<InstallRequest> {
        Ok(InstallRequest {
            tool_shed: self.tool_shed.clone(),
            owner: self.owner.clone(),
            name: self.name.clone(),
            changeset_revision: self.changeset_revision.clone(),
            install_tool_dependencies: self.install_tool_dependencies,
            install_repository_dependencies: self.install_repository_dependencies,
            install_resolver_dependencies: self.install_resolver_dependencies,
            placement: self.placement()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let spec = RepositorySpec::new("toolshed.example.org", "devteam", "fastqc");
        assert_eq!(spec.changeset_revision, "");
        assert!(!spec.install_tool_dependencies);
        assert!(spec.remove_from_disk);
        assert_eq!(spec.placement().unwrap(), Placement::Default);
    }

    #[test]
    fn test_placement_existing_section() {
        let spec = RepositorySpec::new("shed", "o", "n").with_tool_panel_section_id("sec1");
        assert_eq!(
            spec.placement().unwrap(),
            Placement::ExistingSection { id: "sec1".into() }
        );
    }

    #[test]
    fn test_placement_new_section() {
        let spec = RepositorySpec::new("shed", "o", "n").with_new_tool_panel_section_label("QC");
        assert_eq!(
            spec.placement().unwrap(),
            Placement::NewSection { label: "QC".into() }
        );
    }

    #[test]
    fn test_placement_conflict() {
        let spec = RepositorySpec::new("shed", "o", "n")
            .with_tool_panel_section_id("sec1")
            .with_new_tool_panel_section_label("QC");
        let err = spec.placement().unwrap_err();
        assert!(matches!(err, Error::PanelPlacementConflict { .. }));
    }

    #[test]
    fn test_deserialization_defaults_remove_from_disk_true() {
        let spec: RepositorySpec = serde_json::from_str(
            r#"{"tool_shed":"shed","owner":"o","name":"n"}"#,
        )
        .unwrap();
        assert!(spec.remove_from_disk);

        let spec: RepositorySpec = serde_json::from_str(
            r#"{"tool_shed":"shed","owner":"o","name":"n","remove_from_disk":false}"#,
        )
        .unwrap();
        assert!(!spec.remove_from_disk);
    }

    #[test]
    fn test_install_request_carries_empty_revision() {
        let request = RepositorySpec::new("shed", "o", "n")
            .install_request()
            .unwrap();
        assert_eq!(request.changeset_revision, "");
        assert_eq!(request.placement, Placement::Default);
    }
}
