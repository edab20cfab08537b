//! Wire models for the Galaxy `tool_shed_repositories` API.

use serde::{Deserialize, Serialize};

/// Where an installed repository's tools land in the tool panel.
///
/// Modeled as a tagged union so "existing section and new section both
/// requested" is unrepresentable at the registry boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Placement {
    /// Registry-default placement.
    #[default]
    Default,
    /// Place into an existing panel section.
    ExistingSection {
        /// Panel section identifier
        id: String,
    },
    /// Create a new panel section and place into it.
    NewSection {
        /// Label for the section to create
        label: String,
    },
}

impl Placement {
    /// Section id to send, when placing into an existing section.
    #[must_use]
    pub fn section_id(&self) -> Option<&str> {
        match self {
            Self::ExistingSection { id } => Some(id),
            _ => None,
        }
    }

    /// Section label to send, when creating a new section.
    #[must_use]
    pub fn section_label(&self) -> Option<&str> {
        match self {
            Self::NewSection { label } => Some(label),
            _ => None,
        }
    }
}

/// Parameters of one install call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallRequest {
    /// Tool shed host the package comes from
    pub tool_shed: String,
    /// Package owner
    pub owner: String,
    /// Package name
    pub name: String,
    /// Changeset revision to install; empty means latest installable
    pub changeset_revision: String,
    /// Install the package's tool dependencies
    pub install_tool_dependencies: bool,
    /// Install the package's repository dependencies
    pub install_repository_dependencies: bool,
    /// Install dependencies through the dependency resolvers
    pub install_resolver_dependencies: bool,
    /// Tool panel placement
    pub placement: Placement,
}

/// One installed repository as reported by the registry.
///
/// Decoding tolerates registry version skew: unknown fields are ignored and
/// absent optional fields default, so only `id` is hard-required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledRepository {
    /// Registry-assigned identifier
    pub id: String,
    /// Package name
    #[serde(default)]
    pub name: String,
    /// Package owner
    #[serde(default)]
    pub owner: String,
    /// Lifecycle status (e.g., "Installed", "Cloning", "Error")
    #[serde(default)]
    pub status: String,
    /// Soft-deleted on the registry side
    #[serde(default)]
    pub deleted: bool,
    /// Context revision token for drift detection
    #[serde(default)]
    pub ctx_rev: String,
    /// Last error message reported by the registry
    #[serde(default)]
    pub error_message: String,
    /// Changeset revision that was actually installed
    #[serde(default)]
    pub installed_changeset_revision: String,
    /// Changeset revision the record tracks
    #[serde(default)]
    pub changeset_revision: String,
    /// Tool shed host the package came from
    #[serde(default)]
    pub tool_shed: String,
    /// Registry URL of the installed repository
    #[serde(default)]
    pub url: String,
    /// Distributed to the tool shed
    #[serde(default)]
    pub dist_to_shed: bool,
    /// Uninstalled on the registry side
    #[serde(default)]
    pub uninstalled: bool,
    /// Repository includes datatype definitions
    #[serde(default)]
    pub include_datatypes: bool,
    /// Latest installable revision pointer
    #[serde(default)]
    pub latest_installable_revision: String,
    /// A newer revision update is available
    #[serde(default)]
    pub revision_update: String,
    /// A newer revision upgrade is available
    #[serde(default)]
    pub revision_upgrade: String,
    /// Repository is deprecated on the tool shed
    #[serde(default)]
    pub repository_deprecated: String,
}

/// Result set of one install call.
///
/// One request is expected to map to one installed package, but the
/// registry answers with a list; this type forces callers to handle the
/// zero, one, and many cases instead of indexing into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Nothing newly installed.
    None,
    /// Exactly one repository installed.
    One(InstalledRepository),
    /// Two or more repositories installed.
    Many(Vec<InstalledRepository>),
}

impl InstallOutcome {
    /// Folds a raw result list into the outcome.
    #[must_use]
    pub fn from_results(mut results: Vec<InstalledRepository>) -> Self {
        match results.len() {
            0 => Self::None,
            1 => Self::One(results.remove(0)),
            _ => Self::Many(results),
        }
    }

    /// Number of repositories the registry reported.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::One(_) => 1,
            Self::Many(results) => results.len(),
        }
    }

    /// True when nothing was installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }
}
