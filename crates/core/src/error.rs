//! Error types for the shedsync workspace.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using the shedsync error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reconciling tool-shed repositories.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Both tool-panel placement fields were set on the same spec.
    #[error(
        "Conflicting tool panel placement: tool_panel_section_id {section_id:?} and new_tool_panel_section_label {section_label:?} are both set"
    )]
    #[diagnostic(
        code(shedsync::panel_placement_conflict),
        help("Set at most one of tool_panel_section_id / new_tool_panel_section_label")
    )]
    PanelPlacementConflict {
        /// Value of the existing-section field
        section_id: String,
        /// Value of the new-section field
        section_label: String,
    },

    /// Install succeeded but the registry reported nothing newly installed.
    #[error("Repository {tool_shed}/{owner}/{name}/{changeset_revision} already installed")]
    #[diagnostic(
        code(shedsync::already_installed),
        help("Uninstall the existing copy or import it into the declarative model")
    )]
    AlreadyInstalled {
        /// Tool shed host
        tool_shed: String,
        /// Repository owner
        owner: String,
        /// Repository name
        name: String,
        /// Requested changeset revision (empty means latest)
        changeset_revision: String,
    },

    /// The registry no longer knows the given repository id.
    #[error("Installed repository not found: {id}")]
    #[diagnostic(code(shedsync::repository_not_found))]
    RepositoryNotFound {
        /// Registry-assigned repository identifier
        id: String,
    },

    /// The registry rejected a request.
    #[error("Galaxy API error (HTTP {status}): {message}")]
    #[diagnostic(code(shedsync::api_error))]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Response body, verbatim
        message: String,
    },

    /// Transport-level HTTP failure.
    #[error("HTTP request failed: {0}")]
    #[diagnostic(code(shedsync::http_error))]
    Http(#[from] reqwest::Error),

    /// Unusable client configuration.
    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code(shedsync::invalid_config),
        help("Check the Galaxy base URL and API key")
    )]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    #[diagnostic(code(shedsync::serialization_error))]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an invalid-configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
