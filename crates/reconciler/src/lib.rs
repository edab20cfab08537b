//! # shedsync-reconciler
//!
//! Reconciliation of declared Galaxy Tool Shed repository installations.
//!
//! The declarative model splits in two: [`RepositorySpec`] holds the
//! desired fields the external store owns (what to install, with which
//! options), [`RepositoryState`] holds the registry-owned fields observed
//! on the instance. [`RepositoryReconciler`] bridges them with three
//! synchronous operations over a
//! [`ToolShedRepositories`](shedsync_galaxy::ToolShedRepositories) client:
//!
//! - **create** — one install call; fails hard when the registry reports
//!   nothing newly installed, warns (and tracks the first entry) when it
//!   reports more than one;
//! - **read** — one fetch by id; overwrites all observed fields and
//!   surfaces registry-side drift without healing it;
//! - **delete** — one uninstall call carrying the declaration's
//!   remove-from-disk flag.
//!
//! Per declared resource the lifecycle is
//! `Absent → (create) → Present → (read)* → (delete) → Absent`.

pub mod reconciler;
pub mod spec;
pub mod state;

pub use reconciler::RepositoryReconciler;
pub use spec::RepositorySpec;
pub use state::RepositoryState;
