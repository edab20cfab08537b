//! # shedsync-galaxy
//!
//! Client for the Galaxy `tool_shed_repositories` API.
//!
//! This crate is the registry boundary of the shedsync workspace: the
//! [`ToolShedRepositories`] trait describes the four calls the reconciler
//! consumes (install, get, list, uninstall), and [`GalaxyClient`] implements
//! them over the Galaxy REST API. The install call's zero/one/many result
//! shape is surfaced as the [`InstallOutcome`] sum type so callers handle
//! every case explicitly.

pub mod client;
pub mod config;
pub mod types;

pub use client::{GalaxyClient, ToolShedRepositories};
pub use config::GalaxyConfig;
pub use types::{InstallOutcome, InstallRequest, InstalledRepository, Placement};
