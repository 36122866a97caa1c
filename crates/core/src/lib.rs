#![warn(clippy::all, missing_docs)]

//! Core domain logic for the WvW match viewer.
//!
//! This crate hosts the world name table, the typed API models, the HTTP
//! client for the public WvW endpoints, the snapshot builder, and
//! configuration handling used by the terminal UI.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod snapshot;
pub mod worlds;

pub use client::{Gw2Client, MatchSource};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use models::{MatchDetail, MatchOverview, Team, TeamValues, WorldId};
pub use snapshot::{build_snapshots, generate_match_snapshots, MatchSnapshot};
