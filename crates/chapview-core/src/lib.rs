//! Core library for chapview.
//!
//! Everything that is not terminal UI lives here: configuration, logging,
//! the Chaparral API client, protein/peptide handling, viewer links, and the
//! session state machine shared by the dashboard and the CLI.

pub mod api;
pub mod config;
pub mod logging;
pub mod proteins;
pub mod session;
pub mod viewer;
pub mod workflow;
