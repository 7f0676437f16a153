//! # relpush
//!
//! Publish built application artifacts to a self-hosted release server.
//!
//! ## Overview
//!
//! `relpush` takes locally built package files and pushes them to a release
//! server over HTTP. It authenticates with username/password, ensures a
//! version record exists for the release (creating one on the right channel
//! if needed), and uploads every artifact the server does not already have,
//! concurrently, with a running progress count.
//!
//! ## Features
//!
//! - Bearer-token authentication against the server's login endpoint
//! - Version reconciliation: existing records are reused, missing ones created
//! - Channel resolution from the version string (beta/alpha/stable) with
//!   explicit override
//! - Concurrent artifact uploads that skip assets already on the server
//! - Live `Uploading artifacts n/N` progress on a spinner
//! - Configuration file support with CLI and environment overrides
//!
//! ## Usage
//!
//! ```bash
//! # Publish two artifacts for version 1.2.3
//! relpush out/app-1.2.3.zip out/app-1.2.3.dmg --release-version 1.2.3 \
//!     --base-url https://releases.example.com --username ci
//!
//! # Channel is inferred from the version string unless overridden
//! relpush out/app.zip --release-version 2.0.0-beta.1
//!
//! # Publish for a platform other than the host
//! relpush out/app-setup.exe --release-version 1.2.3 --platform win32 --arch ia32
//! ```
//!
//! ## Configuration
//!
//! Settings can be placed in `relpush.toml` under the user config directory
//! (or passed with `--config`):
//!
//! ```toml
//! [server]
//! base_url = "https://releases.example.com"
//! username = "ci"
//! password = "..."
//! channel = "stable"
//! ```
//!
//! Command line flags win over file values; `RELPUSH_USERNAME` and
//! `RELPUSH_PASSWORD` work as environment fallbacks.

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Configuration file handling and credential resolution
pub mod config;

/// Error types and the crate-wide result alias
pub mod error;

/// Upload progress rendering with TTY detection
pub mod progress;

/// Publish orchestration: channel resolution, version reconciliation,
/// concurrent uploads
pub mod publisher;

/// Release-server HTTP client, wire types, and platform mapping
pub mod server;
