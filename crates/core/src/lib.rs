//! Spotlyt Core - Shared types library.
//!
//! This crate provides the domain types shared by the Spotlyt admin
//! components:
//! - `admin` - Internal administration dashboard (internal network only)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Every
//! record here is owned and persisted by the remote backend; these are the
//! projections the dashboard reads and the payloads it writes.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, roles, row projections, and the news
//!   feed entities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
