//! Education Platform Admin
//!
//! Administrative dashboard for the online education platform.
//!
//! This library provides:
//! - A typed client for the platform's admin REST API
//! - Lazy server-paginated list and modal edit-dialog controllers
//! - Nested sub-resource editing and staged document uploads
//! - Admin session handling with a role gate
//! - Web UI (Dioxus router, one screen per managed resource)

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

// Dioxus UI app
pub mod app;

// Shared modules (browser and native)
pub mod backend;
pub mod client;
pub mod client_config;
pub mod controller;
pub mod error;
pub mod notify;
pub mod resources;
pub mod session;

// Server-only modules (excluded from WASM build)
#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;
