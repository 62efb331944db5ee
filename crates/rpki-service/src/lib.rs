//! RPKI validation records HTTP service.
//!
//! This crate exposes stored RPKI validation records over HTTP:
//!
//! - `GET /rpki` with optional `ASN`, `prefix` and `state` filters
//! - `GET /health`
//!
//! Records are written by an ingestion process through
//! [`rpki_store::Store::create`], or loaded at startup from a seed file (see
//! [`seed`]). There is no write endpoint.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers must be async for the router

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod seed;
pub mod state;

pub use config::{ServiceConfig, StoreBackend};
pub use error::ApiError;
pub use routes::create_router;
pub use seed::{seed_from_file, seed_records, SeedError, SeedSummary};
pub use state::{open_store, AppState};
