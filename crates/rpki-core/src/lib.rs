//! Core types for the RPKI validation records service.
//!
//! This crate provides the domain model shared by the store, the HTTP service
//! and the client:
//!
//! - **Identifiers**: `RecordId`, `Asn`
//! - **Records**: `NewRecord` (unvalidated write input), `RpkiRecord`, `ValidationStatus`
//! - **Queries**: `RecordFilter`
//!
//! # Wire format
//!
//! Records serialize with the field names the dashboard expects:
//! `ASN`, `prefix`, `state`, `validationStatus`, `createdAt`, `updatedAt`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod asn;
pub mod error;
pub mod filter;
pub mod ids;
pub mod record;

pub use asn::{Asn, ParseAsnError};
pub use error::{FilterError, ValidationError};
pub use filter::RecordFilter;
pub use ids::{IdError, RecordId};
pub use record::{NewRecord, RpkiRecord, ValidationStatus};
