//! RPKI Client SDK.
//!
//! This crate provides a typed client for the RPKI validation records API.
//!
//! # Example
//!
//! ```no_run
//! use rpki_client::RpkiClient;
//! use rpki_core::RecordFilter;
//!
//! # async fn example() -> Result<(), rpki_client::ClientError> {
//! let client = RpkiClient::new("http://rpki-service:8080")?;
//!
//! let records = client
//!     .query(&RecordFilter::new().with_asn(64512).with_state("CA"))
//!     .await?;
//!
//! for record in records {
//!     println!("{} {} {}", record.prefix, record.state, record.validation_status);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;

pub use client::{ClientOptions, HealthResponse, RpkiClient};
pub use error::ClientError;
