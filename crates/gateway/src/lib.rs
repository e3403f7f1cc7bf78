//! Typed HTTPS gateway for the remote datastore and messaging platform.
//!
//! This crate is the outbound edge of storescope: one typed async method per
//! remote endpoint, a validated configuration builder, a categorized error
//! type, and an in-process mock of the platform for integration tests.
//!
//! Pure translation: no business logic lives here. Deletion-state
//! reconciliation is the engine crate's job; this crate only reports what
//! the remote said.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use storescope_gateway::{GatewayConfig, StoreClient, StoreGateway, ListEntriesOpts};
//!
//! #[tokio::main]
//! async fn main() -> storescope_gateway::Result<()> {
//!     let config = GatewayConfig::builder()
//!         .api_key(std::env::var("API_KEY").unwrap())
//!         .universe_id("3044")
//!         .build()?;
//!     let client = StoreClient::new(config)?;
//!
//!     client.validate_key().await?;
//!     let page = client.list_entries("Players", ListEntriesOpts::default()).await?;
//!     println!("{} keys", page.keys.len());
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod gateway;
pub mod mock;

pub use client::{ContainerPage, ListContainersOpts, SnapshotResult, StoreClient};
pub use config::{GatewayConfig, GatewayConfigBuilder};
pub use error::{ErrorKind, GatewayError, Result};
pub use gateway::{
    EntryKey, EntryPayload, KeyPage, ListEntriesOpts, ListVersionsOpts, SetEntryOpts,
    StoreGateway, VersionPage, VersionPayload,
};
