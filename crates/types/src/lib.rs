//! Core types and validation for storescope.
//!
//! This crate provides the foundational data model shared by the gateway and
//! the reconciliation engine:
//! - Entry identities with scope normalization
//! - Reconciled entry records and deletion-ledger entries
//! - Version and container records as returned by the remote platform
//! - Pre-flight validation for messaging payloads and entry values

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod types;
pub mod validation;

pub use types::{
    normalize_scope, ContainerRecord, ContainerState, EntryIdentity, EntryMetadata, EntryRecord,
    LedgerEntry, SortOrder, VersionMetadata, VersionRecord, GLOBAL_SCOPE,
};
pub use validation::{
    validate_entry_payload, validate_message, validate_topic, ValidationError, MAX_MESSAGE_CHARS,
    MAX_TOPIC_CHARS,
};
