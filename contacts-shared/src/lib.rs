//! # Contacts Shared
//! This crate defines the data structures shared across the contacts service:
//! stored records for contacts and organisations, the migration request and
//! response payloads, and the `IdPair` values that correlate NOMIS and DPS identifiers.
pub mod types;
