//! This module defines and re-exports the interfaces for the entity store.
//! It serves as a central point for accessing traits related to data interaction.
mod store;

pub use store::{EntityStore, StoreTransaction};
