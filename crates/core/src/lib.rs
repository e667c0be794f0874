//! Pure domain logic for the Sitecraft content-management backend.
//!
//! This crate has zero I/O dependencies so it can be used by both the
//! data layer and the API server, and tested without a database.

pub mod error;
pub mod pagination;
pub mod plugin;
pub mod thumb;
pub mod types;
