//! Palisade - Access Control Resolution Engine
//!
//! Decides whether an actor may perform an action on a resource path by
//! combining individual-scoped and group-scoped rules under a fixed
//! precedence policy. It exposes all modules for testing purposes.

pub mod authz;
pub mod entities;
pub mod errors;
pub mod filters;
pub mod settings;
pub mod storage;
