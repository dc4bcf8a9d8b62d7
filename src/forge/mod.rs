//! forge
//!
//! Abstraction for remote forges (GitHub in v1).
//!
//! # Architecture
//!
//! The `Forge` trait defines the interface for interacting with the remote
//! hosting service: fetching a pull request and its reviews, resolving team
//! membership, and requesting reviewers. Commands take `&dyn Forge` so tests
//! can substitute the deterministic [`mock`] implementation.
//!
//! # Modules
//!
//! - `traits`: Core `Forge` trait and request/response types
//! - [`github`]: GitHub implementation using the REST API
//! - [`mock`]: Mock implementation for deterministic testing

pub mod github;
pub mod mock;
mod traits;

pub use traits::*;
