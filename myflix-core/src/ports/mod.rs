//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. Services depend
//! only on these traits, so tests can substitute in-memory versions.

mod movie_api;
mod session_store;

pub use movie_api::MovieApi;
pub use session_store::SessionStore;
