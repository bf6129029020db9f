//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP client for the MovieApi port
//! - JSON file on disk for the SessionStore port
//! - In-memory SessionStore for tests and throwaway sessions
//! - Mock API server for tests

pub mod file_session;
pub mod http;
pub mod memory_session;

#[cfg(test)]
pub mod mock_server;
