//! # fer_api - Backend API Client
//!
//! Typed JSON-over-HTTPS client for the Suivifer backend. Every call goes to
//! the `/api` base path with cookies included; non-2xx responses carry an
//! `error` or `message` string that is surfaced to the user verbatim, and a
//! 401 means "not authenticated" rather than a generic failure.
//!
//! The crate has three layers:
//!
//! - [`client::ApiClient`] - the HTTP plumbing plus one method per endpoint
//!   (auth/onboarding in [`account`], rapport data in [`ferraillage`])
//! - [`dto`] - wire types, camelCase on the wire
//! - [`session::Session`] - the entitlement refresh state machine the access
//!   guard reads from
//!
//! Nothing here retries: failures are reported to the call site and leave
//! prior state intact, except entitlement refreshes which clear the snapshot
//! so access control fails closed.

pub mod account;
pub mod client;
pub mod dto;
pub mod error;
pub mod ferraillage;
pub mod session;

// Re-export commonly used types at crate root for convenience
pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use session::Session;
