//! `docstore-client` — async driver for the planner's remote document store.
//!
//! The planner persists task documents to a hosted document database and
//! authenticates users against the companion identity service. This crate
//! wraps both REST surfaces so the rest of the workspace never touches raw
//! HTTP.
//!
//! # Architecture
//!
//! ```text
//! DocstoreClient      ← collection/document CRUD over HTTPS
//!     │                 list / create / patch / delete
//!     ▼
//! Document            ← opaque JSON fields + server-assigned id
//!
//! IdentityClient      ← email/password sign-in, token revocation
//!     │                 implements the IdentityProvider trait
//!     ▼
//! Session             ← id token + user id returned by the service
//! ```
//!
//! All requests carry a bounded timeout; there is no retry policy here —
//! callers decide whether an operation is safe to repeat.

pub mod auth;
pub mod client;
pub mod error;

pub use auth::{IdentityClient, IdentityProvider, Session};
pub use client::{Document, DocstoreClient};
pub use error::DocstoreError;

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, DocstoreError>;
