//! CMall backend service

#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

/// Signed upload and download URLs for avatars
pub mod avatar_storage;

/// Verification emails for pending account operations
pub mod email_verification;

/// Email verification tokens
pub mod jwt;

/// SMTP delivery
pub mod mailer;

/// HTTP routes
pub mod routes;

/// HTTP server bootstrap
pub mod server;

/// Configuration, environment and API error types
pub mod types;
