//! Backend storage services for CMall
//!
//! This crate provides the storage clients shared by the backend services,
//! currently the notice template store used by email verification.

pub mod notice;
