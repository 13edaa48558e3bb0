//! Shared authentication primitives
//!
//! Token issuance and validation used by the posts-service auth middleware.

pub mod jwt;
