//! Shared configuration, errors, and session tokens for Tally.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error taxonomy
//! - Layered configuration with an explicit run mode
//! - Session claims and the JWT service that signs them

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

#[cfg(test)]
mod error_tests;

pub use auth::{AUTH_COOKIE, SessionClaims, extract_bearer_token};
pub use config::{AppConfig, RunMode};
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
