//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or store dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `auth` - Password hashing and credential validation
//! - `category` - Category records and validation
//! - `transaction` - Transaction records and validation
//! - `dashboard` - Totals, category breakdown, and monthly cash flow

pub mod auth;
pub mod category;
pub mod dashboard;
pub mod transaction;
pub mod validation;

pub use validation::ValidationError;
