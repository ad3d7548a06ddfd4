//! Income and expense transactions.
//!
//! This module provides:
//! - The record shape consumed by dashboard aggregation
//! - Client input validation for create and update

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{
    MAX_AMOUNT, MAX_AMOUNT_SCALE, MAX_DESCRIPTION, NewTransaction, TransactionInput,
    TransactionPatch, parse_date,
};
