//! Core domain: account state, trade execution, valuation.

pub mod account;
pub mod error;
pub mod ledger;
pub mod symbols;
pub mod transaction;
