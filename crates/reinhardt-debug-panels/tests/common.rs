//! Shared test utilities

pub mod builders;
