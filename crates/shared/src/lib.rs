//! Shared types, errors, and configuration for Denomina.
//!
//! This crate provides common types used across all other crates:
//! - Typed currency and denomination codes
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::{CurrencyCode, DenominationCode};
