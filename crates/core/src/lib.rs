//! Conversion and denomination engine for Denomina.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Real-currency amounts are normalized to a base currency with a flat rate table
//! and then broken down greedily into fictional denominations.
//!
//! # Modules
//!
//! - `currency` - Catalog, exchange rates, conversion, decomposition and formatting

pub mod currency;
