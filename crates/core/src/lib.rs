//! ReelDeal Core - Shared types library.
//!
//! This crate provides the record types used across all ReelDeal admin components:
//! - `admin` - The administration panel (screens, JSON API, record store)
//! - `cli` - Command-line tools for seeding and reporting
//!
//! # Architecture
//!
//! The core crate contains only types and pure computations - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, slugs, statuses and the entity records
//! - [`analytics`] - Sales aggregation over a date window and dashboard statistics

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod types;

pub use analytics::{DashboardStats, DateRange, ProductSales, SalesSummary};
pub use types::*;
