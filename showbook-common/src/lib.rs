//! # Showbook Common Library
//!
//! Shared code for the Showbook booking directory:
//! - Database schema initialization and repository functions
//! - Fixed catalogs (state codes, genre tags)
//! - Configuration resolution
//! - Timestamp encoding and display formatting

pub mod catalog;
pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
