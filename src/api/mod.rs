//! API module
//!
//! Contains HTTP request handlers for product endpoints

pub mod products;
