//! Server-side data grid query compiler
//!
//! Turns grid `getRows` requests (filter model, sort model, row window) into
//! backend predicates, sort specs and page requests.

pub mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;
