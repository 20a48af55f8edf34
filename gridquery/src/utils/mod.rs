//! Utility functions shared by the grid and data layers

pub mod sql;
pub mod time;
