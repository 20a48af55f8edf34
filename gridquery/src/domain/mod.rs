//! Domain logic

pub mod grid;
