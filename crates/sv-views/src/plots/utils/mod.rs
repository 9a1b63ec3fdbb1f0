//! Shared helpers for plot views

pub mod colors;
pub mod stats;
