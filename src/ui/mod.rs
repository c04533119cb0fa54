//! UI module - reusable widgets for the feed shell

pub mod components;
pub mod pulse;
