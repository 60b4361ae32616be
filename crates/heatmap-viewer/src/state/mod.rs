//! State management for the heat map viewer.

pub mod app_state;

pub use app_state::*;
