//! Desktop heat map of export statistics by NCM product code.
//!
//! This crate provides a Dioxus desktop application that colors a world
//! map by the export totals of a searched product code, plus a headless
//! SVG export of the same view.

pub mod components;
pub mod config;
pub mod export;
pub mod state;
