//! UI components for the heat map viewer.

mod app;
mod legend;
mod search_bar;
mod world_map;

pub use app::*;
pub use legend::*;
pub use search_bar::*;
pub use world_map::*;
