//! Choropleth map component.

use dioxus::prelude::*;
use heatmap_core::geometry::{MAP_HEIGHT, MAP_WIDTH};
use heatmap_core::render::BORDER_COLOR;

use crate::state::AppState;

/// World map with one path per region, filled from the current index.
#[component]
pub fn WorldMap(state: Signal<AppState>) -> Element {
    let state_read = state.read();
    let scale = state_read.scale();
    let shapes = state_read.shapes().unwrap_or_default();

    let overlay = state_read.map_overlay();

    rsx! {
        div {
            class: "map-container",

            svg {
                class: "world-map",
                view_box: "0 0 {MAP_WIDTH} {MAP_HEIGHT}",

                for shape in shapes.iter() {
                    path {
                        key: "{shape.key}",
                        d: "{shape.path}",
                        fill: state_read.fill(shape.id, &scale),
                        stroke: BORDER_COLOR,
                        stroke_width: "0.5",
                        fill_rule: "evenodd",
                    }
                }
            }

            {overlay.map(|text| rsx! {
                div {
                    class: "map-overlay",
                    "{text}"
                }
            })}
        }
    }
}
