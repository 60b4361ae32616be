//! Legend showing the lower bound of every color bucket.

use dioxus::prelude::*;

use crate::state::AppState;

/// Legend for the current search; renders nothing while the index is empty.
#[component]
pub fn MapLegend(state: Signal<AppState>) -> Element {
    let Some(legend) = state.read().legend() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "legend",

            span {
                class: "legend-title",
                "Legend ({legend.unit}):"
            }

            for entry in legend.entries.iter() {
                div {
                    key: "{entry.color}",
                    class: "legend-swatch",
                    style: "background-color: {entry.color};",
                    "{entry.label()}"
                }
            }
        }
    }
}
