//! Root application component for the heat map viewer.

use dioxus::prelude::*;

use crate::state::AppState;

use super::{MapLegend, SearchBar, WorldMap};

/// Root application component.
#[component]
pub fn App(state: Signal<AppState>) -> Element {
    rsx! {
        div {
            class: "heatmap-viewer",

            Header { state }

            main {
                class: "main-content",

                SearchBar { state }
                WorldMap { state }
                MapLegend { state }
            }
        }
    }
}

/// Header with title and load/search status.
#[component]
fn Header(state: Signal<AppState>) -> Element {
    let state_read = state.read();

    let dataset_text = state_read.dataset_label();
    let loaded = state_read.dataset().is_some();
    let search_text = state_read.searched_ncm.as_ref().map(|ncm| {
        let regions = state_read.index().len();
        format!("NCM {ncm}: {regions} countries")
    });

    rsx! {
        header {
            class: "header",

            h1 {
                class: "header-title",
                "Export Heat Map"
            }

            div {
                class: "header-right",

                span {
                    class: if loaded { "status-indicator status-ready" } else { "status-indicator status-pending" },
                    "{dataset_text}"
                }

                {search_text.map(|text| rsx! {
                    span {
                        class: "status-indicator status-search",
                        "{text}"
                    }
                })}
            }
        }
    }
}
