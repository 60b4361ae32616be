//! Search field, metric toggle and search button.

use dioxus::prelude::*;
use heatmap_core::Metric;

use crate::state::AppState;

const QUERY_INPUT_ID: &str = "ncm-input";

/// Controls row above the map.
#[component]
pub fn SearchBar(state: Signal<AppState>) -> Element {
    let mut state_write = state;
    let state_read = state.read();

    let query = state_read.query().to_string();
    let current = state_read.metric;

    rsx! {
        div {
            class: "search-bar",

            input {
                id: QUERY_INPUT_ID,
                class: "ncm-input",
                r#type: "text",
                placeholder: "Enter NCM (e.g. 10011100)",
                value: "{query}",
                oninput: move |evt| {
                    let stripped = state_write.write().set_query(&evt.value());
                    if stripped {
                        // the stored query may be unchanged, so no diff reaches the DOM
                        let digits = state_write.read().query().to_string();
                        let _ = document::eval(&reset_input_js(&digits));
                    }
                },
            }

            div {
                class: "metric-toggle",

                for metric in Metric::ALL {
                    label {
                        key: "{metric.code()}",
                        class: if metric == current { "metric-option metric-selected" } else { "metric-option" },
                        input {
                            r#type: "radio",
                            name: "metric",
                            value: "{metric.code()}",
                            checked: metric == current,
                            onchange: move |_| {
                                tracing::debug!("Metric selected: {}", metric);
                                state_write.write().set_metric(metric);
                            },
                        }
                        span { "{metric.code()}" }
                    }
                }
            }

            button {
                class: "search-btn",
                onclick: move |_| {
                    state_write.write().search();
                },
                "Search"
            }
        }
    }
}

/// Script that writes the sanitized query back into the input element.
fn reset_input_js(digits: &str) -> String {
    format!("document.getElementById('{QUERY_INPUT_ID}').value = '{digits}';")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_input_js_targets_query_input() {
        assert_eq!(
            reset_input_js("1001"),
            "document.getElementById('ncm-input').value = '1001';"
        );
    }
}
