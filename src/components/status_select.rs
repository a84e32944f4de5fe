//! Status Select Component
//!
//! Three-option selector for an item's status.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::domain::Status;

/// Hands the raw option value to `on_change`; parsing happens in the caller
#[component]
pub fn StatusSelect(
    current: Status,
    on_change: impl Fn(String) + Copy + 'static,
) -> impl IntoView {
    view! {
        <select
            class="status"
            on:change=move |ev| {
                let select = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok());
                if let Some(select) = select {
                    on_change(select.value());
                }
            }
        >
            {Status::ALL.into_iter().map(|status| view! {
                <option value=status.as_str() selected={status == current}>
                    {status.as_str()}
                </option>
            }).collect_view()}
        </select>
    }
}
