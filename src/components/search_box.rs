//! Search Box Component

use leptos::prelude::*;

use crate::context::TodoContext;

/// Filters the list by title or memo as the user types
#[component]
pub fn SearchBox() -> impl IntoView {
    let ctx = expect_context::<TodoContext>();

    view! {
        <input
            id="searchInput"
            type="search"
            placeholder="검색..."
            prop:value=move || ctx.query.get()
            on:input=move |ev| ctx.query.set(event_target_value(&ev))
        />
    }
}
