//! Todo List Component
//!
//! Renders the filtered list. Rows are keyed by id, title and done, so
//! adding, deleting or toggling rebuilds rows while status and memo edits
//! leave the DOM alone.

use leptos::prelude::*;

use crate::components::TodoRow;
use crate::context::TodoContext;

#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = expect_context::<TodoContext>();

    view! {
        <ul class="todolist">
            <For
                each=move || ctx.visible()
                key=|todo| (todo.id, todo.title.clone(), todo.done)
                children=move |todo| view! { <TodoRow todo=todo /> }
            />
        </ul>
    }
}
