//! Todo List App
//!
//! Root component: search box, input row, list and item count.

use leptos::prelude::*;

use crate::components::{SearchBox, TodoInput, TodoList};
use crate::config::AppConfig;
use crate::context::TodoContext;
use crate::store::TodoStore;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let ctx = TodoContext::new(TodoStore::from_config(&config), config.display_order);
    provide_context(ctx);

    view! {
        <main class="todo-app">
            <h1>"할 일 목록"</h1>

            <SearchBox />

            <TodoInput />

            <TodoList />

            <p class="item-count">
                {move || format!("{} / {} items", ctx.visible().len(), ctx.total())}
            </p>
        </main>
    }
}
