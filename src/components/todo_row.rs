//! Todo Row Component
//!
//! One list row: title (click toggles done), status selector, delete
//! button and memo textarea.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::components::StatusSelect;
use crate::context::TodoContext;
use crate::domain::Todo;

#[component]
pub fn TodoRow(todo: Todo) -> impl IntoView {
    let ctx = expect_context::<TodoContext>();

    let id = todo.id;
    let done = todo.done;
    let title = if done {
        view! { <s>{todo.title}</s> }.into_any()
    } else {
        view! { <span>{todo.title}</span> }.into_any()
    };

    view! {
        <li class={if done { "todo-row done" } else { "todo-row" }}>
            <span class="title" on:click=move |_| ctx.toggle(id)>{title}</span>

            <StatusSelect
                current=todo.status
                on_change=move |value: String| ctx.set_status(id, &value)
            />

            <button class="del" on:click=move |_| ctx.delete(id)>"삭제"</button>
            <br />

            <textarea
                placeholder="메모 작성..."
                prop:value=todo.memo
                on:input=move |ev| {
                    let area = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok());
                    if let Some(area) = area {
                        ctx.edit_memo(id, area.value());
                    }
                }
            ></textarea>
        </li>
    }
}
