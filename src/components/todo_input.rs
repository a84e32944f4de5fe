//! Todo Input Component
//!
//! Text input and add button. Enter in the input also adds.

use leptos::prelude::*;

use crate::context::TodoContext;

#[component]
pub fn TodoInput() -> impl IntoView {
    let ctx = expect_context::<TodoContext>();

    let (new_text, set_new_text) = signal(String::new());

    // Input is only cleared when something was added
    let add_todo = move || {
        if ctx.add(&new_text.get_untracked()) {
            set_new_text.set(String::new());
        }
    };

    view! {
        <div class="todoinput">
            <input
                type="text"
                placeholder="할 일을 입력하세요..."
                prop:value=move || new_text.get()
                on:input=move |ev| set_new_text.set(event_target_value(&ev))
                on:keypress=move |ev| {
                    if ev.key() == "Enter" {
                        add_todo();
                    }
                }
            />
            <button on:click=move |_| add_todo()>"추가"</button>
        </div>
    }
}
