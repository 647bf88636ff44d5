//! Todo List Component
//!
//! One list: title, add / toggle / delete controls and its item rows.

use leptos::prelude::*;

use crate::components::TodoItemRow;
use crate::context::AppContext;
use crate::controller::ListEvent;
use crate::models::{ItemId, ListId};
use crate::presentation::{list_class, toggle_label};

#[component]
pub fn TodoListView(id: ListId) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let title = move || ctx.with_list(id, |list| list.title.clone()).unwrap_or_default();
    let hide_completed = move || ctx.with_list(id, |list| list.hide_completed).unwrap_or(false);
    let item_ids = move || {
        ctx.with_list(id, |list| list.items.iter().map(|item| item.id).collect::<Vec<ItemId>>())
            .unwrap_or_default()
    };

    view! {
        <section id=format!("list-{}", id) class=move || list_class(hide_completed())>
            <input
                type="text"
                class="todo-list--title"
                prop:value=title
                on:input=move |ev| ctx.dispatch(id, ListEvent::SetTitle(event_target_value(&ev)))
            />
            <i
                class="fa fa-plus todo-list--button todo-list--button__add"
                on:click=move |_| ctx.dispatch(id, ListEvent::AddItem)
            />
            <a
                class="todo-list--button todo-list--button__toggle"
                on:click=move |_| ctx.dispatch(id, ListEvent::ToggleCompleted)
            >
                {move || toggle_label(hide_completed())}
            </a>
            <a
                class="todo-list--button todo-list--button__delete"
                on:click=move |_| ctx.dispatch(id, ListEvent::DeleteList)
            >
                "delete list"
            </a>

            <For
                each=item_ids
                key=|item_id| *item_id
                children=move |item_id| view! { <TodoItemRow list_id=id item_id=item_id /> }
            />
        </section>
    }
}
