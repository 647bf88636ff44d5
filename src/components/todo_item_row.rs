//! Todo Item Component
//!
//! Checkbox, text field and remove control for a single item.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::controller::{ItemKey, ListEvent};
use crate::models::{ItemId, ListId};
use crate::presentation::ItemPresentation;

#[component]
pub fn TodoItemRow(list_id: ListId, item_id: ItemId) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let look = move || {
        ctx.with_item(list_id, item_id, ItemPresentation::of)
            .unwrap_or_default()
    };
    let value = move || {
        ctx.with_item(list_id, item_id, |item| item.value.clone())
            .unwrap_or_default()
    };
    let send = move |event: ListEvent| ctx.dispatch(list_id, event);

    view! {
        <div class=move || look().wrapper_class()>
            <input
                type="checkbox"
                tabindex="-1"
                class="todo-list--input-check"
                prop:checked=move || look().checked
                on:change=move |ev| send(ListEvent::SetDone {
                    item: item_id,
                    done: event_target_checked(&ev),
                })
            />
            <input
                type="text"
                class=move || look().text_class()
                prop:value=value
                prop:disabled=move || look().disabled
                on:input=move |ev| send(ListEvent::EditItem {
                    item: item_id,
                    value: event_target_value(&ev),
                })
                on:change=move |_| send(ListEvent::ClearInvalid(item_id))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Tab" {
                        send(ListEvent::ItemKey { item: item_id, key: ItemKey::Tab });
                    }
                }
                on:keyup=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        send(ListEvent::ItemKey { item: item_id, key: ItemKey::Enter });
                    }
                }
            />
            <i
                class="fa fa-times todo-list--button todo-list--button__remove"
                on:click=move |_| send(ListEvent::RemoveItem(item_id))
            />
        </div>
    }
}
