//! Todo Lists App
//!
//! Root component: header chrome plus one section per open list.

use leptos::html;
use leptos::prelude::*;

use crate::components::{mount_header, TodoListView};
use crate::config::AppConfig;
use crate::context::AppContext;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::bootstrap(AppConfig::default());
    provide_context(ctx);

    // Header chrome is built once, after the <header> node exists
    let header_ref = NodeRef::<html::Header>::new();
    Effect::new(move |mounted: Option<bool>| {
        if mounted == Some(true) {
            return true;
        }
        let Some(header) = header_ref.get() else {
            return false;
        };
        if let Err(e) = mount_header(&header, ctx) {
            log::error!("[APP] failed to build header: {:?}", e);
        }
        true
    });

    view! {
        <header node_ref=header_ref></header>
        {move || ctx.last_error.get().map(|msg| view! { <p class="app-status">{msg}</p> })}
        <main class="container">
            <For
                each=move || ctx.list_ids()
                key=|id| *id
                children=move |id| view! { <TodoListView id=id /> }
            />
        </main>
    }
}
