//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::config::AppConfig;
use crate::controller::{ListEvent, ListOutcome};
use crate::models::{ItemId, ListId, TodoItem, TodoList};
use crate::store::LocalStorage;
use crate::todo_app::TodoApp;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Every open list and the storage behind them
    app: RwSignal<TodoApp<LocalStorage>>,
    /// Last storage error, shown under the header
    pub last_error: RwSignal<Option<String>>,
}

impl AppContext {
    /// Restore persisted lists from local storage. Lists that fail to
    /// restore are skipped and their errors shown in the status line.
    pub fn bootstrap(config: AppConfig) -> Self {
        let (app, errors) = TodoApp::bootstrap(LocalStorage, config);
        let last_error = if errors.is_empty() {
            None
        } else {
            for e in &errors {
                log::error!("[APP] startup: {}", e);
            }
            Some(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        };
        Self {
            app: RwSignal::new(app),
            last_error: RwSignal::new(last_error),
        }
    }

    pub fn list_ids(&self) -> Vec<ListId> {
        self.app.with(|app| app.list_ids())
    }

    /// Read from list `id`, if it is still open
    pub fn with_list<T>(&self, id: ListId, f: impl FnOnce(&TodoList) -> T) -> Option<T> {
        self.app.with(|app| app.list(id).map(|c| f(c.list())))
    }

    pub fn with_item<T>(
        &self,
        list: ListId,
        item: ItemId,
        f: impl FnOnce(&TodoItem) -> T,
    ) -> Option<T> {
        self.app
            .with(|app| app.list(list).and_then(|c| c.list().item(item)).map(f))
    }

    /// Send one control event to list `id`
    pub fn dispatch(&self, id: ListId, event: ListEvent) {
        let result = self.app.try_update(|app| app.dispatch(id, event));
        match result {
            Some(Ok(ListOutcome::ItemRejected(invalid))) => {
                log::debug!("[APP] list {}: {} items need text first", id, invalid.len());
            }
            Some(Ok(_)) => self.clear_error(),
            Some(Err(e)) => self.report(e),
            None => {}
        }
    }

    /// "New List" button
    pub fn new_list(&self) {
        if let Some(Err(e)) = self.app.try_update(|app| app.new_list()) {
            self.report(e);
        }
    }

    /// "Clear Storage" button
    pub fn clear_storage(&self) {
        if let Some(Err(e)) = self.app.try_update(|app| app.clear_storage()) {
            self.report(e);
        }
    }

    fn report(&self, e: impl std::fmt::Display) {
        log::error!("[APP] {}", e);
        self.last_error.set(Some(e.to_string()));
    }

    fn clear_error(&self) {
        if self.last_error.with_untracked(Option::is_some) {
            self.last_error.set(None);
        }
    }
}
