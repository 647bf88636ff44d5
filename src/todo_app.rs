//! App Controller
//!
//! Owns the storage, the id allocator and every open list. Restores
//! persisted lists on startup and routes list events to their controller.

use crate::config::AppConfig;
use crate::controller::{ListController, ListError, ListEvent, ListOutcome, ListResult};
use crate::ids::ListIdAllocator;
use crate::models::ListId;
use crate::store::{KeyScan, KeyValueStorage, ListStore, StoreError};

#[derive(Debug, Clone)]
pub struct TodoApp<S> {
    store: ListStore<S>,
    ids: ListIdAllocator,
    lists: Vec<ListController>,
    config: AppConfig,
}

impl<S: KeyValueStorage> TodoApp<S> {
    /// An app with no lists open
    fn new(storage: S, config: AppConfig) -> Self {
        Self {
            store: ListStore::new(storage, config.key_prefix.clone()),
            ids: ListIdAllocator::new(),
            lists: Vec::new(),
            config,
        }
    }

    /// Restore every persisted list, or open one default list when none
    /// could be opened. Each list is restored on its own; failures are
    /// collected and returned next to the app instead of aborting startup.
    pub fn bootstrap(storage: S, config: AppConfig) -> (Self, Vec<ListError>) {
        let mut app = Self::new(storage, config);
        let mut errors = Vec::new();

        let scan = app.store.scan().unwrap_or_else(|e| {
            errors.push(ListError::from(e));
            KeyScan::default()
        });
        errors.extend(
            scan.out_of_range
                .into_iter()
                .map(|key| ListError::Store(StoreError::KeyOutOfRange(key))),
        );

        // Reserve first so ids of lists that fail to open are never reused
        for &id in &scan.ids {
            app.ids.reserve(id);
        }
        for &id in &scan.ids {
            if let Err(e) = app.open(id) {
                log::error!("[APP] could not restore list {}: {}", id, e);
                errors.push(e);
            }
        }

        if app.lists.is_empty() {
            if let Err(e) = app.new_list() {
                errors.push(e);
            }
        }

        log::info!(
            "[APP] {} lists open, {} startup errors, next id {:?}",
            app.lists.len(),
            errors.len(),
            app.ids.peek()
        );
        (app, errors)
    }

    /// "New List": open a list under a fresh id
    pub fn new_list(&mut self) -> ListResult<ListId> {
        let id = self.ids.allocate().ok_or(ListError::IdsExhausted)?;
        self.open(id)?;
        log::info!("[APP] created list {}", id);
        Ok(id)
    }

    fn open(&mut self, id: ListId) -> ListResult<()> {
        let controller = ListController::open(id, &mut self.store, &self.config)?;
        self.lists.push(controller);
        Ok(())
    }

    /// Route one event to list `id`. Deleted lists are dropped from the app.
    pub fn dispatch(&mut self, id: ListId, event: ListEvent) -> ListResult<ListOutcome> {
        let index = self
            .lists
            .iter()
            .position(|list| list.id() == id)
            .ok_or(ListError::UnknownList(id))?;

        let outcome = self.lists[index].apply(event, &mut self.store)?;
        if outcome == ListOutcome::Deleted {
            self.lists.remove(index);
        }
        Ok(outcome)
    }

    /// "Clear Storage": wipe every key. Open lists stay on screen and are
    /// written again on their next change.
    pub fn clear_storage(&mut self) -> ListResult<()> {
        self.store.clear()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn lists(&self) -> &[ListController] {
        &self.lists
    }

    pub fn list(&self, id: ListId) -> Option<&ListController> {
        self.lists.iter().find(|list| list.id() == id)
    }

    pub fn list_ids(&self) -> Vec<ListId> {
        self.lists.iter().map(ListController::id).collect()
    }

    #[cfg(test)]
    pub fn next_id(&self) -> Option<ListId> {
        self.ids.peek()
    }

    #[cfg(test)]
    pub fn store(&self) -> &ListStore<S> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CorruptRecordPolicy;
    use crate::controller::ItemKey;
    use crate::store::MemoryStorage;
    use std::collections::HashSet;

    fn boot_with(
        entries: &[(&str, &str)],
        config: AppConfig,
    ) -> (TodoApp<MemoryStorage>, Vec<ListError>) {
        TodoApp::bootstrap(MemoryStorage::with_entries(entries.iter().copied()), config)
    }

    fn boot(entries: &[(&str, &str)]) -> TodoApp<MemoryStorage> {
        let (app, errors) = boot_with(entries, AppConfig::default());
        assert!(errors.is_empty(), "{:?}", errors);
        app
    }

    fn stored(app: &TodoApp<MemoryStorage>, key: &str) -> Option<String> {
        app.store().backend().get_item(key).unwrap()
    }

    #[test]
    fn test_empty_storage_opens_default_list() {
        let app = boot(&[]);

        assert_eq!(app.list_ids(), vec![ListId(0)]);
        let list = app.list(ListId(0)).unwrap().list();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].value, "");
        assert!(!list.items[0].done);
        assert_eq!(
            stored(&app, "list-0").as_deref(),
            Some(r#"["New List",{"value":"","done":false}]"#)
        );
        assert_eq!(app.next_id(), Some(ListId(1)));
    }

    #[test]
    fn test_restore_lists_and_continue_numbering() {
        let mut app = boot(&[
            ("list-0", r#"["Groceries",{"value":"Milk","done":false}]"#),
            ("list-3", r#"["Chores",{"value":"Trash","done":true}]"#),
        ]);

        assert_eq!(app.list_ids(), vec![ListId(0), ListId(3)]);
        assert!(!app.list(ListId(0)).unwrap().list().items[0].done);
        assert!(app.list(ListId(3)).unwrap().list().items[0].done);
        assert_eq!(app.list(ListId(3)).unwrap().list().title, "Chores");

        assert_eq!(app.new_list().unwrap(), ListId(4));
    }

    #[test]
    fn test_restore_ignores_enumeration_order() {
        let mut app = boot(&[
            ("list-3", r#"["Chores"]"#),
            ("list-0", r#"["Groceries"]"#),
        ]);

        assert_eq!(app.list_ids(), vec![ListId(0), ListId(3)]);
        assert_eq!(app.new_list().unwrap(), ListId(4));
    }

    #[test]
    fn test_foreign_keys_do_not_create_lists() {
        let app = boot(&[("theme", "dark"), ("list-x", "[]")]);

        assert_eq!(app.list_ids(), vec![ListId(0)]);
        assert_eq!(stored(&app, "theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_ids_unique_across_creations_and_deletions() {
        let mut app = boot(&[("list-2", r#"["a"]"#)]);
        let mut seen = HashSet::new();
        seen.insert(ListId(2));

        for round in 0..5 {
            let id = app.new_list().unwrap();
            assert!(seen.insert(id), "id {} reused", id);
            if round % 2 == 0 {
                app.dispatch(id, ListEvent::DeleteList).unwrap();
            }
        }

        let open: HashSet<ListId> = app.list_ids().into_iter().collect();
        assert_eq!(open.len(), app.lists().len());
    }

    #[test]
    fn test_delete_list_removes_storage_and_view() {
        let mut app = boot(&[]);
        let second = app.new_list().unwrap();

        let outcome = app.dispatch(second, ListEvent::DeleteList).unwrap();

        assert_eq!(outcome, ListOutcome::Deleted);
        assert_eq!(stored(&app, "list-1"), None);
        assert!(app.list(second).is_none());
        assert_eq!(
            app.dispatch(second, ListEvent::AddItem),
            Err(ListError::UnknownList(second))
        );
    }

    #[test]
    fn test_dispatch_routes_to_the_right_list() {
        let mut app = boot(&[]);
        let other = app.new_list().unwrap();
        let item = app.list(other).unwrap().list().items[0].id;

        app.dispatch(other, ListEvent::EditItem { item, value: "Call mum".into() })
            .unwrap();
        app.dispatch(other, ListEvent::ItemKey { item, key: ItemKey::Enter })
            .unwrap();

        assert_eq!(app.list(other).unwrap().list().items.len(), 2);
        assert_eq!(app.list(ListId(0)).unwrap().list().items.len(), 1);
    }

    #[test]
    fn test_clear_storage_keeps_open_lists() {
        let mut app = boot(&[("list-0", r#"["A",{"value":"x","done":false}]"#), ("theme", "dark")]);

        app.clear_storage().unwrap();
        assert!(app.store().backend().is_empty());
        assert_eq!(app.list_ids(), vec![ListId(0)]);

        app.dispatch(ListId(0), ListEvent::SetTitle("B".into())).unwrap();
        assert_eq!(
            stored(&app, "list-0").as_deref(),
            Some(r#"["B",{"value":"x","done":false}]"#)
        );
    }

    #[test]
    fn test_corrupt_record_does_not_block_other_lists() {
        let (mut app, errors) = boot_with(
            &[
                ("list-0", r#"["Groceries",{"value":"Milk","done":false}]"#),
                ("list-1", "oops"),
                ("list-2", r#"["Chores"]"#),
            ],
            AppConfig::default().with_corrupt_records(CorruptRecordPolicy::Fail),
        );

        assert_eq!(app.list_ids(), vec![ListId(0), ListId(2)]);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ListError::Store(StoreError::Corrupt { key, .. }) if key == "list-1"
        ));
        assert_eq!(stored(&app, "list-1").as_deref(), Some("oops"));
        assert_eq!(app.new_list().unwrap(), ListId(3));
    }

    #[test]
    fn test_only_corrupt_record_still_opens_default_list() {
        let (app, errors) = boot_with(
            &[("list-5", "oops")],
            AppConfig::default().with_corrupt_records(CorruptRecordPolicy::Fail),
        );

        assert_eq!(errors.len(), 1);
        assert_eq!(app.list_ids(), vec![ListId(6)]);
        assert_eq!(stored(&app, "list-5").as_deref(), Some("oops"));
    }

    #[test]
    fn test_max_id_restores_and_exhausts_allocation() {
        let (mut app, errors) = boot_with(&[("list-4294967295", r#"["Last"]"#)], AppConfig::default());

        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(app.list_ids(), vec![ListId(u32::MAX)]);
        assert_eq!(app.list(ListId(u32::MAX)).unwrap().list().title, "Last");
        assert_eq!(app.next_id(), None);
        assert_eq!(app.new_list(), Err(ListError::IdsExhausted));
        assert_eq!(app.list_ids(), vec![ListId(u32::MAX)]);
    }

    #[test]
    fn test_out_of_range_key_is_reported_not_dropped() {
        let (app, errors) = boot_with(
            &[("list-4294967296", r#"["Huge"]"#), ("list-1", r#"["Small"]"#)],
            AppConfig::default(),
        );

        assert_eq!(
            errors,
            vec![ListError::Store(StoreError::KeyOutOfRange("list-4294967296".to_string()))]
        );
        assert_eq!(app.list_ids(), vec![ListId(1)]);
        assert_eq!(stored(&app, "list-4294967296").as_deref(), Some(r#"["Huge"]"#));
    }
}
