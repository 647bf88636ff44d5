//! List Controller
//!
//! Per-list state machine. UI controls emit [`ListEvent`]s; [`ListController::apply`]
//! mutates the model and writes the full record back through the [`ListStore`].

use std::fmt;

use crate::config::{AppConfig, CorruptRecordPolicy};
use crate::models::{ItemId, ListId, ListRecord, TodoItem, TodoList};
use crate::store::{KeyValueStorage, ListStore, StoreError};

pub type ListResult<T> = Result<T, ListError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// The list was deleted; no further events are accepted
    Deleted(ListId),
    UnknownList(ListId),
    UnknownItem(ListId, ItemId),
    /// Every list id has been handed out
    IdsExhausted,
    Store(StoreError),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::Deleted(id) => write!(f, "List {} has been deleted", id),
            ListError::UnknownList(id) => write!(f, "No open list {}", id),
            ListError::UnknownItem(list, item) => {
                write!(f, "List {} has no item {}", list, item.0)
            }
            ListError::IdsExhausted => write!(f, "No list ids left to allocate"),
            ListError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ListError {}

impl From<StoreError> for ListError {
    fn from(e: StoreError) -> Self {
        ListError::Store(e)
    }
}

/// Keys on an item's text field that append a new blank item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKey {
    Tab,
    Enter,
}

/// Everything a list's controls can ask for
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    SetTitle(String),
    AddItem,
    EditItem { item: ItemId, value: String },
    /// Text field change event; drops the invalid marker
    ClearInvalid(ItemId),
    ItemKey { item: ItemId, key: ItemKey },
    SetDone { item: ItemId, done: bool },
    RemoveItem(ItemId),
    ToggleCompleted,
    DeleteList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Updated,
    ItemAdded(ItemId),
    /// Add refused because these items are empty
    ItemRejected(Vec<ItemId>),
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Active,
    Deleted,
}

#[derive(Debug, Clone)]
pub struct ListController {
    list: TodoList,
    phase: Phase,
}

impl ListController {
    /// Open list `id`: restore it from storage when a record exists,
    /// otherwise start with one empty item. Always persists before returning.
    pub fn open<S: KeyValueStorage>(
        id: ListId,
        store: &mut ListStore<S>,
        config: &AppConfig,
    ) -> ListResult<Self> {
        let list = match store.get(id) {
            Ok(Some(record)) => {
                log::debug!("[LIST] restoring list {} ({} items)", id, record.items.len());
                TodoList::from_record(id, record)
            }
            Ok(None) => Self::fresh(id, config),
            Err(e @ StoreError::Corrupt { .. }) => match config.corrupt_records {
                CorruptRecordPolicy::Reset => {
                    log::warn!("[LIST] {}; starting list {} fresh", e, id);
                    Self::fresh(id, config)
                }
                CorruptRecordPolicy::Fail => return Err(e.into()),
            },
            Err(e) => return Err(e.into()),
        };

        let controller = Self {
            list,
            phase: Phase::Active,
        };
        controller.persist(store)?;
        Ok(controller)
    }

    fn fresh(id: ListId, config: &AppConfig) -> TodoList {
        let mut list = TodoList::new(id, config.default_title.clone());
        list.push_item("", false);
        list
    }

    pub fn id(&self) -> ListId {
        self.list.id
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }

    pub fn is_deleted(&self) -> bool {
        self.phase == Phase::Deleted
    }

    pub fn record(&self) -> ListRecord {
        self.list.to_record()
    }

    /// Route one UI event to its operation
    pub fn apply<S: KeyValueStorage>(
        &mut self,
        event: ListEvent,
        store: &mut ListStore<S>,
    ) -> ListResult<ListOutcome> {
        if self.is_deleted() {
            return Err(ListError::Deleted(self.id()));
        }

        match event {
            ListEvent::SetTitle(title) => {
                self.list.title = title;
                self.persist(store)?;
                Ok(ListOutcome::Updated)
            }
            ListEvent::AddItem => self.add_item(store, "", false),
            ListEvent::EditItem { item, value } => {
                self.item_mut(item)?.value = value;
                self.persist(store)?;
                Ok(ListOutcome::Updated)
            }
            ListEvent::ClearInvalid(item) => {
                self.item_mut(item)?.invalid = false;
                Ok(ListOutcome::Updated)
            }
            ListEvent::ItemKey { item, key } => {
                self.item_mut(item)?;
                log::debug!("[LIST] {:?} on item {} of list {}", key, item.0, self.id());
                self.persist(store)?;
                self.add_item(store, "", false)
            }
            ListEvent::SetDone { item, done } => self.set_done(store, item, done),
            ListEvent::RemoveItem(item) => self.remove_item(store, item),
            ListEvent::ToggleCompleted => {
                self.toggle_completed();
                Ok(ListOutcome::Updated)
            }
            ListEvent::DeleteList => self.delete(store),
        }
    }

    /// Append an item if every existing item has text; otherwise mark the
    /// empty ones and refuse.
    pub fn add_item<S: KeyValueStorage>(
        &mut self,
        store: &mut ListStore<S>,
        value: &str,
        done: bool,
    ) -> ListResult<ListOutcome> {
        if !self.validate_items() {
            let invalid: Vec<ItemId> = self
                .list
                .items
                .iter()
                .filter(|item| item.is_empty())
                .map(|item| item.id)
                .collect();
            log::debug!("[LIST] add rejected on list {}: {} empty items", self.id(), invalid.len());
            return Ok(ListOutcome::ItemRejected(invalid));
        }

        let id = self.list.push_item(value, done);
        if let Err(e) = self.persist(store) {
            self.list.items.pop();
            return Err(e);
        }
        Ok(ListOutcome::ItemAdded(id))
    }

    /// Flag every empty item as invalid. Returns whether all items have text.
    /// Flags are only ever added here.
    pub fn validate_items(&mut self) -> bool {
        let mut valid = true;
        for item in self.list.items.iter_mut().filter(|item| item.is_empty()) {
            item.invalid = true;
            valid = false;
        }
        valid
    }

    pub fn remove_item<S: KeyValueStorage>(
        &mut self,
        store: &mut ListStore<S>,
        item: ItemId,
    ) -> ListResult<ListOutcome> {
        let index = self
            .list
            .items
            .iter()
            .position(|i| i.id == item)
            .ok_or(ListError::UnknownItem(self.id(), item))?;
        self.list.items.remove(index);
        self.persist(store)?;
        Ok(ListOutcome::Updated)
    }

    /// Checkbox change. Completion class, disabled state and checkbox all
    /// derive from `done`.
    pub fn set_done<S: KeyValueStorage>(
        &mut self,
        store: &mut ListStore<S>,
        item: ItemId,
        done: bool,
    ) -> ListResult<ListOutcome> {
        self.item_mut(item)?.done = done;
        self.persist(store)?;
        Ok(ListOutcome::Updated)
    }

    /// View-only filter; not persisted
    pub fn toggle_completed(&mut self) {
        self.list.hide_completed = !self.list.hide_completed;
    }

    /// Drop the storage entry. Terminal.
    pub fn delete<S: KeyValueStorage>(
        &mut self,
        store: &mut ListStore<S>,
    ) -> ListResult<ListOutcome> {
        store.remove(self.id())?;
        self.phase = Phase::Deleted;
        log::info!("[LIST] deleted list {}", self.id());
        Ok(ListOutcome::Deleted)
    }

    /// Overwrite the stored record with the current model
    pub fn persist<S: KeyValueStorage>(&self, store: &mut ListStore<S>) -> ListResult<()> {
        if self.is_deleted() {
            return Err(ListError::Deleted(self.id()));
        }
        store.set(self.id(), &self.record())?;
        Ok(())
    }

    fn item_mut(&mut self, item: ItemId) -> ListResult<&mut TodoItem> {
        let list_id = self.list.id;
        self.list
            .item_mut(item)
            .ok_or(ListError::UnknownItem(list_id, item))
    }
}
