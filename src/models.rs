//! Frontend Models
//!
//! In-memory list/item model and the persisted record shape.

use std::fmt;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// Identifier of one list; also the numeric suffix of its storage key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListId(pub u32);

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable per-list item key, used for keyed rendering only
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u32);

/// A single checkable entry
#[derive(Debug, Clone, PartialEq)]
pub struct TodoItem {
    pub id: ItemId,
    pub value: String,
    pub done: bool,
    /// Set by validation when the value is empty; view-only
    pub invalid: bool,
}

impl TodoItem {
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// A named list of items
#[derive(Debug, Clone, PartialEq)]
pub struct TodoList {
    pub id: ListId,
    pub title: String,
    pub items: Vec<TodoItem>,
    /// Completed items are hidden while set; never persisted
    pub hide_completed: bool,
    next_item: u32,
}

impl TodoList {
    pub fn new(id: ListId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            items: Vec::new(),
            hide_completed: false,
            next_item: 0,
        }
    }

    /// Append an item without any validation, returning its key
    pub fn push_item(&mut self, value: impl Into<String>, done: bool) -> ItemId {
        let id = ItemId(self.next_item);
        self.next_item += 1;
        self.items.push(TodoItem {
            id,
            value: value.into(),
            done,
            invalid: false,
        });
        id
    }

    pub fn item(&self, id: ItemId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Snapshot of the persisted projection
    pub fn to_record(&self) -> ListRecord {
        ListRecord {
            title: self.title.clone(),
            items: self
                .items
                .iter()
                .map(|item| ItemRecord {
                    value: item.value.clone(),
                    done: item.done,
                })
                .collect(),
        }
    }

    /// Rebuild a list from its persisted record, preserving item order and flags
    pub fn from_record(id: ListId, record: ListRecord) -> Self {
        let mut list = Self::new(id, record.title);
        for item in record.items {
            list.push_item(item.value, item.done);
        }
        list
    }
}

/// One persisted item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub value: String,
    pub done: bool,
}

/// Persisted list: a JSON array whose first element is the title,
/// followed by one object per item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRecord {
    pub title: String,
    pub items: Vec<ItemRecord>,
}

impl Serialize for ListRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len() + 1))?;
        seq.serialize_element(&self.title)?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for ListRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = ListRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array starting with the list title")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ListRecord, A::Error> {
                let title: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element::<ItemRecord>()? {
                    items.push(item);
                }
                Ok(ListRecord { title, items })
            }
        }

        deserializer.deserialize_seq(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, items: &[(&str, bool)]) -> ListRecord {
        ListRecord {
            title: title.to_string(),
            items: items
                .iter()
                .map(|(value, done)| ItemRecord { value: value.to_string(), done: *done })
                .collect(),
        }
    }

    #[test]
    fn test_record_json_layout() {
        let json = serde_json::to_string(&record("New List", &[("", false)])).unwrap();
        assert_eq!(json, r#"["New List",{"value":"","done":false}]"#);
    }

    #[test]
    fn test_empty_record_keeps_title() {
        let json = serde_json::to_string(&record("Empty", &[])).unwrap();
        assert_eq!(json, r#"["Empty"]"#);

        let parsed: ListRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.title, "Empty");
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_parse_stored_record() {
        let parsed: ListRecord = serde_json::from_str(
            r#"["Chores",{"value":"Trash","done":true},{"value":"Dishes","done":false}]"#,
        )
        .unwrap();
        assert_eq!(parsed, record("Chores", &[("Trash", true), ("Dishes", false)]));
    }

    #[test]
    fn test_reject_malformed_records() {
        assert!(serde_json::from_str::<ListRecord>("[]").is_err());
        assert!(serde_json::from_str::<ListRecord>(r#"{"title":"x"}"#).is_err());
        assert!(serde_json::from_str::<ListRecord>(r#"[1,{"value":"a","done":false}]"#).is_err());
        assert!(serde_json::from_str::<ListRecord>(r#"["t",{"value":"a"}]"#).is_err());
        assert!(serde_json::from_str::<ListRecord>(r#"["t","second title"]"#).is_err());
    }

    #[test]
    fn test_list_record_round_trip() {
        let original = record("Groceries", &[("Milk", false), ("", false), ("Eggs", true)]);
        let list = TodoList::from_record(ListId(2), original.clone());

        assert_eq!(list.items.len(), 3);
        assert_eq!(list.items[2].id, ItemId(2));
        assert_eq!(list.to_record(), original);
    }

    #[test]
    fn test_item_ids_not_reused_after_removal() {
        let mut list = TodoList::new(ListId(0), "t");
        let first = list.push_item("a", false);
        list.items.retain(|item| item.id != first);
        let second = list.push_item("b", false);
        assert_ne!(first, second);
    }
}
