//! View Projection Helpers
//!
//! CSS class names and the per-item presentation derived from the model.

use crate::models::TodoItem;

pub const LIST_CLASS: &str = "todo-list";
pub const LIST_CLEAN_CLASS: &str = "todo-list__clean";
pub const ITEM_CLASS: &str = "todo-list--item";
pub const ITEM_DONE_CLASS: &str = "todo-list--item__done";
pub const ITEM_INVALID_CLASS: &str = "todo-list--item__invalid";
pub const TEXT_CLASS: &str = "todo-list--input-text";
pub const TEXT_DONE_CLASS: &str = "todo-list--input-text__done";

/// How one item is drawn. Every completion field derives from `done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemPresentation {
    pub checked: bool,
    pub wrapper_done: bool,
    pub text_done: bool,
    pub disabled: bool,
    pub invalid: bool,
}

impl ItemPresentation {
    pub fn of(item: &TodoItem) -> Self {
        Self {
            checked: item.done,
            wrapper_done: item.done,
            text_done: item.done,
            disabled: item.done,
            invalid: item.invalid,
        }
    }

    pub fn wrapper_class(&self) -> String {
        let mut c = String::from(ITEM_CLASS);
        if self.wrapper_done {
            c.push(' ');
            c.push_str(ITEM_DONE_CLASS);
        }
        if self.invalid {
            c.push(' ');
            c.push_str(ITEM_INVALID_CLASS);
        }
        c
    }

    pub fn text_class(&self) -> String {
        if self.text_done {
            format!("{} {}", TEXT_CLASS, TEXT_DONE_CLASS)
        } else {
            TEXT_CLASS.to_string()
        }
    }
}

pub fn list_class(hide_completed: bool) -> String {
    if hide_completed {
        format!("{} {}", LIST_CLASS, LIST_CLEAN_CLASS)
    } else {
        LIST_CLASS.to_string()
    }
}

/// Label of the show/hide completed control
pub fn toggle_label(hide_completed: bool) -> &'static str {
    if hide_completed {
        "show completed"
    } else {
        "hide completed"
    }
}
