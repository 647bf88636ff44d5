//! UI Components
//!
//! Leptos components projecting the list model.

mod app_header;
mod todo_list_view;
mod todo_item_row;

pub use app_header::mount_header;
pub use todo_list_view::TodoListView;
pub use todo_item_row::TodoItemRow;
