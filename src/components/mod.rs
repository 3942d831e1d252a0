//! UI Components
//!
//! Reusable Leptos components.

mod new_todo_form;
mod todo_list;
mod notice_banner;
mod delete_confirm_button;

pub use new_todo_form::NewTodoForm;
pub use todo_list::TodoList;
pub use notice_banner::NoticeBanner;
pub use delete_confirm_button::DeleteConfirmButton;
