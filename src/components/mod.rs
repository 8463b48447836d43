//! UI Components
//!
//! Leptos components for the sidebar, the task panel and the empty states.

mod delete_confirm_button;
mod editable_text;
mod empty_state;
mod new_entry_form;
mod sidebar;
mod task_panel;

pub use delete_confirm_button::DeleteConfirmButton;
pub use editable_text::EditableText;
pub use empty_state::{NoListsState, SelectListPrompt};
pub use new_entry_form::NewEntryForm;
pub use sidebar::Sidebar;
pub use task_panel::TaskPanel;
