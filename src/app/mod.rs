// ABOUTME: Main application structure and state management for the TUI

pub mod events;
pub mod state;
pub mod text_editor;

pub use events::{AppEvent, EventHandler};
pub use state::{App, AppState, Notification, NotificationType};
pub use text_editor::TextEditor;
