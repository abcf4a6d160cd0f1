//! Client-side role and session handling

mod controller;
pub mod forms;
pub mod navigation;
pub mod notice;
mod role;
pub mod store;

pub use controller::{LoginSuccess, SessionController, SessionState};
pub use forms::{FormField, InputKind, LoginForm};
pub use navigation::{
    is_index_path, ActionTarget, HeaderLayout, NavAction, NavActionKind, NavOutcome,
    NavigationDescriptor, Redirect, RoleSelection,
};
pub use notice::{LogNotifier, Notifier, RecordingNotifier, SESSION_EXPIRED};
pub use role::{LoginCategory, Role};
pub use store::{FileStore, MemoryStore, SessionStore, ROLE_KEY, TOKEN_KEY};
