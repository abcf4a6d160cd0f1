//! clinicnav - role-aware session and navigation controller
//!
//! Library interface for the Hospital CMS front-end session logic:
//! persisted role/token handling, navigation descriptors, login against
//! the admin/doctor/patient endpoints and HTML fragment rendering.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

pub use config::Config;
pub use error::{Error, LoginError};
pub use session::{Role, SessionController};
