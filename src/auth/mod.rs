//! Authentication API access

pub mod client;
pub mod models;

pub use client::{AuthApi, HttpAuthClient};
pub use models::{Credentials, LoginResponse};
