//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Authentication API client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the login endpoint paths are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout for login calls
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
}

fn default_state_file() -> PathBuf {
    PathBuf::from("./.clinicnav/session.json")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
        }
    }
}

/// Redirect targets. `{token}` is replaced with the persisted token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_root")]
    pub root: String,

    #[serde(default = "default_admin_dashboard")]
    pub admin_dashboard: String,

    #[serde(default = "default_doctor_dashboard")]
    pub doctor_dashboard: String,

    #[serde(default = "default_patient_dashboard")]
    pub patient_dashboard: String,

    #[serde(default = "default_logged_patient_dashboard")]
    pub logged_patient_dashboard: String,

    #[serde(default = "default_patient_appointments")]
    pub patient_appointments: String,

    /// Landing page after a successful admin login
    #[serde(default = "default_admin_home")]
    pub admin_home: String,

    /// Landing page after a successful doctor login
    #[serde(default = "default_doctor_home")]
    pub doctor_home: String,
}

fn default_root() -> String {
    "/".to_string()
}

fn default_admin_dashboard() -> String {
    "/adminDashboard/{token}".to_string()
}

fn default_doctor_dashboard() -> String {
    "/doctorDashboard/{token}".to_string()
}

fn default_patient_dashboard() -> String {
    "/pages/patientDashboard.html".to_string()
}

fn default_logged_patient_dashboard() -> String {
    "/pages/loggedPatientDashboard.html".to_string()
}

fn default_patient_appointments() -> String {
    "/pages/patientAppointments.html".to_string()
}

fn default_admin_home() -> String {
    "/admin/dashboard".to_string()
}

fn default_doctor_home() -> String {
    "/doctor/dashboard".to_string()
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            admin_dashboard: default_admin_dashboard(),
            doctor_dashboard: default_doctor_dashboard(),
            patient_dashboard: default_patient_dashboard(),
            logged_patient_dashboard: default_logged_patient_dashboard(),
            patient_appointments: default_patient_appointments(),
            admin_home: default_admin_home(),
            doctor_home: default_doctor_home(),
        }
    }
}

impl RoutesConfig {
    /// Substitute the `{token}` placeholder in a route template
    pub fn with_token(template: &str, token: &str) -> String {
        template.replace("{token}", token)
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}
