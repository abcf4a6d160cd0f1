//! CLI interface for clinicnav

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

use crate::session::{LoginCategory, Role};

#[derive(Parser)]
#[command(name = "clinicnav")]
#[command(version)]
#[command(about = "Role-aware session and navigation controller for the Hospital CMS front end", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new clinicnav.toml configuration file
    Init,

    /// Show the persisted role and whether a token is held
    Status {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Derive the header navigation for a page
    Nav {
        /// Page path, e.g. /pages/patientDashboard.html
        #[arg(short, long, default_value = "/")]
        path: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: NavFormat,
    },

    /// Check whether a content page may be shown without a role
    Guard {
        /// Page path
        #[arg(short, long)]
        path: String,
    },

    /// Enter the index page (forgets the selected role)
    Index,

    /// Choose a role on the landing page
    SelectRole {
        /// admin, doctor, patient or loggedPatient
        #[arg(value_parser = parse_role)]
        role: Role,
    },

    /// Log in against the admin, doctor or patient endpoint
    Login {
        /// admin, doctor or patient
        #[arg(value_parser = parse_category)]
        category: LoginCategory,

        /// Username (admin) or email (doctor, patient)
        #[arg(short, long)]
        username: String,

        /// Password; prompted for when omitted
        #[arg(short, long, env = "CLINICNAV_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Clear role and token
    Logout,

    /// Drop the token but stay an anonymous patient
    LogoutPatient,

    /// Render page fragments as HTML
    Render {
        #[command(subcommand)]
        fragment: RenderFragment,
    },
}

#[derive(Subcommand)]
pub enum RenderFragment {
    /// Page header for the current session
    Header {
        /// Page path
        #[arg(short, long, default_value = "/")]
        path: String,
    },

    /// Site footer
    Footer,

    /// Login modal body
    Modal {
        /// admin, doctor or patient
        #[arg(value_parser = parse_category)]
        category: LoginCategory,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NavFormat {
    Table,
    Json,
    Html,
}

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse::<Role>().map_err(|e| e.to_string())
}

fn parse_category(s: &str) -> Result<LoginCategory, String> {
    s.parse::<LoginCategory>().map_err(|e| e.to_string())
}
