//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::session::{
    ActionTarget, NavigationDescriptor, Notifier, Redirect, SessionState,
};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Print a redirect decision
pub fn redirect(redirect: &Redirect) {
    println!("{} {}", "→".cyan(), redirect.to.bold());
}

/// Shows notices as terminal warnings
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        tracing::debug!(notice = message, "User notice");
        warn(message);
    }
}

/// Print the persisted session; the token itself is never shown
pub fn print_session(state: &SessionState, updated_at: Option<chrono::DateTime<chrono::Utc>>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Role").fg(Color::Cyan),
            Cell::new("Token").fg(Color::Cyan),
            Cell::new("Valid").fg(Color::Cyan),
            Cell::new("Updated").fg(Color::Cyan),
        ]);

    let role = state
        .role
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());
    let token = if state.token.is_some() { "present" } else { "absent" };
    let (valid, color) = if state.is_valid() {
        ("yes", Color::Green)
    } else {
        ("no", Color::Red)
    };

    let updated = updated_at
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    table.add_row(vec![
        Cell::new(role),
        Cell::new(token),
        Cell::new(valid).fg(color),
        Cell::new(updated),
    ]);
    println!("{table}");
}

fn describe_target(target: &ActionTarget) -> String {
    match target {
        ActionTarget::SelectRole(role) => format!("select role {}", role),
        ActionTarget::Route(route) => format!("go to {}", route),
        ActionTarget::Modal(name) => format!("open {} modal", name),
        ActionTarget::LoginForm(category) => format!("open {} login", category),
        ActionTarget::SignupForm => "open signup".to_string(),
        ActionTarget::Logout => "logout".to_string(),
        ActionTarget::LogoutPatient => "patient logout".to_string(),
    }
}

/// Print a table of navigation actions
pub fn print_navigation(nav: &NavigationDescriptor) {
    if nav.actions.is_empty() {
        info("No navigation actions for this page");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Action").fg(Color::Cyan),
            Cell::new("Does").fg(Color::Cyan),
        ]);

    for action in &nav.actions {
        table.add_row(vec![
            Cell::new(action.label()),
            Cell::new(describe_target(&action.target)),
        ]);
    }

    println!("{table}");
}
