//! CLI command implementations

use anyhow::Result;
use std::fs;

use crate::auth::{Credentials, HttpAuthClient};
use crate::cli::{
    error, info, print_navigation, print_session, redirect, success, warn, ConsoleNotifier, NavFormat,
    OutputFormat, RenderFragment,
};
use crate::config::{self, Config};
use crate::render::{Footer, Renderer};
use crate::session::{
    FileStore, LoginCategory, NavOutcome, Role, RoleSelection, SessionController,
};

type CliController = SessionController<FileStore, HttpAuthClient, ConsoleNotifier>;

fn load_config() -> Result<Config> {
    Ok(config::load_config_or_default()?)
}

fn controller(config: &Config) -> Result<CliController> {
    let store = FileStore::new(&config.session.state_file);
    let auth = HttpAuthClient::from_config(&config.api)?;
    Ok(SessionController::new(
        store,
        auth,
        ConsoleNotifier,
        config.routes.clone(),
    ))
}

/// Initialize a new clinicnav.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(config::loader::CONFIG_FILENAME);

    if config_path.exists() {
        warn("clinicnav.toml already exists");
        return Ok(());
    }

    fs::write(config_path, config::loader::default_config_content())?;

    success("Created clinicnav.toml");
    info("Set api.base_url and run 'clinicnav login <category> --username <name>'");

    Ok(())
}

/// Show the persisted session
pub async fn status(format: OutputFormat) -> Result<()> {
    let config = load_config()?;
    let controller = controller(&config)?;
    let state = controller.snapshot()?;
    let updated_at = controller.store().updated_at()?;

    match format {
        OutputFormat::Table => print_session(&state, updated_at),
        OutputFormat::Json => {
            let view = serde_json::json!({
                "role": state.role,
                "hasToken": state.token.is_some(),
                "valid": state.is_valid(),
                "updatedAt": updated_at,
            });
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    Ok(())
}

/// Derive navigation for a page
pub async fn nav(path: &str, format: NavFormat) -> Result<()> {
    let config = load_config()?;
    let controller = controller(&config)?;

    let outcome = controller.derive_navigation(path)?;

    match format {
        NavFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        NavFormat::Table => match &outcome {
            NavOutcome::Render(nav) => print_navigation(nav),
            NavOutcome::Redirect(to) => redirect(to),
        },
        NavFormat::Html => match &outcome {
            NavOutcome::Render(nav) => {
                let renderer = Renderer::new(&config.routes.root)?;
                print!("{}", renderer.header(nav)?);
            }
            NavOutcome::Redirect(to) => redirect(to),
        },
    }

    Ok(())
}

/// Check page access
pub async fn guard(path: &str) -> Result<()> {
    let config = load_config()?;

    match controller(&config)?.guard_page(path)? {
        Some(to) => redirect(&to),
        None => success(&format!("{} may be shown", path)),
    }

    Ok(())
}

/// Enter the index page
pub async fn index() -> Result<()> {
    let config = load_config()?;
    controller(&config)?.enter_index()?;
    success("Role cleared");
    Ok(())
}

/// Select a role
pub async fn select_role(role: Role) -> Result<()> {
    let config = load_config()?;

    match controller(&config)?.select_role(role)? {
        RoleSelection::Redirect(to) => redirect(&to),
        RoleSelection::LoginRequired { category } => info(&format!(
            "No session token held. Run 'clinicnav login {} --username <name>' first",
            category
        )),
    }

    Ok(())
}

/// Log in against one of the login endpoints
pub async fn login(category: LoginCategory, username: String, password: Option<String>) -> Result<()> {
    let config = load_config()?;
    let controller = controller(&config)?;

    let password = match password {
        Some(password) => password,
        None => dialoguer::Password::new()
            .with_prompt(format!("{} password", category))
            .interact()?,
    };

    info(&format!("Logging in as {} ({})", username, category));

    match controller
        .login(category, Credentials::new(username, password))
        .await
    {
        Ok(logged_in) => {
            success(&format!("Logged in as {}", category.granted_role()));
            redirect(&logged_in.redirect);
            Ok(())
        }
        Err(e) => {
            // The notifier has already shown the reason
            tracing::debug!("Login command failed: {:?}", e);
            error(&format!("Not logged in as {}", category.granted_role()));
            std::process::exit(1);
        }
    }
}

/// Full logout
pub async fn logout() -> Result<()> {
    let config = load_config()?;
    let to = controller(&config)?.logout()?;
    success("Logged out");
    redirect(&to);
    Ok(())
}

/// Patient logout
pub async fn logout_patient() -> Result<()> {
    let config = load_config()?;
    let to = controller(&config)?.logout_patient()?;
    success("Logged out, browsing as patient");
    redirect(&to);
    Ok(())
}

/// Render a page fragment
pub async fn render(fragment: RenderFragment) -> Result<()> {
    let config = load_config()?;
    let renderer = Renderer::new(&config.routes.root)?;

    let html = match fragment {
        RenderFragment::Header { path } => {
            match controller(&config)?.derive_navigation(&path)? {
                NavOutcome::Render(nav) => renderer.header(&nav)?,
                NavOutcome::Redirect(to) => {
                    redirect(&to);
                    return Ok(());
                }
            }
        }
        RenderFragment::Footer => renderer.footer(&Footer::site(&config.routes.patient_dashboard))?,
        RenderFragment::Modal { category } => {
            let form = controller(&config)?.login_form(category);
            renderer.login_modal(&form)?
        }
    };

    print!("{}", html);
    Ok(())
}
